use sentinel_shared::protocol::{HistoryRequest, StatsRequest};
use sentinel_shared::{DashboardStats, HistoryFilters, HistoryPage};

use crate::api::{ApiClient, FetchTransport, LocalTokenStore, TokenStore, Transport};
use crate::error::ApiError;

/// 控制面板与历史记录服务
#[derive(Clone)]
pub struct DashboardService<T = FetchTransport, S = LocalTokenStore> {
    api: ApiClient<T, S>,
}

impl<T: Transport, S: TokenStore> DashboardService<T, S> {
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self { api }
    }

    /// 聚合统计，兼容 `{data: ...}` 与直接返回两种形状
    pub async fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        let envelope = self.api.call(&StatsRequest).await?;
        Ok(envelope.into_inner())
    }

    /// 分页历史
    ///
    /// 响应缺失（`null`、`{}`、`{data: null}`）时归一化为空页，不视为错误。
    pub async fn get_history(&self, filters: HistoryFilters) -> Result<HistoryPage, ApiError> {
        let resp = self.api.call(&HistoryRequest { filters }).await?;
        let page = resp.map(|envelope| envelope.into_inner()).unwrap_or_default();
        log::debug!(
            "[Api] history page {} returned {} records",
            filters.page,
            page.suggestions.len()
        );
        Ok(page)
    }
}
