//! HTTP 客户端
//!
//! 负责：拼接 URL、注入 Bearer Token、统一错误形状、认证失败时清理会话。
//! 认证失败不会直接操作导航：客户端只清除 Token 并通知注册的监听者，
//! 由会话层切换状态，再由路由服务根据认证状态重定向到登录页。

mod token;
mod transport;


use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use sentinel_shared::protocol::{ApiRequest, HttpMethod};
use sentinel_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

use crate::config::AppConfig;
use crate::error::ApiError;

pub use token::{LocalTokenStore, TokenStore};
pub use transport::{FetchTransport, HttpRequest, HttpResponse, Transport};

#[cfg(test)]
pub use token::MemoryTokenStore;
#[cfg(test)]
pub use transport::MockTransport;

/// 强制登出时的回调
pub type TeardownListener = Arc<dyn Fn() + Send + Sync>;

/// 浏览器环境下的客户端
pub type BrowserApi = ApiClient<FetchTransport, LocalTokenStore>;

/// 单次请求的可选参数
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// 额外请求头，会覆盖默认的 `Content-Type`
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::method(HttpMethod::Get)
    }
}

impl RequestOptions {
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, data: &B) -> Result<Self, ApiError> {
        let body =
            serde_json::to_string(data).map_err(|e| ApiError::Validation(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }
}

#[derive(Clone)]
pub struct ApiClient<T = FetchTransport, S = LocalTokenStore> {
    config: Arc<AppConfig>,
    transport: T,
    tokens: S,
    on_teardown: Option<TeardownListener>,
}

impl BrowserApi {
    pub fn browser(config: AppConfig) -> Self {
        Self::new(config, FetchTransport, LocalTokenStore)
    }
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub fn new(config: AppConfig, transport: T, tokens: S) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            tokens,
            on_teardown: None,
        }
    }

    /// 注册强制登出监听者（由会话层注入）
    pub fn with_teardown(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_teardown = Some(Arc::new(listener));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// 发送请求并返回解析后的 JSON
    ///
    /// 任何失败都会先按认证关键字分类；认证失败在返回错误前执行强制登出。
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let token = self.tokens.get();
        match self.send(endpoint, options, token.as_deref()).await {
            Ok(data) => Ok(data),
            Err(err) => {
                log::error!("[Api] API request failed for {}: {}", endpoint, err);
                let err = err.classify();
                if let (true, Some(sent)) = (err.is_auth(), token.as_deref()) {
                    self.teardown(sent);
                }
                Err(err)
            }
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        options: RequestOptions,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.config.url(endpoint);
        let mut req =
            HttpRequest::new(&url, options.method).with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
        for (key, value) in &options.headers {
            req = req.with_header(key, value);
        }
        if let Some(token) = token {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        if let Some(body) = options.body {
            req = req.with_body(body);
        }

        log::debug!("[Api] {} {}", options.method.as_str(), url);

        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let fallback = || format!("HTTP error! status: {}", resp.status);

        // 非 JSON 响应：响应体文本即错误消息
        if !resp.is_json() {
            let message = if resp.body.trim().is_empty() {
                fallback()
            } else {
                resp.body.clone()
            };
            return Err(ApiError::Server {
                status: resp.status,
                message,
            });
        }

        let data: Value = if resp.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))?
        };

        if !resp.ok() {
            let message = ["message", "error"]
                .iter()
                .find_map(|key| data.get(key).and_then(Value::as_str))
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(fallback);
            return Err(ApiError::Server {
                status: resp.status,
                message,
            });
        }

        Ok(data)
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::method(HttpMethod::Get))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, data: &B) -> Result<Value, ApiError> {
        let options = RequestOptions::method(HttpMethod::Post).json(data)?;
        self.request(endpoint, options).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, data: &B) -> Result<Value, ApiError> {
        let options = RequestOptions::method(HttpMethod::Put).json(data)?;
        self.request(endpoint, options).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::method(HttpMethod::Delete))
            .await
    }

    /// 按端点表发送类型化请求
    pub async fn call<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let mut options = RequestOptions::method(R::METHOD);
        if R::METHOD.carries_body() {
            options = options.json(req)?;
        }
        let data = self.request(&req.endpoint(), options).await?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 强制登出：清除持久化 Token 并通知监听者
    ///
    /// `token` 是失败请求实际携带的 Token。仅当它仍是当前 Token 时生效：
    /// 多个并发失败只触发一次，请求发出后重新登录写入的 Token 也不受影响。
    /// 返回本次调用是否真正执行了清理。
    pub fn teardown(&self, token: &str) -> bool {
        if !self.tokens.remove_if(token) {
            return false;
        }
        log::warn!("[Auth] Authentication error, session cleared");
        if let Some(listener) = &self.on_teardown {
            listener();
        }
        true
    }
}
