//! 视图存活标记
//!
//! 网络请求一旦发出就无法取消；视图在响应返回前卸载时，结果必须丢弃。
//! 每个异步视图操作在应用结果前检查 `ViewGuard::is_alive()`。
//! 同一视图内会被重复触发的加载（翻页、切换过滤）再用 `LatestOnly`
//! 丢弃被新请求取代的旧结果。

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use leptos::prelude::on_cleanup;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// 只接受最近一次发起的请求结果
#[derive(Debug, Clone, Default)]
pub struct LatestOnly(Arc<AtomicU64>);

/// 某一次请求的序号
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发起新请求，之前签发的 Ticket 全部失效
    pub fn issue(&self) -> Ticket {
        let generation = self.0.fetch_add(1, Ordering::AcqRel) + 1;
        Ticket {
            generation,
            latest: self.0.clone(),
        }
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }
}

/// 绑定到当前组件生命周期的取消标记
#[derive(Debug, Clone)]
pub struct ViewGuard {
    token: CancelToken,
}

impl ViewGuard {
    /// 创建并注册卸载回调，必须在组件函数体内调用
    pub fn new() -> Self {
        let token = CancelToken::new();
        let on_unmount = token.clone();
        on_cleanup(move || on_unmount.cancel());
        Self { token }
    }

    pub fn is_alive(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// 启动异步任务，仅当视图仍存活时才把结果交给 `apply`
    pub fn spawn<T, Fut, F>(&self, fut: Fut, apply: F)
    where
        T: 'static,
        Fut: Future<Output = T> + 'static,
        F: FnOnce(T) + 'static,
    {
        let token = self.token.clone();
        spawn_local(async move {
            let output = fut.await;
            if token.is_cancelled() {
                log::debug!("[View] Discarding result for unmounted view");
                return;
            }
            apply(output);
        });
    }

    /// 同 `spawn`，但结果还必须来自 `latest` 最近一次签发的请求
    pub fn spawn_latest<T, Fut, F>(&self, latest: &LatestOnly, fut: Fut, apply: F)
    where
        T: 'static,
        Fut: Future<Output = T> + 'static,
        F: FnOnce(T) + 'static,
    {
        let ticket = latest.issue();
        self.spawn(fut, move |output| {
            if !ticket.is_current() {
                log::debug!("[View] Discarding superseded result");
                return;
            }
            apply(output);
        });
    }
}
