//! 业务服务层
//!
//! 服务只做端点调用与响应形状归一化，从不吞掉错误：
//! 所有失败原样传播给视图，由视图决定如何展示与重试。

mod auth;
mod dashboard;
mod review;

#[cfg(test)]
mod tests;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use review::{ReviewService, SAMPLE_CODE};
