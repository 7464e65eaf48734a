use std::collections::HashMap;

use sentinel_shared::protocol::HttpMethod;

use crate::web::{HttpError, fetch_text};

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// 传输层特性 (Trait)
/// (?Send) 是因为浏览器环境下 JsFuture 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: 浏览器 fetch
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let headers = req.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        let fetched = fetch_text(&req.url, req.method, headers, req.body.as_deref()).await?;

        Ok(HttpResponse {
            status: fetched.status,
            content_type: fetched.content_type,
            body: fetched.body,
        })
    }
}

// =========================================================
// 测试工具: MockTransport
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(HttpResponse),
    Fail(String),
}

/// 按 URL 返回预设响应并记录发出的请求；克隆体共享状态
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Rc<RefCell<HashMap<String, MockReply>>>,
    /// 回复前让出执行权的次数，用于构造并发交错
    delays: Rc<RefCell<HashMap<String, usize>>>,
    pub requests: Rc<RefCell<Vec<HttpRequest>>>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_json(&self, url: &str, status: u16, body: serde_json::Value) {
        self.replies.borrow_mut().insert(
            url.to_string(),
            MockReply::Respond(HttpResponse {
                status,
                content_type: Some("application/json; charset=utf-8".to_string()),
                body: body.to_string(),
            }),
        );
    }

    pub fn mock_text(&self, url: &str, status: u16, body: &str) {
        self.replies.borrow_mut().insert(
            url.to_string(),
            MockReply::Respond(HttpResponse {
                status,
                content_type: Some("text/html".to_string()),
                body: body.to_string(),
            }),
        );
    }

    pub fn mock_network_failure(&self, url: &str, message: &str) {
        self.replies
            .borrow_mut()
            .insert(url.to_string(), MockReply::Fail(message.to_string()));
    }

    pub fn mock_delay(&self, url: &str, yields: usize) {
        self.delays.borrow_mut().insert(url.to_string(), yields);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = req.url.clone();
        self.requests.borrow_mut().push(req);

        let yields = self.delays.borrow().get(&url).copied().unwrap_or(0);
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }

        match self.replies.borrow().get(&url) {
            Some(MockReply::Respond(resp)) => Ok(resp.clone()),
            Some(MockReply::Fail(msg)) => Err(HttpError::NetworkError(msg.clone())),
            None => Ok(HttpResponse {
                status: 404,
                content_type: Some("text/plain".to_string()),
                body: "Not Found".to_string(),
            }),
        }
    }
}
