//! 基于 `web_sys::fetch` 的最小请求函数
//!
//! 一次调用完成发送与读取：状态码、Content-Type 与响应体文本一起返回，
//! 不在这一层解释状态码。

use sentinel_shared::protocol::HttpMethod;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// fetch 层错误，上层统一归为网络错误
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build request: {0}")]
    RequestBuildFailed(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Failed to read response: {0}")]
    ResponseParseFailed(String),
}

/// 将 JsValue 错误转换为可读文本（TypeError 等对象优先取其 message）
pub(super) fn js_error_text(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// 已读完的响应
pub struct FetchedText {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

fn build_request<'a>(
    url: &str,
    method: HttpMethod,
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    body: Option<&str>,
) -> Result<Request, HttpError> {
    let build_err = |e: JsValue| HttpError::RequestBuildFailed(js_error_text(&e));

    let js_headers = Headers::new().map_err(build_err)?;
    for (name, value) in headers {
        js_headers.set(name, value).map_err(build_err)?;
    }

    let init = RequestInit::new();
    init.set_method(method.as_str());
    init.set_headers(&js_headers.into());
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(body));
    }

    Request::new_with_str_and_init(url, &init).map_err(build_err)
}

async fn read_body(response: &Response) -> Result<String, HttpError> {
    let read_err = |e: JsValue| HttpError::ResponseParseFailed(js_error_text(&e));

    JsFuture::from(response.text().map_err(read_err)?)
        .await
        .map_err(read_err)?
        .as_string()
        .ok_or_else(|| HttpError::ResponseParseFailed("body is not a string".to_string()))
}

/// 发送请求并读取完整响应体
///
/// 只有连接层失败（CORS、断网等）才返回 `NetworkError`，非 2xx 照常返回。
pub async fn fetch_text<'a>(
    url: &str,
    method: HttpMethod,
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    body: Option<&str>,
) -> Result<FetchedText, HttpError> {
    let request = build_request(url, method, headers, body)?;

    let window = web_sys::window()
        .ok_or_else(|| HttpError::NetworkError("window is unavailable".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| HttpError::NetworkError(js_error_text(&e)))?
        .dyn_into()
        .map_err(|e| HttpError::ResponseParseFailed(js_error_text(&e)))?;

    let content_type = response.headers().get("content-type").ok().flatten();
    Ok(FetchedText {
        status: response.status(),
        content_type,
        body: read_body(&response).await?,
    })
}
