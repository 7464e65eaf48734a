use sentinel_shared::{Language, ReviewRequest, ReviewResult};

use crate::api::{ApiClient, FetchTransport, LocalTokenStore, TokenStore, Transport};
use crate::error::ApiError;

/// "Load Sample" 按钮填充的示例代码
pub const SAMPLE_CODE: &str = "// Example: Add your code here
function calculateSum(a, b) {
  return a + b;
}

const result = calculateSum(5, 3);
console.log(result);";

/// AI 代码审查服务
#[derive(Clone)]
pub struct ReviewService<T = FetchTransport, S = LocalTokenStore> {
    api: ApiClient<T, S>,
}

impl<T: Transport, S: TokenStore> ReviewService<T, S> {
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self { api }
    }

    /// 提交代码审查
    ///
    /// 空代码在客户端直接拒绝，不发出请求。
    pub async fn submit(&self, code: &str, language: Language) -> Result<ReviewResult, ApiError> {
        if code.trim().is_empty() {
            return Err(ApiError::Validation(
                "Please enter some code to review".to_string(),
            ));
        }

        let req = ReviewRequest {
            code: code.to_string(),
            language,
        };
        let resp = self.api.call(&req).await?;

        Ok(ReviewResult {
            review_text: resp.review,
            code: req.code,
            language,
        })
    }
}
