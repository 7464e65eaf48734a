use sentinel_shared::protocol::{LoginRequest, ProfileRequest, RegisterRequest};
use sentinel_shared::{AuthResponse, User};

use crate::api::{ApiClient, FetchTransport, LocalTokenStore, TokenStore, Transport};
use crate::error::ApiError;

/// 认证服务：登录、注册、获取当前用户
#[derive(Clone)]
pub struct AuthService<T = FetchTransport, S = LocalTokenStore> {
    api: ApiClient<T, S>,
}

impl<T: Transport, S: TokenStore> AuthService<T, S> {
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self { api }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.api.call(&req).await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let req = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.api.call(&req).await
    }

    /// 使用已持久化的 Token 获取当前用户
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let resp = self.api.call(&ProfileRequest).await?;
        Ok(resp.user)
    }

    /// 纯本地操作：只移除持久化 Token，不发请求
    pub fn logout(&self) {
        self.api.tokens().remove();
    }

    pub fn token(&self) -> Option<String> {
        self.api.tokens().get()
    }

    /// 只移除指定的 Token；已被新登录替换时不做任何事
    pub fn forget_token(&self, token: &str) -> bool {
        self.api.tokens().remove_if(token)
    }

    pub fn store_token(&self, token: &str) {
        self.api.tokens().set(token);
    }
}
