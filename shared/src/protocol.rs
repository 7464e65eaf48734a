use crate::{
    AuthResponse, DashboardStats, Envelope, HistoryFilters, HistoryPage, ProfileResponse,
    ReviewRequest, ReviewResponse,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the request value is JSON-encoded into the body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path, relative to the configured base URL.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Path plus query string. Only GET endpoints with filters override this.
    fn endpoint(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Users
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/users/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/users/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Fetch the profile behind the attached bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = ProfileResponse;
    const PATH: &'static str = "/users/profile";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Dashboard
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsRequest;

impl ApiRequest for StatsRequest {
    type Response = Envelope<DashboardStats>;
    const PATH: &'static str = "/dashboard/stats";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Paginated history. A `null` body is tolerated and treated as an empty page.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub filters: HistoryFilters,
}

impl ApiRequest for HistoryRequest {
    type Response = Option<Envelope<HistoryPage>>;
    const PATH: &'static str = "/dashboard/history";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn endpoint(&self) -> String {
        format!("{}?{}", Self::PATH, self.filters.to_query())
    }
}

// =========================================================
// AI review
// =========================================================

impl ApiRequest for ReviewRequest {
    type Response = ReviewResponse;
    const PATH: &'static str = "/ai/get-review";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Language, LanguageFilter};

    #[test]
    fn test_endpoint_table() {
        assert_eq!(LoginRequest::METHOD, HttpMethod::Post);
        assert_eq!(RegisterRequest::PATH, "/users/register");
        assert_eq!(ProfileRequest.endpoint(), "/users/profile");
        assert_eq!(StatsRequest::METHOD, HttpMethod::Get);
        assert_eq!(ReviewRequest::PATH, "/ai/get-review");
    }

    #[test]
    fn test_history_endpoint_has_query() {
        let req = HistoryRequest {
            filters: HistoryFilters {
                page: 3,
                limit: 5,
                language: LanguageFilter::Only(Language::Go),
            },
        };
        assert_eq!(req.endpoint(), "/dashboard/history?page=3&limit=5&language=go");
    }

    #[test]
    fn test_only_mutating_verbs_carry_body() {
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Delete.carries_body());
    }
}
