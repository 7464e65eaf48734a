use super::*;
use crate::api::{ApiClient, MemoryTokenStore, MockTransport, TokenStore};
use crate::config::AppConfig;
use crate::error::ApiError;
use pretty_assertions::assert_eq;
use sentinel_shared::{HistoryFilters, HistoryPage, Language, LanguageFilter, Pagination};
use serde_json::{Value, json};

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test";

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn create_api(
    transport: &MockTransport,
    tokens: &MemoryTokenStore,
) -> ApiClient<MockTransport, MemoryTokenStore> {
    ApiClient::new(AppConfig::new(BASE), transport.clone(), tokens.clone())
}

fn user_json(id: &str, username: &str) -> Value {
    json!({"id": id, "username": username, "email": format!("{}@x.com", username)})
}

fn sent_body(transport: &MockTransport) -> Value {
    let req = transport.last_request().unwrap();
    serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
}

fn history_json(ids: &[&str], pages: u32) -> Value {
    let records: Vec<Value> = ids
        .iter()
        .map(|id| json!({"_id": id, "language": "rust", "review": "ok"}))
        .collect();
    json!({"suggestions": records, "pagination": {"page": 1, "pages": pages, "limit": 10}})
}

// =========================================================
// AuthService
// =========================================================

#[tokio::test]
async fn test_login_posts_credentials() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.mock_json(
        &url("/users/login"),
        200,
        json!({"token": "tok", "user": user_json("u1", "bob")}),
    );
    let service = AuthService::new(create_api(&transport, &tokens));

    let resp = service.login("bob@x.com", "secret").await.unwrap();

    assert_eq!(resp.token, "tok");
    assert_eq!(resp.user.username, "bob");
    assert_eq!(sent_body(&transport), json!({"email": "bob@x.com", "password": "secret"}));
    // 持久化由会话层负责
    assert_eq!(tokens.get(), None);
}

#[tokio::test]
async fn test_login_rejected() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.mock_json(&url("/users/login"), 400, json!({"message": "Invalid credentials"}));
    let service = AuthService::new(create_api(&transport, &tokens));

    let err = service.login("bob@x.com", "wrong").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Server {
            status: 400,
            message: "Invalid credentials".into()
        }
    );
}

#[tokio::test]
async fn test_register_uses_distinct_endpoint() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.mock_json(
        &url("/users/register"),
        201,
        json!({"token": "t2", "user": user_json("u2", "alice")}),
    );
    let service = AuthService::new(create_api(&transport, &tokens));

    let resp = service
        .register("alice", "alice@x.com", "pw123456")
        .await
        .unwrap();

    assert_eq!(resp.user.username, "alice");
    assert_eq!(transport.last_request().unwrap().url, url("/users/register"));
    assert_eq!(
        sent_body(&transport),
        json!({"username": "alice", "email": "alice@x.com", "password": "pw123456"})
    );
}

#[tokio::test]
async fn test_get_profile_unwraps_user() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    transport.mock_json(&url("/users/profile"), 200, json!({"user": user_json("u1", "bob")}));
    let service = AuthService::new(create_api(&transport, &tokens));

    let user = service.get_profile().await.unwrap();

    assert_eq!(user.id, "u1");
    let req = transport.last_request().unwrap();
    assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Bearer tok"));
}

#[tokio::test]
async fn test_logout_is_local_only() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    let service = AuthService::new(create_api(&transport, &tokens));

    service.logout();

    assert_eq!(tokens.get(), None);
    assert_eq!(service.token(), None);
    assert_eq!(transport.request_count(), 0);
}

// =========================================================
// DashboardService
// =========================================================

#[tokio::test]
async fn test_stats_wrapped_and_bare() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    let service = DashboardService::new(create_api(&transport, &tokens));

    transport.mock_json(&url("/dashboard/stats"), 200, json!({"data": {"reviews": {"total": 7}}}));
    assert_eq!(service.get_stats().await.unwrap().reviews.total, 7);

    transport.mock_json(&url("/dashboard/stats"), 200, json!({"quality": {"score": 82}}));
    let stats = service.get_stats().await.unwrap();
    assert_eq!(stats.quality.score, 82.0);
    assert_eq!(stats.reviews.total, 0);
}

#[tokio::test]
async fn test_history_query_string() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    let service = DashboardService::new(create_api(&transport, &tokens));

    let _ = service.get_history(HistoryFilters::default()).await;
    assert_eq!(
        transport.last_request().unwrap().url,
        url("/dashboard/history?page=1&limit=10&language=all")
    );

    let filters = HistoryFilters::default().with_language(LanguageFilter::Only(Language::Python));
    let _ = service.get_history(filters).await;
    assert_eq!(
        transport.last_request().unwrap().url,
        url("/dashboard/history?page=1&limit=10&language=python")
    );
}

#[tokio::test]
async fn test_history_envelope_shapes() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    let service = DashboardService::new(create_api(&transport, &tokens));
    let endpoint = url("/dashboard/history?page=1&limit=10&language=all");

    transport.mock_json(&endpoint, 200, history_json(&["a", "b"], 1));
    let bare = service.get_history(HistoryFilters::default()).await.unwrap();

    transport.mock_json(&endpoint, 200, json!({"data": history_json(&["a", "b"], 1)}));
    let wrapped = service.get_history(HistoryFilters::default()).await.unwrap();

    assert_eq!(bare, wrapped);
    assert_eq!(bare.suggestions.len(), 2);
    assert_eq!(bare.pagination.pages, Some(1));
}

#[tokio::test]
async fn test_history_absent_data_is_empty_page() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    let service = DashboardService::new(create_api(&transport, &tokens));
    let endpoint = url("/dashboard/history?page=1&limit=10&language=all");

    for body in [json!(null), json!({}), json!({"data": null})] {
        transport.mock_json(&endpoint, 200, body);
        let page = service.get_history(HistoryFilters::default()).await.unwrap();
        assert_eq!(page, HistoryPage::empty());
        assert_eq!(page.pagination, Pagination::default());
    }
}

#[tokio::test]
async fn test_history_page_past_end_is_empty_not_error() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    let service = DashboardService::new(create_api(&transport, &tokens));
    transport.mock_json(
        &url("/dashboard/history?page=2&limit=10&language=all"),
        200,
        json!({"suggestions": [], "pagination": {"page": 2, "pages": 1, "limit": 10, "total": 5}}),
    );

    let filters = HistoryFilters {
        page: 2,
        ..HistoryFilters::default()
    };
    let page = service.get_history(filters).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(page.pagination.total_pages(), 1);
    assert_eq!(page.pagination.total, Some(5));
}

#[tokio::test]
async fn test_history_errors_propagate() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    let service = DashboardService::new(create_api(&transport, &tokens));
    transport.mock_json(
        &url("/dashboard/history?page=1&limit=10&language=all"),
        500,
        json!({"message": "db down"}),
    );

    let err = service.get_history(HistoryFilters::default()).await.unwrap_err();
    assert_eq!(err.message(), "db down");
}

// =========================================================
// ReviewService
// =========================================================

#[tokio::test]
async fn test_submit_sends_exact_body() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    transport.mock_json(
        &url("/ai/get-review"),
        200,
        json!({"review": "❌ Missing input validation"}),
    );
    let service = ReviewService::new(create_api(&transport, &tokens));
    let code = "function calculateSum(a,b){return a+b;}";

    let result = service.submit(code, Language::JavaScript).await.unwrap();

    assert_eq!(sent_body(&transport), json!({"code": code, "language": "javascript"}));
    assert_eq!(result.code, code);
    assert_eq!(result.language, Language::JavaScript);
    assert_eq!(result.review_text, "❌ Missing input validation");
}

#[tokio::test]
async fn test_blank_code_blocked_before_request() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    let service = ReviewService::new(create_api(&transport, &tokens));

    let err = service.submit("  \n\t", Language::Rust).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_sample_code_is_javascript_snippet() {
    assert!(SAMPLE_CODE.contains("function calculateSum(a, b)"));
}
