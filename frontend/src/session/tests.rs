use super::*;
use crate::api::{MemoryTokenStore, MockTransport};
use crate::config::AppConfig;
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test";

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn user(id: &str, username: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        email: format!("{}@x.com", username),
        extra: Map::new(),
    }
}

fn user_json(id: &str, username: &str) -> Value {
    json!({"id": id, "username": username, "email": format!("{}@x.com", username)})
}

fn create_service(
    transport: &MockTransport,
    tokens: &MemoryTokenStore,
) -> SessionService<MockTransport, MemoryTokenStore> {
    SessionService::new(ApiClient::new(
        AppConfig::new(BASE),
        transport.clone(),
        tokens.clone(),
    ))
}

// =========================================================
// 状态机
// =========================================================

#[test]
fn test_initial_state_is_pending() {
    let state = SessionState::default();
    assert_eq!(state, SessionState::Unknown);
    assert_eq!(state.gate(), AuthGate::Pending);
    assert_eq!(state.user(), None);
}

#[test]
fn test_restore_transitions() {
    let bob = user("u1", "bob");
    assert_eq!(
        SessionState::Unknown.apply(SessionEvent::Restored(bob.clone())),
        SessionState::Authenticated(bob)
    );
    assert_eq!(
        SessionState::Unknown.apply(SessionEvent::NoToken),
        SessionState::Anonymous
    );
    assert_eq!(
        SessionState::Unknown.apply(SessionEvent::RestoreFailed),
        SessionState::Anonymous
    );
}

#[test]
fn test_sign_in_from_unknown_or_anonymous() {
    let alice = user("u2", "alice");
    for state in [SessionState::Unknown, SessionState::Anonymous] {
        let next = state.apply(SessionEvent::SignedIn(alice.clone()));
        assert_eq!(next.user(), Some(&alice));
        assert_eq!(next.gate(), AuthGate::Authenticated);
    }
}

#[test]
fn test_sign_out_always_anonymous() {
    let states = [
        SessionState::Unknown,
        SessionState::Anonymous,
        SessionState::Authenticated(user("u1", "bob")),
    ];
    for state in states {
        assert_eq!(state.apply(SessionEvent::SignedOut), SessionState::Anonymous);
        assert_eq!(state.apply(SessionEvent::TornDown), SessionState::Anonymous);
    }
}

#[test]
fn test_late_restore_result_is_ignored() {
    // 检查期间用户已登录：迟到的检查结果不能覆盖
    let alice = user("u2", "alice");
    let signed_in = SessionState::Authenticated(alice.clone());
    assert_eq!(
        signed_in.apply(SessionEvent::RestoreFailed),
        SessionState::Authenticated(alice)
    );

    // 检查期间用户已登出
    assert_eq!(
        SessionState::Anonymous.apply(SessionEvent::Restored(user("u1", "bob"))),
        SessionState::Anonymous
    );
}

// =========================================================
// 会话服务
// =========================================================

#[tokio::test]
async fn test_restore_without_token_skips_network() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();

    let event = create_service(&transport, &tokens).restore().await;

    assert_eq!(event, SessionEvent::NoToken);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_restore_with_valid_token() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    transport.mock_json(&url("/users/profile"), 200, json!({"user": user_json("u1", "bob")}));

    let event = create_service(&transport, &tokens).restore().await;

    assert_eq!(event, SessionEvent::Restored(user("u1", "bob")));
    assert_eq!(tokens.get().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_restore_failure_clears_token() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");
    transport.mock_json(&url("/users/profile"), 500, json!({"message": "db down"}));

    let event = create_service(&transport, &tokens).restore().await;

    assert_eq!(event, SessionEvent::RestoreFailed);
    assert_eq!(tokens.get(), None);
    assert_eq!(SessionState::Unknown.apply(event), SessionState::Anonymous);
}

#[tokio::test]
async fn test_register_goes_straight_to_authenticated() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.mock_json(
        &url("/users/register"),
        201,
        json!({"token": "alice-token", "user": user_json("u2", "alice")}),
    );

    let event = create_service(&transport, &tokens)
        .sign_up("alice", "alice@x.com", "pw123456")
        .await
        .unwrap();
    let state = SessionState::Anonymous.apply(event);

    assert_eq!(state.user().map(|u| u.username.as_str()), Some("alice"));
    assert_eq!(tokens.get().as_deref(), Some("alice-token"));
}

#[tokio::test]
async fn test_failed_sign_in_persists_nothing() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.mock_json(&url("/users/login"), 400, json!({"message": "Invalid credentials"}));

    let result = create_service(&transport, &tokens)
        .sign_in("bob@x.com", "nope")
        .await;

    assert!(result.is_err());
    assert_eq!(tokens.get(), None);
}

#[tokio::test]
async fn test_login_then_profile_same_identity() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.mock_json(
        &url("/users/login"),
        200,
        json!({"token": "tok", "user": user_json("u1", "bob")}),
    );
    transport.mock_json(&url("/users/profile"), 200, json!({"user": user_json("u1", "bob")}));
    let service = create_service(&transport, &tokens);

    let SessionEvent::SignedIn(logged_in) = service.sign_in("bob@x.com", "pw").await.unwrap()
    else {
        panic!("expected SignedIn");
    };
    let SessionEvent::Restored(profile) = service.restore().await else {
        panic!("expected Restored");
    };

    assert_eq!(logged_in.id, profile.id);
    let req = transport.last_request().unwrap();
    assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Bearer tok"));
}

#[tokio::test]
async fn test_sign_out_clears_token() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("tok");

    let event = create_service(&transport, &tokens).sign_out();

    assert_eq!(event, SessionEvent::SignedOut);
    assert_eq!(tokens.get(), None);
    assert_eq!(transport.request_count(), 0);
}

// =========================================================
// 启动检查与登录交错
// =========================================================

fn slow_profile_failure(status: u16, message: &str) -> (MockTransport, MemoryTokenStore) {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("stale");
    transport.mock_json(&url("/users/profile"), status, json!({"message": message}));
    transport.mock_delay(&url("/users/profile"), 5);
    transport.mock_json(
        &url("/users/login"),
        200,
        json!({"token": "fresh", "user": user_json("u2", "alice")}),
    );
    (transport, tokens)
}

#[tokio::test]
async fn test_failed_restore_keeps_token_from_later_sign_in() {
    let (transport, tokens) = slow_profile_failure(500, "db down");
    let service = create_service(&transport, &tokens);

    let (restored, signed_in) =
        tokio::join!(service.restore(), service.sign_in("alice@x.com", "pw"));

    assert_eq!(restored, SessionEvent::RestoreFailed);
    let state = SessionState::Unknown
        .apply(signed_in.unwrap())
        .apply(restored);
    assert!(state.is_authenticated());
    assert_eq!(tokens.get().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_auth_failed_restore_does_not_tear_down_later_sign_in() {
    let (transport, tokens) = slow_profile_failure(401, "invalid token");
    let fired = Arc::new(AtomicBool::new(false));
    let flag = fired.clone();
    let api = ApiClient::new(AppConfig::new(BASE), transport.clone(), tokens.clone())
        .with_teardown(move || flag.store(true, Ordering::SeqCst));
    let service = SessionService::new(api);

    let (restored, signed_in) =
        tokio::join!(service.restore(), service.sign_in("alice@x.com", "pw"));

    assert_eq!(restored, SessionEvent::RestoreFailed);
    assert!(signed_in.is_ok());
    assert_eq!(tokens.get().as_deref(), Some("fresh"));
    assert!(!fired.load(Ordering::SeqCst));
}
