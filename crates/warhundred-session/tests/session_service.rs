//! Integration tests for the session service on its own.

mod common;

use std::sync::Arc;

use common::{Reply, ScriptedTransport, login_ok};
use warhundred_protocol::AccountId;
use warhundred_session::{
    ApiClient, CredentialStore, MemoryCredentialStore, SessionError, SessionService,
};
use warhundred_transport::ApiRequest;

fn service(
    transport: &Arc<ScriptedTransport>,
    store: MemoryCredentialStore,
) -> (SessionService<ScriptedTransport>, Arc<MemoryCredentialStore>) {
    let store = Arc::new(store);
    let client = ApiClient::new(Arc::clone(transport), store.clone());
    (SessionService::new(client), store)
}

#[tokio::test]
async fn test_login_returns_grant_and_stores_token() {
    let transport = ScriptedTransport::new();
    transport.script("/login", login_ok("alice", "tok1"));
    let (service, store) = service(&transport, MemoryCredentialStore::new());

    let grant = service.login("alice", "secret").await.unwrap();

    assert_eq!(grant.nickname, "alice");
    assert_eq!(grant.token, "tok1");
    assert_eq!(store.get().as_deref(), Some("tok1"));
}

#[tokio::test]
async fn test_login_empty_token_is_rejected_without_storing() {
    let transport = ScriptedTransport::new();
    transport.script("/login", login_ok("alice", ""));
    let (service, store) = service(&transport, MemoryCredentialStore::new());

    let errors = service.login("alice", "secret").await.unwrap_err();

    assert!(matches!(
        errors.as_slice(),
        [SessionError::Protocol(m)] if m.starts_with("invalid message") && m.contains("empty access token")
    ));
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_login_failure_keeps_existing_token() {
    let transport = ScriptedTransport::new();
    transport.script("/login", Reply::Status(401, r#"{"message":"nope"}"#.into()));
    let (service, store) = service(&transport, MemoryCredentialStore::with_token("old"));

    service.login("alice", "wrong").await.unwrap_err();

    assert_eq!(store.get().as_deref(), Some("old"));
}

#[tokio::test]
async fn test_rejection_yields_one_error_per_message() {
    let transport = ScriptedTransport::new();
    transport.script(
        "/register",
        Reply::Status(
            422,
            r#"{"errors":["Username taken","Password too short"]}"#.into(),
        ),
    );
    let (service, _store) = service(&transport, MemoryCredentialStore::new());

    let errors = service
        .register("alice", "alice@example.com", "x")
        .await
        .unwrap_err();

    assert_eq!(
        errors,
        vec![
            SessionError::AuthRejected {
                status: 422,
                message: "Username taken".into(),
            },
            SessionError::AuthRejected {
                status: 422,
                message: "Password too short".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_register_success_leaves_store_alone() {
    let transport = ScriptedTransport::new();
    transport.script(
        "/register",
        Reply::Status(201, r#"{"id":7,"nickname":"alice","registered":true}"#.into()),
    );
    let (service, store) = service(&transport, MemoryCredentialStore::new());

    let registered = service
        .register("alice", "alice@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(registered.id, Some(AccountId::Number(7)));
    assert!(registered.registered);
    assert_eq!(store.get(), None);
    let sent = transport.requests_to("/register");
    let body: serde_json::Value = serde_json::from_slice(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_begin_logout_clears_store_and_returns_ticket() {
    let transport = ScriptedTransport::new();
    let (service, store) = service(&transport, MemoryCredentialStore::with_token("tok1"));

    let ticket = service.begin_logout(Some("alice"));

    assert_eq!(store.get(), None);
    assert_eq!(ticket.nickname(), Some("alice"));
    assert_eq!(ticket.token(), Some("tok1"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_finish_logout_without_nickname_sends_nothing() {
    let transport = ScriptedTransport::new();
    let (service, _store) = service(&transport, MemoryCredentialStore::with_token("tok1"));

    let ticket = service.begin_logout(None);
    service.finish_logout(ticket).await.unwrap();

    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_logout_reports_rejection_but_store_stays_clear() {
    let transport = ScriptedTransport::new();
    transport.script("/logout", Reply::Status(401, r#"{"error":"expired"}"#.into()));
    let (service, store) = service(&transport, MemoryCredentialStore::with_token("tok1"));

    let errors = service.logout(Some("alice")).await.unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_client_uses_token_from_login_on_next_request() {
    let transport = ScriptedTransport::new();
    transport.script("/login", login_ok("alice", "tok1"));
    let (service, _store) = service(&transport, MemoryCredentialStore::new());

    service.login("alice", "secret").await.unwrap();
    service
        .client()
        .send(ApiRequest::get("/zone/players"))
        .await
        .unwrap();

    let sent = transport.requests_to("/zone/players");
    assert_eq!(sent[0].bearer.as_deref(), Some("tok1"));
}
