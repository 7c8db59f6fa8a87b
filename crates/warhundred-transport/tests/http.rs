//! Integration tests for the HTTP transport.
//!
//! These tests spin up a real axum server on a random local port and
//! point an `HttpTransport` at it, so headers and bodies actually cross
//! the network.

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use axum::Router;
    use axum::body::Bytes;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::{get, post, put};
    use warhundred_transport::{
        ApiRequest, HttpTransport, Transport, TransportError,
    };

    /// Starts a stub backend on `127.0.0.1:0` and returns its base URL.
    async fn start_stub() -> String {
        let app = Router::new()
            .route(
                "/whoami",
                get(|headers: HeaderMap| async move {
                    headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("anonymous")
                        .to_string()
                }),
            )
            .route(
                "/echo",
                post(|headers: HeaderMap, body: Bytes| async move {
                    let content_type = headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    format!("{content_type}|{}", String::from_utf8_lossy(&body))
                }),
            )
            .route(
                "/profile/{nickname}",
                put(|| async { StatusCode::NO_CONTENT }),
            )
            .route(
                "/login",
                post(|| async {
                    (StatusCode::UNAUTHORIZED, r#"{"error":"bad credentials"}"#)
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("should have local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(base, Duration::from_secs(5)).expect("should build")
    }

    #[tokio::test]
    async fn test_execute_sends_bearer_header() {
        let base = start_stub().await;
        let t = transport(&base);

        let resp = t
            .execute(ApiRequest::get("/whoami").with_bearer("tok1"))
            .await
            .expect("exchange should succeed");

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, b"Bearer tok1");
    }

    #[tokio::test]
    async fn test_execute_without_bearer_sends_no_authorization() {
        let base = start_stub().await;
        let t = transport(&base);

        let resp = t.execute(ApiRequest::get("/whoami")).await.unwrap();

        assert_eq!(resp.body, b"anonymous");
    }

    #[tokio::test]
    async fn test_execute_posts_body_with_content_type() {
        let base = start_stub().await;
        let t = transport(&base);

        let resp = t
            .execute(
                ApiRequest::post("/echo")
                    .with_body(br#"{"a":1}"#.to_vec(), "application/json"),
            )
            .await
            .unwrap();

        assert_eq!(resp.body, br#"application/json|{"a":1}"#);
    }

    #[tokio::test]
    async fn test_execute_error_status_is_not_a_transport_error() {
        // A 401 is a perfectly good HTTP exchange. Interpreting it is
        // the session layer's job.
        let base = start_stub().await;
        let t = transport(&base);

        let resp = t.execute(ApiRequest::post("/login")).await.unwrap();

        assert_eq!(resp.status, 401);
        assert!(!resp.is_success());
        assert_eq!(resp.body, br#"{"error":"bad credentials"}"#);
    }

    #[tokio::test]
    async fn test_execute_put_reaches_path_route() {
        let base = start_stub().await;
        let t = transport(&base);

        let resp = t
            .execute(ApiRequest::put("/profile/alice").with_body(b"{}".to_vec(), "application/json"))
            .await
            .unwrap();

        assert_eq!(resp.status, 204);
        assert!(resp.is_success());
    }

    #[tokio::test]
    async fn test_execute_unknown_route_returns_404() {
        let base = start_stub().await;
        let t = transport(&base);

        let resp = t.execute(ApiRequest::get("/nowhere")).await.unwrap();

        assert_eq!(resp.status, 404);
    }

    #[tokio::test]
    async fn test_execute_refused_connection_is_unreachable() {
        // Grab a free port, then close the listener so nothing answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let t = transport(&format!("http://{addr}"));
        let result = t.execute(ApiRequest::get("/whoami")).await;

        assert!(
            matches!(result, Err(TransportError::Unreachable(ref m)) if m.contains("/whoami")),
            "expected an unreachable error, got {result:?}"
        );
    }
}
