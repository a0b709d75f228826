mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::http::StatusCode;
use chrono::Utc;
use common::{
    FailingDirectory, TEST_SECRET, body_json, body_text, cookie_for, get_with_cookie,
    gated_router, test_context,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use stayvista::router::init_router;
use stayvista_auth::MemoryUserDirectory;
use stayvista_models::{Role, UserRecord};
use tower::ServiceExt;

fn directory() -> Arc<MemoryUserDirectory> {
    Arc::new(
        MemoryUserDirectory::new()
            .with_user("a@x.com", Some(Role::Host))
            .with_user("g@x.com", Some(Role::Guest))
            .with_user("root@x.com", Some(Role::Admin))
            .with_user("norole@x.com", None),
    )
}

fn signed_cookie(claims: serde_json::Value, secret: &str) -> String {
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();
    format!("token={token}")
}

#[tokio::test]
async fn test_missing_cookie_is_unauthenticated_and_handler_skipped() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));

    for uri in ["/gated/session", "/gated/host", "/gated/admin"] {
        let app = gated_router(ctx.state.clone(), hits.clone());
        let response = app.oneshot(get_with_cookie(uri, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "unauthorized access" })
        );
    }

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_cookie_is_unauthenticated() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie("/gated/session", Some("token=")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_foreign_signature_is_unauthenticated() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let exp = Utc::now().timestamp() + 3600;
    let cookie = signed_cookie(json!({ "email": "a@x.com", "exp": exp }), "some-other-secret");

    let response = app
        .oneshot(get_with_cookie("/gated/host", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "unauthorized access" })
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_expired_token_is_unauthenticated() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let now = Utc::now().timestamp();
    let cookie = signed_cookie(
        json!({ "email": "a@x.com", "iat": now - 7200, "exp": now - 3600 }),
        TEST_SECRET,
    );

    let response = app
        .oneshot(get_with_cookie("/gated/session", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie("/gated/session", Some("token=not.a.jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_host_record_passes_host_gate_with_identity_attached() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie("/gated/host", Some(&cookie_for("a@x.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "a@x.com");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_session_gate_needs_no_user_record() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie(
            "/gated/session",
            Some(&cookie_for("stranger@x.com")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "stranger@x.com");
}

#[tokio::test]
async fn test_guest_on_admin_gate_is_unauthorized() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie("/gated/admin", Some(&cookie_for("g@x.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_email_is_unauthorized_on_every_role_gate() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));

    for uri in ["/gated/host", "/gated/admin"] {
        let app = gated_router(ctx.state.clone(), hits.clone());
        let response = app
            .oneshot(get_with_cookie(uri, Some(&cookie_for("b@x.com"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body_json(response).await, json!({ "error": "Unauthorized" }));
    }

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_record_without_role_is_unauthorized() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie("/gated/host", Some(&cookie_for("norole@x.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_does_not_pass_host_gate() {
    let ctx = test_context(directory());
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie("/gated/host", Some(&cookie_for("root@x.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_role_change_applies_to_next_request() {
    let directory = directory();
    let ctx = test_context(directory.clone());
    let hits = Arc::new(AtomicUsize::new(0));
    let cookie = cookie_for("g@x.com");

    let response = gated_router(ctx.state.clone(), hits.clone())
        .oneshot(get_with_cookie("/gated/host", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    directory.insert(UserRecord::new("g@x.com", Some(Role::Host)));

    let response = gated_router(ctx.state, hits.clone())
        .oneshot(get_with_cookie("/gated/host", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_directory_failure_is_service_unavailable() {
    let ctx = test_context(Arc::new(FailingDirectory));
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie("/gated/admin", Some(&cookie_for("a@x.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "service temporarily unavailable" }));
    assert!(!body.to_string().contains("connection refused"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_directory_failure_does_not_affect_session_gate() {
    let ctx = test_context(Arc::new(FailingDirectory));
    let hits = Arc::new(AtomicUsize::new(0));
    let app = gated_router(ctx.state, hits.clone());

    let response = app
        .oneshot(get_with_cookie("/gated/session", Some(&cookie_for("a@x.com"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_application_routes_reject_before_touching_storage() {
    let ctx = test_context(directory());
    let guest = cookie_for("g@x.com");

    let cases: [(&str, &str, Option<&str>, &str); 6] = [
        ("GET", "/rooms", None, "unauthorized access"),
        ("GET", "/user/a@x.com", None, "unauthorized access"),
        ("GET", "/bookings?email=g@x.com", None, "unauthorized access"),
        ("GET", "/users", Some(guest.as_str()), "Unauthorized"),
        ("GET", "/rooms/g@x.com", Some(guest.as_str()), "Unauthorized"),
        ("GET", "/bookings/host?email=g@x.com", Some(guest.as_str()), "Unauthorized"),
    ];

    for (method, uri, cookie, message) in cases {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let request = builder.body(axum::body::Body::empty()).unwrap();

        let response = init_router(ctx.state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body_json(response).await, json!({ "error": message }), "{method} {uri}");
    }
}

#[tokio::test]
async fn test_mutating_routes_are_gated() {
    let ctx = test_context(directory());
    let guest = cookie_for("g@x.com");

    let cases: [(&str, &str, Option<&str>); 4] = [
        ("POST", "/rooms", Some(guest.as_str())),
        ("PUT", "/users/update/g@x.com", Some(guest.as_str())),
        ("PATCH", "/rooms/status/0b6a3c1e-4f1a-4b8e-9a51-5d2f3c7e9b10", None),
        ("POST", "/bookings", None),
    ];

    for (method, uri, cookie) in cases {
        let request = common::json_request(method, uri, cookie, json!({}));
        let response = init_router(ctx.state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_public_root_is_ungated() {
    let ctx = test_context(directory());

    let response = init_router(ctx.state)
        .oneshot(get_with_cookie("/", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello from StayVista Server..");
}
