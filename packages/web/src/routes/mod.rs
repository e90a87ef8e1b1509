//! # HTTP routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/health` | liveness probe |
//! | `POST` | `/api/notes` | [`notes::create`] |
//! | `GET` | `/api/notes/mine` | [`notes::mine`] (signed in only) |
//! | `GET` | `/api/notes/slug/{slug}` | [`notes::get_by_slug`] |
//! | `POST` | `/api/notes/slug/{slug}/verify` | [`notes::verify_password`] |
//! | `PATCH` | `/api/notes/{id}` | [`notes::update`] |
//! | `DELETE` | `/api/notes/{id}` | [`notes::delete`] |
//! | `POST` | `/api/auth/register` | [`auth::register`] |
//! | `POST` | `/api/auth/login` | [`auth::login`] |
//! | `POST` | `/api/auth/logout` | [`auth::logout`] |
//! | `GET` | `/api/auth/me` | [`auth::me`] |
//!
//! The router expects a `tower_sessions::SessionManagerLayer` on top; the
//! entry point adds the Postgres-backed one.

pub mod auth;
pub mod notes;

use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::state::{AppState, AppStore};

pub fn router<S: AppStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/notes", post(notes::create::<S>))
        .route("/api/notes/mine", get(notes::mine::<S>))
        .route("/api/notes/slug/{slug}", get(notes::get_by_slug::<S>))
        .route(
            "/api/notes/slug/{slug}/verify",
            post(notes::verify_password::<S>),
        )
        .route(
            "/api/notes/{id}",
            patch(notes::update::<S>).delete(notes::delete::<S>),
        )
        .route("/api/auth/register", post(auth::register::<S>))
        .route("/api/auth/login", post(auth::login::<S>))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use store::MemoryStore;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore as SessionMemoryStore, SessionManagerLayer};

    use super::*;

    struct TestApp {
        router: Router,
        store: MemoryStore,
    }

    struct Reply {
        status: StatusCode,
        cookie: Option<String>,
        body: Value,
    }

    impl TestApp {
        fn new() -> Self {
            let store = MemoryStore::new();
            let router = router(AppState::new(store.clone()))
                .layer(SessionManagerLayer::new(SessionMemoryStore::default()));
            Self { router, store }
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            body: Option<Value>,
            cookie: Option<&str>,
        ) -> Reply {
            let mut request = Request::builder().method(method).uri(uri);
            if let Some(cookie) = cookie {
                request = request.header(header::COOKIE, cookie);
            }
            let request = match body {
                Some(body) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => request.body(Body::empty()),
            }
            .unwrap();

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let cookie = response
                .headers()
                .get(header::SET_COOKIE)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(';').next())
                .map(str::to_string);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            Reply {
                status,
                cookie,
                body,
            }
        }

        async fn register(&self, email: &str) -> String {
            let reply = self
                .send(
                    Method::POST,
                    "/api/auth/register",
                    Some(json!({ "email": email, "password": "correct horse", "name": "Tester" })),
                    None,
                )
                .await;
            assert_eq!(reply.status, StatusCode::CREATED);
            reply.cookie.expect("register sets a session cookie")
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let reply = app.send(Method::GET, "/api/health", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_public_note_roundtrip_and_duplicate_slug() {
        let app = TestApp::new();
        let body = json!({ "slug": "alpha", "title": "T", "content": "hello" });

        let created = app.send(Method::POST, "/api/notes", Some(body.clone()), None).await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.body["slug"], "alpha");

        let read = app.send(Method::GET, "/api/notes/slug/alpha", None, None).await;
        assert_eq!(read.status, StatusCode::OK);
        assert_eq!(read.body["title"], "T");
        assert_eq!(read.body["content"], "hello");
        assert_eq!(read.body["hasPassword"], false);

        let again = app.send(Method::POST, "/api/notes", Some(body), None).await;
        assert_eq!(again.status, StatusCode::CONFLICT);
        assert!(again.body["error"].as_str().unwrap().contains("slug"));
        assert_eq!(app.store.note_count(), 1);
    }

    #[tokio::test]
    async fn test_generated_slug_when_omitted() {
        let app = TestApp::new();
        let created = app
            .send(
                Method::POST,
                "/api/notes",
                Some(json!({ "title": "T", "content": "c" })),
                None,
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        let slug = created.body["slug"].as_str().unwrap();
        assert_eq!(slug.len(), 10);

        let read = app
            .send(Method::GET, &format!("/api/notes/slug/{slug}"), None, None)
            .await;
        assert_eq!(read.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_locked_note_needs_password() {
        let app = TestApp::new();
        app.send(
            Method::POST,
            "/api/notes",
            Some(json!({ "slug": "vault", "title": "T", "content": "secret", "password": "p" })),
            None,
        )
        .await;

        let read = app.send(Method::GET, "/api/notes/slug/vault", None, None).await;
        assert_eq!(read.status, StatusCode::OK);
        assert_eq!(read.body["content"], Value::Null);
        assert_eq!(read.body["hasPassword"], true);

        let wrong = app
            .send(
                Method::POST,
                "/api/notes/slug/vault/verify",
                Some(json!({ "password": "q" })),
                None,
            )
            .await;
        assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.body, json!({ "error": "invalid password" }));

        let right = app
            .send(
                Method::POST,
                "/api/notes/slug/vault/verify",
                Some(json!({ "password": "p" })),
                None,
            )
            .await;
        assert_eq!(right.status, StatusCode::OK);
        assert_eq!(right.body["content"], "secret");

        let missing = app
            .send(
                Method::POST,
                "/api/notes/slug/nope/verify",
                Some(json!({ "password": "p" })),
                None,
            )
            .await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_input_is_a_json_400() {
        let app = TestApp::new();

        let bad_slug = app
            .send(
                Method::POST,
                "/api/notes",
                Some(json!({ "slug": "no spaces", "title": "T", "content": "c" })),
                None,
            )
            .await;
        assert_eq!(bad_slug.status, StatusCode::BAD_REQUEST);
        assert!(bad_slug.body["error"].is_string());

        let missing_field = app
            .send(Method::POST, "/api/notes", Some(json!({ "title": "T" })), None)
            .await;
        assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
        assert!(missing_field.body["error"].is_string());
    }

    #[tokio::test]
    async fn test_owner_flow() {
        let app = TestApp::new();
        let owner = app.register("owner@example.com").await;
        let other = app.register("other@example.com").await;

        let created = app
            .send(
                Method::POST,
                "/api/notes",
                Some(json!({ "slug": "mine", "title": "T", "content": "c", "password": "p" })),
                Some(&owner),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        let id = created.body["id"].as_str().unwrap().to_string();
        let uri = format!("/api/notes/{id}");

        let listed = app.send(Method::GET, "/api/notes/mine", None, Some(&owner)).await;
        assert_eq!(listed.status, StatusCode::OK);
        assert_eq!(listed.body.as_array().unwrap().len(), 1);
        assert_eq!(listed.body[0]["content"], Value::Null);

        let empty = app.send(Method::GET, "/api/notes/mine", None, Some(&other)).await;
        assert_eq!(empty.body, json!([]));

        let hijack = app
            .send(
                Method::PATCH,
                &uri,
                Some(json!({ "title": "pwned" })),
                Some(&other),
            )
            .await;
        assert_eq!(hijack.status, StatusCode::FORBIDDEN);

        let anonymous = app.send(Method::DELETE, &uri, None, None).await;
        assert_eq!(anonymous.status, StatusCode::FORBIDDEN);

        let unlock = app
            .send(
                Method::PATCH,
                &uri,
                Some(json!({ "password": null })),
                Some(&owner),
            )
            .await;
        assert_eq!(unlock.status, StatusCode::OK);
        assert_eq!(unlock.body, json!({ "success": true }));

        let read = app.send(Method::GET, "/api/notes/slug/mine", None, None).await;
        assert_eq!(read.body["title"], "T");
        assert_eq!(read.body["content"], "c");
        assert_eq!(read.body["hasPassword"], false);

        let deleted = app.send(Method::DELETE, &uri, None, Some(&owner)).await;
        assert_eq!(deleted.status, StatusCode::OK);

        let gone = app.send(Method::GET, "/api/notes/slug/mine", None, None).await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
        assert_eq!(gone.body, json!({ "error": "note not found" }));
    }

    #[tokio::test]
    async fn test_malformed_note_id_is_a_json_404() {
        let app = TestApp::new();
        let owner = app.register("owner@example.com").await;

        let deleted = app
            .send(Method::DELETE, "/api/notes/not-a-uuid", None, Some(&owner))
            .await;
        assert_eq!(deleted.status, StatusCode::NOT_FOUND);
        assert_eq!(deleted.body, json!({ "error": "note not found" }));

        let patched = app
            .send(
                Method::PATCH,
                "/api/notes/not-a-uuid",
                Some(json!({ "title": "x" })),
                Some(&owner),
            )
            .await;
        assert_eq!(patched.status, StatusCode::NOT_FOUND);
        assert_eq!(patched.body, json!({ "error": "note not found" }));
    }

    #[tokio::test]
    async fn test_mine_requires_session() {
        let app = TestApp::new();
        let reply = app.send(Method::GET, "/api/notes/mine", None, None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_me_logout() {
        let app = TestApp::new();
        app.register("ada@example.com").await;

        let anonymous = app.send(Method::GET, "/api/auth/me", None, None).await;
        assert_eq!(anonymous.body, Value::Null);

        let bad = app
            .send(
                Method::POST,
                "/api/auth/login",
                Some(json!({ "email": "ada@example.com", "password": "wrong password" })),
                None,
            )
            .await;
        assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
        assert_eq!(bad.body, json!({ "error": "Invalid email or password" }));

        let login = app
            .send(
                Method::POST,
                "/api/auth/login",
                Some(json!({ "email": "ADA@example.com ", "password": "correct horse" })),
                None,
            )
            .await;
        assert_eq!(login.status, StatusCode::OK);
        let cookie = login.cookie.unwrap();

        let me = app.send(Method::GET, "/api/auth/me", None, Some(&cookie)).await;
        assert_eq!(me.body["email"], "ada@example.com");

        let logout = app
            .send(Method::POST, "/api/auth/logout", None, Some(&cookie))
            .await;
        assert_eq!(logout.status, StatusCode::OK);

        let after = app.send(Method::GET, "/api/auth/me", None, Some(&cookie)).await;
        assert_eq!(after.body, Value::Null);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app = TestApp::new();
        app.register("ada@example.com").await;
        let again = app
            .send(
                Method::POST,
                "/api/auth/register",
                Some(json!({ "email": "ada@example.com", "password": "correct horse", "name": "Ada" })),
                None,
            )
            .await;
        assert_eq!(again.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_store_outage_is_503() {
        let app = TestApp::new();
        app.store.set_available(false);
        let reply = app.send(Method::GET, "/api/notes/slug/alpha", None, None).await;
        assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            reply.body,
            json!({ "error": "service temporarily unavailable" })
        );
    }
}
