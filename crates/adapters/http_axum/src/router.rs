//! Axum router assembly.

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;

use jsonserver_app::ports::{DocumentStore, IdGenerator};

use crate::state::AppState;
use crate::{api, error, home, trace};

/// Time a request may take before it is answered with `408`.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the top-level axum [`Router`] with [`DEFAULT_REQUEST_TIMEOUT`].
pub fn build<S, G>(state: AppState<S, G>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    build_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

/// Build the top-level axum [`Router`].
///
/// Serves the index at `/` and the whole document at `/db`, then merges the
/// routes of every resource key. Handler panics become `500` responses,
/// requests running longer than `request_timeout` become `408`, and every
/// request is logged by the trace layer, panics and timeouts included.
pub fn build_with_timeout<S, G>(state: AppState<S, G>, request_timeout: Duration) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    let resources = api::routes(&state);

    Router::new()
        .route("/", get(home::index::<S, G>))
        .route("/db", get(api::db::dump::<S, G>))
        .with_state(state)
        .merge(resources)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace::layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use axum::body::{Body, Bytes};
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use jsonserver_app::services::document_service::DocumentService;
    use jsonserver_domain::document::Document;
    use jsonserver_domain::error::JsonServerError;
    use jsonserver_domain::key::ResourceKey;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct MemoryStore(Mutex<Document>);

    impl DocumentStore for MemoryStore {
        async fn load(&self) -> Result<Document, JsonServerError> {
            Ok(self.0.lock().unwrap().clone())
        }
        async fn save(&self, document: Document) -> Result<(), JsonServerError> {
            *self.0.lock().unwrap() = document;
            Ok(())
        }
    }

    struct FailingStore;

    impl DocumentStore for FailingStore {
        async fn load(&self) -> Result<Document, JsonServerError> {
            Err(JsonServerError::Internal(
                std::io::Error::other("disk on fire").into(),
            ))
        }
        async fn save(&self, _document: Document) -> Result<(), JsonServerError> {
            Err(JsonServerError::Internal(
                std::io::Error::other("disk on fire").into(),
            ))
        }
    }

    struct PanickingStore;

    impl DocumentStore for PanickingStore {
        async fn load(&self) -> Result<Document, JsonServerError> {
            panic!("store exploded")
        }
        async fn save(&self, _document: Document) -> Result<(), JsonServerError> {
            panic!("store exploded")
        }
    }

    struct SlowStore;

    impl DocumentStore for SlowStore {
        async fn load(&self) -> Result<Document, JsonServerError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Document::default())
        }
        async fn save(&self, _document: Document) -> Result<(), JsonServerError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    struct FixedIds(&'static str);

    impl IdGenerator for FixedIds {
        fn next_id(&self) -> String {
            self.0.to_string()
        }
    }

    async fn app_with(content: Value) -> Router {
        let document: Document = serde_json::from_value(content).unwrap();
        let service = DocumentService::new(MemoryStore(Mutex::new(document)), FixedIds("7"));
        let keys = service.discover().await.unwrap();
        build(AppState::new(service, keys))
    }

    async fn books_app() -> Router {
        app_with(json!({
            "books": [{"id": "1", "title": "Dune"}],
            "settings": 42
        }))
        .await
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Bytes) {
        let body = body.map_or_else(Body::empty, |raw| Body::from(raw.to_string()));
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes)
    }

    fn as_json(bytes: &Bytes) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn should_list_resources_when_key_is_a_list() {
        let app = books_app().await;
        let (status, body) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!([{"id": "1", "title": "Dune"}]));
    }

    #[tokio::test]
    async fn should_walk_through_resource_lifecycle() {
        let app = app_with(json!({"books": []})).await;

        let (status, body) = send(&app, Method::POST, "/books", Some(r#"{"title":"X"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(as_json(&body), json!({"title": "X", "id": "7"}));

        let (status, body) = send(&app, Method::GET, "/books/7", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!({"title": "X", "id": "7"}));

        let (status, body) = send(&app, Method::PATCH, "/books/7", Some(r#"{"year":1965}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!({"title": "X", "id": "7", "year": 1965}));

        let (status, body) = send(&app, Method::DELETE, "/books/7", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let (status, body) = send(&app, Method::GET, "/books/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(as_json(&body), json!({"error": "resource not found"}));
    }

    #[tokio::test]
    async fn should_force_path_id_when_replacing() {
        let app = books_app().await;
        let (status, body) =
            send(&app, Method::PUT, "/books/1", Some(r#"{"id":"99","title":"Emma"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!({"id": "1", "title": "Emma"}));

        let (_, body) = send(&app, Method::GET, "/db", None).await;
        assert_eq!(as_json(&body)["books"], json!([{"id": "1", "title": "Emma"}]));
    }

    #[tokio::test]
    async fn should_return_not_found_when_replacing_missing_resource() {
        let app = books_app().await;
        let (status, _) = send(&app, Method::PUT, "/books/2", Some(r#"{"title":"Emma"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_conflict_when_id_already_taken() {
        let app = books_app().await;
        let (status, body) =
            send(&app, Method::POST, "/books", Some(r#"{"id":"1","title":"Again"}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(as_json(&body), json!({"error": "resource already exists"}));
    }

    #[tokio::test]
    async fn should_return_bad_request_when_payload_unusable() {
        let app = books_app().await;
        for payload in ["{}", r#"{"id":"5"}"#, "[1, 2]", "\"text\"", "not json", ""] {
            let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload:?}");
            assert_eq!(as_json(&body), json!({"error": "bad request"}));
        }

        let (status, _) = send(&app, Method::PATCH, "/books/1", Some("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, Method::PUT, "/books/1", Some(r#"{"id":"1"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(as_json(&body), json!([{"id": "1", "title": "Dune"}]));
    }

    #[tokio::test]
    async fn should_accept_payload_when_content_type_missing() {
        let app = books_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/books")
                    .body(Body::from(r#"{"title":"Plain"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn should_wrap_value_when_key_is_scalar() {
        let app = books_app().await;
        let (status, body) = send(&app, Method::GET, "/settings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!({"settings": 42}));
    }

    #[tokio::test]
    async fn should_reject_other_verbs_when_key_is_scalar() {
        let app = books_app().await;
        let (status, _) = send(&app, Method::POST, "/settings", Some(r#"{"a":1}"#)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        let (status, _) = send(&app, Method::GET, "/settings/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_dump_whole_document_when_db_requested() {
        let app = books_app().await;
        let (status, body) = send(&app, Method::GET, "/db", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            as_json(&body),
            json!({"books": [{"id": "1", "title": "Dune"}], "settings": 42})
        );
    }

    #[tokio::test]
    async fn should_keep_db_endpoint_when_key_named_db() {
        let app = app_with(json!({"db": [{"id": "1"}], "books": []})).await;
        let (status, body) = send(&app, Method::GET, "/db", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), json!({"db": [{"id": "1"}], "books": []}));
    }

    #[tokio::test]
    async fn should_render_index_when_root_requested() {
        let app = books_app().await;
        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/books"));
        assert!(html.contains("/settings"));
    }

    #[tokio::test]
    async fn should_return_not_found_when_path_unknown() {
        let app = books_app().await;
        let (status, _) = send(&app, Method::GET, "/authors", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_internal_error_when_store_fails() {
        let service = DocumentService::new(FailingStore, FixedIds("1"));
        let app = build(AppState::new(service, vec![ResourceKey::list("books")]));

        let (status, body) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(as_json(&body), json!({"error": "internal server error"}));
    }

    #[tokio::test]
    async fn should_return_internal_error_when_handler_panics() {
        let service = DocumentService::new(PanickingStore, FixedIds("1"));
        let app = build(AppState::new(service, vec![ResourceKey::list("books")]));

        let (status, body) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(as_json(&body), json!({"error": "internal server error"}));

        let (status, _) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_request_timeout_when_store_too_slow() {
        let service = DocumentService::new(SlowStore, FixedIds("1"));
        let app = build_with_timeout(
            AppState::new(service, vec![ResourceKey::list("books")]),
            Duration::from_millis(50),
        );

        let (status, _) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

        let (status, _) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
