//! Counter Module Tests
//!
//! Validates the counter service contract and the HTTP surface of one
//! counter resource.
//!
//! ## Test Scopes
//! - **Service**: zero-defaults, increment arithmetic, dimension and
//!   namespace isolation, validation short-circuits, count coercion.
//! - **Store doubles**: a failing store proves invalid requests never reach
//!   the store and that store failures propagate.
//! - **HTTP**: routing, status codes, JSON shapes, CORS headers, 405/204
//!   behavior, driven through the axum router.

#[cfg(test)]
mod tests {
    use crate::counters::handlers::counter_resource;
    use crate::counters::service::{CounterError, CounterService};
    use crate::counters::types::{FEEDBACK, REACTIONS};
    use crate::store::HashStore;
    use crate::store::memory::MemoryStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{HeaderValue, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Store double that fails every call; used to prove validation rejects
    /// bad requests before any store access happens.
    struct FailingStore;

    #[async_trait]
    impl HashStore for FailingStore {
        async fn hgetall(&self, _key: &str) -> Result<HashMap<String, String>> {
            Err(anyhow::anyhow!("store unreachable"))
        }

        async fn hincrby(&self, _key: &str, _field: &str, _delta: i64) -> Result<i64> {
            Err(anyhow::anyhow!("store unreachable"))
        }
    }

    fn feedback_service(store: Arc<dyn HashStore>) -> CounterService {
        CounterService::new(FEEDBACK, store)
    }

    // ============================================================
    // SERVICE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_fresh_slug_reads_all_zeros() {
        let service = feedback_service(Arc::new(MemoryStore::new()));

        let counts = service.counts("never-voted").await.unwrap();

        assert_eq!(counts.len(), 4);
        for dimension in FEEDBACK.dimensions {
            assert_eq!(counts[*dimension], 0, "{} should start at 0", dimension);
        }
    }

    #[tokio::test]
    async fn test_first_increment_on_fresh_slug() {
        let service = feedback_service(Arc::new(MemoryStore::new()));

        let counts = service.increment("story-1", "opening").await.unwrap();

        assert_eq!(counts["opening"], 1);
        assert_eq!(counts["explanation"], 0);
        assert_eq!(counts["stakes"], 0);
        assert_eq!(counts["tooLong"], 0);
    }

    #[tokio::test]
    async fn test_n_increments_add_n() {
        let service = feedback_service(Arc::new(MemoryStore::new()));

        for _ in 0..7 {
            service.increment("story-1", "stakes").await.unwrap();
        }

        let counts = service.counts("story-1").await.unwrap();
        assert_eq!(counts["stakes"], 7);
    }

    #[tokio::test]
    async fn test_increment_leaves_sibling_dimensions_alone() {
        let store = Arc::new(MemoryStore::new());
        let service = feedback_service(store);

        service.increment("story-1", "tooLong").await.unwrap();
        service.increment("story-1", "tooLong").await.unwrap();
        service.increment("story-1", "opening").await.unwrap();

        let counts = service.counts("story-1").await.unwrap();
        assert_eq!(counts["tooLong"], 2);
        assert_eq!(counts["opening"], 1);
        assert_eq!(counts["explanation"], 0);
    }

    #[tokio::test]
    async fn test_unknown_dimension_is_rejected_and_not_stored() {
        let store = Arc::new(MemoryStore::new());
        let service = feedback_service(store.clone());

        let err = service.increment("story-1", "bribery").await.unwrap_err();
        assert!(matches!(err, CounterError::InvalidParams));

        // Nothing may have been written for the slug.
        let raw = store.hgetall("feedback:story-1").await.unwrap();
        assert!(raw.is_empty());
    }

    #[tokio::test]
    async fn test_dimension_from_other_family_is_rejected() {
        let service = feedback_service(Arc::new(MemoryStore::new()));

        // A reaction name is not a feedback dimension.
        let err = service.increment("story-1", "thumbsUp").await.unwrap_err();
        assert!(matches!(err, CounterError::InvalidParams));
    }

    #[tokio::test]
    async fn test_empty_slug_never_touches_the_store() {
        // FailingStore errors on any access, so these would surface as
        // Store errors if validation did not short-circuit first.
        let service = feedback_service(Arc::new(FailingStore));

        let err = service.counts("").await.unwrap_err();
        assert!(matches!(err, CounterError::SlugRequired));

        let err = service.increment("", "opening").await.unwrap_err();
        assert!(matches!(err, CounterError::InvalidParams));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let service = feedback_service(Arc::new(FailingStore));

        let err = service.counts("story-1").await.unwrap_err();
        assert!(matches!(err, CounterError::Store(_)));
    }

    #[tokio::test]
    async fn test_namespaces_are_isolated() {
        let store = Arc::new(MemoryStore::new());
        let feedback = CounterService::new(FEEDBACK, store.clone());
        let reactions = CounterService::new(REACTIONS, store);

        reactions.increment("story-1", "thumbsUp").await.unwrap();

        let counts = feedback.counts("story-1").await.unwrap();
        assert!(counts.values().all(|count| *count == 0));

        let counts = reactions.counts("story-1").await.unwrap();
        assert_eq!(counts["thumbsUp"], 1);
    }

    #[tokio::test]
    async fn test_malformed_stored_value_reads_as_zero() {
        let store = Arc::new(MemoryStore::new());
        store.hset("feedback:story-1", "opening", "not-a-number");
        store.hset("feedback:story-1", "stakes", "3");

        let service = feedback_service(store);
        let counts = service.counts("story-1").await.unwrap();

        assert_eq!(counts["opening"], 0);
        assert_eq!(counts["stakes"], 3);
    }

    #[tokio::test]
    async fn test_concurrent_increments_sum_exactly() {
        let service = Arc::new(feedback_service(Arc::new(MemoryStore::new())));
        let tasks: i64 = 16;

        let mut handles = Vec::new();
        for _ in 0..tasks {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.increment("story-1", "explanation").await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let counts = service.counts("story-1").await.unwrap();
        assert_eq!(counts["explanation"], tasks);
    }

    // ============================================================
    // HTTP TESTS
    // ============================================================

    const TEST_ORIGIN: &str = "https://theaifiles.app";

    fn test_app(store: Arc<dyn HashStore>) -> Router {
        let feedback = Arc::new(CounterService::new(FEEDBACK, store.clone()));
        let reactions = Arc::new(CounterService::new(REACTIONS, store));
        let origin = HeaderValue::from_static(TEST_ORIGIN);

        Router::new()
            .route("/api/feedback", counter_resource(feedback, origin.clone()))
            .route("/api/reactions", counter_resource(reactions, origin))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_http_get_fresh_slug() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/feedback?slug=story-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            TEST_ORIGIN
        );

        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({"opening": 0, "explanation": 0, "stakes": 0, "tooLong": 0})
        );
    }

    #[tokio::test]
    async fn test_http_get_without_slug_is_400() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/feedback")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "slug required");
    }

    #[tokio::test]
    async fn test_http_post_increment_round_trip() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(post_json(
                "/api/feedback",
                r#"{"slug": "story-1", "dimension": "opening"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["counts"]["opening"], 1);
        assert_eq!(json["counts"]["tooLong"], 0);
    }

    #[tokio::test]
    async fn test_http_reactions_accepts_reaction_field_name() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(post_json(
                "/api/reactions",
                r#"{"slug": "story-1", "reaction": "thumbsUp"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["counts"]["thumbsUp"], 1);
        assert_eq!(json["counts"]["mindBlown"], 0);
    }

    #[tokio::test]
    async fn test_http_post_invalid_dimension_is_400() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(post_json(
                "/api/feedback",
                r#"{"slug": "story-1", "dimension": "thumbsUp"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid params");
    }

    #[tokio::test]
    async fn test_http_post_garbage_body_is_400() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(post_json("/api/feedback", "not json at all"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid params");
    }

    #[tokio::test]
    async fn test_http_preflight_is_204_with_cors_headers() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/reactions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            TEST_ORIGIN
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type"
        );
    }

    #[tokio::test]
    async fn test_http_unsupported_method_is_405() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/feedback")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_http_store_failure_is_500() {
        let app = test_app(Arc::new(FailingStore));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/feedback?slug=story-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "store unavailable");
    }
}
