//! HTTP front for the relayed tip record.
//!
//! - `GET /` - the current record plus static annotations, or a 500 with
//!   `{error, description}` when the cache is empty or unreadable
//! - `GET /health` - liveness, independent of the cache

mod error;
mod handlers;
mod response;

pub use error::ApiError;
pub use response::{Annotations, TipResponse};

use axum::{Router, routing::get};
use std::sync::Arc;
use tip_cache::TipService;

pub(crate) struct AppState {
    service: TipService,
    annotations: Annotations,
}

pub fn router(service: TipService, annotations: Annotations) -> Router {
    let state = Arc::new(AppState {
        service,
        annotations,
    });

    Router::new()
        .route("/", get(handlers::current_tip))
        .route("/health", get(handlers::health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::time::Duration;
    use tip_cache::{CURRENT_KEY, ExpiringStore, TipRecord};
    use tower::ServiceExt;

    const TTL: Duration = Duration::from_secs(300);
    const FEED: &str = "ws://localhost:9000/api/v1/bundles/tip_stream";

    fn service() -> TipService {
        TipService::new(Arc::new(ExpiringStore::new()), TTL)
    }

    fn record() -> TipRecord {
        TipRecord {
            time: "T1".to_string(),
            landed_tips_25th_percentile: 1.0,
            landed_tips_50th_percentile: 2.0,
            landed_tips_75th_percentile: 3.0,
            landed_tips_95th_percentile: 4.0,
            landed_tips_99th_percentile: 5.0,
        }
    }

    async fn get_json(svc: TipService, uri: &str) -> (StatusCode, Value) {
        let response = router(svc, Annotations::new(FEED))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    fn assert_cache_miss(status: StatusCode, body: &Value) {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
        assert!(body["description"].is_string());
        assert!(body.get("time").is_none());
    }

    #[tokio::test]
    async fn empty_cache_is_a_server_error() {
        let (status, body) = get_json(service(), "/").await;

        assert_cache_miss(status, &body);
        assert_eq!(body["error"], "key not found");
    }

    #[tokio::test]
    async fn serves_cached_record_with_annotations() {
        let svc = service();
        svc.store_tip(&record()).unwrap();

        let (status, body) = get_json(svc, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["time"], "T1");
        assert_eq!(body["landed_tips_25th_percentile"], 1.0);
        assert_eq!(body["landed_tips_50th_percentile"], 2.0);
        assert_eq!(body["landed_tips_75th_percentile"], 3.0);
        assert_eq!(body["landed_tips_95th_percentile"], 4.0);
        assert_eq!(body["landed_tips_99th_percentile"], 5.0);
        assert_eq!(body["annotations"]["language"], "Rust");
        assert_eq!(body["annotations"]["subscribed_to"], FEED);
        assert!(body["annotations"]["repository"].is_string());
        assert!(body["annotations"]["author"].is_string());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_record_is_a_server_error() {
        let svc = service();
        svc.store_tip(&record()).unwrap();

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let (status, body) = get_json(svc, "/").await;

        assert_cache_miss(status, &body);
    }

    #[tokio::test]
    async fn unparsable_cache_is_a_server_error() {
        let svc = service();
        svc.store().set(CURRENT_KEY, b"[]".to_vec(), TTL);

        let (status, body) = get_json(svc, "/").await;

        assert_cache_miss(status, &body);
        assert!(
            body["description"]
                .as_str()
                .unwrap()
                .starts_with("Could not parse")
        );
    }

    #[tokio::test]
    async fn health_does_not_need_a_record() {
        let (status, body) = get_json(service(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
