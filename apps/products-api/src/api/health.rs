//! Health check endpoints

use axum::{http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

const SERVICE: &str = "products-api";

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

fn health_response(status: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: status.to_string(),
        service: SERVICE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Liveness: the process is up
async fn health() -> Json<HealthResponse> {
    health_response("healthy")
}

/// Readiness: the process can reach MongoDB
async fn ready(state: AppState) -> (StatusCode, Json<HealthResponse>) {
    match state.db.list_collection_names().await {
        Ok(_) => (StatusCode::OK, health_response("ready")),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed: MongoDB unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                health_response("not ready"),
            )
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(move || ready(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::Request;
    use core_config::server::ServerConfig;
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use mongodb::{options::ClientOptions, Client};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt; // for oneshot()

    // State wired to a Mongo address nothing listens on, with timeouts short
    // enough for tests
    async fn unreachable_state() -> AppState {
        let url = "mongodb://127.0.0.1:1";

        let mut options = ClientOptions::parse(url).await.unwrap();
        options.connect_timeout = Some(Duration::from_millis(100));
        options.server_selection_timeout = Some(Duration::from_millis(100));
        let client = Client::with_options(options).unwrap();

        let config = Config {
            mongodb: MongoConfig::with_database(url, "test"),
            server: ServerConfig::default(),
            environment: Environment::Development,
        };

        AppState::new(config, client)
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_healthy_without_database() {
        let response = router(unreachable_state().await)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "products-api");
    }

    #[tokio::test]
    async fn test_ready_reports_503_when_mongodb_is_unreachable() {
        let response = router(unreachable_state().await)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["status"], "not ready");
    }
}
