//! Application startup and lifecycle management.

use crate::catalog::Catalog;
use crate::config::AssessmentConfig;
use crate::handlers::{
    fallback, get_assessment, health_check, list_assessments, metrics_endpoint, readiness_check,
    root,
};
use crate::services::MongoDb;
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_layer, metrics::metrics_middleware,
    security_headers::security_headers_middleware, tracing::request_id_middleware,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub db: Option<MongoDb>,
}

pub fn build_router(state: AppState, config: &AssessmentConfig) -> Router {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/assessments", get(list_assessments))
        .route("/api/assessment/:assessment_id", get(get_assessment))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .fallback(fallback)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&config.cors.allowed_origins))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    db: Option<MongoDb>,
}

impl Application {
    /// Load the catalog, connect collaborators and bind the listener.
    /// Port 0 binds an ephemeral port.
    pub async fn build(config: AssessmentConfig) -> Result<Self, AppError> {
        let catalog = Catalog::embedded(config.catalog.edition).map_err(|e| {
            tracing::error!("Failed to load assessment catalog: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        tracing::info!(
            edition = %catalog.edition(),
            assessments = catalog.len(),
            "Assessment catalog loaded"
        );

        let db = match &config.mongodb {
            Some(mongo) => Some(MongoDb::connect(&mongo.uri, &mongo.database).await?),
            None => {
                tracing::info!("MONGO_URL not set, MongoDB collaborator disabled");
                None
            }
        };

        let state = AppState {
            catalog: Arc::new(catalog),
            db: db.clone(),
        };
        let router = build_router(state, &config);

        let address = config.common.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Assessment service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
            db,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until `shutdown` resolves, drain in-flight requests, then close
    /// the MongoDB client.
    pub async fn run_until_stopped<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await;

        if let Some(db) = self.db {
            db.shutdown().await;
        }

        result.map_err(|e| {
            tracing::error!("HTTP server error: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEdition;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    fn app(edition: CatalogEdition) -> Router {
        let state = AppState {
            catalog: Arc::new(Catalog::embedded(edition).unwrap()),
            db: None,
        };
        build_router(state, &AssessmentConfig::default())
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_answers_with_and_without_trailing_slash() {
        for uri in ["/api", "/api/"] {
            let response = get(app(CatalogEdition::Extended), uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            assert_eq!(body["message"], "One Thought for Therapy API");
        }
    }

    #[tokio::test]
    async fn base_edition_lists_nine_and_hides_mbti() {
        let body = json_body(get(app(CatalogEdition::Base), "/api/assessments").await).await;
        assert_eq!(body.as_array().unwrap().len(), 9);

        let response = get(app(CatalogEdition::Base), "/api/assessment/mbti").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["error"], "Assessment not found");
    }

    #[tokio::test]
    async fn unknown_route_is_a_json_404() {
        let response = get(app(CatalogEdition::Extended), "/api/nothing/here").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "No route for /api/nothing/here");
    }

    #[tokio::test]
    async fn responses_carry_security_headers_and_request_id() {
        let response = get(app(CatalogEdition::Extended), "/api/assessments").await;
        let headers = response.headers();
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert!(headers.get("x-request-id").is_some());
    }

    #[tokio::test]
    async fn health_reports_disabled_database() {
        let response = get(app(CatalogEdition::Extended), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["assessments"], 10);
        assert_eq!(body["checks"]["mongodb"], "disabled");

        let response = get(app(CatalogEdition::Extended), "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unreachable_database_fails_health_and_readiness() {
        // Nothing listens on port 1; the driver connects lazily so only the ping fails.
        let db = MongoDb::connect(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200",
            "readiness_test",
        )
        .await
        .unwrap();
        let state = AppState {
            catalog: Arc::new(Catalog::embedded(CatalogEdition::Extended).unwrap()),
            db: Some(db),
        };
        let router = build_router(state, &AssessmentConfig::default());

        let response = get(router.clone(), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["error"], "Service unavailable");

        let response = get(router, "/health").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "unhealthy");
    }

    #[tokio::test]
    async fn missing_assessment_keeps_caller_request_id() {
        let response = app(CatalogEdition::Extended)
            .oneshot(
                Request::builder()
                    .uri("/api/assessment/invalid")
                    .header("x-request-id", "lookup-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-request-id").unwrap(), "lookup-7");
        assert_eq!(json_body(response).await["error"], "Assessment not found");
    }
}
