use assessment_service::catalog::CatalogEdition;
use assessment_service::config::{AssessmentConfig, CatalogConfig, CorsConfig};
use assessment_service::services::init_metrics;
use assessment_service::startup::Application;
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(CatalogEdition::Extended).await
    }

    pub async fn spawn_with(edition: CatalogEdition) -> Self {
        // One process-wide recorder, shared by every app in this test binary
        init_metrics();

        // Use random port for testing (port 0)
        let config = AssessmentConfig {
            common: CoreConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                ..CoreConfig::default()
            },
            mongodb: None,
            cors: CorsConfig::default(),
            catalog: CatalogConfig { edition },
            otlp_endpoint: None,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped(std::future::pending()).await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
