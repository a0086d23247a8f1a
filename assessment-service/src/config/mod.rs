use crate::catalog::CatalogEdition;
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::middleware::cors::{parse_origins, WILDCARD_ORIGIN};
use std::env;

const DEFAULT_DATABASE: &str = "one_thought";

#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    pub common: core_config::Config,
    /// `None` disables the MongoDB collaborator.
    pub mongodb: Option<MongoConfig>,
    pub cors: CorsConfig,
    pub catalog: CatalogConfig,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![WILDCARD_ORIGIN.to_string()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub edition: CatalogEdition,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            mongodb: None,
            cors: CorsConfig::default(),
            catalog: CatalogConfig::default(),
            otlp_endpoint: None,
        }
    }
}

impl AssessmentConfig {
    pub fn load() -> Result<Self, AppError> {
        let mut common = core_config::Config::load()?;
        let is_prod = core_config::is_production();

        if let Ok(level) = env::var("LOG_LEVEL") {
            common.log_level = level;
        }

        let mongodb = match non_empty_env("MONGO_URL") {
            Some(uri) => Some(MongoConfig {
                uri,
                database: get_env("DB_NAME", Some(DEFAULT_DATABASE), is_prod)?,
            }),
            None if is_prod => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "MONGO_URL is required in production but not set"
                )))
            }
            None => None,
        };

        let edition = get_env("CATALOG_EDITION", Some("extended"), false)?
            .parse::<CatalogEdition>()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(AssessmentConfig {
            common,
            mongodb,
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ORIGINS",
                    Some(WILDCARD_ORIGIN),
                    false,
                )?),
            },
            catalog: CatalogConfig { edition },
            otlp_endpoint: non_empty_env("OTLP_ENDPOINT"),
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
