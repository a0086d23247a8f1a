//! HTTP handlers for assessment-service.

pub mod assessments;
pub mod health;

pub use assessments::{get_assessment, list_assessments, root};
pub use health::{fallback, health_check, metrics_endpoint, readiness_check};
