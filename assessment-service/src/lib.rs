pub mod catalog;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub const SERVICE_NAME: &str = "assessment-service";
