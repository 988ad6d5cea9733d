//! Calculator Module Implementation
//!
//! Validates and evaluates arithmetic expressions, persists every successful
//! calculation and serves the calculator and history pages over HTTP.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use api::rest::routes::router;
pub use config::{DatabaseConfig, DbEngine, SecretString};
pub use domain::model::CalculationRecord;
pub use domain::service::{Service, ServiceConfig};

pub use sea_orm;
