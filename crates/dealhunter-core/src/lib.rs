pub mod app_config;
pub mod catalog;
pub mod config;
pub mod deals;

use thiserror::Error;

pub use app_config::AppConfig;
pub use catalog::{Category, CategoryFilter, DealTab, Listing, Origin, Store, StoreFilter};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_BASE_URL};
pub use deals::{filter_by_title, DealRecord, Field, MISSING};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown store: {0}")]
    UnknownStore(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown deal tab: {0}")]
    UnknownDealTab(String),
}
