pub mod app_config;
pub mod config;
pub mod form;
pub mod pricing;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, override_backend_url};
pub use form::{FormError, ItemForm};
pub use pricing::{parse_price, PriceInput, PricingAssumptions};
pub use products::{
    Category, KpiSnapshot, NewProduct, Product, ProductStatus, PLACEHOLDER_IMAGE_URL,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
