use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::pricing::PricingAssumptions;
use crate::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Replaces the configured backend URL with a command-line value, applying
/// the same checks as `STOCKR_BACKEND_URL`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` naming `--backend-url` if the value
/// has no `http://`/`https://` scheme or no host.
pub fn override_backend_url(config: &mut AppConfig, raw: &str) -> Result<(), ConfigError> {
    config.backend_url = parse_backend_url(raw).map_err(|reason| ConfigError::InvalidEnvVar {
        var: "--backend-url".to_string(),
        reason,
    })?;
    Ok(())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a config
/// pointed at the local development backend.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_decimal = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<Decimal>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("STOCKR_ENV", "development"))?;

    let backend_url = parse_backend_url(&or_default("STOCKR_BACKEND_URL", DEFAULT_BACKEND_URL))
        .map_err(|reason| invalid("STOCKR_BACKEND_URL", reason))?;
    let log_level = or_default("STOCKR_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("STOCKR_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "STOCKR_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("STOCKR_USER_AGENT", "stockr/0.1 (inventory-dashboard)");

    let fee_rate = parse_decimal("STOCKR_FEE_RATE", "0.12")?;
    if fee_rate < Decimal::ZERO || fee_rate >= Decimal::ONE {
        return Err(invalid(
            "STOCKR_FEE_RATE",
            format!("{fee_rate} is outside [0, 1)"),
        ));
    }
    let shipping_cost = parse_decimal("STOCKR_SHIPPING_COST", "8")?;
    if shipping_cost < Decimal::ZERO {
        return Err(invalid(
            "STOCKR_SHIPPING_COST",
            format!("{shipping_cost} is negative"),
        ));
    }

    Ok(AppConfig {
        env,
        backend_url,
        log_level,
        request_timeout_secs,
        user_agent,
        pricing: PricingAssumptions::new(fee_rate, shipping_cost),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOCKR_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Checks the scheme and strips trailing slashes so paths can be appended
/// with a single `/`.
fn parse_backend_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    let Some(rest) = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
    else {
        return Err(format!("'{raw}' must start with http:// or https://"));
    };
    if rest.trim_matches('/').is_empty() {
        return Err(format!("'{raw}' has no host"));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
