use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://dealsheaven.in";

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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let base_url = parse_base_url(&or_default("DEALHUNTER_BASE_URL", DEFAULT_BASE_URL))?;

    let bind_addr = or_default("DEALHUNTER_BIND_ADDR", "127.0.0.1:8501")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("DEALHUNTER_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("DEALHUNTER_LOG_LEVEL", "info");
    let output_path = PathBuf::from(or_default("DEALHUNTER_OUTPUT_PATH", "scraped_deals.csv"));

    let request_timeout_secs = parse_u64("DEALHUNTER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("DEALHUNTER_USER_AGENT", "dealhunter/0.1 (deal-listings)");

    let max_concurrent_walks = parse_usize("DEALHUNTER_MAX_CONCURRENT_WALKS", "8")?;
    if max_concurrent_walks == 0 {
        return Err(invalid(
            "DEALHUNTER_MAX_CONCURRENT_WALKS",
            "must be at least 1".to_string(),
        ));
    }

    // 0 disables the bound.
    let max_pages_per_walk = match parse_u32("DEALHUNTER_MAX_PAGES_PER_WALK", "200")? {
        0 => None,
        n => Some(n),
    };

    let max_interactive_pages = parse_u32("DEALHUNTER_MAX_INTERACTIVE_PAGES", "50")?;
    if max_interactive_pages == 0 {
        return Err(invalid(
            "DEALHUNTER_MAX_INTERACTIVE_PAGES",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        base_url,
        bind_addr,
        log_level,
        output_path,
        request_timeout_secs,
        user_agent,
        max_concurrent_walks,
        max_pages_per_walk,
        max_interactive_pages,
    })
}

/// Checks the scheme and strips trailing slashes so URL templates can append
/// `/store/...` directly.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEALHUNTER_BASE_URL".to_string(),
            reason: format!("\"{raw}\" is not an http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
