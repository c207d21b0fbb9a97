use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.base_url, "https://dealsheaven.in");
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8501");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.output_path.to_str(), Some("scraped_deals.csv"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "dealhunter/0.1 (deal-listings)");
    assert_eq!(cfg.max_concurrent_walks, 8);
    assert_eq!(cfg.max_pages_per_walk, Some(200));
    assert_eq!(cfg.max_interactive_pages, 50);
}

#[test]
fn build_app_config_strips_trailing_slash_from_base_url() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_BASE_URL", "http://127.0.0.1:9000/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_BASE_URL", "ftp://dealsheaven.in");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DEALHUNTER_BASE_URL"),
        "expected InvalidEnvVar(DEALHUNTER_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_scheme_without_host() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_BASE_URL", "https://");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DEALHUNTER_BIND_ADDR"),
        "expected InvalidEnvVar(DEALHUNTER_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DEALHUNTER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(DEALHUNTER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_concurrent_walks_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_MAX_CONCURRENT_WALKS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DEALHUNTER_MAX_CONCURRENT_WALKS"),
        "expected InvalidEnvVar(DEALHUNTER_MAX_CONCURRENT_WALKS), got: {result:?}"
    );
}

#[test]
fn max_pages_per_walk_zero_disables_bound() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_MAX_PAGES_PER_WALK", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_pages_per_walk, None);
}

#[test]
fn max_pages_per_walk_override() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_MAX_PAGES_PER_WALK", "12");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_pages_per_walk, Some(12));
}

#[test]
fn max_interactive_pages_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_MAX_INTERACTIVE_PAGES", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn output_path_and_user_agent_override() {
    let mut map = HashMap::new();
    map.insert("DEALHUNTER_OUTPUT_PATH", "/tmp/deals.csv");
    map.insert("DEALHUNTER_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output_path.to_str(), Some("/tmp/deals.csv"));
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}
