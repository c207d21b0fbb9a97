use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Site root every listing URL is built from, without a trailing slash.
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub output_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Jobs run at once by a batch campaign. Always at least 1.
    pub max_concurrent_walks: usize,
    /// Safety bound on pages fetched by one walk; `None` walks until empty.
    pub max_pages_per_walk: Option<u32>,
    /// Widest inclusive page range the interactive browser accepts.
    pub max_interactive_pages: u32,
}
