use std::env;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rust_env: String,
    pub api_host: String,
    pub api_port: u16,
    pub leetcode_base_url: String,
    pub leetcode_graphql_url: String,
    pub leetcode_cookie: Option<String>,
    pub leetcode_csrf_token: Option<String>,
    pub leetcode_user_agent: Option<String>,
    pub leetcode_origin: Option<String>,
    pub leetcode_referer: Option<String>,
    pub upstream_timeout_seconds: u64,
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        load_dotenv_layers();
        Ok(Self {
            rust_env: read_optional_string("RUST_ENV", "development"),
            api_host: read_optional_string("API_HOST", "0.0.0.0"),
            api_port: read_optional_string("API_PORT", "8000")
                .parse::<u16>()
                .map_err(|e| format!("invalid API_PORT: {e}"))?,
            leetcode_base_url: read_optional_string("LEETCODE_BASE_URL", "https://leetcode.com"),
            leetcode_graphql_url: read_optional_string(
                "LEETCODE_GRAPHQL",
                "https://leetcode.com/graphql",
            ),
            leetcode_cookie: read_non_empty("LEETCODE_COOKIE"),
            leetcode_csrf_token: read_non_empty("LEETCODE_CSRF_TOKEN"),
            leetcode_user_agent: Some(read_optional_string(
                "LEETCODE_USER_AGENT",
                DEFAULT_USER_AGENT,
            )),
            leetcode_origin: Some(read_optional_string(
                "LEETCODE_ORIGIN",
                "https://leetcode.com",
            )),
            leetcode_referer: Some(read_optional_string(
                "LEETCODE_REFERER",
                "https://leetcode.com/problems/two-sum/",
            )),
            upstream_timeout_seconds: read_optional_u64("UPSTREAM_TIMEOUT_SECONDS", 30)?,
            poll_interval_ms: read_optional_u64("POLL_INTERVAL_MS", 1000)?,
            poll_max_attempts: read_optional_u64("POLL_MAX_ATTEMPTS", 30)?
                .clamp(1, u32::MAX as u64) as u32,
            cors_allowed_origins: read_optional_string("CORS_ALLOWED_ORIGINS", "*")
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.rust_env.eq_ignore_ascii_case("production")
    }
}

fn read_optional_u64(key: &str, default: u64) -> Result<u64, String> {
    match read_non_empty(key) {
        Some(v) => v.parse::<u64>().map_err(|e| format!("invalid {key}: {e}")),
        None => Ok(default),
    }
}

fn read_optional_string(key: &str, default: &str) -> String {
    read_non_empty(key).unwrap_or_else(|| default.to_string())
}

fn read_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn load_dotenv_layers() {
    for path in [".env", "../.env", "../../.env"] {
        let _ = dotenvy::from_path(path);
    }
}
