use anyhow::{Context, Result};

const DEFAULT_SUPABASE_URL: &str = "http://127.0.0.1:54321";

/// Application configuration loaded from environment variables.
/// Startup fails if the store credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
    /// When set, the store is reached over a direct PostgreSQL connection instead of REST.
    pub database_url: Option<String>,
    pub cors_origins: CorsOrigins,
    pub host: String,
    pub port: u16,
    pub store_timeout_secs: u64,
    pub rust_log: String,
}

/// Allowed cross-origin request sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            supabase_url: var("SUPABASE_URL", DEFAULT_SUPABASE_URL),
            supabase_key: require(&lookup, "SUPABASE_ANON_KEY")?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            cors_origins: parse_cors_origins(&var("CORS_ORIGINS", "*")),
            host: var("API_HOST", "0.0.0.0"),
            port: var("API_PORT", "8000")
                .parse::<u16>()
                .context("API_PORT must be a valid port number")?,
            store_timeout_secs: var("STORE_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("STORE_TIMEOUT_SECS must be a whole number of seconds")?,
            rust_log: var("RUST_LOG", "info"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses a comma-separated origin list. A `*` anywhere in the list allows every origin.
pub fn parse_cors_origins(raw: &str) -> CorsOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}
