use std::{env, time::Duration};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/tatame.db";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATIC_DIR: &str = "./static";
pub const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 4000;

/// Runtime settings, read once from the environment at startup.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub database_url: String,
    pub port: u16,
    pub static_dir: String,
    pub carousel_interval: Duration,
    pub fetch_timeout: Duration,
    pub seed_demo_content: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            carousel_interval: Duration::from_millis(DEFAULT_CAROUSEL_INTERVAL_MS),
            fetch_timeout: Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            seed_demo_content: false,
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.database_url);
        let static_dir = lookup("STATIC_DIR")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.static_dir);
        let port = parse_or(&lookup, "PORT", defaults.port);
        let carousel_interval =
            parse_or(&lookup, "CAROUSEL_INTERVAL_MS", DEFAULT_CAROUSEL_INTERVAL_MS);
        let fetch_timeout = parse_or(&lookup, "FETCH_TIMEOUT_MS", DEFAULT_FETCH_TIMEOUT_MS);
        let seed_demo_content = lookup("SEED_DEMO_CONTENT")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed_demo_content);

        Self {
            database_url,
            port,
            static_dir,
            carousel_interval: Duration::from_millis(carousel_interval.max(1)),
            fetch_timeout: Duration::from_millis(fetch_timeout.max(1)),
            seed_demo_content,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("Ignoring invalid {key}={raw:?}; using {default}");
            default
        }
    }
}
