use crate::store::{RemoteConfig, StoreConfig};

/// Track server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub environment: String,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,

    /// Backend selection and remote table store settings.
    pub store: StoreConfig,

    /// Minutes an order may sit in `picked_up` before the overdue scan
    /// completes it.
    pub auto_complete_after_mins: i64,
    /// Minutes between overdue scans. Kept below the threshold so no
    /// order waits more than threshold + interval.
    pub auto_complete_interval_mins: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            http_port: env_parsed("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),

            store: StoreConfig {
                use_durable_backend: env_parsed("USE_DURABLE_BACKEND", true),
                force_fallback: env_parsed("FORCE_FALLBACK_STORE", false),
                remote: RemoteConfig {
                    url: std::env::var("TABLE_STORE_URL")
                        .unwrap_or_else(|_| "127.0.0.1:8000".into()),
                    namespace: std::env::var("TABLE_STORE_NS").unwrap_or_else(|_| "conch".into()),
                    database: std::env::var("TABLE_STORE_DB").unwrap_or_else(|_| "track".into()),
                    username: std::env::var("TABLE_STORE_USER").unwrap_or_else(|_| "root".into()),
                    password: std::env::var("TABLE_STORE_PASS").unwrap_or_else(|_| "root".into()),
                },
            },

            auto_complete_after_mins: env_parsed("AUTO_COMPLETE_AFTER_MINS", 30),
            auto_complete_interval_mins: env_parsed("AUTO_COMPLETE_INTERVAL_MINS", 10),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
