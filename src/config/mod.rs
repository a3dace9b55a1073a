use chrono::TimeDelta;
use std::env;
use std::time::Duration;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub device_file: String,
    pub listen_addr: String,
    pub static_dir: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub require_login: bool,
    pub ui_password: Option<String>,
    pub ssh_port: u16,
    pub ssh_connect_timeout_secs: u64,
    pub ssh_read_timeout_secs: u64,
}

/// Upper bound for `SESSION_TTL_HOURS` (one year)
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unparsable numbers fall back to defaults
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            device_file: get("DEVICE_FILE", &defaults.device_file),
            listen_addr: get("LISTEN_ADDR", &defaults.listen_addr),
            static_dir: get("STATIC_DIR", &defaults.static_dir),
            session_secret: get("SESSION_SECRET", ""),
            session_ttl_hours: parse_or(lookup("SESSION_TTL_HOURS"), defaults.session_ttl_hours)
                .clamp(1, MAX_SESSION_TTL_HOURS),
            require_login: lookup("REQUIRE_LOGIN").is_some_and(|v| parse_bool(&v)),
            ui_password: lookup("UI_PASSWORD").filter(|s| !s.is_empty()),
            ssh_port: parse_or(lookup("SSH_PORT"), defaults.ssh_port),
            ssh_connect_timeout_secs: parse_or(
                lookup("SSH_CONNECT_TIMEOUT_SECS"),
                defaults.ssh_connect_timeout_secs,
            ),
            ssh_read_timeout_secs: parse_or(lookup("SSH_READ_TIMEOUT_SECS"), defaults.ssh_read_timeout_secs),
        }
    }

    pub fn ssh_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.ssh_connect_timeout_secs)
    }

    pub fn ssh_read_timeout(&self) -> Duration {
        Duration::from_secs(self.ssh_read_timeout_secs)
    }

    /// Session token lifetime, kept within 1 hour and one year
    pub fn session_ttl(&self) -> TimeDelta {
        let hours = self.session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS);
        TimeDelta::try_hours(hours).unwrap_or_else(|| TimeDelta::hours(MAX_SESSION_TTL_HOURS))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_file: "devices.json".to_string(),
            listen_addr: "127.0.0.1:5000".to_string(),
            static_dir: "static".to_string(),
            session_secret: String::new(),
            session_ttl_hours: 24,
            require_login: false,
            ui_password: None,
            ssh_port: 22,
            ssh_connect_timeout_secs: 10,
            ssh_read_timeout_secs: 10,
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
