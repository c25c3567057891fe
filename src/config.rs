#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use barber::{AppointmentFilter, BarberError, Result, StaffSession};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = ".barber/config.toml";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 3_000;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: Option<String>,
    pub staff_uid: Option<String>,
    pub staff_name: Option<String>,
    pub staff_email: Option<String>,
    pub default_filter: Option<AppointmentFilter>,
    pub connect_timeout_ms: Option<u64>,
}

impl Config {
    #[must_use]
    pub fn connect_timeout_ms(&self) -> u64 {
        self.connect_timeout_ms.unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS)
    }

    #[must_use]
    pub fn default_filter(&self) -> AppointmentFilter {
        self.default_filter.unwrap_or_default()
    }

    /// Staff identity: `BARBER_STAFF_*` variables override the file.
    #[must_use]
    pub fn staff_session(&self) -> Option<StaffSession> {
        self.staff_session_with(|key| std::env::var(key).ok())
    }

    fn staff_session_with<F>(&self, env_lookup: F) -> Option<StaffSession>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, fallback: &Option<String>| {
            env_lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .or_else(|| fallback.clone())
        };

        StaffSession::from_claims(
            pick("BARBER_STAFF_UID", &self.staff_uid),
            pick("BARBER_STAFF_NAME", &self.staff_name),
            pick("BARBER_STAFF_EMAIL", &self.staff_email),
        )
    }

    /// # Errors
    /// Returns [`BarberError::Unauthorized`] when no staff member is signed in.
    pub fn require_session(&self) -> Result<StaffSession> {
        self.staff_session().ok_or_else(|| {
            BarberError::Unauthorized(
                "no staff session; set staff_uid or BARBER_STAFF_UID".to_string(),
            )
        })
    }
}

/// # Errors
/// Returns [`BarberError::ConfigError`] if the file exists but cannot be read or parsed.
pub async fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|e| BarberError::ConfigError(format!("Failed to read config: {e}")))?;

    parse_config_content(&content)
}

/// # Errors
/// Returns [`BarberError::ConfigError`] for an unknown filter or a non-numeric timeout.
pub fn parse_config_content(content: &str) -> Result<Config> {
    let mut config = Config::default();

    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        if let Some(value) = parse_key_value(line, "database_url") {
            config.database_url = non_empty(expand_env_vars(value));
        }
        if let Some(value) = parse_key_value(line, "staff_uid") {
            config.staff_uid = non_empty(expand_env_vars(value));
        }
        if let Some(value) = parse_key_value(line, "staff_name") {
            config.staff_name = non_empty(expand_env_vars(value));
        }
        if let Some(value) = parse_key_value(line, "staff_email") {
            config.staff_email = non_empty(expand_env_vars(value));
        }
        if let Some(value) = parse_key_value(line, "default_filter") {
            let filter = AppointmentFilter::try_from(value).map_err(|e| {
                BarberError::ConfigError(format!("default_filter: {e}"))
            })?;
            config.default_filter = Some(filter);
        }
        if let Some(value) = parse_key_value(line, "connect_timeout_ms") {
            let timeout = value.parse::<u64>().map_err(|e| {
                BarberError::ConfigError(format!("connect_timeout_ms: {e}"))
            })?;
            config.connect_timeout_ms = Some(timeout);
        }
    }

    Ok(config)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn expand_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_part = &result[start + 2..start + end];
            let (var_name, default) = var_part.split_once(":-").unwrap_or((var_part, ""));
            let value = std::env::var(var_name).unwrap_or_else(|_| default.to_string());
            result.replace_range(start..=(start + end), &value);
        } else {
            break;
        }
    }
    result
}

pub fn parse_key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split_once('=')
        .and_then(|(lhs, rhs)| (lhs.trim() == key).then_some(rhs.trim().trim_matches('"')))
}

/// Connection candidates, tried in order: the `--database-url` flag, then
/// `DATABASE_URL`, then the config file, then the `BARBER_DB_*` default.
#[must_use]
pub fn database_url_candidates(explicit: Option<&str>, config: &Config) -> Vec<String> {
    let mut candidates = Vec::new();

    push_unique(&mut candidates, explicit.and_then(|url| non_empty(url.to_string())));
    push_unique(&mut candidates, non_empty_env_var("DATABASE_URL"));
    push_unique(&mut candidates, config.database_url.clone());
    push_unique(&mut candidates, Some(computed_default_database_url()));

    candidates
}

fn push_unique(target: &mut Vec<String>, value: Option<String>) {
    if let Some(candidate) = value {
        if !target.iter().any(|existing| existing == &candidate) {
            target.push(candidate);
        }
    }
}

fn non_empty_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn computed_default_database_url() -> String {
    let user = std::env::var("BARBER_DB_USER").unwrap_or_else(|_| "barber".to_string());
    let pass = std::env::var("BARBER_DB_PASSWORD").unwrap_or_else(|_| "barber".to_string());
    let host = std::env::var("BARBER_DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("BARBER_DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let db = std::env::var("BARBER_DB_NAME").unwrap_or_else(|_| "barber_db".to_string());
    format!("postgres://{user}:{pass}@{host}:{port}/{db}")
}

#[must_use]
pub fn mask_database_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("********"));
            }
            parsed.to_string()
        }
        Err(_) => "<invalid-database-url>".to_string(),
    }
}
