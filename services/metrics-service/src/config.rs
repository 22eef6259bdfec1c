use std::{env, fs, time::Duration};

use uxmetrics_common::env_or;

/// Connection settings for the metrics store, injected at cold start.
///
/// The password comes from `DB_PASSWORD_FILE` (a mounted secret) when set,
/// falling back to `DB_PASSWORD`. It is never logged.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub connect_timeout: Duration,
    pub table: String,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = require("DB_HOST")?;
        let user = require("DB_USER")?;
        let password = read_password()?;
        let dbname = require("DB_NAME")?;
        let port = env_or("DB_PORT", 5432u16);
        let connect_timeout = Duration::from_secs(env_or("DB_CONNECT_TIMEOUT_SECS", 15u64));
        let table = env::var("DB_METRICS_TABLE").unwrap_or_else(|_| "MetricsSummary".to_string());

        Ok(Self {
            host,
            port,
            user,
            password,
            dbname,
            connect_timeout,
            table,
        })
    }
}

fn require(key: &str) -> Result<String, String> {
    env::var(key).map_err(|_| format!("{key} is required"))
}

fn read_password() -> Result<String, String> {
    if let Ok(path) = env::var("DB_PASSWORD_FILE") {
        return fs::read_to_string(&path)
            .map(|value| value.trim_end().to_string())
            .map_err(|err| format!("failed to read DB_PASSWORD_FILE {path}: {err}"));
    }
    require("DB_PASSWORD")
}
