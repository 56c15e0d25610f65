use std::{env, time::Duration};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub countdown_tick_millis: u64,
    pub max_active_sessions: usize,
    pub session_idle_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "examania-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            countdown_tick_millis: env::var("COUNTDOWN_TICK_MILLIS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(1000),
            max_active_sessions: env::var("MAX_ACTIVE_SESSIONS")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(1000),
            session_idle_ttl_secs: env::var("SESSION_IDLE_TTL_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(1800),
        }
    }

    /// Period of one countdown tick. Each tick takes one second off the clock.
    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_millis)
    }

    /// How long a session that is not running a test may sit untouched
    /// before the store reclaims it.
    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_secs(self.session_idle_ttl_secs)
    }

    /// Reject settings that would leave the server unable to run timed tests
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.countdown_tick_millis == 0 {
            return Err(AppError::InvalidConfiguration(
                "COUNTDOWN_TICK_MILLIS must be greater than zero".to_string(),
            ));
        }

        if self.max_active_sessions == 0 {
            return Err(AppError::InvalidConfiguration(
                "MAX_ACTIVE_SESSIONS must be greater than zero".to_string(),
            ));
        }

        if self.session_idle_ttl_secs == 0 {
            return Err(AppError::InvalidConfiguration(
                "SESSION_IDLE_TTL_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "examania-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            countdown_tick_millis: 1000,
            max_active_sessions: 8,
            session_idle_ttl_secs: 3600,
        }
    }
}
