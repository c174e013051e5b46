//! Process configuration, read once at start-up from the environment.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path of the SQLite database file (`DB_PATH`).
    pub db_path: String,
    /// Listen address of the HTTP server (`BIND_ADDR`).
    pub bind_addr: String,
}

impl Settings {
    /// Loads `.env` if present, then reads `DB_PATH` and `BIND_ADDR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_environment(Environment::default())
    }

    fn from_environment(source: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(vars))
    }

    #[test]
    fn bind_addr_falls_back_to_default() {
        let settings = Settings::from_environment(env(&[("DB_PATH", "trivia.db")])).unwrap();
        assert_eq!(settings.db_path, "trivia.db");
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn bind_addr_is_overridable() {
        let settings = Settings::from_environment(env(&[
            ("DB_PATH", "trivia.db"),
            ("BIND_ADDR", "127.0.0.1:5000"),
        ]))
        .unwrap();
        assert_eq!(settings.bind_addr, "127.0.0.1:5000");
    }

    #[test]
    fn db_path_is_required() {
        assert!(Settings::from_environment(env(&[])).is_err());
    }
}
