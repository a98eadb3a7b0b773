use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
    #[error("{0} is set but {1} is missing")]
    Incomplete(&'static str, &'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
}

/// Server settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub utc_offset_hours: i32,
    pub telegram: Option<TelegramConfig>,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram = match (get("TELEGRAM_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig { token, chat_id }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::Incomplete("TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"))
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete("TELEGRAM_CHAT_ID", "TELEGRAM_TOKEN"))
            }
        };

        let utc_offset_hours: i32 =
            parse(get("REPORT_UTC_OFFSET_HOURS"), "REPORT_UTC_OFFSET_HOURS", 5)?;
        if !(-23..=23).contains(&utc_offset_hours) {
            return Err(ConfigError::Invalid {
                name: "REPORT_UTC_OFFSET_HOURS",
                value: utc_offset_hours.to_string(),
            });
        }

        Ok(Self {
            database_url: get("DATABASE_URL"),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(get("PORT"), "PORT", 8080)?,
            utc_offset_hours,
            telegram,
            seed_demo_data: parse(get("SEED_DEMO_DATA"), "SEED_DEMO_DATA", false)?,
        })
    }
}

fn parse<T: FromStr>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.utc_offset_hours, 5);
        assert_eq!(cfg.telegram, None);
        assert!(!cfg.seed_demo_data);
    }

    #[test]
    fn reads_all_values() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://pos@localhost/pos"),
            ("PORT", "9000"),
            ("REPORT_UTC_OFFSET_HOURS", "-3"),
            ("TELEGRAM_TOKEN", " abc "),
            ("TELEGRAM_CHAT_ID", "-100"),
            ("SEED_DEMO_DATA", "true"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://pos@localhost/pos"));
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.utc_offset_hours, -3);
        assert_eq!(
            cfg.telegram,
            Some(TelegramConfig {
                token: "abc".into(),
                chat_id: "-100".into()
            })
        );
        assert!(cfg.seed_demo_data);
    }

    #[test]
    fn rejects_bad_port_and_offset() {
        assert!(matches!(
            config(&[("PORT", "http")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(config(&[("REPORT_UTC_OFFSET_HOURS", "48")]).is_err());
    }

    #[test]
    fn telegram_needs_both_values() {
        assert!(matches!(
            config(&[("TELEGRAM_TOKEN", "abc")]),
            Err(ConfigError::Incomplete("TELEGRAM_TOKEN", _))
        ));
    }
}
