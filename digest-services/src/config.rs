//! Environment-driven configuration for the digest service

use chrono::NaiveTime;
use thiserror::Error;

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_DB_PATH: &str = "data/subscribers.db";

/// Configuration for the digest service, loaded once at startup
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// SMTP username; also the From address
    pub email_user: String,
    /// SMTP password
    pub email_pass: String,
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS)
    pub smtp_port: u16,
    /// Topics to fetch news for, in configured order
    pub topics: Vec<String>,
    /// Daily send time, local wall clock
    pub schedule_time: NaiveTime,
    /// Exa.ai API key
    pub exa_api_key: String,
    /// Path to the subscriber database
    pub db_path: String,
}

impl DigestConfig {
    /// Load configuration from environment variables
    ///
    /// `EMAIL_USER`, `EMAIL_PASS`, `TOPICS`, `SCHEDULE_TIME` and
    /// `EXA_API_KEY` are required; the rest have defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let email_user = require("EMAIL_USER")?;
        let email_pass = require("EMAIL_PASS")?;

        let smtp_host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = match std::env::var("SMTP_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "SMTP_PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_SMTP_PORT,
        };

        let raw_topics = require("TOPICS")?;
        let topics = parse_topics(&raw_topics);
        if topics.is_empty() {
            return Err(ConfigError::Invalid {
                var: "TOPICS",
                value: raw_topics,
            });
        }

        let schedule_time = parse_schedule_time(&require("SCHEDULE_TIME")?)?;
        let exa_api_key = require("EXA_API_KEY")?;
        let db_path = std::env::var("SUBSCRIBERS_DB_PATH")
            .unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

        Ok(Self {
            email_user,
            email_pass,
            smtp_host,
            smtp_port,
            topics,
            schedule_time,
            exa_api_key,
            db_path,
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::Missing(var))
}

/// Split a comma-separated topic list, trimming and dropping blanks
fn parse_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a daily send time in `HH:MM` format
fn parse_schedule_time(raw: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| ConfigError::Invalid {
        var: "SCHEDULE_TIME",
        value: raw.to_string(),
    })
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_topics_trims_and_drops_blanks() {
        assert_eq!(parse_topics("ai, space"), vec!["ai", "space"]);
        assert_eq!(parse_topics(" ai ,, space ,"), vec!["ai", "space"]);
        assert!(parse_topics(" , ,").is_empty());
    }

    #[test]
    fn test_parse_schedule_time() {
        let time = parse_schedule_time("08:30").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());

        assert!(parse_schedule_time("8 o'clock").is_err());
        assert!(parse_schedule_time("25:00").is_err());
    }
}
