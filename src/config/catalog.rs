//! Catalog configuration loading from config.toml
//!
//! The catalog lists the events, promo codes and projects the collaborators serve,
//! plus the sender address for outgoing mail. It is used to seed the database on
//! first run or when entries are missing.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct CatalogConfig {
    /// Bookable events
    #[serde(default)]
    pub events: Vec<EventConfig>,
    /// Promo codes
    #[serde(default)]
    pub promo_codes: Vec<PromoCodeConfig>,
    /// Projects and their deadlines
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    /// Outgoing mail settings
    #[serde(default)]
    pub mail: MailConfig,
}

/// A bookable event
#[derive(Debug, Deserialize, Clone)]
pub struct EventConfig {
    /// Event ID used in booking references
    pub id: i64,
    /// Display name
    pub name: String,
    /// Seats available
    pub seats: i64,
}

/// A promo code
#[derive(Debug, Deserialize, Clone)]
pub struct PromoCodeConfig {
    /// The code customers enter
    pub code: String,
    /// How many times it may be applied
    pub usage_left: i32,
    /// Whether it has already expired
    #[serde(default)]
    pub is_expired: bool,
}

/// A project with a deadline
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectConfig {
    /// Project ID
    pub id: i64,
    /// Project name
    pub name: String,
    /// RFC 3339 timestamp, e.g. `"2025-05-15T00:00:00Z"`
    pub deadline: DateTime<Utc>,
}

/// Outgoing mail settings
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// Sender address written to the outbox
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from: "noreply@localhost".to_string(),
        }
    }
}

/// Loads the catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the catalog from the default location (./config.toml)
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            [mail]
            from = "bookings@example.com"

            [[events]]
            id = 1
            name = "Concert"
            seats = 200

            [[promo_codes]]
            code = "PROMO10"
            usage_left = 5

            [[promo_codes]]
            code = "OLD"
            usage_left = 3
            is_expired = true

            [[projects]]
            id = 1
            name = "Website"
            deadline = "2025-05-15T00:00:00Z"
        "#;

        let config: CatalogConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.mail.from, "bookings@example.com");
        assert_eq!(config.events.len(), 1);
        assert_eq!(config.events[0].seats, 200);
        assert_eq!(config.promo_codes.len(), 2);
        assert!(!config.promo_codes[0].is_expired);
        assert!(config.promo_codes[1].is_expired);
        assert_eq!(
            config.projects[0].deadline,
            Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CatalogConfig = toml::from_str("").unwrap();
        assert!(config.events.is_empty());
        assert_eq!(config.mail.from, "noreply@localhost");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_deadline_is_rejected() {
        let toml_str = r#"
            [[projects]]
            id = 1
            name = "Broken"
            deadline = "next tuesday"
        "#;
        assert!(toml::from_str::<CatalogConfig>(toml_str).is_err());
    }
}
