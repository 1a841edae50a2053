//! Configuration management for the code hook Lambda.

use std::env;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::messages::Locale;
use crate::{Error, Result};

/// Seconds a reservation context stays alive on the bot session.
pub const DEFAULT_CONTEXT_TTL_SECONDS: u32 = 600;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Language of the active message table
    pub locale: Locale,
    /// Offset of the business time zone, used to decide what "today" is
    pub utc_offset: FixedOffset,
    /// Ask the user to confirm once every slot is valid
    pub require_confirmation: bool,
    /// Youngest driver allowed to rent a car
    pub min_driver_age: u32,
    /// Lifetime of the reservation context
    pub context_ttl_seconds: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::English,
            // America/New_York standard time
            utc_offset: FixedOffset::west_opt(5 * 3600).unwrap_or_else(|| Utc.fix()),
            require_confirmation: true,
            min_driver_age: 18,
            context_ttl_seconds: DEFAULT_CONTEXT_TTL_SECONDS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any name-to-value source; unset names keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let locale = match lookup("BOT_LOCALE") {
            Some(value) => value.parse()?,
            None => defaults.locale,
        };

        let utc_offset = match lookup("BOT_UTC_OFFSET_MINUTES") {
            Some(value) => {
                let minutes: i32 = parse_var("BOT_UTC_OFFSET_MINUTES", &value)?;
                minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or_else(|| {
                        Error::Config(format!("BOT_UTC_OFFSET_MINUTES out of range: {}", minutes))
                    })?
            }
            None => defaults.utc_offset,
        };

        Ok(Self {
            locale,
            utc_offset,
            require_confirmation: var_or(&lookup, "REQUIRE_CONFIRMATION", defaults.require_confirmation)?,
            min_driver_age: var_or(&lookup, "MIN_DRIVER_AGE", defaults.min_driver_age)?,
            context_ttl_seconds: var_or(&lookup, "CONTEXT_TTL_SECONDS", defaults.context_ttl_seconds)?,
        })
    }

    /// Current calendar date in the business time zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }
}

fn var_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => parse_var(name, &value),
        None => Ok(default),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.utc_offset.local_minus_utc(), -5 * 3600);
        assert!(config.require_confirmation);
        assert_eq!(config.min_driver_age, 18);
        assert_eq!(config.context_ttl_seconds, 600);
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| {
            vars.iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        }
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("BOT_LOCALE", "es_US"),
            ("BOT_UTC_OFFSET_MINUTES", "-420"),
            ("REQUIRE_CONFIRMATION", "false"),
            ("MIN_DRIVER_AGE", "21"),
            ("CONTEXT_TTL_SECONDS", "120"),
        ]))
        .unwrap();
        assert_eq!(config.locale, Locale::Spanish);
        assert_eq!(config.utc_offset.local_minus_utc(), -7 * 3600);
        assert!(!config.require_confirmation);
        assert_eq!(config.min_driver_age, 21);
        assert_eq!(config.context_ttl_seconds, 120);
    }

    #[test]
    fn test_from_lookup_without_variables_uses_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.utc_offset.local_minus_utc(), -5 * 3600);
        assert_eq!(config.min_driver_age, 18);
    }

    #[test]
    fn test_unknown_locale_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("BOT_LOCALE", "fr_FR")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_utc_offset_is_range_checked() {
        for minutes in ["1440", "-1440", "2147483647", "east"] {
            let err = Config::from_lookup(lookup(&[("BOT_UTC_OFFSET_MINUTES", minutes)]))
                .unwrap_err();
            assert!(matches!(err, Error::Config(_)), "offset {}", minutes);
        }
        let config = Config::from_lookup(lookup(&[("BOT_UTC_OFFSET_MINUTES", "330")])).unwrap();
        assert_eq!(config.utc_offset.local_minus_utc(), 330 * 60);
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var::<u32>("MIN_DRIVER_AGE", " 21 ").unwrap(), 21);
        assert!(parse_var::<bool>("REQUIRE_CONFIRMATION", "yes").is_err());
    }
}
