//! Installation configuration.
//!
//! The open-hours window is configuration, not transition logic: change
//! it here and the handlers follow. Validation accumulates every violation
//! instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use safewatch::config::SafeConfig;
//! use safewatch::core::StateTag;
//!
//! let config = SafeConfig::from_json(r#"{ "opens": 8, "closes": 20 }"#).unwrap();
//! let valid = config.resolve().unwrap();
//!
//! assert_eq!(valid.open_hours.opens().get(), 8);
//! assert_eq!(valid.initial_state, StateTag::Day);
//! ```

use crate::core::{Hour, OpenHours, StateTag};
use crate::error::{ConfigError, ConfigViolation};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Raw configuration as read from a file or built by a driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SafeConfig {
    /// First hour inside the open window
    pub opens: i32,
    /// First hour after the open window
    pub closes: i32,
    pub initial_state: StateTag,
    pub initial_hour: i32,
}

impl Default for SafeConfig {
    fn default() -> Self {
        Self {
            opens: i32::from(OpenHours::DEFAULT_OPENS),
            closes: i32::from(OpenHours::DEFAULT_CLOSES),
            initial_state: StateTag::Day,
            initial_hour: 0,
        }
    }
}

/// Configuration that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidConfig {
    pub open_hours: OpenHours,
    pub initial_state: StateTag,
    pub initial_hour: Hour,
}

impl Default for ValidConfig {
    fn default() -> Self {
        Self {
            open_hours: OpenHours::default(),
            initial_state: StateTag::Day,
            initial_hour: Hour::MIDNIGHT,
        }
    }
}

fn hour_in_range(
    hour: i32,
    violation: fn(i32) -> ConfigViolation,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if Hour::new(hour).is_ok() {
        Validation::success(())
    } else {
        Validation::fail(violation(hour))
    }
}

impl SafeConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Run every check, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks = vec![
            hour_in_range(self.opens, ConfigViolation::OpensOutOfRange),
            hour_in_range(self.closes, ConfigViolation::ClosesOutOfRange),
            hour_in_range(self.initial_hour, ConfigViolation::InitialHourOutOfRange),
        ];

        if self.opens == self.closes {
            if let Ok(hour) = Hour::new(self.opens) {
                checks.push(Validation::fail(ConfigViolation::EmptyWindow(hour.get())));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and convert into typed values.
    pub fn resolve(&self) -> Result<ValidConfig, ConfigError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(ConfigError::Invalid(errors.iter().cloned().collect()));
        }

        let invalid = |violation: ConfigViolation| ConfigError::Invalid(vec![violation]);
        let opens = Hour::new(self.opens)
            .map_err(|_| invalid(ConfigViolation::OpensOutOfRange(self.opens)))?;
        let closes = Hour::new(self.closes)
            .map_err(|_| invalid(ConfigViolation::ClosesOutOfRange(self.closes)))?;
        let initial_hour = Hour::new(self.initial_hour)
            .map_err(|_| invalid(ConfigViolation::InitialHourOutOfRange(self.initial_hour)))?;
        let open_hours = OpenHours::new(opens, closes).map_err(invalid)?;

        Ok(ValidConfig {
            open_hours,
            initial_state: self.initial_state,
            initial_hour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SafeConfig::default();
        assert!(config.validate().is_success());
        assert_eq!(config.resolve().unwrap(), ValidConfig::default());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = SafeConfig {
            opens: -3,
            closes: 30,
            initial_state: StateTag::Night,
            initial_hour: 99,
        };

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::OpensOutOfRange(-3))));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::ClosesOutOfRange(30))));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::InitialHourOutOfRange(99))));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn empty_window_is_reported() {
        let config = SafeConfig {
            opens: 12,
            closes: 12,
            ..SafeConfig::default()
        };

        let err = config.resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ref v) if v == &vec![ConfigViolation::EmptyWindow(12)]
        ));
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = SafeConfig::from_json(r#"{ "initial_state": "Night" }"#).unwrap();
        assert_eq!(config.opens, 9);
        assert_eq!(config.closes, 17);
        assert_eq!(config.initial_state, StateTag::Night);
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let result = SafeConfig::from_json(r#"{ "opening": 9 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn wrapping_window_resolves() {
        let config = SafeConfig {
            opens: 22,
            closes: 6,
            ..SafeConfig::default()
        };
        let valid = config.resolve().unwrap();
        assert!(valid.open_hours.contains(Hour::new(23).unwrap()));
        assert!(!valid.open_hours.contains(Hour::new(12).unwrap()));
    }
}
