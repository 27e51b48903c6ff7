//! Validated clock hours and the open-hours window.
//!
//! Raw hours arrive from drivers as plain integers. They are normalized
//! into [`Hour`] before they influence any decision, so nothing past this
//! module ever sees a value outside `0..=23`.

use crate::error::{ConfigViolation, SafeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An hour of the day in `0..=23`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Hour(u8);

impl Hour {
    /// Midnight, the hour a fresh context starts at.
    pub const MIDNIGHT: Hour = Hour(0);

    /// Validate a raw hour.
    ///
    /// # Example
    ///
    /// ```rust
    /// use safewatch::core::Hour;
    /// use safewatch::SafeError;
    ///
    /// assert_eq!(Hour::new(9).unwrap().get(), 9);
    /// assert_eq!(Hour::new(24), Err(SafeError::InvalidHour { hour: 24 }));
    /// assert_eq!(Hour::new(-1), Err(SafeError::InvalidHour { hour: -1 }));
    /// ```
    pub fn new(hour: i32) -> Result<Self, SafeError> {
        match u8::try_from(hour) {
            Ok(h) if h < 24 => Ok(Hour(h)),
            _ => Err(SafeError::InvalidHour { hour }),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The following hour, wrapping 23 back to 0.
    pub fn next(self) -> Hour {
        Hour((self.0 + 1) % 24)
    }
}

impl TryFrom<i32> for Hour {
    type Error = SafeError;

    fn try_from(hour: i32) -> Result<Self, Self::Error> {
        Hour::new(hour)
    }
}

impl From<Hour> for i32 {
    fn from(hour: Hour) -> Self {
        i32::from(hour.0)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// The supervised window of the day.
///
/// An hour is inside when `opens <= hour < closes`. When `opens` is later
/// than `closes` the window wraps past midnight.
///
/// # Example
///
/// ```rust
/// use safewatch::core::{Hour, OpenHours};
///
/// let window = OpenHours::default();
/// assert!(window.contains(Hour::new(9).unwrap()));
/// assert!(window.contains(Hour::new(16).unwrap()));
/// assert!(!window.contains(Hour::new(17).unwrap()));
/// assert!(!window.contains(Hour::new(3).unwrap()));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawOpenHours")]
pub struct OpenHours {
    opens: Hour,
    closes: Hour,
}

impl OpenHours {
    pub const DEFAULT_OPENS: u8 = 9;
    pub const DEFAULT_CLOSES: u8 = 17;

    /// Create a window. Fails if it would be empty.
    pub fn new(opens: Hour, closes: Hour) -> Result<Self, ConfigViolation> {
        if opens == closes {
            return Err(ConfigViolation::EmptyWindow(opens.get()));
        }
        Ok(Self { opens, closes })
    }

    pub fn opens(&self) -> Hour {
        self.opens
    }

    pub fn closes(&self) -> Hour {
        self.closes
    }

    /// Check whether an hour falls inside the window (pure).
    pub fn contains(&self, hour: Hour) -> bool {
        if self.opens < self.closes {
            self.opens <= hour && hour < self.closes
        } else {
            hour >= self.opens || hour < self.closes
        }
    }
}

impl Default for OpenHours {
    fn default() -> Self {
        Self {
            opens: Hour(Self::DEFAULT_OPENS),
            closes: Hour(Self::DEFAULT_CLOSES),
        }
    }
}

impl fmt::Display for OpenHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.opens, self.closes)
    }
}

#[derive(Deserialize)]
struct RawOpenHours {
    opens: Hour,
    closes: Hour,
}

impl TryFrom<RawOpenHours> for OpenHours {
    type Error = ConfigViolation;

    fn try_from(raw: RawOpenHours) -> Result<Self, Self::Error> {
        OpenHours::new(raw.opens, raw.closes)
    }
}
