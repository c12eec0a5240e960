//! Time in force for orders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How long an unfilled order remains active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Valid for the current trading day only.
    Day,
    /// Good-til-canceled.
    Gtc,
    /// Immediate-or-cancel: fill what is available now, cancel the rest.
    Ioc,
    /// Fill-or-kill: fill completely and immediately or not at all.
    Fok,
}

impl TimeInForce {
    /// Returns true if the order persists across trading sessions.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        matches!(self, Self::Gtc)
    }

    /// Returns true if the order demands immediate execution.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::Ioc | Self::Fok)
    }
}

impl Default for TimeInForce {
    fn default() -> Self {
        Self::Day
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "DAY"),
            Self::Gtc => write!(f, "GTC"),
            Self::Ioc => write!(f, "IOC"),
            Self::Fok => write!(f, "FOK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_day() {
        assert_eq!(TimeInForce::default(), TimeInForce::Day);
    }

    #[test]
    fn persistence() {
        assert!(TimeInForce::Gtc.is_persistent());
        assert!(!TimeInForce::Day.is_persistent());
    }

    #[test]
    fn immediacy() {
        assert!(TimeInForce::Ioc.is_immediate());
        assert!(TimeInForce::Fok.is_immediate());
        assert!(!TimeInForce::Day.is_immediate());
        assert!(!TimeInForce::Gtc.is_immediate());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", TimeInForce::Gtc), "GTC");
        assert_eq!(format!("{}", TimeInForce::Fok), "FOK");
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&TimeInForce::Ioc).unwrap();
        assert_eq!(json, "\"IOC\"");
        let parsed: TimeInForce = serde_json::from_str("\"DAY\"").unwrap();
        assert_eq!(parsed, TimeInForce::Day);
    }
}
