//! Rounding policy for converted amounts.

use serde::{Deserialize, Serialize};

/// How a converted amount is pre-rounded before the final 2-decimal rounding.
///
/// The modes are mutually exclusive. Switching modes always replaces the
/// previous one entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// No pre-rounding.
    #[default]
    None,
    /// Round up to the nearest integer (ceiling).
    Up,
    /// Round down to the nearest integer (floor).
    Down,
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(format!("Unknown rounding mode: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_default_is_none() {
        assert_eq!(RoundingMode::default(), RoundingMode::None);
    }

    #[rstest]
    #[case("none", RoundingMode::None)]
    #[case("up", RoundingMode::Up)]
    #[case("UP", RoundingMode::Up)]
    #[case("Down", RoundingMode::Down)]
    fn test_from_str(#[case] input: &str, #[case] expected: RoundingMode) {
        assert_eq!(RoundingMode::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_from_str_unknown() {
        assert!(RoundingMode::from_str("nearest").is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for mode in [RoundingMode::None, RoundingMode::Up, RoundingMode::Down] {
            assert_eq!(RoundingMode::from_str(&mode.to_string()).unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&RoundingMode::Up).unwrap(), "\"up\"");
        let mode: RoundingMode = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(mode, RoundingMode::Down);
    }
}
