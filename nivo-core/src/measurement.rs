use serde::{Deserialize, Serialize};

/// Textual marker used by the nivo table for a reading that was not taken.
pub const MISSING_SENTINEL: &str = "mq";

/// Represents a numeric cell of the nivo table.
/// - `Missing`: the `mq` sentinel or an empty cell
/// - `Invalid`: text that is not a finite number, or a physically implausible value
/// - `Value(f64)`: an actual measurement
///
/// Reductions only ever see `Value` through [`Measurement::value`].
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Measurement {
    Missing,
    Invalid,
    Value(f64),
}

impl Measurement {
    /// Parse a snow height in metres. Negative heights are invalid.
    pub fn parse_snow_height(raw: &str) -> Measurement {
        Measurement::parse_with(raw, |v| v >= 0.0)
    }

    /// Parse a temperature in Kelvin. Non-positive values are invalid.
    pub fn parse_temperature(raw: &str) -> Measurement {
        Measurement::parse_with(raw, |v| v > 0.0)
    }

    fn parse_with(raw: &str, plausible: impl Fn(f64) -> bool) -> Measurement {
        let s = raw.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(MISSING_SENTINEL) {
            return Measurement::Missing;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() && plausible(v) => Measurement::Value(v),
            _ => Measurement::Invalid,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Value(v) => Some(*v),
            Measurement::Missing | Measurement::Invalid => None,
        }
    }
}
