//! Machine unit system
//!
//! Selects the units word written at the top of a program (`G21`/`G20`).
//! Coordinates are not converted between systems; the emitter's scale is the
//! only transform applied to drawing-space values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Machine coordinate units (millimeters or inches)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    /// Millimeters (metric)
    #[default]
    #[serde(rename = "mm")]
    MM,
    /// Inches (imperial)
    #[serde(rename = "inch")]
    INCH,
}

impl Units {
    /// The G-code word selecting this unit system.
    pub fn gcode_word(&self) -> &'static str {
        match self {
            Units::MM => "G21",
            Units::INCH => "G20",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::MM => write!(f, "mm"),
            Units::INCH => write!(f, "inch"),
        }
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "metric" => Ok(Units::MM),
            "inch" | "in" | "imperial" => Ok(Units::INCH),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}
