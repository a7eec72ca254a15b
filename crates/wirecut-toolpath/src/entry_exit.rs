//! Entry/exit parameter selection.

use crate::contour::Contour;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use wirecut_core::{ConfigError, ContourId, InputError, Result};

/// Where the wire starts and stops tracing one contour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryExit {
    pub contour_id: ContourId,
    pub entry_t: f64,
    pub exit_t: f64,
}

/// Per-field override from an interactive editor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryExitOverride {
    pub entry_t: Option<f64>,
    pub exit_t: Option<f64>,
}

impl EntryExitOverride {
    pub fn entry(t: f64) -> Self {
        Self {
            entry_t: Some(t),
            exit_t: None,
        }
    }

    pub fn exit(t: f64) -> Self {
        Self {
            entry_t: None,
            exit_t: Some(t),
        }
    }

    pub fn new(entry_t: f64, exit_t: f64) -> Self {
        Self {
            entry_t: Some(entry_t),
            exit_t: Some(exit_t),
        }
    }
}

/// Overrides keyed by contour id.
pub type Overrides = BTreeMap<ContourId, EntryExitOverride>;

/// Checks that every override names a known contour and holds parameters in
/// `0..=1`.
pub fn validate_overrides(overrides: &Overrides, known: &[&Contour]) -> Result<()> {
    for (id, o) in overrides {
        if !known.iter().any(|c| &c.id == id) {
            return Err(InputError::UnknownContour { id: id.clone() }.into());
        }
        for (name, value) in [("entry_t", o.entry_t), ("exit_t", o.exit_t)] {
            if let Some(t) = value {
                if !t.is_finite() || !(0.0..=1.0).contains(&t) {
                    return Err(ConfigError::out_of_range(name, t, 0.0, 1.0).into());
                }
            }
        }
    }
    Ok(())
}

/// Entry/exit for each contour in order: `entry_t = override ?? 0`,
/// `exit_t = override ?? entry_t`.
pub fn select(ordered: &[&Contour], overrides: &Overrides) -> Result<Vec<EntryExit>> {
    select_with_hints(ordered, overrides, &HashMap::new())
}

/// Like [`select`], but a default entry comes from `hints` when one exists
/// for the contour.
pub fn select_with_hints(
    ordered: &[&Contour],
    overrides: &Overrides,
    hints: &HashMap<ContourId, f64>,
) -> Result<Vec<EntryExit>> {
    validate_overrides(overrides, ordered)?;

    Ok(ordered
        .iter()
        .map(|contour| {
            let o = overrides.get(&contour.id).copied().unwrap_or_default();
            let default_entry = hints.get(&contour.id).copied().unwrap_or(0.0);
            let entry_t = o.entry_t.unwrap_or(default_entry);
            EntryExit {
                contour_id: contour.id.clone(),
                entry_t,
                exit_t: o.exit_t.unwrap_or(entry_t),
            }
        })
        .collect())
}
