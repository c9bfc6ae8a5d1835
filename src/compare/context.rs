//! Symmetric comparison of the two run-sets' context mappings.

use super::ratio::Tone;
use crate::model::display_value;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Marker used for the side on which a key is absent.
pub const UNDEFINED: &str = "undefined";
/// Marker prefixed to keys whose values are flagged.
pub const DIFFERENCE_MARKER: &str = "≠";

/// How a context key compares between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextStatus {
    Equal,
    /// Values differ but the key is expected to vary between runs.
    Ignored,
    Different,
    OnlyOld,
    OnlyNew,
}

impl ContextStatus {
    #[must_use]
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Different | Self::OnlyOld | Self::OnlyNew)
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        if self.is_flagged() {
            Tone::Warning
        } else {
            Tone::Neutral
        }
    }
}

/// One key of the context overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextEntry {
    pub key: String,
    /// Display value on the old side, `"undefined"` when absent.
    pub old: String,
    /// Display value on the new side, `"undefined"` when absent.
    pub new: String,
    pub status: ContextStatus,
}

impl ContextEntry {
    /// Key as shown in the overview: `≠key` when flagged, ` key` otherwise.
    #[must_use]
    pub fn label(&self) -> String {
        let marker = if self.status.is_flagged() {
            DIFFERENCE_MARKER
        } else {
            " "
        };
        format!("{marker}{}", self.key)
    }
}

/// Classify every key present on either side, sorted by key.
#[must_use]
pub fn diff_contexts(
    old: &BTreeMap<String, Value>,
    new: &BTreeMap<String, Value>,
    ignored_keys: &[String],
) -> Vec<ContextEntry> {
    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    keys.into_iter()
        .map(|key| {
            let (old_value, new_value) = (old.get(key), new.get(key));
            let status = match (old_value, new_value) {
                (Some(a), Some(b)) if a == b => ContextStatus::Equal,
                (Some(_), Some(_)) if ignored_keys.iter().any(|k| k == key) => {
                    ContextStatus::Ignored
                }
                (Some(_), Some(_)) => ContextStatus::Different,
                (Some(_), None) => ContextStatus::OnlyOld,
                (None, _) => ContextStatus::OnlyNew,
            };
            ContextEntry {
                key: key.clone(),
                old: old_value.map_or_else(|| UNDEFINED.to_string(), display_value),
                new: new_value.map_or_else(|| UNDEFINED.to_string(), display_value),
                status,
            }
        })
        .collect()
}
