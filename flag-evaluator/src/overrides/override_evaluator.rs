use tracing::{debug, warn};

use crate::api::types::CONTROL;
use crate::overrides::override_models::OverrideTable;
use crate::utils::snapshot_cell::SnapshotCell;

/// Evaluates flags from an override table instead of rules.
///
/// No hashing is involved: a key gets its own entry, else the flag's wildcard
/// entry, else `control`.
#[derive(Debug, Default)]
pub struct OverrideEvaluator {
    table: SnapshotCell<OverrideTable>,
}

impl OverrideEvaluator {
    pub fn new(table: OverrideTable) -> Self {
        OverrideEvaluator {
            table: SnapshotCell::new(table),
        }
    }

    /// An empty key or flag name is treated as absent and yields `control`.
    pub fn evaluate(&self, key: &str, flag_name: &str) -> String {
        if key.is_empty() || flag_name.is_empty() {
            return CONTROL.to_string();
        }

        self.table
            .load()
            .lookup(flag_name, key)
            .unwrap_or(CONTROL)
            .to_string()
    }

    /// Swaps in a new table. `None` is ignored with a warning so a bad update
    /// never discards the table currently in use.
    pub fn replace_overrides(&self, table: Option<OverrideTable>) {
        match table {
            Some(table) => {
                debug!(entries = table.len(), "replacing override table");
                self.table.store(table);
            }
            None => warn!("an empty override update was passed, ignoring it"),
        }
    }

    /// Clears every override; all later evaluations return `control`.
    pub fn destroy(&self) {
        self.table.store(OverrideTable::default());
    }
}
