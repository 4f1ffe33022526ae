use std::sync::Arc;

use tracing::debug;

use crate::flags::feature_flag_list::FeatureFlagList;
use crate::utils::snapshot_cell::SnapshotCell;

/// The active rule snapshot.
///
/// Whatever keeps rules in sync with the backend calls [`FlagStore::replace`]
/// with a complete new snapshot; evaluators call [`FlagStore::load`] once per
/// evaluation and read that snapshot without further synchronization.
#[derive(Debug, Default)]
pub struct FlagStore {
    snapshot: SnapshotCell<FeatureFlagList>,
}

impl FlagStore {
    pub fn new(flags: FeatureFlagList) -> Self {
        FlagStore {
            snapshot: SnapshotCell::new(flags),
        }
    }

    pub fn load(&self) -> Arc<FeatureFlagList> {
        self.snapshot.load()
    }

    /// Swaps in a complete new snapshot, returning the one it replaced.
    pub fn replace(&self, flags: FeatureFlagList) -> Arc<FeatureFlagList> {
        debug!(
            flag_count = flags.len(),
            change_number = ?flags.change_number(),
            "replacing flag snapshot"
        );
        self.snapshot.swap(flags)
    }

    pub fn change_number(&self) -> Option<i64> {
        self.load().change_number()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.load().get(name).is_some()
    }

    /// Drops every flag; evaluations return `control` until the next `replace`.
    pub fn clear(&self) {
        self.snapshot.store(FeatureFlagList::default());
    }
}
