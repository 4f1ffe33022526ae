use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::flags::flag_models::ParsedSplit;

/// One complete, immutable rule snapshot: every known flag by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<ParsedSplit>", into = "Vec<ParsedSplit>")]
pub struct FeatureFlagList {
    flags: HashMap<String, ParsedSplit>,
    change_number: Option<i64>,
}

impl FeatureFlagList {
    /// Builds a snapshot. When a name appears twice, the definition with the
    /// higher change number wins.
    pub fn new(flags: Vec<ParsedSplit>) -> Self {
        let mut by_name: HashMap<String, ParsedSplit> = HashMap::with_capacity(flags.len());
        for flag in flags {
            let is_newer = by_name
                .get(flag.name())
                .map_or(true, |existing| existing.change_number() < flag.change_number());
            if is_newer {
                by_name.insert(flag.name().to_string(), flag);
            }
        }
        let change_number = by_name.values().map(ParsedSplit::change_number).max();

        FeatureFlagList {
            flags: by_name,
            change_number,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParsedSplit> {
        self.flags.get(name)
    }

    /// The highest change number in the snapshot, `None` when it is empty.
    pub fn change_number(&self) -> Option<i64> {
        self.change_number
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedSplit> {
        self.flags.values()
    }
}

impl From<Vec<ParsedSplit>> for FeatureFlagList {
    fn from(flags: Vec<ParsedSplit>) -> Self {
        FeatureFlagList::new(flags)
    }
}

impl From<FeatureFlagList> for Vec<ParsedSplit> {
    fn from(list: FeatureFlagList) -> Self {
        let mut flags: Vec<ParsedSplit> = list.flags.into_values().collect();
        flags.sort_by(|a, b| a.name().cmp(b.name()));
        flags
    }
}
