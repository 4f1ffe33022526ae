use std::collections::HashMap;

/// Key of an override entry. A `None` key is the wildcard: the treatment every
/// key gets for that flag unless it has an entry of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SplitAndKey {
    pub split: String,
    pub key: Option<String>,
}

impl SplitAndKey {
    pub fn of(split: impl Into<String>, key: impl Into<String>) -> Self {
        SplitAndKey {
            split: split.into(),
            key: Some(key.into()),
        }
    }

    pub fn wildcard(split: impl Into<String>) -> Self {
        SplitAndKey {
            split: split.into(),
            key: None,
        }
    }
}

/// Hash-free treatment assignments used in local development.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: HashMap<SplitAndKey, String>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(
        mut self,
        split: impl Into<String>,
        key: impl Into<String>,
        treatment: impl Into<String>,
    ) -> Self {
        self.insert(SplitAndKey::of(split, key), treatment);
        self
    }

    pub fn with_default(mut self, split: impl Into<String>, treatment: impl Into<String>) -> Self {
        self.insert(SplitAndKey::wildcard(split), treatment);
        self
    }

    pub fn insert(&mut self, entry: SplitAndKey, treatment: impl Into<String>) {
        self.entries.insert(entry, treatment.into());
    }

    /// The exact `(split, key)` entry if there is one, else the split's wildcard entry.
    pub fn lookup(&self, split: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&SplitAndKey::of(split, key))
            .or_else(|| self.entries.get(&SplitAndKey::wildcard(split)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(SplitAndKey, String)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = (SplitAndKey, String)>>(iter: I) -> Self {
        OverrideTable {
            entries: iter.into_iter().collect(),
        }
    }
}
