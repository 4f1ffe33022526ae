use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{errors::FlagError, types::Attributes};

/// Matches when the tested value is one of a fixed set of treatments.
///
/// Typically used for dependencies between flags: `label` names the parent flag
/// and `treatments` lists the parent treatments that qualify. The set is kept
/// ordered so that equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "TreatmentSetMatcherConfig")]
pub struct TreatmentSetMatcher {
    label: String,
    treatments: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreatmentSetMatcherConfig {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub treatments: Option<Vec<String>>,
}

impl TryFrom<TreatmentSetMatcherConfig> for TreatmentSetMatcher {
    type Error = FlagError;

    fn try_from(config: TreatmentSetMatcherConfig) -> Result<Self, Self::Error> {
        TreatmentSetMatcher::new(config.label, config.treatments)
    }
}

impl TreatmentSetMatcher {
    pub fn new(label: Option<String>, treatments: Option<Vec<String>>) -> Result<Self, FlagError> {
        let label =
            label.ok_or_else(|| FlagError::InvalidArgument("label must be set".to_string()))?;
        let treatments = treatments
            .ok_or_else(|| FlagError::InvalidArgument("treatments must be set".to_string()))?;

        Ok(TreatmentSetMatcher {
            label,
            treatments: treatments.into_iter().collect(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn treatments(&self) -> &BTreeSet<String> {
        &self.treatments
    }

    pub fn matches(&self, value: &str) -> bool {
        self.treatments.contains(value)
    }
}

impl fmt::Display for TreatmentSetMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "is in split {} with treatment [", self.label)?;
        for (i, treatment) in self.treatments.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "\"{treatment}\"")?;
        }
        f.write_str("]")
    }
}

/// The closed set of predicates a condition can test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatcherKind {
    AllKeys,
    InTreatmentSet(TreatmentSetMatcher),
}

/// A condition's predicate plus the value it reads.
///
/// Without an `attribute` the matching key is tested; with one, the caller's
/// attribute of that name is. A missing or non-string attribute never matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Matcher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    pub kind: MatcherKind,
}

impl Matcher {
    pub fn all_keys() -> Self {
        Matcher {
            attribute: None,
            kind: MatcherKind::AllKeys,
        }
    }

    pub fn in_treatment_set(matcher: TreatmentSetMatcher) -> Self {
        Matcher {
            attribute: None,
            kind: MatcherKind::InTreatmentSet(matcher),
        }
    }

    pub fn on_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn matches(&self, matching_key: &str, attributes: &Attributes) -> bool {
        let value = match &self.attribute {
            None => matching_key,
            Some(name) => match attributes.get(name) {
                Some(Value::String(value)) => value.as_str(),
                _ => return false,
            },
        };

        match &self.kind {
            MatcherKind::AllKeys => true,
            MatcherKind::InTreatmentSet(matcher) => matcher.matches(value),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(attribute) = &self.attribute {
            write!(f, "{attribute} ")?;
        }
        match &self.kind {
            MatcherKind::AllKeys => f.write_str("is any key"),
            MatcherKind::InTreatmentSet(matcher) => write!(f, "{matcher}"),
        }
    }
}
