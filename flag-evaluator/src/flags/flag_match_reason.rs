use serde::Serialize;
use strum::{Display, EnumString};

/// Why an evaluation produced its treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlagMatchReason {
    /// The flag name is not in the snapshot.
    DefinitionNotFound,
    /// The kill switch forced the default treatment.
    Killed,
    ConditionMatch,
    NoConditionMatch,
    /// A condition matched but its partitions did not cover the key's bucket.
    NotInPartitions,
    /// The key was empty or too long to evaluate.
    InvalidKey,
}

impl FeatureFlagMatchReason {
    /// Whether the treatment came from an actual decision rather than the `control` fallback.
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            FeatureFlagMatchReason::Killed
                | FeatureFlagMatchReason::ConditionMatch
                | FeatureFlagMatchReason::NoConditionMatch
        )
    }
}
