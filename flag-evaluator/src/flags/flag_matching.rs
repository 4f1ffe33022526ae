use tracing::{debug, warn};

use crate::api::types::{Attributes, Key, CONTROL};
use crate::flags::flag_hashing::bucket;
use crate::flags::flag_match_reason::FeatureFlagMatchReason;
use crate::flags::flag_models::{ParsedCondition, ParsedSplit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFlagMatch {
    pub treatment: String,
    pub reason: FeatureFlagMatchReason,
    pub condition_index: Option<usize>,
    pub condition_label: Option<String>,
    /// The change number of the flag that produced the treatment, if there was one.
    pub change_number: Option<i64>,
}

impl FeatureFlagMatch {
    fn control(reason: FeatureFlagMatchReason, change_number: Option<i64>) -> Self {
        FeatureFlagMatch {
            treatment: CONTROL.to_string(),
            reason,
            condition_index: None,
            condition_label: None,
            change_number,
        }
    }

    fn default_treatment(flag: &ParsedSplit, reason: FeatureFlagMatchReason) -> Self {
        FeatureFlagMatch {
            treatment: flag.default_treatment().to_string(),
            reason,
            condition_index: None,
            condition_label: None,
            change_number: Some(flag.change_number()),
        }
    }
}

/// Decides the treatment one key gets for a flag.
///
/// Stateless apart from the borrowed key and attributes, so a single matcher can
/// be pointed at any number of flags from the same snapshot. Evaluation never
/// fails: missing flags and inconsistent partitions resolve to `control`.
#[derive(Debug)]
pub struct FeatureFlagMatcher<'a> {
    key: &'a Key,
    attributes: &'a Attributes,
    max_key_length: Option<usize>,
}

impl<'a> FeatureFlagMatcher<'a> {
    pub fn new(key: &'a Key, attributes: &'a Attributes) -> Self {
        FeatureFlagMatcher {
            key,
            attributes,
            max_key_length: None,
        }
    }

    /// Rejects empty keys and keys longer than `max_key_length` characters with
    /// `control`. Killed flags still serve their default treatment to every key.
    /// Without a limit every key is evaluated.
    pub fn with_max_key_length(mut self, max_key_length: Option<usize>) -> Self {
        self.max_key_length = max_key_length;
        self
    }

    pub fn get_treatment(&self, feature_flag: Option<&ParsedSplit>) -> String {
        self.get_match(feature_flag).treatment
    }

    pub fn get_match(&self, feature_flag: Option<&ParsedSplit>) -> FeatureFlagMatch {
        let Some(feature_flag) = feature_flag else {
            return FeatureFlagMatch::control(FeatureFlagMatchReason::DefinitionNotFound, None);
        };

        if feature_flag.killed() {
            return FeatureFlagMatch::default_treatment(
                feature_flag,
                FeatureFlagMatchReason::Killed,
            );
        }

        if !self.is_valid_key() {
            warn!(
                flag = feature_flag.name(),
                key_length = self.key.matching_key.chars().count(),
                max_key_length = ?self.max_key_length,
                "key is empty or too long, returning control"
            );
            return FeatureFlagMatch::control(
                FeatureFlagMatchReason::InvalidKey,
                Some(feature_flag.change_number()),
            );
        }

        for (index, condition) in feature_flag.conditions().iter().enumerate() {
            if !self.is_condition_match(condition) {
                continue;
            }

            debug!(
                flag = feature_flag.name(),
                condition_index = index,
                condition = %condition.matcher(),
                "condition matched"
            );

            return match self.get_matching_partition(feature_flag, condition) {
                Some(treatment) => FeatureFlagMatch {
                    treatment: treatment.to_string(),
                    reason: FeatureFlagMatchReason::ConditionMatch,
                    condition_index: Some(index),
                    condition_label: condition.label().map(str::to_string),
                    change_number: Some(feature_flag.change_number()),
                },
                None => {
                    warn!(
                        flag = feature_flag.name(),
                        condition_index = index,
                        "partitions do not cover the bucket, returning control"
                    );
                    FeatureFlagMatch {
                        condition_index: Some(index),
                        condition_label: condition.label().map(str::to_string),
                        ..FeatureFlagMatch::control(
                            FeatureFlagMatchReason::NotInPartitions,
                            Some(feature_flag.change_number()),
                        )
                    }
                }
            };
        }

        FeatureFlagMatch::default_treatment(feature_flag, FeatureFlagMatchReason::NoConditionMatch)
    }

    pub fn is_condition_match(&self, condition: &ParsedCondition) -> bool {
        condition
            .matcher()
            .matches(&self.key.matching_key, self.attributes)
    }

    /// The bucket in `1..=100` this key falls into for `feature_flag`.
    pub fn get_bucket(&self, feature_flag: &ParsedSplit) -> i32 {
        let hash = feature_flag
            .algorithm()
            .hash(feature_flag.seed(), self.key.bucketing_key());
        bucket(hash)
    }

    /// Walks the partitions in declared order, each one covering the next
    /// `percentage` buckets, and returns the treatment whose range holds the key.
    pub fn get_matching_partition<'c>(
        &self,
        feature_flag: &ParsedSplit,
        condition: &'c ParsedCondition,
    ) -> Option<&'c str> {
        let partitions = condition.partitions();
        if let [only] = partitions {
            if only.percentage() == 100 {
                return Some(only.treatment());
            }
        }

        let bucket = self.get_bucket(feature_flag);
        let mut covered = 0;
        for partition in partitions {
            covered += partition.percentage();
            if covered >= bucket {
                return Some(partition.treatment());
            }
        }
        None
    }

    fn is_valid_key(&self) -> bool {
        let Some(max_key_length) = self.max_key_length else {
            return true;
        };
        let matching_key = &self.key.matching_key;
        !matching_key.is_empty() && matching_key.chars().count() <= max_key_length
    }
}

/// Evaluates one flag for one key.
///
/// `bucketing_key` only feeds the hash and defaults to `key`. Returns the flag's
/// treatment, or `control` if `flag` is `None` or no decision can be made.
pub fn evaluate(
    key: &str,
    bucketing_key: Option<&str>,
    flag: Option<&ParsedSplit>,
    attributes: &Attributes,
) -> String {
    let key = Key {
        matching_key: key.to_string(),
        bucketing_key: bucketing_key.map(str::to_string),
    };
    FeatureFlagMatcher::new(&key, attributes).get_treatment(flag)
}
