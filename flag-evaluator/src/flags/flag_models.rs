use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::errors::{FlagError, MissingProperties};
use crate::flags::flag_hashing::HashAlgorithm;
use crate::flags::flag_matchers::Matcher;

/// A slice of the bucket space routed to one treatment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "PartitionConfig")]
pub struct Partition {
    treatment: String,
    percentage: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartitionConfig {
    pub treatment: String,
    pub percentage: i32,
}

impl TryFrom<PartitionConfig> for Partition {
    type Error = FlagError;

    fn try_from(config: PartitionConfig) -> Result<Self, Self::Error> {
        Partition::new(config.treatment, config.percentage)
    }
}

impl Partition {
    pub fn new(treatment: impl Into<String>, percentage: i32) -> Result<Self, FlagError> {
        if !(0..=100).contains(&percentage) {
            return Err(FlagError::InvalidPercentage(percentage));
        }
        Ok(Partition {
            treatment: treatment.into(),
            percentage,
        })
    }

    pub fn treatment(&self) -> &str {
        &self.treatment
    }

    pub fn percentage(&self) -> i32 {
        self.percentage
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%:{}", self.percentage, self.treatment)
    }
}

/// One rollout rule: who it applies to and how they are split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "ParsedConditionConfig")]
pub struct ParsedCondition {
    matcher: Matcher,
    partitions: Vec<Partition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedConditionConfig {
    #[serde(default)]
    pub matcher: Option<Matcher>,
    #[serde(default)]
    pub partitions: Option<Vec<Partition>>,
    #[serde(default)]
    pub label: Option<String>,
}

impl TryFrom<ParsedConditionConfig> for ParsedCondition {
    type Error = FlagError;

    fn try_from(config: ParsedConditionConfig) -> Result<Self, Self::Error> {
        ParsedCondition::new(config)
    }
}

impl ParsedCondition {
    pub fn new(config: ParsedConditionConfig) -> Result<Self, FlagError> {
        match config {
            ParsedConditionConfig {
                matcher: Some(matcher),
                partitions: Some(partitions),
                label,
            } => Ok(ParsedCondition {
                matcher,
                partitions,
                label,
            }),
            config => {
                let mut missing = MissingProperties::default();
                missing.check(&config.matcher, "matcher");
                missing.check(&config.partitions, "partitions");
                Err(missing.into_error())
            }
        }
    }

    /// Shorthand for the common case of a condition without a label.
    pub fn with_partitions(matcher: Matcher, partitions: Vec<Partition>) -> Self {
        ParsedCondition {
            matcher,
            partitions,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Display for ParsedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} then split [", self.matcher)?;
        for (i, partition) in self.partitions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{partition}")?;
        }
        f.write_str("]")
    }
}

/// A flag's complete rollout configuration.
///
/// Immutable once built. Equality is field-wise over every field, including
/// `change_number`, so two snapshots parsed from the same definition compare
/// equal and can be deduplicated upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "ParsedSplitConfig")]
pub struct ParsedSplit {
    name: String,
    seed: i32,
    killed: bool,
    default_treatment: String,
    conditions: Vec<ParsedCondition>,
    traffic_type_name: String,
    change_number: i64,
    algorithm: HashAlgorithm,
}

/// Every field a flag is built from. All but `algorithm` are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedSplitConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub seed: Option<i32>,
    #[serde(default)]
    pub killed: Option<bool>,
    #[serde(default)]
    pub default_treatment: Option<String>,
    #[serde(default)]
    pub conditions: Option<Vec<ParsedCondition>>,
    #[serde(default)]
    pub traffic_type_name: Option<String>,
    #[serde(default)]
    pub change_number: Option<i64>,
    #[serde(default)]
    pub algorithm: Option<HashAlgorithm>,
}

impl ParsedSplitConfig {
    fn missing_properties(&self) -> FlagError {
        let mut missing = MissingProperties::default();
        missing.check(&self.name, "name");
        missing.check(&self.seed, "seed");
        missing.check(&self.killed, "killed");
        if self.default_treatment.as_deref().map_or(true, str::is_empty) {
            missing.push("default_treatment");
        }
        missing.check(&self.conditions, "conditions");
        missing.check(&self.traffic_type_name, "traffic_type_name");
        missing.check(&self.change_number, "change_number");
        missing.into_error()
    }
}

impl From<&ParsedSplit> for ParsedSplitConfig {
    fn from(split: &ParsedSplit) -> Self {
        ParsedSplitConfig {
            name: Some(split.name.clone()),
            seed: Some(split.seed),
            killed: Some(split.killed),
            default_treatment: Some(split.default_treatment.clone()),
            conditions: Some(split.conditions.clone()),
            traffic_type_name: Some(split.traffic_type_name.clone()),
            change_number: Some(split.change_number),
            algorithm: Some(split.algorithm),
        }
    }
}

impl TryFrom<ParsedSplitConfig> for ParsedSplit {
    type Error = FlagError;

    fn try_from(config: ParsedSplitConfig) -> Result<Self, Self::Error> {
        ParsedSplit::new(config)
    }
}

impl ParsedSplit {
    /// Validates `config` and builds the flag.
    ///
    /// Fails with a single [`FlagError::MissingRequiredProperties`] naming every
    /// unset field. An empty default treatment counts as unset.
    pub fn new(config: ParsedSplitConfig) -> Result<Self, FlagError> {
        match config {
            ParsedSplitConfig {
                name: Some(name),
                seed: Some(seed),
                killed: Some(killed),
                default_treatment: Some(default_treatment),
                conditions: Some(conditions),
                traffic_type_name: Some(traffic_type_name),
                change_number: Some(change_number),
                algorithm,
            } if !default_treatment.is_empty() => Ok(ParsedSplit {
                name,
                seed,
                killed,
                default_treatment,
                conditions,
                traffic_type_name,
                change_number,
                algorithm: algorithm.unwrap_or_default(),
            }),
            config => Err(config.missing_properties()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn killed(&self) -> bool {
        self.killed
    }

    pub fn default_treatment(&self) -> &str {
        &self.default_treatment
    }

    pub fn conditions(&self) -> &[ParsedCondition] {
        &self.conditions
    }

    pub fn traffic_type_name(&self) -> &str {
        &self.traffic_type_name
    }

    pub fn change_number(&self) -> i64 {
        self.change_number
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl fmt::Display for ParsedSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name:{}, seed:{}, killed:{}, default treatment:{}, ",
            self.name, self.seed, self.killed, self.default_treatment
        )?;
        write!(
            f,
            "conditions:{}, traffic type:{}, change number:{}",
            self.conditions.len(),
            self.traffic_type_name,
            self.change_number
        )
    }
}
