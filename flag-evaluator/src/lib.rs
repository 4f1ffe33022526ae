pub mod api;
pub mod client;
pub mod config;
pub mod factory;
pub mod flags;
pub mod overrides;
pub mod utils;

pub use api::errors::FlagError;
pub use api::types::{Attributes, Key, CONTROL};
pub use client::{EventTracker, FlagClient, LocalhostClient, SplitClient};
pub use factory::SplitFactory;
pub use flags::feature_flag_list::FeatureFlagList;
pub use flags::flag_hashing::{bucket, HashAlgorithm};
pub use flags::flag_matchers::{Matcher, MatcherKind, TreatmentSetMatcher};
pub use flags::flag_matching::{evaluate, FeatureFlagMatch, FeatureFlagMatcher};
pub use flags::flag_models::{
    ParsedCondition, ParsedConditionConfig, ParsedSplit, ParsedSplitConfig, Partition,
};
pub use flags::flags_cache::FlagStore;
pub use overrides::override_evaluator::OverrideEvaluator;
pub use overrides::override_models::{OverrideTable, SplitAndKey};
