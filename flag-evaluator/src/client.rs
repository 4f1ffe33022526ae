use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::api::types::{Attributes, Key};
use crate::flags::flag_matching::{FeatureFlagMatch, FeatureFlagMatcher};
use crate::flags::flags_cache::FlagStore;
use crate::overrides::override_evaluator::OverrideEvaluator;

/// The treatment-serving surface shared by normal and local mode.
pub trait SplitClient: Send + Sync {
    fn get_treatment(&self, key: &str, flag_name: &str) -> String {
        self.get_treatment_with_attributes(key, flag_name, &HashMap::new())
    }

    fn get_treatment_with_attributes(
        &self,
        key: &str,
        flag_name: &str,
        attributes: &Attributes,
    ) -> String {
        self.get_treatment_for_key(&Key::new(key), flag_name, attributes)
    }

    fn get_treatment_for_key(&self, key: &Key, flag_name: &str, attributes: &Attributes)
        -> String;

    /// Records a business event. Returns whether the event was accepted.
    fn track(&self, key: &str, traffic_type: &str, event_type: &str, value: Option<f64>) -> bool;

    fn destroy(&self);
}

/// Receives `track` calls in normal mode; the engine itself never sends events.
pub trait EventTracker: Send + Sync {
    fn track(&self, key: &str, traffic_type: &str, event_type: &str, value: Option<f64>) -> bool;
}

/// Normal mode: evaluates the rules in the active snapshot.
#[derive(Clone)]
pub struct FlagClient {
    store: Arc<FlagStore>,
    tracker: Option<Arc<dyn EventTracker>>,
    max_key_length: Option<usize>,
}

impl FlagClient {
    pub fn new(store: Arc<FlagStore>) -> Self {
        FlagClient {
            store,
            tracker: None,
            max_key_length: None,
        }
    }

    pub fn with_tracker(mut self, tracker: Arc<dyn EventTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn with_max_key_length(mut self, max_key_length: Option<usize>) -> Self {
        self.max_key_length = max_key_length;
        self
    }

    pub fn store(&self) -> &Arc<FlagStore> {
        &self.store
    }

    /// Full evaluation result, including the reason and the rule that matched.
    #[instrument(skip_all, fields(flag = %flag_name))]
    pub fn get_match(
        &self,
        key: &Key,
        flag_name: &str,
        attributes: &Attributes,
    ) -> FeatureFlagMatch {
        let snapshot = self.store.load();
        let result = FeatureFlagMatcher::new(key, attributes)
            .with_max_key_length(self.max_key_length)
            .get_match(snapshot.get(flag_name));
        debug!(
            treatment = %result.treatment,
            reason = %result.reason,
            decided = result.reason.is_decision(),
            change_number = ?result.change_number,
            "evaluated flag"
        );
        result
    }
}

impl SplitClient for FlagClient {
    fn get_treatment_for_key(
        &self,
        key: &Key,
        flag_name: &str,
        attributes: &Attributes,
    ) -> String {
        self.get_match(key, flag_name, attributes).treatment
    }

    fn track(&self, key: &str, traffic_type: &str, event_type: &str, value: Option<f64>) -> bool {
        match &self.tracker {
            Some(tracker) => tracker.track(key, traffic_type, event_type, value),
            None => false,
        }
    }

    fn destroy(&self) {
        self.store.clear();
    }
}

/// Local mode: serves the override table, never hashes and never tracks.
#[derive(Debug, Clone)]
pub struct LocalhostClient {
    overrides: Arc<OverrideEvaluator>,
}

impl LocalhostClient {
    pub fn new(overrides: Arc<OverrideEvaluator>) -> Self {
        LocalhostClient { overrides }
    }

    pub fn overrides(&self) -> &Arc<OverrideEvaluator> {
        &self.overrides
    }
}

impl SplitClient for LocalhostClient {
    // Attributes and the bucketing key play no part in override lookups.
    fn get_treatment_for_key(
        &self,
        key: &Key,
        flag_name: &str,
        _attributes: &Attributes,
    ) -> String {
        self.overrides.evaluate(&key.matching_key, flag_name)
    }

    fn track(
        &self,
        _key: &str,
        _traffic_type: &str,
        _event_type: &str,
        _value: Option<f64>,
    ) -> bool {
        false
    }

    fn destroy(&self) {
        self.overrides.destroy();
    }
}
