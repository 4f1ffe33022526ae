use std::sync::Arc;

use tracing::info;

use crate::client::{EventTracker, FlagClient, LocalhostClient, SplitClient};
use crate::config::Config;
use crate::flags::flags_cache::FlagStore;
use crate::overrides::override_evaluator::OverrideEvaluator;

/// Owns the swappable state and hands out the client the config asks for.
///
/// Upstream components keep hold of the factory (or of the stores it exposes)
/// to push new rule snapshots or override tables; callers only see the client.
pub struct SplitFactory {
    config: Config,
    flags: Arc<FlagStore>,
    overrides: Arc<OverrideEvaluator>,
    tracker: Option<Arc<dyn EventTracker>>,
}

impl SplitFactory {
    pub fn new(config: Config) -> Self {
        info!(
            localhost_mode = *config.localhost_mode,
            max_key_length = ?config.max_key_length,
            "creating split factory"
        );
        SplitFactory {
            config,
            flags: Arc::new(FlagStore::default()),
            overrides: Arc::new(OverrideEvaluator::default()),
            tracker: None,
        }
    }

    pub fn with_tracker(mut self, tracker: Arc<dyn EventTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn flag_store(&self) -> Arc<FlagStore> {
        self.flags.clone()
    }

    pub fn override_evaluator(&self) -> Arc<OverrideEvaluator> {
        self.overrides.clone()
    }

    pub fn client(&self) -> Arc<dyn SplitClient> {
        if *self.config.localhost_mode {
            return Arc::new(LocalhostClient::new(self.overrides.clone()));
        }

        let client =
            FlagClient::new(self.flags.clone()).with_max_key_length(self.config.max_key_length);
        match &self.tracker {
            Some(tracker) => Arc::new(client.with_tracker(tracker.clone())),
            None => Arc::new(client),
        }
    }
}
