//! # Features
//!
//! Statically registered feature initializers. Each one receives the handler once at
//! startup, typically to subscribe to handler events or spawn background work.

use std::sync::Arc;

use crate::application::handler::Handler;
use crate::strings::logs;

pub type FeatureInit = Arc<dyn Fn(&Arc<Handler>) -> anyhow::Result<()> + Send + Sync>;

#[derive(Clone)]
pub struct Feature {
    pub name: String,
    pub init: FeatureInit,
}

impl Feature {
    pub fn new(
        name: impl Into<String>,
        init: impl Fn(&Arc<Handler>) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            init: Arc::new(init),
        }
    }
}

/// Runs every feature in order. The first failure stops the rest and is logged.
/// Returns how many features ran successfully.
pub fn load_features(handler: &Arc<Handler>, features: &[Feature]) -> usize {
    let mut loaded = 0;
    for feature in features {
        if let Err(e) = (feature.init)(handler) {
            tracing::error!(
                tag = logs::TAG_FEATURES,
                error = ?e,
                "{} ({})",
                logs::FEATURES_LOAD_FAILED,
                feature.name
            );
            return loaded;
        }
        loaded += 1;
    }

    if handler.config().log {
        tracing::info!(tag = logs::TAG_FEATURES, "{}", logs::features_loaded(loaded));
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{MockPlatform, build_handler};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_features_run_until_first_failure() {
        let handler = build_handler(Arc::new(MockPlatform::default()), vec![]);
        let runs = Arc::new(AtomicUsize::new(0));
        let (a, c) = (runs.clone(), runs.clone());

        let features = vec![
            Feature::new("first", move |_| {
                a.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
            Feature::new("broken", |_| anyhow::bail!("nope")),
            Feature::new("never", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ];

        assert_eq!(load_features(&handler, &features), 1);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_feature_can_subscribe_to_events() {
        let handler = build_handler(Arc::new(MockPlatform::default()), vec![]);
        let features = vec![Feature::new("alerts", |h| {
            h.events().on_command_exception(|_| {});
            Ok(())
        })];
        assert_eq!(load_features(&handler, &features), 1);
    }
}
