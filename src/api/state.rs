use std::sync::Arc;

use crate::config::Config;
use crate::services::Recommender;

/// Shared application state
///
/// The engine is read-only after initialization, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Recommender>,
    pub limits: RecommendationLimits,
}

/// Bounds applied to the requested number of recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationLimits {
    pub default: usize,
    pub max: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self { default: 5, max: 20 }
    }
}

impl From<&Config> for RecommendationLimits {
    fn from(config: &Config) -> Self {
        Self {
            default: config.default_recommendations,
            max: config.max_recommendations,
        }
    }
}

impl AppState {
    /// Creates application state around an initialized engine
    pub fn new(engine: Recommender, limits: RecommendationLimits) -> Self {
        Self {
            engine: Arc::new(engine),
            limits,
        }
    }
}
