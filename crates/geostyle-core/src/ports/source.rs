use async_trait::async_trait;

use crate::error::Result;
use crate::models::Feature;

/// Port for the geographic feature source.
///
/// `load` resolves exactly once with the full feature list; callers await
/// it instead of subscribing to change notifications.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Load every feature of the source
    async fn load(&self) -> Result<Vec<Feature>>;

    /// Human-readable description, used in logs
    fn describe(&self) -> String {
        "feature source".to_string()
    }
}

#[async_trait]
impl FeatureSource for Vec<Feature> {
    async fn load(&self) -> Result<Vec<Feature>> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory features", self.len())
    }
}
