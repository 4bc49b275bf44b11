//! Inspection results, one boolean per asset. Latest write wins.

use std::collections::HashMap;

use escrow_types::AssetId;

#[derive(Debug, Clone, Default)]
pub struct InspectionTracker {
    passed: HashMap<AssetId, bool>,
}

impl InspectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            passed: HashMap::new(),
        }
    }

    /// Overwrite the result for `asset`. The caller has already checked
    /// that the inspector is acting.
    pub fn record(&mut self, asset: AssetId, passed: bool) {
        self.passed.insert(asset, passed);
    }

    #[must_use]
    pub fn passed(&self, asset: AssetId) -> bool {
        self.passed.get(&asset).copied().unwrap_or(false)
    }

    /// Forget the result for `asset` so a new listing cycle starts clean.
    pub fn reset(&mut self, asset: AssetId) {
        self.passed.remove(&asset);
    }
}
