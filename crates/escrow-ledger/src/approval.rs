//! Self-attributed sale approvals keyed by `(asset, party)`.
//!
//! Any party may record its own approval. Only buyer, seller and lender are
//! consulted at settlement, but the map does not restrict who writes.

use std::collections::HashSet;

use escrow_types::{AssetId, PartyId};

#[derive(Debug, Clone, Default)]
pub struct ApprovalTracker {
    approvals: HashSet<(AssetId, PartyId)>,
}

impl ApprovalTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            approvals: HashSet::new(),
        }
    }

    /// Record `party`'s approval of `asset`'s sale. Idempotent.
    pub fn approve(&mut self, asset: AssetId, party: PartyId) {
        self.approvals.insert((asset, party));
    }

    #[must_use]
    pub fn approval(&self, asset: AssetId, party: PartyId) -> bool {
        self.approvals.contains(&(asset, party))
    }

    /// Drop every approval recorded for `asset`.
    pub fn reset(&mut self, asset: AssetId) {
        self.approvals.retain(|(a, _)| *a != asset);
    }

    /// Number of parties that approved `asset`.
    #[must_use]
    pub fn count(&self, asset: AssetId) -> usize {
        self.approvals.iter().filter(|(a, _)| *a == asset).count()
    }
}
