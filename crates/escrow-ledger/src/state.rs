//! The full ledger of one escrow instance.

use escrow_types::{AssetId, Role, SettlementReadiness};
use rust_decimal::Decimal;

use crate::{ApprovalTracker, FundVault, InspectionTracker, ListingStore, Roles};

/// Every state component of an escrow instance, side by side.
///
/// Fields are public so the settlement engine can borrow them disjointly.
#[derive(Debug, Clone)]
pub struct EscrowState {
    pub roles: Roles,
    pub listings: ListingStore,
    pub inspections: InspectionTracker,
    pub approvals: ApprovalTracker,
    pub vault: FundVault,
}

impl EscrowState {
    #[must_use]
    pub fn new(roles: Roles) -> Self {
        Self {
            roles,
            listings: ListingStore::new(),
            inspections: InspectionTracker::new(),
            approvals: ApprovalTracker::new(),
            vault: FundVault::new(),
        }
    }

    /// Whether the party holding `role` approved `asset`. The buyer is
    /// looked up from the active listing; without one nobody is the buyer.
    #[must_use]
    pub fn role_approved(&self, asset: AssetId, role: Role) -> bool {
        let holder = if role.is_fixed() {
            self.roles.holder(role)
        } else {
            self.listings.active(asset).ok().map(|l| l.buyer)
        };
        holder.is_some_and(|party| self.approvals.approval(asset, party))
    }

    /// Snapshot of every finalization condition for `asset`.
    #[must_use]
    pub fn readiness(&self, asset: AssetId) -> SettlementReadiness {
        let listing = self.listings.active(asset).ok();
        SettlementReadiness {
            listed: listing.is_some(),
            inspection_passed: self.inspections.passed(asset),
            buyer_approved: self.role_approved(asset, Role::Buyer),
            seller_approved: self.role_approved(asset, Role::Seller),
            lender_approved: self.role_approved(asset, Role::Lender),
            required: listing.map_or(Decimal::ZERO, |l| l.purchase_price),
            available: self.vault.balance(),
        }
    }

    /// Forget inspection and approvals for `asset` ahead of a new listing.
    pub fn reset_conditions(&mut self, asset: AssetId) {
        self.inspections.reset(asset);
        self.approvals.reset(asset);
    }
}
