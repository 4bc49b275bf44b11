//! Settlement conditions and the readiness report built from them.
//!
//! Finalization checks six conditions in a fixed order. The first one that
//! does not hold is reported as an [`UnmetCondition`].

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Role;

/// A finalization condition that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnmetCondition {
    /// The asset has no active listing.
    NotListed,
    /// The inspector has not recorded a passing inspection.
    InspectionNotPassed,
    /// One of buyer, seller or lender has not approved the sale.
    ApprovalMissing { role: Role },
    /// The pooled balance does not cover the purchase price.
    InsufficientFunds { required: Decimal, available: Decimal },
}

impl fmt::Display for UnmetCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotListed => write!(f, "asset is not listed"),
            Self::InspectionNotPassed => write!(f, "inspection has not passed"),
            Self::ApprovalMissing { role } => write!(f, "{role} approval missing"),
            Self::InsufficientFunds {
                required,
                available,
            } => write!(f, "balance {available} below purchase price {required}"),
        }
    }
}

/// Snapshot of every finalization condition for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReadiness {
    pub listed: bool,
    pub inspection_passed: bool,
    pub buyer_approved: bool,
    pub seller_approved: bool,
    pub lender_approved: bool,
    /// Purchase price of the listing (zero when unlisted).
    pub required: Decimal,
    /// Pooled balance at the time of the snapshot.
    pub available: Decimal,
}

impl SettlementReadiness {
    /// Whether the balance covers the purchase price.
    #[must_use]
    pub fn funded(&self) -> bool {
        self.available >= self.required
    }

    /// The first condition that fails, in finalization order.
    #[must_use]
    pub fn first_unmet(&self) -> Option<UnmetCondition> {
        if !self.listed {
            return Some(UnmetCondition::NotListed);
        }
        if !self.inspection_passed {
            return Some(UnmetCondition::InspectionNotPassed);
        }
        for (approved, role) in [
            (self.buyer_approved, Role::Buyer),
            (self.seller_approved, Role::Seller),
            (self.lender_approved, Role::Lender),
        ] {
            if !approved {
                return Some(UnmetCondition::ApprovalMissing { role });
            }
        }
        if !self.funded() {
            return Some(UnmetCondition::InsufficientFunds {
                required: self.required,
                available: self.available,
            });
        }
        None
    }

    /// Whether every condition holds.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.first_unmet().is_none()
    }
}
