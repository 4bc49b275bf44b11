//! Roles a party can play in an escrow.
//!
//! Seller, inspector and lender are fixed for the lifetime of an escrow
//! instance. The buyer is chosen per listing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A role checked by an access-control guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Lists assets and finalizes sales.
    Seller,
    /// Deposits earnest funds for the listing naming them.
    Buyer,
    /// Records whether the asset passed inspection.
    Inspector,
    /// Supplies the remainder of the purchase price and signs off.
    Lender,
}

impl Role {
    /// Whether this role is fixed at escrow construction.
    #[must_use]
    pub fn is_fixed(self) -> bool {
        !matches!(self, Self::Buyer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seller => write!(f, "SELLER"),
            Self::Buyer => write!(f, "BUYER"),
            Self::Inspector => write!(f, "INSPECTOR"),
            Self::Lender => write!(f, "LENDER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_buyer_is_per_listing() {
        assert!(Role::Seller.is_fixed());
        assert!(Role::Inspector.is_fixed());
        assert!(Role::Lender.is_fixed());
        assert!(!Role::Buyer.is_fixed());
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Inspector.to_string(), "INSPECTOR");
        assert_eq!(Role::Buyer.to_string(), "BUYER");
    }
}
