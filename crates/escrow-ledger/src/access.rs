//! Role guards.
//!
//! Every restricted operation compares the caller against a stored role
//! value and returns [`EscrowError::Unauthorized`] naming the role on a
//! mismatch. There is no implicit modifier machinery: callers invoke the
//! guard explicitly before touching any state.

use escrow_types::{EscrowConfig, EscrowError, PartyId, Result, Role};

/// The three fixed identities of an escrow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    seller: PartyId,
    inspector: PartyId,
    lender: PartyId,
}

impl Roles {
    #[must_use]
    pub fn new(seller: PartyId, inspector: PartyId, lender: PartyId) -> Self {
        Self {
            seller,
            inspector,
            lender,
        }
    }

    #[must_use]
    pub fn from_config(config: &EscrowConfig) -> Self {
        Self::new(config.seller, config.inspector, config.lender)
    }

    #[must_use]
    pub fn seller(&self) -> PartyId {
        self.seller
    }

    #[must_use]
    pub fn inspector(&self) -> PartyId {
        self.inspector
    }

    #[must_use]
    pub fn lender(&self) -> PartyId {
        self.lender
    }

    /// Holder of a fixed role. `None` for [`Role::Buyer`], which is per
    /// listing.
    #[must_use]
    pub fn holder(&self, role: Role) -> Option<PartyId> {
        match role {
            Role::Seller => Some(self.seller),
            Role::Inspector => Some(self.inspector),
            Role::Lender => Some(self.lender),
            Role::Buyer => None,
        }
    }

    pub fn require_seller(&self, caller: PartyId) -> Result<()> {
        require(caller, self.seller, Role::Seller)
    }

    pub fn require_inspector(&self, caller: PartyId) -> Result<()> {
        require(caller, self.inspector, Role::Inspector)
    }
}

/// Fail with `Unauthorized` unless `caller` is `expected`.
pub fn require(caller: PartyId, expected: PartyId, role: Role) -> Result<()> {
    if caller == expected {
        Ok(())
    } else {
        tracing::warn!(caller = %caller, required = %role, "Unauthorized caller rejected");
        Err(EscrowError::Unauthorized {
            caller,
            required: role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Roles {
        Roles::new(PartyId::random(), PartyId::random(), PartyId::random())
    }

    #[test]
    fn seller_guard() {
        let r = roles();
        assert!(r.require_seller(r.seller()).is_ok());
        let err = r.require_seller(r.lender()).unwrap_err();
        assert!(matches!(
            err,
            EscrowError::Unauthorized {
                required: Role::Seller,
                ..
            }
        ));
    }

    #[test]
    fn inspector_guard() {
        let r = roles();
        assert!(r.require_inspector(r.inspector()).is_ok());
        assert!(r.require_inspector(r.seller()).is_err());
    }

    #[test]
    fn buyer_has_no_fixed_holder() {
        let r = roles();
        assert_eq!(r.holder(Role::Buyer), None);
        assert_eq!(r.holder(Role::Lender), Some(r.lender()));
    }

    #[test]
    fn generic_require_reports_caller() {
        let caller = PartyId::random();
        let err = require(caller, PartyId::random(), Role::Buyer).unwrap_err();
        assert!(matches!(err, EscrowError::Unauthorized { caller: c, .. } if c == caller));
    }
}
