//! Per-asset sale terms.
//!
//! Reads never fail: unknown assets answer "unlisted", no buyer, and zero
//! amounts.

use std::collections::HashMap;

use escrow_types::{AssetId, EscrowError, Listing, PartyId, Result};
use rust_decimal::Decimal;

/// Holds one [`Listing`] per asset that has ever been listed.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    listings: HashMap<AssetId, Listing>,
}

impl ListingStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
        }
    }

    /// Create or overwrite the listing for `asset`. The new listing is
    /// active.
    pub fn upsert(
        &mut self,
        asset: AssetId,
        buyer: PartyId,
        purchase_price: Decimal,
        escrow_amount: Decimal,
    ) -> Result<()> {
        validate_terms(purchase_price, escrow_amount)?;
        self.listings.insert(
            asset,
            Listing::new(asset, buyer, purchase_price, escrow_amount),
        );
        Ok(())
    }

    /// Close an active listing. Terms stay stored.
    pub fn unlist(&mut self, asset: AssetId) -> Result<()> {
        match self.listings.get_mut(&asset) {
            Some(listing) if listing.is_listed => {
                listing.is_listed = false;
                Ok(())
            }
            _ => Err(EscrowError::NotListed(asset)),
        }
    }

    /// The active listing for `asset`, or `NotListed`.
    pub fn active(&self, asset: AssetId) -> Result<&Listing> {
        self.listings
            .get(&asset)
            .filter(|l| l.is_listed)
            .ok_or(EscrowError::NotListed(asset))
    }

    /// The stored listing, active or not.
    #[must_use]
    pub fn get(&self, asset: AssetId) -> Option<&Listing> {
        self.listings.get(&asset)
    }

    #[must_use]
    pub fn is_listed(&self, asset: AssetId) -> bool {
        self.listings.get(&asset).is_some_and(|l| l.is_listed)
    }

    #[must_use]
    pub fn buyer(&self, asset: AssetId) -> Option<PartyId> {
        self.listings.get(&asset).map(|l| l.buyer)
    }

    #[must_use]
    pub fn purchase_price(&self, asset: AssetId) -> Decimal {
        self.listings
            .get(&asset)
            .map_or(Decimal::ZERO, |l| l.purchase_price)
    }

    #[must_use]
    pub fn escrow_amount(&self, asset: AssetId) -> Decimal {
        self.listings
            .get(&asset)
            .map_or(Decimal::ZERO, |l| l.escrow_amount)
    }

    /// Number of currently active listings.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.listings.values().filter(|l| l.is_listed).count()
    }
}

/// Purchase price and escrow amount must both be non-negative.
pub fn validate_terms(purchase_price: Decimal, escrow_amount: Decimal) -> Result<()> {
    if purchase_price < Decimal::ZERO {
        return Err(EscrowError::InvalidAmount {
            reason: format!("purchase price {purchase_price} is negative"),
        });
    }
    if escrow_amount < Decimal::ZERO {
        return Err(EscrowError::InvalidAmount {
            reason: format!("escrow amount {escrow_amount} is negative"),
        });
    }
    Ok(())
}
