//! Sale terms recorded for one asset.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AssetId, PartyId};

/// The terms and status of one asset's sale.
///
/// `buyer`, `purchase_price` and `escrow_amount` are only meaningful while
/// `is_listed` is true. After finalization they stay in place but nothing
/// consults them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// The asset being sold.
    pub asset_id: AssetId,
    /// The party allowed to deposit earnest funds and receive the asset.
    pub buyer: PartyId,
    /// Total amount the vault must hold before settlement.
    pub purchase_price: Decimal,
    /// Advisory earnest figure. Only enforced when the escrow policy says so.
    pub escrow_amount: Decimal,
    /// True from a successful listing until a successful finalization.
    pub is_listed: bool,
    /// When the terms were last written.
    pub listed_at: DateTime<Utc>,
}

impl Listing {
    /// Fresh, active listing.
    #[must_use]
    pub fn new(
        asset_id: AssetId,
        buyer: PartyId,
        purchase_price: Decimal,
        escrow_amount: Decimal,
    ) -> Self {
        Self {
            asset_id,
            buyer,
            purchase_price,
            escrow_amount,
            is_listed: true,
            listed_at: Utc::now(),
        }
    }

    /// Amount still missing from `available` to cover the purchase price.
    #[must_use]
    pub fn shortfall(&self, available: Decimal) -> Decimal {
        (self.purchase_price - available).max(Decimal::ZERO)
    }
}
