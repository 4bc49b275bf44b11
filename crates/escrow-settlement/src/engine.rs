//! Settlement engine: decides whether a sale may close and closes it.
//!
//! Finalization runs in two stages:
//!
//! 1. **Check** (no mutation): caller is the seller, then the six
//!    conditions in order: listed, inspection passed, buyer / seller /
//!    lender approved, balance covers the purchase price.
//! 2. **Commit**:
//!    - reserve the purchase price in the vault
//!    - ask the registry to move the asset from escrow to buyer
//!    - on rejection: release the reservation and fail with `TransferFailed`
//!    - on success: disburse to the seller, close the listing, sign a receipt
//!
//! Either every effect lands or none does.

use escrow_ledger::EscrowState;
use escrow_registry::AssetRegistry;
use escrow_types::{
    AssetId, EscrowError, PartyId, Result, SettlementReadiness, SettlementReceipt,
    UnmetCondition,
};
use rust_decimal::Decimal;

use crate::signer::ReceiptSigner;

/// Closes sales and keeps the receipts it issued.
#[derive(Debug)]
pub struct SettlementEngine {
    signer: ReceiptSigner,
    receipts: Vec<SettlementReceipt>,
}

impl SettlementEngine {
    #[must_use]
    pub fn new(signer: ReceiptSigner) -> Self {
        Self {
            signer,
            receipts: Vec::new(),
        }
    }

    /// The escrow instance's address.
    #[must_use]
    pub fn address(&self) -> PartyId {
        self.signer.address()
    }

    #[must_use]
    pub fn signer(&self) -> &ReceiptSigner {
        &self.signer
    }

    /// Every receipt issued so far, oldest first.
    #[must_use]
    pub fn receipts(&self) -> &[SettlementReceipt] {
        &self.receipts
    }

    /// Fail unless every condition holds for `asset`.
    pub fn check(&self, state: &EscrowState, asset: AssetId) -> Result<SettlementReadiness> {
        let readiness = state.readiness(asset);
        match readiness.first_unmet() {
            None => Ok(readiness),
            Some(UnmetCondition::NotListed) => Err(EscrowError::NotListed(asset)),
            Some(condition) => {
                let shortfall = state
                    .listings
                    .get(asset)
                    .map_or(Decimal::ZERO, |l| l.shortfall(readiness.available));
                tracing::debug!(
                    asset = %asset,
                    condition = %condition,
                    shortfall = %shortfall,
                    "Settlement not ready"
                );
                Err(EscrowError::PreconditionNotMet { asset, condition })
            }
        }
    }

    /// Pay the seller and hand the asset to the buyer, or change nothing.
    pub fn finalize<R: AssetRegistry>(
        &mut self,
        state: &mut EscrowState,
        registry: &mut R,
        caller: PartyId,
        asset: AssetId,
    ) -> Result<SettlementReceipt> {
        // ── Check ───────────────────────────────────────────────────────
        state.roles.require_seller(caller)?;
        self.check(state, asset)?;

        let (buyer, price) = {
            let listing = state.listings.active(asset)?;
            (listing.buyer, listing.purchase_price)
        };
        let seller = state.roles.seller();
        let escrow = self.signer.address();

        // ── Commit ──────────────────────────────────────────────────────
        let reservation = state.vault.reserve(price)?;

        if let Err(source) = registry.transfer_from(escrow, escrow, buyer, asset) {
            state.vault.release(reservation);
            tracing::warn!(
                asset = %asset,
                buyer = %buyer,
                error = %source,
                "Registry rejected settlement transfer; rolled back"
            );
            return Err(EscrowError::TransferFailed { asset, source });
        }

        state.vault.disburse(reservation, seller);
        state.listings.unlist(asset).map_err(|_| {
            EscrowError::Internal(format!("listing for {asset} closed during settlement"))
        })?;

        let receipt = self.signer.issue(asset, seller, buyer, price);
        tracing::info!(
            asset = %asset,
            buyer = %buyer,
            seller = %seller,
            amount = %price,
            balance = %state.vault.balance(),
            receipt = %receipt.id,
            receipt_hash = hex::encode(receipt.payload_hash),
            "Sale finalized"
        );
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }
}
