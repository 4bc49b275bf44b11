//! The escrow instance: public read and write surface.
//!
//! Every state-changing operation takes `&mut self` and the acting party's
//! identity. Each one either commits fully or returns an error having
//! changed nothing.

use ed25519_dalek::{SigningKey, VerifyingKey};
use escrow_ledger::{EscrowState, Roles, access, require_positive, validate_terms};
use escrow_registry::AssetRegistry;
use escrow_types::{
    AssetId, EscrowConfig, EscrowError, EscrowPolicy, Listing, PartyId, RegistryError, Result,
    Role, SettlementReadiness, SettlementReceipt, constants,
};
use rust_decimal::Decimal;

use crate::engine::SettlementEngine;
use crate::signer::ReceiptSigner;

/// One escrow instance bound to a registry and three fixed roles.
#[derive(Debug)]
pub struct Escrow<R: AssetRegistry> {
    policy: EscrowPolicy,
    state: EscrowState,
    engine: SettlementEngine,
    registry: R,
}

impl<R: AssetRegistry> Escrow<R> {
    /// Create an instance with a freshly generated signing key.
    pub fn new(config: EscrowConfig, registry: R) -> Result<Self> {
        Self::with_signer(config, registry, ReceiptSigner::generate())
    }

    /// Create an instance with a known signing key, and so a known address.
    pub fn with_signing_key(config: EscrowConfig, registry: R, key: SigningKey) -> Result<Self> {
        Self::with_signer(config, registry, ReceiptSigner::new(key))
    }

    fn with_signer(config: EscrowConfig, registry: R, signer: ReceiptSigner) -> Result<Self> {
        config.validate()?;
        let escrow = signer.address();
        if [config.seller, config.inspector, config.lender].contains(&escrow) {
            return Err(EscrowError::Configuration(format!(
                "escrow address {escrow} collides with a fixed role"
            )));
        }
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            escrow = %escrow,
            seller = %config.seller,
            inspector = %config.inspector,
            lender = %config.lender,
            enforce_earnest_minimum = config.policy.enforce_earnest_minimum,
            "Escrow instance created"
        );
        Ok(Self {
            policy: config.policy,
            state: EscrowState::new(Roles::from_config(&config)),
            engine: SettlementEngine::new(signer),
            registry,
        })
    }

    // =================================================================
    // Identity and configuration
    // =================================================================

    /// This instance's address in the registry.
    #[must_use]
    pub fn address(&self) -> PartyId {
        self.engine.address()
    }

    /// Key that verifies this instance's receipts.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.engine.signer().verifying_key()
    }

    /// The seller, fixed at construction.
    #[must_use]
    pub fn seller(&self) -> PartyId {
        self.state.roles.seller()
    }

    /// The only party allowed to record inspection results.
    #[must_use]
    pub fn inspector(&self) -> PartyId {
        self.state.roles.inspector()
    }

    /// The lender whose approval every sale needs.
    #[must_use]
    pub fn lender(&self) -> PartyId {
        self.state.roles.lender()
    }

    /// Deposit policy this instance was configured with.
    #[must_use]
    pub fn policy(&self) -> EscrowPolicy {
        self.policy
    }

    /// Read-only view of the asset registry.
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Direct access to the registry, for the registry's own operations
    /// (minting, approving operators). Escrow state is not reachable here.
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    // =================================================================
    // Write surface
    // =================================================================

    /// List `asset` for sale to `buyer`. Seller only.
    ///
    /// Takes custody of the asset if the seller still owns it and has
    /// approved this instance in the registry. Clears any inspection result
    /// and approvals left from an earlier listing of the same asset.
    pub fn list(
        &mut self,
        caller: PartyId,
        asset: AssetId,
        buyer: PartyId,
        purchase_price: Decimal,
        escrow_amount: Decimal,
    ) -> Result<()> {
        self.state.roles.require_seller(caller)?;
        validate_terms(purchase_price, escrow_amount)?;
        self.take_custody(asset)?;

        self.state
            .listings
            .upsert(asset, buyer, purchase_price, escrow_amount)?;
        self.state.reset_conditions(asset);

        tracing::info!(
            asset = %asset,
            buyer = %buyer,
            purchase_price = %purchase_price,
            escrow_amount = %escrow_amount,
            active_listings = self.state.listings.active_count(),
            "Asset listed"
        );
        Ok(())
    }

    fn take_custody(&mut self, asset: AssetId) -> Result<()> {
        let escrow = self.address();
        let seller = self.seller();
        let reject = |source: RegistryError| {
            tracing::warn!(asset = %asset, error = %source, "Custody transfer rejected");
            EscrowError::TransferFailed { asset, source }
        };

        let owner = self
            .registry
            .owner_of(asset)
            .ok_or_else(|| reject(RegistryError::UnknownAsset(asset)))?;
        if owner == escrow {
            return Ok(());
        }
        if owner != seller {
            return Err(reject(RegistryError::NotOwner {
                asset,
                party: seller,
            }));
        }
        self.registry
            .transfer_from(escrow, seller, escrow, asset)
            .map_err(reject)?;
        tracing::debug!(asset = %asset, escrow = %escrow, "Asset taken into custody");
        Ok(())
    }

    /// Deposit earnest funds against an active listing. Buyer only.
    pub fn deposit_earnest(&mut self, caller: PartyId, asset: AssetId, amount: Decimal) -> Result<()> {
        let (buyer, minimum) = {
            let listing = self.state.listings.active(asset)?;
            (listing.buyer, listing.escrow_amount)
        };
        access::require(caller, buyer, Role::Buyer)?;
        require_positive(amount)?;
        if self.policy.enforce_earnest_minimum && amount < minimum {
            return Err(EscrowError::EarnestBelowMinimum {
                required: minimum,
                provided: amount,
            });
        }
        self.state.vault.deposit_earnest(asset, amount)?;

        tracing::info!(
            asset = %asset,
            buyer = %buyer,
            amount = %amount,
            balance = %self.state.vault.balance(),
            "Earnest deposited"
        );
        Ok(())
    }

    /// Add funds to the pool without tying them to a listing. Anyone may
    /// fund; the lender usually supplies the rest of the purchase price
    /// this way.
    pub fn fund(&mut self, caller: PartyId, amount: Decimal) -> Result<()> {
        self.state.vault.top_up(amount)?;
        tracing::info!(
            from = %caller,
            amount = %amount,
            balance = %self.state.vault.balance(),
            "Vault funded"
        );
        Ok(())
    }

    /// Record the inspection result for `asset`. Inspector only.
    pub fn update_inspection_status(
        &mut self,
        caller: PartyId,
        asset: AssetId,
        passed: bool,
    ) -> Result<()> {
        self.state.roles.require_inspector(caller)?;
        self.state.inspections.record(asset, passed);
        tracing::info!(asset = %asset, passed, "Inspection status updated");
        Ok(())
    }

    /// Record the caller's own approval of `asset`'s sale.
    pub fn approve_sale(&mut self, caller: PartyId, asset: AssetId) {
        self.state.approvals.approve(asset, caller);
        tracing::info!(
            asset = %asset,
            party = %caller,
            approvals = self.state.approvals.count(asset),
            "Sale approved"
        );
    }

    /// Close the sale of `asset`. Seller only. See [`SettlementEngine`].
    pub fn finalize_sale(&mut self, caller: PartyId, asset: AssetId) -> Result<SettlementReceipt> {
        self.engine
            .finalize(&mut self.state, &mut self.registry, caller, asset)
    }

    // =================================================================
    // Read surface
    // =================================================================

    #[must_use]
    pub fn is_listed(&self, asset: AssetId) -> bool {
        self.state.listings.is_listed(asset)
    }

    #[must_use]
    pub fn buyer(&self, asset: AssetId) -> Option<PartyId> {
        self.state.listings.buyer(asset)
    }

    #[must_use]
    pub fn purchase_price(&self, asset: AssetId) -> Decimal {
        self.state.listings.purchase_price(asset)
    }

    #[must_use]
    pub fn escrow_amount(&self, asset: AssetId) -> Decimal {
        self.state.listings.escrow_amount(asset)
    }

    #[must_use]
    pub fn listing(&self, asset: AssetId) -> Option<&Listing> {
        self.state.listings.get(asset)
    }

    #[must_use]
    pub fn inspection_passed(&self, asset: AssetId) -> bool {
        self.state.inspections.passed(asset)
    }

    #[must_use]
    pub fn approval(&self, asset: AssetId, party: PartyId) -> bool {
        self.state.approvals.approval(asset, party)
    }

    /// Pooled balance shared by every listing.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.state.vault.balance()
    }

    #[must_use]
    pub fn earnest_deposited(&self, asset: AssetId) -> Decimal {
        self.state.vault.earnest_deposited(asset)
    }

    /// Total settlement payouts received by `party`.
    #[must_use]
    pub fn paid_to(&self, party: PartyId) -> Decimal {
        self.state.vault.paid_to(party)
    }

    #[must_use]
    pub fn readiness(&self, asset: AssetId) -> SettlementReadiness {
        self.state.readiness(asset)
    }

    #[must_use]
    pub fn receipts(&self) -> &[SettlementReceipt] {
        self.engine.receipts()
    }

    /// Check the vault balance against its inflow and outflow totals.
    pub fn verify_supply(&self) -> Result<()> {
        self.state.vault.verify_supply()
    }
}
