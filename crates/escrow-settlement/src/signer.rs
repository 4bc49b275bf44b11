//! Receipt signing.
//!
//! Each escrow instance holds one ed25519 key. Its public key determines
//! the instance's address in the registry and verifies every receipt it
//! issues.

use chrono::Utc;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use escrow_types::{AssetId, PartyId, ReceiptId, SettlementReceipt};
use rust_decimal::Decimal;

pub struct ReceiptSigner {
    key: SigningKey,
    address: PartyId,
}

impl ReceiptSigner {
    #[must_use]
    pub fn new(key: SigningKey) -> Self {
        let address = PartyId::from_verifying_key(&key.verifying_key());
        Self { key, address }
    }

    /// Signer with a fresh key from the OS random source.
    #[must_use]
    pub fn generate() -> Self {
        Self::new(SigningKey::generate(&mut rand::rngs::OsRng))
    }

    /// Address derived from the public key.
    #[must_use]
    pub fn address(&self) -> PartyId {
        self.address
    }

    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    /// Build, hash and sign a receipt for a completed settlement.
    #[must_use]
    pub fn issue(
        &self,
        asset_id: AssetId,
        seller: PartyId,
        buyer: PartyId,
        amount: Decimal,
    ) -> SettlementReceipt {
        let mut receipt = SettlementReceipt {
            id: ReceiptId::new(),
            asset_id,
            seller,
            buyer,
            amount,
            escrow: self.address,
            settled_at: Utc::now(),
            payload_hash: [0u8; 32],
            signature: Vec::new(),
        };
        receipt.payload_hash = receipt.compute_hash();
        receipt.signature = self.key.sign(&receipt.payload_hash).to_bytes().to_vec();
        receipt
    }
}

impl std::fmt::Debug for ReceiptSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
