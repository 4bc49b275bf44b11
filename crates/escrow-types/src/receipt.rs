//! Signed settlement receipts.
//!
//! Every successful finalization produces a [`SettlementReceipt`] that can
//! be verified independently with the escrow's public key:
//! - `payload_hash` is the SHA-256 of [`SettlementReceipt::signing_payload`]
//! - `signature` is an ed25519 signature over `payload_hash`

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AssetId, EscrowError, PartyId, ReceiptId, Result, constants};

/// Proof that an asset changed hands and the seller was paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub id: ReceiptId,
    pub asset_id: AssetId,
    /// Received `amount` from the vault.
    pub seller: PartyId,
    /// New owner of the asset.
    pub buyer: PartyId,
    /// Purchase price paid out.
    pub amount: Decimal,
    /// Address of the escrow instance that settled.
    pub escrow: PartyId,
    pub settled_at: DateTime<Utc>,
    pub payload_hash: [u8; 32],
    /// Ed25519 signature over `payload_hash` (64 bytes).
    pub signature: Vec<u8>,
}

impl SettlementReceipt {
    /// Canonical payload.
    ///
    /// Format: `RECEIPT_DOMAIN || id || asset_id || seller || buyer || amount || escrow || settled_at_ms`
    #[must_use]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(160);
        payload.extend_from_slice(constants::RECEIPT_DOMAIN);
        payload.extend_from_slice(self.id.0.as_bytes());
        payload.extend_from_slice(&self.asset_id.0.to_le_bytes());
        payload.extend_from_slice(self.seller.as_bytes());
        payload.extend_from_slice(self.buyer.as_bytes());
        payload.extend_from_slice(self.amount.normalize().to_string().as_bytes());
        payload.extend_from_slice(self.escrow.as_bytes());
        payload.extend_from_slice(&self.settled_at.timestamp_millis().to_le_bytes());
        payload
    }

    /// SHA-256 of the canonical payload.
    #[must_use]
    pub fn compute_hash(&self) -> [u8; 32] {
        let hash = Sha256::digest(self.signing_payload());
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        out
    }

    /// Check the stored hash against the fields and the signature against
    /// `key`.
    pub fn verify(&self, key: &VerifyingKey) -> Result<()> {
        if self.compute_hash() != self.payload_hash {
            return Err(EscrowError::ReceiptInvalid {
                reason: format!("payload hash mismatch on {}", self.id),
            });
        }
        let bytes: [u8; 64] =
            self.signature
                .as_slice()
                .try_into()
                .map_err(|_| EscrowError::ReceiptInvalid {
                    reason: format!("signature is {} bytes, expected 64", self.signature.len()),
                })?;
        key.verify(&self.payload_hash, &Signature::from_bytes(&bytes))
            .map_err(|e| EscrowError::ReceiptInvalid {
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn signed(key: &SigningKey) -> SettlementReceipt {
        let mut receipt = SettlementReceipt {
            id: ReceiptId::new(),
            asset_id: AssetId(1),
            seller: PartyId::random(),
            buyer: PartyId::random(),
            amount: Decimal::new(10, 0),
            escrow: PartyId::from_verifying_key(&key.verifying_key()),
            settled_at: Utc::now(),
            payload_hash: [0; 32],
            signature: Vec::new(),
        };
        receipt.payload_hash = receipt.compute_hash();
        receipt.signature = key.sign(&receipt.payload_hash).to_bytes().to_vec();
        receipt
    }

    #[test]
    fn signed_receipt_verifies() {
        let key = SigningKey::from_bytes(&[9; 32]);
        let receipt = signed(&key);
        assert!(receipt.verify(&key.verifying_key()).is_ok());
    }

    #[test]
    fn tampered_amount_detected() {
        let key = SigningKey::from_bytes(&[9; 32]);
        let mut receipt = signed(&key);
        receipt.amount = Decimal::new(1, 0);
        let err = receipt.verify(&key.verifying_key()).unwrap_err();
        assert!(matches!(err, EscrowError::ReceiptInvalid { .. }));
    }

    #[test]
    fn wrong_key_rejected() {
        let key = SigningKey::from_bytes(&[9; 32]);
        let other = SigningKey::from_bytes(&[10; 32]);
        let receipt = signed(&key);
        assert!(receipt.verify(&other.verifying_key()).is_err());
    }

    #[test]
    fn truncated_signature_rejected() {
        let key = SigningKey::from_bytes(&[9; 32]);
        let mut receipt = signed(&key);
        receipt.signature.truncate(10);
        let err = receipt.verify(&key.verifying_key()).unwrap_err();
        assert!(err.to_string().contains("10 bytes"));
    }

    #[test]
    fn equal_amounts_hash_equally() {
        let key = SigningKey::from_bytes(&[9; 32]);
        let mut a = signed(&key);
        let b_hash = a.compute_hash();
        a.amount = Decimal::new(1000, 2);
        assert_eq!(a.compute_hash(), b_hash);
    }
}
