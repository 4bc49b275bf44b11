//! # escrow-settlement
//!
//! **Settlement plane**: the escrow instance and the engine that closes
//! sales.
//!
//! ## Architecture
//!
//! [`Escrow`] owns the ledger state, the registry handle and a
//! [`SettlementEngine`]. Finalization:
//! 1. Checks the caller is the seller
//! 2. Checks listing, inspection, three approvals and funding, in order
//! 3. Reserves the purchase price in the pooled vault
//! 4. Transfers the asset from escrow custody to the buyer
//! 5. Disburses the reservation to the seller and closes the listing
//! 6. Issues an ed25519-signed [`SettlementReceipt`]
//!
//! A registry rejection at step 4 releases the reservation; the escrow is
//! left exactly as it was.
//!
//! [`SettlementReceipt`]: escrow_types::SettlementReceipt

pub mod engine;
pub mod escrow;
pub mod signer;

pub use engine::SettlementEngine;
pub use escrow::Escrow;
pub use signer::ReceiptSigner;
