//! System-wide constants for the escrow workspace.

/// Domain separation tag for deriving a [`crate::PartyId`] from a public key.
pub const PARTY_ID_DOMAIN: &[u8] = b"deedlock:party:v1:";

/// Domain separation tag prefixed to every settlement receipt payload.
pub const RECEIPT_DOMAIN: &[u8] = b"deedlock:receipt:v1:";

/// First identifier handed out by a fresh registry.
pub const FIRST_ASSET_ID: u64 = 1;

/// Prefix shared by every error code.
pub const ERROR_PREFIX: &str = "ESC_ERR_";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Deedlock";
