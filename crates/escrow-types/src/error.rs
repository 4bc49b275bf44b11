//! Error types for the escrow workspace.
//!
//! All errors use the `ESC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Access control
//! - 2xx: Listing
//! - 3xx: Funds
//! - 4xx: Settlement
//! - 5xx: Registry / receipts
//! - 9xx: General / internal

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AssetId, PartyId, Role, UnmetCondition};

/// Rejections raised by an asset registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No asset with this identifier exists.
    #[error("unknown asset {0}")]
    UnknownAsset(AssetId),

    /// The `from` party of a transfer is not the current owner.
    #[error("{party} does not own {asset}")]
    NotOwner { asset: AssetId, party: PartyId },

    /// The operator is neither the owner nor the approved operator.
    #[error("{operator} is not authorized to transfer {asset}")]
    NotAuthorized { asset: AssetId, operator: PartyId },

    /// The registry refused the operation for its own reasons.
    #[error("registry rejected operation: {reason}")]
    Rejected { reason: String },
}

/// Central error enum for all escrow operations.
#[derive(Debug, Error)]
pub enum EscrowError {
    // =================================================================
    // Access control (1xx)
    // =================================================================
    /// The caller does not hold the role the operation requires.
    #[error("ESC_ERR_100: Unauthorized: {caller} is not the {required}")]
    Unauthorized { caller: PartyId, required: Role },

    // =================================================================
    // Listing (2xx)
    // =================================================================
    /// The operation needs an active listing and there is none.
    #[error("ESC_ERR_200: Asset not listed: {0}")]
    NotListed(AssetId),

    // =================================================================
    // Funds (3xx)
    // =================================================================
    /// An amount was negative, zero where a positive value is required, or
    /// would overflow the vault.
    #[error("ESC_ERR_300: Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// An earnest deposit fell below the listing's escrow amount while the
    /// minimum is enforced.
    #[error("ESC_ERR_301: Earnest deposit {provided} below required {required}")]
    EarnestBelowMinimum { required: Decimal, provided: Decimal },

    /// The vault cannot cover a reservation.
    #[error("ESC_ERR_302: Insufficient vault balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    // =================================================================
    // Settlement (4xx)
    // =================================================================
    /// Finalization attempted before every condition holds.
    #[error("ESC_ERR_400: Settlement precondition not met for {asset}: {condition}")]
    PreconditionNotMet {
        asset: AssetId,
        condition: UnmetCondition,
    },

    /// The registry rejected an ownership transfer.
    #[error("ESC_ERR_401: Asset transfer failed for {asset}: {source}")]
    TransferFailed {
        asset: AssetId,
        #[source]
        source: RegistryError,
    },

    /// Vault bookkeeping disagrees with its own deposit/payout totals.
    #[error("ESC_ERR_402: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Receipts (5xx)
    // =================================================================
    /// A settlement receipt's hash or signature did not verify.
    #[error("ESC_ERR_500: Invalid receipt: {reason}")]
    ReceiptInvalid { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("ESC_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("ESC_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, duplicate roles, etc.).
    #[error("ESC_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("ESC_ERR_903: I/O error: {0}")]
    Io(String),
}

impl EscrowError {
    /// True when the error leaves the escrow untouched and the caller may
    /// fix the cause and resubmit.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::PreconditionNotMet { .. } | Self::TransferFailed { .. }
        )
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, EscrowError>;

impl From<std::io::Error> for EscrowError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EscrowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
