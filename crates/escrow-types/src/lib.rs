//! # escrow-types
//!
//! Shared types, errors, and configuration for the **Deedlock** escrow.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`PartyId`], [`AssetId`], [`ReceiptId`]
//! - **Listing model**: [`Listing`]
//! - **Roles**: [`Role`]
//! - **Settlement conditions**: [`SettlementReadiness`], [`UnmetCondition`]
//! - **Receipts**: [`SettlementReceipt`]
//! - **Configuration**: [`EscrowConfig`], [`EscrowPolicy`]
//! - **Errors**: [`EscrowError`] with `ESC_ERR_` prefix codes, [`RegistryError`]
//! - **Constants**: domain tags and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod listing;
pub mod readiness;
pub mod receipt;
pub mod role;

pub use config::*;
pub use error::*;
pub use ids::*;
pub use listing::*;
pub use readiness::*;
pub use receipt::*;
pub use role::*;

// Constants are accessed via `escrow_types::constants::FOO`
// (not re-exported to avoid name collisions).
