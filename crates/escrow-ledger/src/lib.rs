//! # escrow-ledger
//!
//! The state held by one escrow instance, partitioned into independent
//! components that the settlement engine reads together:
//!
//! 1. **ListingStore**: sale terms per asset
//! 2. **InspectionTracker**: inspection result per asset
//! 3. **ApprovalTracker**: self-attributed approval per (asset, party)
//! 4. **FundVault**: one pooled balance with two-phase payouts
//! 5. **SupplyConservation**: vault balance vs. inflow/outflow totals
//! 6. **Roles**: fixed identities and the guards that check them
//!
//! [`EscrowState`] bundles them and answers the readiness question.
//!
//! Nothing in this crate talks to the asset registry.

pub mod access;
pub mod approval;
pub mod fund_vault;
pub mod inspection;
pub mod listing_store;
pub mod state;
pub mod supply_conservation;

pub use access::Roles;
pub use approval::ApprovalTracker;
pub use fund_vault::{FundVault, Reservation, require_positive};
pub use inspection::InspectionTracker;
pub use listing_store::{ListingStore, validate_terms};
pub use state::EscrowState;
pub use supply_conservation::SupplyConservation;
