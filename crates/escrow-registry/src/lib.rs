//! # escrow-registry
//!
//! The asset registry boundary. The registry owns the mapping from asset to
//! owner and the per-asset approved-operator record; the escrow only asks
//! it questions and asks it to move assets.
//!
//! ## Two-phase authorization
//!
//! ```text
//! owner: approve(escrow, asset)          -- capability recorded here
//! escrow: transfer_from(escrow, ...)     -- capability checked here
//! ```
//!
//! A rejected transfer comes back as a [`RegistryError`]; the caller treats
//! it as a first-class failure.

pub mod memory;

use escrow_types::{AssetId, PartyId, RegistryError};

pub use memory::InMemoryRegistry;

/// Ownership lookups and transfers consumed by the escrow.
pub trait AssetRegistry {
    /// Current owner, or `None` when the asset does not exist.
    fn owner_of(&self, asset: AssetId) -> Option<PartyId>;

    /// The operator the owner pre-authorized for this asset, if any.
    fn approved(&self, asset: AssetId) -> Option<PartyId>;

    /// Move `asset` from `from` to `to` on behalf of `operator`.
    ///
    /// Must fail without side effects unless `from` owns the asset and
    /// `operator` is the owner or the approved operator.
    fn transfer_from(
        &mut self,
        operator: PartyId,
        from: PartyId,
        to: PartyId,
        asset: AssetId,
    ) -> Result<(), RegistryError>;

    /// Whether `operator` may currently move `asset`.
    fn is_authorized(&self, operator: PartyId, asset: AssetId) -> bool {
        match self.owner_of(asset) {
            Some(owner) => owner == operator || self.approved(asset) == Some(operator),
            None => false,
        }
    }
}
