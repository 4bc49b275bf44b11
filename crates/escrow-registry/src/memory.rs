//! In-memory asset registry.
//!
//! Sequential identifiers starting at [`FIRST_ASSET_ID`], one owner per
//! asset, at most one approved operator per asset. The approval is cleared
//! whenever the asset changes hands.
//!
//! [`FIRST_ASSET_ID`]: escrow_types::constants::FIRST_ASSET_ID

use std::collections::HashMap;

use escrow_types::{AssetId, PartyId, RegistryError, constants};

use crate::AssetRegistry;

/// Owner and approval record for one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AssetRecord {
    owner: PartyId,
    approved: Option<PartyId>,
}

/// A registry held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryRegistry {
    assets: HashMap<AssetId, AssetRecord>,
    next_id: AssetId,
}

impl InMemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            next_id: AssetId(constants::FIRST_ASSET_ID),
        }
    }

    /// Create a new asset owned by `owner` and return its identifier.
    pub fn mint(&mut self, owner: PartyId) -> AssetId {
        let id = self.next_id;
        self.next_id = id.next();
        self.assets.insert(
            id,
            AssetRecord {
                owner,
                approved: None,
            },
        );
        tracing::debug!(asset = %id, owner = %owner, "Asset minted");
        id
    }

    /// Pre-authorize `operator` to transfer `asset`. Only the owner may do
    /// this; a later approval replaces an earlier one.
    pub fn approve(
        &mut self,
        caller: PartyId,
        operator: PartyId,
        asset: AssetId,
    ) -> Result<(), RegistryError> {
        let record = self
            .assets
            .get_mut(&asset)
            .ok_or(RegistryError::UnknownAsset(asset))?;
        if record.owner != caller {
            return Err(RegistryError::NotOwner {
                asset,
                party: caller,
            });
        }
        record.approved = Some(operator);
        tracing::debug!(asset = %asset, operator = %operator, "Operator approved");
        Ok(())
    }

    /// Number of minted assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry for InMemoryRegistry {
    fn owner_of(&self, asset: AssetId) -> Option<PartyId> {
        self.assets.get(&asset).map(|r| r.owner)
    }

    fn approved(&self, asset: AssetId) -> Option<PartyId> {
        self.assets.get(&asset).and_then(|r| r.approved)
    }

    fn transfer_from(
        &mut self,
        operator: PartyId,
        from: PartyId,
        to: PartyId,
        asset: AssetId,
    ) -> Result<(), RegistryError> {
        let record = self
            .assets
            .get_mut(&asset)
            .ok_or(RegistryError::UnknownAsset(asset))?;
        if record.owner != from {
            return Err(RegistryError::NotOwner { asset, party: from });
        }
        if operator != record.owner && record.approved != Some(operator) {
            return Err(RegistryError::NotAuthorized { asset, operator });
        }
        record.owner = to;
        record.approved = None;
        tracing::debug!(asset = %asset, from = %from, to = %to, "Asset transferred");
        Ok(())
    }
}
