//! Construction-time configuration of an escrow instance.
//!
//! The three fixed roles are set once and never change for the lifetime of
//! the instance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{EscrowError, PartyId, Result};

/// Fixed identities and policy for one escrow instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// Lists assets and finalizes sales; receives the purchase price.
    pub seller: PartyId,
    /// The only party allowed to record inspection results.
    pub inspector: PartyId,
    /// Whose approval is required and who usually tops up the vault.
    pub lender: PartyId,
    /// Optional behaviour switches.
    #[serde(default)]
    pub policy: EscrowPolicy,
}

/// Behaviour switches. Everything defaults to the permissive setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowPolicy {
    /// Reject earnest deposits smaller than the listing's escrow amount.
    #[serde(default)]
    pub enforce_earnest_minimum: bool,
}

impl EscrowConfig {
    /// Build and validate a configuration with the default policy.
    pub fn new(seller: PartyId, inspector: PartyId, lender: PartyId) -> Result<Self> {
        let cfg = Self {
            seller,
            inspector,
            lender,
            policy: EscrowPolicy::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: EscrowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The fixed roles must be held by three different parties.
    pub fn validate(&self) -> Result<()> {
        if self.seller == self.inspector {
            return Err(EscrowError::Configuration(format!(
                "seller and inspector are the same party {}",
                self.seller
            )));
        }
        if self.seller == self.lender {
            return Err(EscrowError::Configuration(format!(
                "seller and lender are the same party {}",
                self.seller
            )));
        }
        if self.inspector == self.lender {
            return Err(EscrowError::Configuration(format!(
                "inspector and lender are the same party {}",
                self.inspector
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> (PartyId, PartyId, PartyId) {
        (
            PartyId::from_bytes([1; 20]),
            PartyId::from_bytes([2; 20]),
            PartyId::from_bytes([3; 20]),
        )
    }

    #[test]
    fn distinct_roles_accepted() {
        let (s, i, l) = parties();
        let cfg = EscrowConfig::new(s, i, l).unwrap();
        assert!(!cfg.policy.enforce_earnest_minimum);
    }

    #[test]
    fn shared_role_rejected() {
        let (s, i, _) = parties();
        let err = EscrowConfig::new(s, i, s).unwrap_err();
        assert!(matches!(err, EscrowError::Configuration(_)));
    }

    #[test]
    fn json_without_policy_uses_default() {
        let (s, i, l) = parties();
        let json = format!(
            r#"{{"seller":{},"inspector":{},"lender":{}}}"#,
            serde_json::to_string(&s).unwrap(),
            serde_json::to_string(&i).unwrap(),
            serde_json::to_string(&l).unwrap(),
        );
        let cfg = EscrowConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.seller, s);
        assert_eq!(cfg.policy, EscrowPolicy::default());
    }

    #[test]
    fn json_roundtrip_keeps_policy() {
        let (s, i, l) = parties();
        let cfg = EscrowConfig::new(s, i, l).unwrap().with_policy(EscrowPolicy {
            enforce_earnest_minimum: true,
        });
        let json = serde_json::to_string(&cfg).unwrap();
        let back = EscrowConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = EscrowConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, EscrowError::Serialization(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EscrowConfig::from_path("/nonexistent/escrow.json").unwrap_err();
        assert!(matches!(err, EscrowError::Io(_)));
    }
}
