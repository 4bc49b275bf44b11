//! Supply conservation invariant checker for the fund vault.
//!
//! ```text
//! balance == Σ(deposits + top-ups) - Σ(payouts)
//! ```
//!
//! The vault records every inflow and outflow here and verifies its own
//! balance against the running totals.

use escrow_types::{EscrowError, Result};
use rust_decimal::Decimal;

/// Running totals of everything that entered and left the vault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplyConservation {
    deposited: Decimal,
    disbursed: Decimal,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposited: Decimal::ZERO,
            disbursed: Decimal::ZERO,
        }
    }

    /// Record an inflow.
    ///
    /// When the running deposit total would overflow, paid-out funds are
    /// folded into the baseline first: `deposited` becomes the live supply
    /// and `disbursed` restarts from zero.
    ///
    /// # Errors
    /// Returns `InvalidAmount` if the live supply itself would overflow.
    pub fn record_deposit(&mut self, amount: Decimal) -> Result<()> {
        if let Some(total) = self.deposited.checked_add(amount) {
            self.deposited = total;
            return Ok(());
        }
        let rebased = self.expected_supply().checked_add(amount).ok_or_else(|| {
            EscrowError::InvalidAmount {
                reason: format!("vault supply overflows after adding {amount}"),
            }
        })?;
        self.deposited = rebased;
        self.disbursed = Decimal::ZERO;
        Ok(())
    }

    pub fn record_disbursement(&mut self, amount: Decimal) {
        self.disbursed += amount;
    }

    /// Expected vault balance: deposited - disbursed.
    #[must_use]
    pub fn expected_supply(&self) -> Decimal {
        self.deposited - self.disbursed
    }

    /// Inflows since creation or the last rebase.
    #[must_use]
    pub fn total_deposited(&self) -> Decimal {
        self.deposited
    }

    #[must_use]
    pub fn total_disbursed(&self) -> Decimal {
        self.disbursed
    }

    /// # Errors
    /// Returns [`EscrowError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Decimal) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            return Err(EscrowError::SupplyInvariantViolation {
                reason: format!(
                    "vault balance {actual_supply} != expected {expected} \
                     (deposited={}, disbursed={})",
                    self.deposited, self.disbursed,
                ),
            });
        }
        Ok(())
    }
}
