//! The pooled fund vault.
//!
//! One balance for the whole escrow instance. Earnest deposits and
//! unconditioned top-ups both land in it; settlement payouts are the only
//! way out.
//!
//! Payouts are two-phase, like freezing funds before settling them:
//!
//! ```text
//! reserve(amount) ──▶ Reservation ──┬─ disburse(payee)  (commit)
//!                                   └─ release()        (roll back)
//! ```
//!
//! A reservation still counts towards [`FundVault::balance`], so a rolled
//! back settlement is indistinguishable from one that never started.

use std::collections::HashMap;

use escrow_types::{AssetId, EscrowError, PartyId, Result};
use rust_decimal::Decimal;

use crate::supply_conservation::SupplyConservation;

/// Funds set aside for one payout. Must be either disbursed or released.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a reservation must be disbursed or released"]
pub struct Reservation {
    amount: Decimal,
}

impl Reservation {
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[derive(Debug, Clone, Default)]
pub struct FundVault {
    /// Spendable funds.
    available: Decimal,
    /// Funds held by outstanding reservations.
    reserved: Decimal,
    /// Earnest deposited per asset. Informational: the pool is not
    /// segregated.
    earnest: HashMap<AssetId, Decimal>,
    /// Total paid out per payee.
    payouts: HashMap<PartyId, Decimal>,
    supply: SupplyConservation,
}

impl FundVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add earnest funds attributed to `asset`.
    pub fn deposit_earnest(&mut self, asset: AssetId, amount: Decimal) -> Result<()> {
        self.credit(amount)?;
        *self.earnest.entry(asset).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// Add funds not tied to any asset.
    pub fn top_up(&mut self, amount: Decimal) -> Result<()> {
        self.credit(amount)
    }

    fn credit(&mut self, amount: Decimal) -> Result<()> {
        require_positive(amount)?;
        let next = self
            .available
            .checked_add(amount)
            .ok_or_else(|| EscrowError::InvalidAmount {
                reason: format!("deposit of {amount} overflows the vault"),
            })?;
        self.supply.record_deposit(amount)?;
        self.available = next;
        Ok(())
    }

    /// Set `amount` aside for a payout.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if available < amount.
    pub fn reserve(&mut self, amount: Decimal) -> Result<Reservation> {
        if amount < Decimal::ZERO {
            return Err(EscrowError::InvalidAmount {
                reason: format!("cannot reserve negative amount {amount}"),
            });
        }
        if self.available < amount {
            return Err(EscrowError::InsufficientBalance {
                needed: amount,
                available: self.available,
            });
        }
        self.available -= amount;
        self.reserved += amount;
        tracing::debug!(amount = %amount, "Vault funds reserved");
        Ok(Reservation { amount })
    }

    /// Return reserved funds to the pool.
    pub fn release(&mut self, reservation: Reservation) {
        self.reserved -= reservation.amount;
        self.available += reservation.amount;
        tracing::debug!(amount = %reservation.amount, "Vault reservation released");
    }

    /// Pay reserved funds out to `payee`. They leave the vault.
    pub fn disburse(&mut self, reservation: Reservation, payee: PartyId) {
        self.reserved -= reservation.amount;
        *self.payouts.entry(payee).or_insert(Decimal::ZERO) += reservation.amount;
        self.supply.record_disbursement(reservation.amount);
    }

    /// Current pooled balance, reservations included.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.available + self.reserved
    }

    /// Earnest deposited against `asset` over the vault's lifetime.
    #[must_use]
    pub fn earnest_deposited(&self, asset: AssetId) -> Decimal {
        self.earnest.get(&asset).copied().unwrap_or(Decimal::ZERO)
    }

    /// Total paid out to `party` over the vault's lifetime.
    #[must_use]
    pub fn paid_to(&self, party: PartyId) -> Decimal {
        self.payouts.get(&party).copied().unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn supply(&self) -> &SupplyConservation {
        &self.supply
    }

    /// Check the balance against deposit and payout totals.
    pub fn verify_supply(&self) -> Result<()> {
        self.supply.verify(self.balance())
    }
}

/// Fail with `InvalidAmount` unless `amount` is strictly positive.
pub fn require_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(EscrowError::InvalidAmount {
            reason: format!("amount must be positive, got {amount}"),
        });
    }
    Ok(())
}
