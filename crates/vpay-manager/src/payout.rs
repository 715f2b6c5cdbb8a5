//! External value transfer.
//!
//! A payout moves value out of escrow to an address outside the ledger.
//! It is the last fallible step of a manager operation: when it fails the
//! manager rolls back everything the operation changed.

use std::collections::{HashMap, HashSet};

use vpay_types::{checked_add, Address, Amount, Result, VpayError};

/// Transfers released value to its recipient.
pub trait Payout {
    /// Send `amount` to `to`.
    ///
    /// # Errors
    /// Must return [`VpayError::TransferFailed`] when the transfer did not happen.
    fn transfer(&mut self, to: Address, amount: Amount) -> Result<()>;
}

/// A completed external transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutRecord {
    pub to: Address,
    pub amount: Amount,
}

/// Payout backed by an in-memory table of external balances.
///
/// Recipients can be marked as refusing transfers to exercise the
/// rollback path.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPayout {
    balances: HashMap<Address, Amount>,
    refused: HashSet<Address>,
    transfers: Vec<PayoutRecord>,
}

impl InMemoryPayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// External balance received by `address` so far.
    #[must_use]
    pub fn balance_of(&self, address: Address) -> Amount {
        self.balances.get(&address).copied().unwrap_or(0)
    }

    /// Make every future transfer to `address` fail.
    pub fn refuse(&mut self, address: Address) {
        self.refused.insert(address);
    }

    /// Accept transfers to `address` again.
    pub fn accept(&mut self, address: Address) {
        self.refused.remove(&address);
    }

    /// Completed transfers, oldest first.
    #[must_use]
    pub fn transfers(&self) -> &[PayoutRecord] {
        &self.transfers
    }
}

impl Payout for InMemoryPayout {
    fn transfer(&mut self, to: Address, amount: Amount) -> Result<()> {
        if self.refused.contains(&to) {
            return Err(VpayError::TransferFailed {
                to,
                amount,
                reason: "recipient refused transfer".into(),
            });
        }
        let balance = checked_add(self.balance_of(to), amount).map_err(|e| {
            VpayError::TransferFailed {
                to,
                amount,
                reason: e.to_string(),
            }
        })?;
        self.balances.insert(to, balance);
        self.transfers.push(PayoutRecord { to, amount });
        Ok(())
    }
}
