//! Durable snapshots of manager state.
//!
//! A snapshot holds the configuration, every deposit and payment record,
//! the supply totals and the journal head. Journal entries themselves are
//! not included; a restored manager continues the chain from the head.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vpay_ledger::{LedgerStore, SupplyConservation};
use vpay_types::{
    Address, Amount, Deposit, EcdsaRecoverer, ManagerConfig, PaymentKey, Result, SignatureVerifier,
};

use crate::journal::{EventJournal, JournalHead};
use crate::manager::PaymentChannelManager;
use crate::payout::Payout;

/// Serializable image of one manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSnapshot {
    pub config: ManagerConfig,
    pub deposits: BTreeMap<Address, Deposit>,
    pub payments: BTreeMap<PaymentKey, Amount>,
    pub total_received: Amount,
    pub total_paid_out: Amount,
    pub journal_head: JournalHead,
}

impl ManagerSnapshot {
    /// Write the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `Serialization` or `Io` on failure.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::debug!(path = %path.as_ref().display(), "Snapshot saved");
        Ok(())
    }

    /// Read a snapshot written by [`ManagerSnapshot::save_json`].
    ///
    /// # Errors
    /// Returns `Io` or `Serialization` on failure.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl<P: Payout, V: SignatureVerifier> PaymentChannelManager<P, V> {
    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> ManagerSnapshot {
        ManagerSnapshot {
            config: *self.config(),
            deposits: self.ledger().deposits().map(|(a, d)| (*a, *d)).collect(),
            payments: self.ledger().payments().map(|(k, v)| (*k, *v)).collect(),
            total_received: self.supply().total_received(),
            total_paid_out: self.supply().total_paid_out(),
            journal_head: self.journal().head(),
        }
    }
}

impl<P: Payout> PaymentChannelManager<P> {
    /// Rebuild a manager from a snapshot.
    ///
    /// # Errors
    /// - `Configuration` if the snapshot's config does not validate
    /// - `SupplyInvariantViolation` if the restored deposits do not match
    ///   the recorded totals
    pub fn restore(snapshot: ManagerSnapshot, payout: P) -> Result<Self> {
        snapshot.config.validate()?;
        let ledger = LedgerStore::from_parts(
            snapshot.config.deposit_withdrawal_lock_period,
            snapshot.deposits,
            snapshot.payments,
        )?;
        let supply = SupplyConservation::from_totals(snapshot.total_received, snapshot.total_paid_out);
        supply.verify(ledger.total_held())?;

        tracing::info!(
            manager = %snapshot.config.address,
            deposits = ledger.len(),
            total_held = ledger.total_held(),
            next_sequence = snapshot.journal_head.next_sequence,
            "Manager restored from snapshot"
        );
        Ok(Self::from_parts(
            snapshot.config,
            ledger,
            supply,
            EventJournal::resume(snapshot.journal_head),
            payout,
            EcdsaRecoverer,
        ))
    }
}
