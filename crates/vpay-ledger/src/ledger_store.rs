//! Deposit ledger for the payment channel manager.
//!
//! Tracks per-address escrow balances, pending withdrawal timelocks and the
//! cumulative settled value of every payment key. Each mutation checks all
//! of its preconditions before touching state: either the full operation
//! succeeds or the ledger is unchanged.
//!
//! Operations that span several mutations (a settlement followed by an
//! external payout) take a [`Checkpoint`] of the entries they touch and
//! [`LedgerStore::rollback`] to it on failure.

use std::collections::HashMap;

use vpay_types::{
    checked_add, checked_sub, Address, Amount, Deposit, PaymentKey, Result, Timestamp, VpayError,
    WithdrawalState,
};

/// Owned keyed store of deposits and payment records.
///
/// The LedgerStore is the source of truth for all balance state. It never
/// deletes a deposit: a released deposit returns to zero but keeps its record.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    /// Delay applied when scheduling a withdrawal.
    lock_period: u64,
    /// Per-address escrow entries.
    deposits: HashMap<Address, Deposit>,
    /// Cumulative settled value per payment key.
    payments: HashMap<PaymentKey, Amount>,
    /// Sum of every `Deposit::value`, maintained incrementally.
    total_held: Amount,
}

/// Prior state of the entries an operation is about to touch.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    deposits: Vec<(Address, Option<Deposit>)>,
    payments: Vec<(PaymentKey, Option<Amount>)>,
    total_held: Amount,
}

impl LedgerStore {
    /// Create an empty ledger with the given withdrawal lock period.
    #[must_use]
    pub fn new(lock_period: u64) -> Self {
        Self {
            lock_period,
            deposits: HashMap::new(),
            payments: HashMap::new(),
            total_held: 0,
        }
    }

    /// Rebuild a ledger from persisted entries, recomputing the running total.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the balances cannot be summed.
    pub fn from_parts(
        lock_period: u64,
        deposits: impl IntoIterator<Item = (Address, Deposit)>,
        payments: impl IntoIterator<Item = (PaymentKey, Amount)>,
    ) -> Result<Self> {
        let deposits: HashMap<Address, Deposit> = deposits.into_iter().collect();
        let total_held = deposits
            .values()
            .try_fold(0, |acc: Amount, d| checked_add(acc, d.value))?;
        Ok(Self {
            lock_period,
            deposits,
            payments: payments.into_iter().collect(),
            total_held,
        })
    }

    /// Withdrawal lock period in seconds.
    #[must_use]
    pub fn lock_period(&self) -> u64 {
        self.lock_period
    }

    // ---------------------------------------------------------------------
    // Balances
    // ---------------------------------------------------------------------

    /// Credit `amount` to `address`, creating the deposit on first credit.
    /// Returns the new balance.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the balance or the ledger total overflows.
    pub fn credit(&mut self, address: Address, amount: Amount) -> Result<Amount> {
        let current = self.deposit(address).value;
        let value = checked_add(current, amount)?;
        let total_held = checked_add(self.total_held, amount)?;

        self.deposits.entry(address).or_default().value = value;
        self.total_held = total_held;
        tracing::debug!(%address, amount, balance = value, "Deposit credited");
        Ok(value)
    }

    /// Debit `amount` from `address`. Returns the new balance.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the balance is below `amount`.
    pub fn debit(&mut self, address: Address, amount: Amount) -> Result<Amount> {
        let value = self.debited_value(address, amount)?;
        let total_held = checked_sub(self.total_held, amount)?;

        if let Some(entry) = self.deposits.get_mut(&address) {
            entry.value = value;
        }
        self.total_held = total_held;
        tracing::debug!(%address, amount, balance = value, "Deposit debited");
        Ok(value)
    }

    /// Move `amount` from `from` to `to` inside the ledger.
    ///
    /// Both sides are checked before either is mutated.
    ///
    /// # Errors
    /// - `InsufficientBalance` if `from` cannot cover `amount`
    /// - `ArithmeticOverflow` if `to` would overflow
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        let from_value = self.debited_value(from, amount)?;
        if from == to {
            return Ok(());
        }
        let to_value = checked_add(self.deposit(to).value, amount)?;

        if let Some(entry) = self.deposits.get_mut(&from) {
            entry.value = from_value;
        }
        self.deposits.entry(to).or_default().value = to_value;
        tracing::debug!(%from, %to, amount, "Deposit transferred");
        Ok(())
    }

    fn debited_value(&self, address: Address, amount: Amount) -> Result<Amount> {
        let available = self.deposit(address).value;
        if amount > available {
            return Err(VpayError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        Ok(available - amount)
    }

    // ---------------------------------------------------------------------
    // Withdrawal timelock
    // ---------------------------------------------------------------------

    /// Start the withdrawal timelock for `address`. Returns the unlock time.
    ///
    /// # Errors
    /// - `WithdrawalAlreadyPending` if a request is outstanding
    /// - `ArithmeticOverflow` if `now + lock_period` overflows
    pub fn schedule_withdrawal(&mut self, address: Address, now: Timestamp) -> Result<Timestamp> {
        if let WithdrawalState::Pending { unlocked_at } = self.deposit(address).withdrawal_state() {
            return Err(VpayError::WithdrawalAlreadyPending { unlocked_at });
        }
        // 0 encodes IDLE.
        let unlocked_at = checked_add(now, self.lock_period)?.max(1);

        self.deposits.entry(address).or_default().withdrawal_unlocked_at = unlocked_at;
        tracing::debug!(%address, now, unlocked_at, "Withdrawal scheduled");
        Ok(unlocked_at)
    }

    /// Release the pending withdrawal of `address`, returning the balance
    /// that leaves escrow. The deposit is reset to zero and idle.
    ///
    /// # Errors
    /// - `NoPendingWithdrawal` if no request is outstanding
    /// - `WithdrawalLocked` if `now` is before the unlock time
    pub fn release_withdrawal(&mut self, address: Address, now: Timestamp) -> Result<Amount> {
        let deposit = self.deposit(address);
        let state = deposit.withdrawal_state();
        if !state.is_releasable_at(now) {
            return Err(match state {
                WithdrawalState::Idle => VpayError::NoPendingWithdrawal,
                WithdrawalState::Pending { unlocked_at } => {
                    VpayError::WithdrawalLocked { unlocked_at, now }
                }
            });
        }
        let total_held = checked_sub(self.total_held, deposit.value)?;

        self.deposits.insert(address, Deposit::new());
        self.total_held = total_held;
        tracing::debug!(%address, now, value = deposit.value, "Withdrawal released");
        Ok(deposit.value)
    }

    // ---------------------------------------------------------------------
    // Payment records
    // ---------------------------------------------------------------------

    /// Raise the settled value of `key` to `value`. Returns the previous value.
    ///
    /// # Errors
    /// Returns `StalePayment` unless `value` exceeds the recorded value.
    pub fn record_payment(&mut self, key: PaymentKey, value: Amount) -> Result<Amount> {
        let recorded = self.payment(key);
        if value <= recorded {
            return Err(VpayError::StalePayment {
                key,
                recorded,
                submitted: value,
            });
        }
        self.payments.insert(key, value);
        Ok(recorded)
    }

    // ---------------------------------------------------------------------
    // Checkpoints
    // ---------------------------------------------------------------------

    /// Capture the current state of the given entries (including their
    /// absence) and the ledger total.
    #[must_use]
    pub fn checkpoint(&self, addresses: &[Address], keys: &[PaymentKey]) -> Checkpoint {
        Checkpoint {
            deposits: addresses
                .iter()
                .map(|a| (*a, self.deposits.get(a).copied()))
                .collect(),
            payments: keys
                .iter()
                .map(|k| (*k, self.payments.get(k).copied()))
                .collect(),
            total_held: self.total_held,
        }
    }

    /// Restore every entry captured by `checkpoint`.
    ///
    /// Entries are restored in reverse capture order so that duplicated
    /// addresses end up with their earliest captured state.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        for (address, prior) in checkpoint.deposits.into_iter().rev() {
            match prior {
                Some(deposit) => self.deposits.insert(address, deposit),
                None => self.deposits.remove(&address),
            };
        }
        for (key, prior) in checkpoint.payments.into_iter().rev() {
            match prior {
                Some(value) => self.payments.insert(key, value),
                None => self.payments.remove(&key),
            };
        }
        self.total_held = checkpoint.total_held;
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    /// Deposit of `address` (zero and idle if never credited).
    #[must_use]
    pub fn deposit(&self, address: Address) -> Deposit {
        self.deposits.get(&address).copied().unwrap_or_default()
    }

    /// Settled value of `key` (zero if never settled).
    #[must_use]
    pub fn payment(&self, key: PaymentKey) -> Amount {
        self.payments.get(&key).copied().unwrap_or(0)
    }

    /// Sum of all deposit balances.
    #[must_use]
    pub fn total_held(&self) -> Amount {
        self.total_held
    }

    /// Number of deposit records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    /// Whether no address has a deposit record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }

    /// All deposit records, in no particular order.
    pub fn deposits(&self) -> impl Iterator<Item = (&Address, &Deposit)> {
        self.deposits.iter()
    }

    /// All payment records, in no particular order.
    pub fn payments(&self) -> impl Iterator<Item = (&PaymentKey, &Amount)> {
        self.payments.iter()
    }
}
