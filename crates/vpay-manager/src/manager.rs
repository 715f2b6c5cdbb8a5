//! The payment channel manager.
//!
//! Every state-changing operation runs as one atomic unit:
//! 1. Authorize (signature recovery, no state touched)
//! 2. Checkpoint the ledger entries the operation will touch
//! 3. Mutate the ledger and the supply totals
//! 4. Verify supply conservation
//! 5. Chain the events onto the journal (prepared, not yet appended)
//! 6. Pay out released value (last fallible step)
//! 7. Append the events
//!
//! A failure in steps 3–6 restores the checkpoint and the supply totals;
//! nothing about the failed call is observable afterwards.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use vpay_ledger::{LedgerStore, SupplyConservation};
use vpay_types::{
    checked_sub, constants, derive_manager_address, payment_key, payment_message_hash, Address,
    Amount, ChannelEvent, Deposit, EcdsaRecoverer, ManagerConfig, MessageHash, PaymentId,
    PaymentKey, Result, Signature, SignatureVerifier, SignerRole, Timestamp, WithdrawalState,
};

use crate::journal::EventJournal;
use crate::payout::Payout;

/// Distinguishes managers derived in the same nanosecond.
static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Value that must leave escrow once the ledger change is in place.
struct Release {
    to: Address,
    amount: Amount,
}

/// Outcome of the ledger phase of an operation.
struct Effects {
    events: Vec<ChannelEvent>,
    release: Option<Release>,
}

/// Escrow manager for co-signed, incrementally settled virtual payments.
///
/// Holds depositor funds, settles payments authorized by both the sender
/// and the guardian, and releases deposits after a withdrawal timelock.
pub struct PaymentChannelManager<P: Payout, V: SignatureVerifier = EcdsaRecoverer> {
    config: ManagerConfig,
    ledger: LedgerStore,
    supply: SupplyConservation,
    journal: EventJournal,
    payout: P,
    verifier: V,
}

impl<P: Payout, V: SignatureVerifier> fmt::Debug for PaymentChannelManager<P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentChannelManager")
            .field("address", &self.config.address)
            .field("guardian", &self.config.guardian)
            .field("lock_period", &self.config.deposit_withdrawal_lock_period)
            .field("deposits", &self.ledger.len())
            .field("total_held", &self.ledger.total_held())
            .field("journal_head", &self.journal.head())
            .finish_non_exhaustive()
    }
}

impl<P: Payout> PaymentChannelManager<P> {
    /// Manager with an explicit identity.
    ///
    /// # Errors
    /// Returns `Configuration` if the config does not validate.
    pub fn from_config(config: ManagerConfig, payout: P) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            manager = %config.address,
            guardian = %config.guardian,
            lock_period = config.deposit_withdrawal_lock_period,
            "Payment channel manager created"
        );
        Ok(Self {
            ledger: LedgerStore::new(config.deposit_withdrawal_lock_period),
            supply: SupplyConservation::new(),
            journal: EventJournal::new(),
            config,
            payout,
            verifier: EcdsaRecoverer,
        })
    }

    /// Manager whose identity is derived from the guardian, the lock
    /// period and a per-instance salt.
    ///
    /// # Errors
    /// Returns `Configuration` if the guardian is zero or the lock period
    /// is out of range.
    pub fn new(guardian: Address, lock_period: u64, payout: P) -> Result<Self> {
        let nanos = Utc::now()
            .timestamp_nanos_opt()
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        let counter = INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let salt = (u128::from(nanos) << 64) | u128::from(counter);
        let address = derive_manager_address(guardian, lock_period, salt);
        Self::from_config(ManagerConfig::new(address, guardian, lock_period), payout)
    }

    /// [`PaymentChannelManager::new`] with the one-day default lock period.
    ///
    /// # Errors
    /// Returns `Configuration` if the guardian is zero.
    pub fn with_default_lock_period(guardian: Address, payout: P) -> Result<Self> {
        Self::new(guardian, constants::DEFAULT_LOCK_PERIOD_SECS, payout)
    }
}

impl<P: Payout, V: SignatureVerifier> PaymentChannelManager<P, V> {
    /// Replace the signature verifier.
    #[must_use]
    pub fn with_verifier<W: SignatureVerifier>(self, verifier: W) -> PaymentChannelManager<P, W> {
        PaymentChannelManager {
            config: self.config,
            ledger: self.ledger,
            supply: self.supply,
            journal: self.journal,
            payout: self.payout,
            verifier,
        }
    }

    /// Reassemble a manager from previously persisted parts.
    pub(crate) fn from_parts(
        config: ManagerConfig,
        ledger: LedgerStore,
        supply: SupplyConservation,
        journal: EventJournal,
        payout: P,
        verifier: V,
    ) -> Self {
        Self {
            config,
            ledger,
            supply,
            journal,
            payout,
            verifier,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Operations
    // ═══════════════════════════════════════════════════════════════════

    /// Credit `value` to `sender`'s deposit.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if the balance or totals overflow.
    pub fn receive_deposit(&mut self, sender: Address, value: Amount) -> Result<Vec<ChannelEvent>> {
        let events = self.atomically(&[sender], &[], |ledger, supply| {
            ledger.credit(sender, value)?;
            supply.record_received(value)?;
            Ok(Effects {
                events: vec![ChannelEvent::NewDeposit { sender, value }],
                release: None,
            })
        })?;

        tracing::info!(%sender, value, "Deposit received");
        Ok(events)
    }

    /// Settle a co-signed payment into the receiver's deposit.
    ///
    /// `value` is the cumulative amount agreed for `(sender, receiver, id)`;
    /// only the increase over the recorded value moves.
    ///
    /// # Errors
    /// - `InvalidSignature` if either co-signature does not recover
    /// - `StalePayment` if `value` does not exceed the recorded value
    /// - `InsufficientBalance` if the sender cannot cover the increase
    pub fn deposit_payment(
        &mut self,
        sender: Address,
        receiver: Address,
        id: PaymentId,
        value: Amount,
        sender_sig: &Signature,
        guardian_sig: &Signature,
    ) -> Result<Vec<ChannelEvent>> {
        let key = self.authorize(sender, receiver, id, value, sender_sig, guardian_sig)?;

        let events = self.atomically(&[sender, receiver], &[key], |ledger, _| {
            let delta = settle(ledger, key, sender, receiver, value)?;
            ledger.transfer(sender, receiver, delta)?;
            Ok(Effects {
                events: vec![
                    ChannelEvent::NewPayment {
                        sender,
                        receiver,
                        id,
                        value,
                    },
                    ChannelEvent::NewDeposit {
                        sender: receiver,
                        value: delta,
                    },
                ],
                release: None,
            })
        })?;

        tracing::info!(%sender, %receiver, %id, value, "Payment deposited");
        Ok(events)
    }

    /// Settle a co-signed payment and pay the increase out to the receiver.
    ///
    /// # Errors
    /// Same as [`Self::deposit_payment`], plus `TransferFailed` if the
    /// payout fails (the whole call is rolled back).
    pub fn withdraw_payment(
        &mut self,
        sender: Address,
        receiver: Address,
        id: PaymentId,
        value: Amount,
        sender_sig: &Signature,
        guardian_sig: &Signature,
    ) -> Result<Vec<ChannelEvent>> {
        let key = self.authorize(sender, receiver, id, value, sender_sig, guardian_sig)?;

        let events = self.atomically(&[sender], &[key], |ledger, supply| {
            let delta = settle(ledger, key, sender, receiver, value)?;
            ledger.debit(sender, delta)?;
            supply.record_paid_out(delta)?;
            Ok(Effects {
                events: vec![
                    ChannelEvent::NewPayment {
                        sender,
                        receiver,
                        id,
                        value,
                    },
                    ChannelEvent::NewWithdrawal {
                        receiver,
                        value: delta,
                    },
                ],
                release: Some(Release {
                    to: receiver,
                    amount: delta,
                }),
            })
        })?;

        tracing::info!(%sender, %receiver, %id, value, "Payment withdrawn");
        Ok(events)
    }

    /// Request or complete the withdrawal of `caller`'s whole deposit.
    ///
    /// The first call starts the timelock. A call at or after the unlock
    /// time releases the deposit and pays it out.
    ///
    /// # Errors
    /// - `WithdrawalLocked` if a request is pending and `now` is too early
    /// - `TransferFailed` if the payout fails
    pub fn withdraw_deposit(&mut self, caller: Address, now: Timestamp) -> Result<Vec<ChannelEvent>> {
        match self.ledger.deposit(caller).withdrawal_state() {
            WithdrawalState::Idle => {
                let events = self.atomically(&[caller], &[], |ledger, _| {
                    let unlocked_at = ledger.schedule_withdrawal(caller, now)?;
                    Ok(Effects {
                        events: vec![ChannelEvent::NewWithdrawalRequest {
                            receiver: caller,
                            unlocked_at,
                        }],
                        release: None,
                    })
                })?;
                tracing::info!(%caller, now, "Withdrawal requested");
                Ok(events)
            }
            WithdrawalState::Pending { .. } => {
                let events = self.atomically(&[caller], &[], |ledger, supply| {
                    let value = ledger.release_withdrawal(caller, now)?;
                    supply.record_paid_out(value)?;
                    Ok(Effects {
                        events: vec![ChannelEvent::NewWithdrawal {
                            receiver: caller,
                            value,
                        }],
                        release: Some(Release {
                            to: caller,
                            amount: value,
                        }),
                    })
                })?;
                tracing::info!(%caller, now, "Deposit withdrawn");
                Ok(events)
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Views
    // ═══════════════════════════════════════════════════════════════════

    #[must_use]
    pub fn address(&self) -> Address {
        self.config.address
    }

    #[must_use]
    pub fn guardian(&self) -> Address {
        self.config.guardian
    }

    #[must_use]
    pub fn deposit_withdrawal_lock_period(&self) -> u64 {
        self.config.deposit_withdrawal_lock_period
    }

    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Deposit of `address` (zero and idle if never credited).
    #[must_use]
    pub fn deposits(&self, address: Address) -> Deposit {
        self.ledger.deposit(address)
    }

    /// Settled cumulative value of a payment key.
    #[must_use]
    pub fn payments(&self, key: PaymentKey) -> Amount {
        self.ledger.payment(key)
    }

    /// Settled cumulative value of a (sender, receiver, id) triple.
    #[must_use]
    pub fn payment_of(&self, sender: Address, receiver: Address, id: PaymentId) -> Amount {
        self.ledger.payment(payment_key(sender, receiver, id))
    }

    /// The hash both co-signers must sign to authorize this payment here.
    #[must_use]
    pub fn message_hash(
        &self,
        sender: Address,
        receiver: Address,
        id: PaymentId,
        value: Amount,
    ) -> MessageHash {
        payment_message_hash(self.config.address, sender, receiver, id, value)
    }

    #[must_use]
    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    #[must_use]
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    #[must_use]
    pub fn supply(&self) -> &SupplyConservation {
        &self.supply
    }

    /// Sum of all deposit balances.
    #[must_use]
    pub fn total_held(&self) -> Amount {
        self.ledger.total_held()
    }

    /// Check that held value equals received minus paid out.
    ///
    /// # Errors
    /// Returns `SupplyInvariantViolation` on mismatch.
    pub fn verify_supply(&self) -> Result<()> {
        self.supply.verify(self.ledger.total_held())
    }

    #[must_use]
    pub fn payout(&self) -> &P {
        &self.payout
    }

    pub fn payout_mut(&mut self) -> &mut P {
        &mut self.payout
    }

    // ───────────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────────

    /// Check both co-signatures and return the payment key.
    fn authorize(
        &self,
        sender: Address,
        receiver: Address,
        id: PaymentId,
        value: Amount,
        sender_sig: &Signature,
        guardian_sig: &Signature,
    ) -> Result<PaymentKey> {
        let hash = self.message_hash(sender, receiver, id, value);
        let checks = [
            (sender_sig, sender, SignerRole::Sender),
            (guardian_sig, self.config.guardian, SignerRole::Guardian),
        ];
        for (signature, expected, role) in checks {
            if let Err(e) = self.verifier.verify(&hash, signature, expected, role) {
                tracing::warn!(
                    %sender,
                    %receiver,
                    %id,
                    value,
                    %role,
                    error = %e,
                    "Payment authorization rejected"
                );
                return Err(e);
            }
        }
        Ok(payment_key(sender, receiver, id))
    }

    /// Run `apply` against the ledger, then commit or roll back.
    fn atomically<F>(
        &mut self,
        addresses: &[Address],
        keys: &[PaymentKey],
        apply: F,
    ) -> Result<Vec<ChannelEvent>>
    where
        F: FnOnce(&mut LedgerStore, &mut SupplyConservation) -> Result<Effects>,
    {
        let checkpoint = self.ledger.checkpoint(addresses, keys);
        let supply = self.supply;

        match self.apply_and_commit(apply) {
            Ok(events) => Ok(events),
            Err(e) => {
                self.ledger.rollback(checkpoint);
                self.supply = supply;
                Err(e)
            }
        }
    }

    fn apply_and_commit<F>(&mut self, apply: F) -> Result<Vec<ChannelEvent>>
    where
        F: FnOnce(&mut LedgerStore, &mut SupplyConservation) -> Result<Effects>,
    {
        let Effects { events, release } = apply(&mut self.ledger, &mut self.supply)?;

        if let Err(e) = self.supply.verify(self.ledger.total_held()) {
            tracing::error!(error = %e, "Supply conservation violated; rolling back");
            return Err(e);
        }
        let entries = self.journal.prepare(&events)?;

        if let Some(Release { to, amount }) = release {
            if let Err(e) = self.payout.transfer(to, amount) {
                tracing::warn!(%to, amount, error = %e, "Payout failed; rolling back");
                return Err(e);
            }
        }

        self.journal.commit(entries);
        Ok(events)
    }
}

/// Raise the payment record to `value` and return the increase.
fn settle(
    ledger: &mut LedgerStore,
    key: PaymentKey,
    sender: Address,
    receiver: Address,
    value: Amount,
) -> Result<Amount> {
    let previous = ledger.record_payment(key, value)?;
    let delta = checked_sub(value, previous)?;
    tracing::debug!(%sender, %receiver, %key, previous, value, delta, "Payment record raised");
    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payout::InMemoryPayout;
    use vpay_types::{SignatureError, TestSigner, VpayError};

    const LOCK: u64 = 86_400;

    struct Parties {
        sender: TestSigner,
        receiver: Address,
        guardian: TestSigner,
    }

    fn parties() -> Parties {
        Parties {
            sender: TestSigner::from_seed("sender"),
            receiver: TestSigner::from_seed("receiver").address(),
            guardian: TestSigner::from_seed("guardian"),
        }
    }

    fn manager(p: &Parties) -> PaymentChannelManager<InMemoryPayout> {
        PaymentChannelManager::new(p.guardian.address(), LOCK, InMemoryPayout::new()).unwrap()
    }

    fn sign(
        m: &PaymentChannelManager<InMemoryPayout>,
        p: &Parties,
        id: u128,
        value: Amount,
    ) -> (Signature, Signature) {
        let hash = m.message_hash(p.sender.address(), p.receiver, PaymentId(id), value);
        (p.sender.sign(&hash), p.guardian.sign(&hash))
    }

    #[test]
    fn derived_identities_are_unique() {
        let p = parties();
        let a = manager(&p);
        let b = manager(&p);
        assert_ne!(a.address(), b.address());
        assert_eq!(a.guardian(), p.guardian.address());
        assert_eq!(a.deposit_withdrawal_lock_period(), LOCK);
    }

    #[test]
    fn default_lock_period_is_one_day() {
        let m = PaymentChannelManager::with_default_lock_period(
            TestSigner::from_seed("guardian").address(),
            InMemoryPayout::new(),
        )
        .unwrap();
        assert_eq!(m.deposit_withdrawal_lock_period(), 86_400);
    }

    #[test]
    fn zero_guardian_rejected() {
        let result = PaymentChannelManager::new(Address::ZERO, LOCK, InMemoryPayout::new());
        assert!(matches!(result, Err(VpayError::Configuration(_))));
    }

    #[test]
    fn debug_shows_identity_not_internals() {
        let p = parties();
        let mut m = manager(&p);
        m.receive_deposit(p.sender.address(), 5).unwrap();
        let text = format!("{m:?}");
        assert!(text.starts_with("PaymentChannelManager"));
        assert!(text.contains(&m.address().to_string()));
        assert!(text.contains("total_held: 5"));

        let err = PaymentChannelManager::new(Address::ZERO, LOCK, InMemoryPayout::new())
            .unwrap_err();
        assert!(matches!(err, VpayError::Configuration(_)));
    }

    #[test]
    fn receive_deposit_overflow_changes_nothing() {
        let p = parties();
        let mut m = manager(&p);
        let other = TestSigner::from_seed("other").address();
        m.receive_deposit(p.sender.address(), u128::MAX).unwrap();

        let err = m.receive_deposit(other, 1).unwrap_err();
        assert!(matches!(err, VpayError::ArithmeticOverflow));
        assert_eq!(m.deposits(other), Deposit::new());
        assert_eq!(m.ledger().len(), 1);
        assert_eq!(m.total_held(), u128::MAX);
        assert_eq!(m.supply().total_received(), u128::MAX);
        assert_eq!(m.journal().len(), 1);
        assert!(m.verify_supply().is_ok());

        // Same-address overflow is rejected the same way
        assert!(m.receive_deposit(p.sender.address(), 1).is_err());
        assert_eq!(m.deposits(p.sender.address()).value, u128::MAX);
        assert_eq!(m.journal().len(), 1);
    }

    #[test]
    fn receive_deposit_emits_event() {
        let p = parties();
        let mut m = manager(&p);
        let events = m.receive_deposit(p.sender.address(), 500).unwrap();
        assert_eq!(
            events,
            vec![ChannelEvent::NewDeposit {
                sender: p.sender.address(),
                value: 500
            }]
        );
        assert_eq!(m.deposits(p.sender.address()).value, 500);
        assert_eq!(m.journal().len(), 1);
        assert!(m.verify_supply().is_ok());
    }

    #[test]
    fn deposit_payment_moves_delta() {
        let p = parties();
        let mut m = manager(&p);
        m.receive_deposit(p.sender.address(), 500).unwrap();

        let (s, g) = sign(&m, &p, 1, 200);
        let events = m
            .deposit_payment(p.sender.address(), p.receiver, PaymentId(1), 200, &s, &g)
            .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            ChannelEvent::NewDeposit {
                sender: p.receiver,
                value: 200
            }
        );
        assert_eq!(m.deposits(p.sender.address()).value, 300);
        assert_eq!(m.deposits(p.receiver).value, 200);
        assert_eq!(m.payment_of(p.sender.address(), p.receiver, PaymentId(1)), 200);
    }

    #[test]
    fn replayed_payment_is_stale() {
        let p = parties();
        let mut m = manager(&p);
        m.receive_deposit(p.sender.address(), 500).unwrap();
        let (s, g) = sign(&m, &p, 1, 200);
        m.deposit_payment(p.sender.address(), p.receiver, PaymentId(1), 200, &s, &g)
            .unwrap();

        let err = m
            .deposit_payment(p.sender.address(), p.receiver, PaymentId(1), 200, &s, &g)
            .unwrap_err();
        assert!(matches!(err, VpayError::StalePayment { .. }));
        assert_eq!(m.deposits(p.sender.address()).value, 300);
        assert_eq!(m.journal().len(), 3);
    }

    #[test]
    fn missing_guardian_signature_rejected() {
        let p = parties();
        let mut m = manager(&p);
        m.receive_deposit(p.sender.address(), 500).unwrap();
        let (s, _) = sign(&m, &p, 1, 200);

        let err = m
            .deposit_payment(p.sender.address(), p.receiver, PaymentId(1), 200, &s, &s)
            .unwrap_err();
        assert!(matches!(
            err,
            VpayError::InvalidSignature {
                role: SignerRole::Guardian,
                ..
            }
        ));
        assert_eq!(m.deposits(p.sender.address()).value, 500);
        assert_eq!(m.payment_of(p.sender.address(), p.receiver, PaymentId(1)), 0);
    }

    #[test]
    fn insufficient_balance_rolls_back_record() {
        let p = parties();
        let mut m = manager(&p);
        m.receive_deposit(p.sender.address(), 100).unwrap();
        let (s, g) = sign(&m, &p, 1, 200);

        let err = m
            .deposit_payment(p.sender.address(), p.receiver, PaymentId(1), 200, &s, &g)
            .unwrap_err();
        assert!(matches!(err, VpayError::InsufficientBalance { .. }));
        assert_eq!(m.payment_of(p.sender.address(), p.receiver, PaymentId(1)), 0);
        assert_eq!(m.deposits(p.receiver), Deposit::new());
        assert!(m.ledger().deposits().all(|(a, _)| *a != p.receiver));
    }

    #[test]
    fn refused_payout_rolls_back_withdraw_payment() {
        let p = parties();
        let mut m = manager(&p);
        m.receive_deposit(p.sender.address(), 500).unwrap();
        m.payout_mut().refuse(p.receiver);
        let (s, g) = sign(&m, &p, 2, 200);

        let err = m
            .withdraw_payment(p.sender.address(), p.receiver, PaymentId(2), 200, &s, &g)
            .unwrap_err();
        assert!(matches!(err, VpayError::TransferFailed { amount: 200, .. }));
        assert_eq!(m.deposits(p.sender.address()).value, 500);
        assert_eq!(m.payment_of(p.sender.address(), p.receiver, PaymentId(2)), 0);
        assert_eq!(m.supply().total_paid_out(), 0);
        assert_eq!(m.journal().len(), 1);
        assert!(m.verify_supply().is_ok());
    }

    #[test]
    fn withdraw_deposit_request_then_release() {
        let p = parties();
        let mut m = manager(&p);
        let sender = p.sender.address();
        m.receive_deposit(sender, 100).unwrap();

        let events = m.withdraw_deposit(sender, 1_000).unwrap();
        assert_eq!(
            events,
            vec![ChannelEvent::NewWithdrawalRequest {
                receiver: sender,
                unlocked_at: 1_000 + LOCK
            }]
        );

        let err = m.withdraw_deposit(sender, 1_000 + LOCK - 1).unwrap_err();
        assert!(matches!(err, VpayError::WithdrawalLocked { .. }));

        let events = m.withdraw_deposit(sender, 1_000 + LOCK).unwrap();
        assert_eq!(
            events,
            vec![ChannelEvent::NewWithdrawal {
                receiver: sender,
                value: 100
            }]
        );
        assert_eq!(m.deposits(sender), Deposit::new());
        assert_eq!(m.payout().balance_of(sender), 100);
        assert!(m.verify_supply().is_ok());
    }

    #[test]
    fn refused_release_keeps_request_pending() {
        let p = parties();
        let mut m = manager(&p);
        let sender = p.sender.address();
        m.receive_deposit(sender, 100).unwrap();
        m.withdraw_deposit(sender, 0).unwrap();
        m.payout_mut().refuse(sender);

        assert!(m.withdraw_deposit(sender, LOCK).is_err());
        let deposit = m.deposits(sender);
        assert_eq!(deposit.value, 100);
        assert_eq!(deposit.withdrawal_unlocked_at, LOCK);

        m.payout_mut().accept(sender);
        m.withdraw_deposit(sender, LOCK).unwrap();
        assert_eq!(m.payout().balance_of(sender), 100);
    }

    /// Accepts every signature as coming from the expected signer.
    struct AcceptAll;

    impl SignatureVerifier for AcceptAll {
        fn recover(
            &self,
            _hash: &MessageHash,
            _signature: &Signature,
        ) -> std::result::Result<Address, SignatureError> {
            Err(SignatureError::Unrecoverable("not used".into()))
        }

        fn verify(
            &self,
            _hash: &MessageHash,
            _signature: &Signature,
            _expected: Address,
            _role: SignerRole,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn custom_verifier_is_used() {
        let p = parties();
        let mut m = manager(&p).with_verifier(AcceptAll);
        m.receive_deposit(p.sender.address(), 50).unwrap();
        let junk = Signature([0u8; 65]);
        m.deposit_payment(p.sender.address(), p.receiver, PaymentId(9), 50, &junk, &junk)
            .unwrap();
        assert_eq!(m.deposits(p.receiver).value, 50);
    }
}
