//! Thread-safe handle to one manager.
//!
//! All clones share a single manager behind one exclusive lock, so
//! operations from concurrent callers are strictly serialized. Timelock
//! operations read `now` from the handle's [`Clock`] while holding the lock.

use std::sync::Arc;

use parking_lot::Mutex;
use vpay_types::{Address, Amount, ChannelEvent, PaymentId, Result, Signature};

use crate::clock::Clock;
use crate::manager::PaymentChannelManager;
use crate::payout::Payout;

/// Cloneable, serialized access to a [`PaymentChannelManager`].
pub struct SharedManager<P: Payout> {
    inner: Arc<Mutex<PaymentChannelManager<P>>>,
    clock: Arc<dyn Clock>,
}

impl<P: Payout> Clone for SharedManager<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P: Payout> SharedManager<P> {
    pub fn new(manager: PaymentChannelManager<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
            clock,
        }
    }

    pub fn receive_deposit(&self, sender: Address, value: Amount) -> Result<Vec<ChannelEvent>> {
        self.inner.lock().receive_deposit(sender, value)
    }

    pub fn deposit_payment(
        &self,
        sender: Address,
        receiver: Address,
        id: PaymentId,
        value: Amount,
        sender_sig: &Signature,
        guardian_sig: &Signature,
    ) -> Result<Vec<ChannelEvent>> {
        self.inner
            .lock()
            .deposit_payment(sender, receiver, id, value, sender_sig, guardian_sig)
    }

    pub fn withdraw_payment(
        &self,
        sender: Address,
        receiver: Address,
        id: PaymentId,
        value: Amount,
        sender_sig: &Signature,
        guardian_sig: &Signature,
    ) -> Result<Vec<ChannelEvent>> {
        self.inner
            .lock()
            .withdraw_payment(sender, receiver, id, value, sender_sig, guardian_sig)
    }

    /// [`PaymentChannelManager::withdraw_deposit`] at the clock's current time.
    ///
    /// The clock is read after the lock is acquired, so time spent waiting
    /// for other callers counts toward the timelock.
    pub fn withdraw_deposit(&self, caller: Address) -> Result<Vec<ChannelEvent>> {
        let mut manager = self.inner.lock();
        let now = self.clock.now();
        manager.withdraw_deposit(caller, now)
    }

    /// Run `f` with exclusive access to the manager.
    pub fn with_manager<R>(&self, f: impl FnOnce(&mut PaymentChannelManager<P>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
