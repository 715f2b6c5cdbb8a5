//! # vpay-manager
//!
//! **Payment channel manager**: escrowed deposits, co-signed incremental
//! settlement, time-locked withdrawal and an auditable event journal.
//!
//! ## Architecture
//!
//! A [`PaymentChannelManager`] owns:
//! 1. A `LedgerStore` with every deposit and payment record
//! 2. A `SupplyConservation` tracker checked after every operation
//! 3. An [`EventJournal`] of committed events, hash-chained with SHA-256
//! 4. A [`Payout`] that moves released value out of escrow
//! 5. A `SignatureVerifier` for sender and guardian co-signatures
//!
//! ## Settlement
//!
//! ```text
//! authorize(sender_sig, guardian_sig) → record_payment(value) → transfer/debit(delta)
//!     → verify supply → payout → journal
//! ```
//!
//! Any failure leaves the manager exactly as it was before the call.
//! [`SharedManager`] serializes callers across threads and
//! [`ManagerSnapshot`] persists state as JSON.

pub mod clock;
pub mod journal;
pub mod manager;
pub mod payout;
pub mod shared;
pub mod snapshot;

pub use clock::{Clock, ManualClock, SystemClock};
pub use journal::{EventJournal, JournalEntry, JournalHead};
pub use manager::PaymentChannelManager;
pub use payout::{InMemoryPayout, Payout, PayoutRecord};
pub use shared::SharedManager;
pub use snapshot::ManagerSnapshot;
