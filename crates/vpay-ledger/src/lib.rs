//! # vpay-ledger
//!
//! **Escrow ledger**: deposit balances, withdrawal timelocks, cumulative
//! payment records and the supply conservation check.
//!
//! ## Components
//!
//! 1. **LedgerStore**: per-address deposits and per-key settled values,
//!    with checkpoint/rollback for multi-step operations
//! 2. **SupplyConservation**: running received/paid-out totals that the
//!    sum of deposits must always match
//!
//! ## Settlement Flow
//!
//! ```text
//! checkpoint() → record_payment() → transfer()/debit() → payout
//!     → SupplyConservation.verify(total_held) → commit | rollback()
//! ```
//!
//! The ledger performs no authorization and no I/O. Callers verify
//! signatures and own the payout side effect.

pub mod ledger_store;
pub mod supply_conservation;

pub use ledger_store::{Checkpoint, LedgerStore};
pub use supply_conservation::SupplyConservation;
