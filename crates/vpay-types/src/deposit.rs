//! Escrowed deposit record and its withdrawal timelock state.
//!
//! Every address that has ever been credited owns one [`Deposit`]. The
//! `withdrawal_unlocked_at` field doubles as the timelock state machine:
//!
//! ```text
//!   ┌──────┐  request   ┌──────────────────────┐
//!   │ IDLE ├───────────▶│ PENDING(unlocked_at) │
//!   └──▲───┘            └──────────┬───────────┘
//!      │                           │
//!      └───────────────────────────┘
//!        release (now ≥ unlocked_at)
//! ```

use serde::{Deserialize, Serialize};

use crate::{Amount, Timestamp};

/// Per-address escrow entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Deposit {
    /// Escrowed balance available for settlement or withdrawal.
    pub value: Amount,
    /// `0` when idle, otherwise the earliest time a release may succeed.
    pub withdrawal_unlocked_at: Timestamp,
}

impl Deposit {
    /// Create an empty, idle deposit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in the withdrawal state machine.
    #[must_use]
    pub fn withdrawal_state(&self) -> WithdrawalState {
        match self.withdrawal_unlocked_at {
            0 => WithdrawalState::Idle,
            unlocked_at => WithdrawalState::Pending { unlocked_at },
        }
    }

    /// Whether a withdrawal request is outstanding.
    #[must_use]
    pub fn has_pending_withdrawal(&self) -> bool {
        self.withdrawal_unlocked_at != 0
    }
}

/// Withdrawal lifecycle of a single deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalState {
    /// No request outstanding.
    Idle,
    /// A request was made; funds may be released from `unlocked_at` on.
    Pending { unlocked_at: Timestamp },
}

impl WithdrawalState {
    /// Can the pending request be released at `now`?
    #[must_use]
    pub fn is_releasable_at(&self, now: Timestamp) -> bool {
        matches!(self, Self::Pending { unlocked_at } if now >= *unlocked_at)
    }
}

impl std::fmt::Display for WithdrawalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Pending { unlocked_at } => write!(f, "PENDING({unlocked_at})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deposit_is_idle_and_empty() {
        let d = Deposit::default();
        assert_eq!(d.value, 0);
        assert_eq!(d.withdrawal_state(), WithdrawalState::Idle);
        assert!(!d.has_pending_withdrawal());
    }

    #[test]
    fn pending_state_from_timestamp() {
        let d = Deposit {
            value: 10,
            withdrawal_unlocked_at: 500,
        };
        assert_eq!(
            d.withdrawal_state(),
            WithdrawalState::Pending { unlocked_at: 500 }
        );
        assert!(d.has_pending_withdrawal());
    }

    #[test]
    fn releasable_only_after_unlock() {
        let state = WithdrawalState::Pending { unlocked_at: 100 };
        assert!(!state.is_releasable_at(99));
        assert!(state.is_releasable_at(100));
        assert!(state.is_releasable_at(101));
        assert!(!WithdrawalState::Idle.is_releasable_at(u64::MAX));
    }

    #[test]
    fn state_display() {
        assert_eq!(WithdrawalState::Idle.to_string(), "IDLE");
        assert_eq!(
            WithdrawalState::Pending { unlocked_at: 7 }.to_string(),
            "PENDING(7)"
        );
    }
}
