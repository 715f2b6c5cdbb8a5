//! Domain events emitted by the payment channel manager.
//!
//! Events are the only externally observable side effect of an operation
//! besides the ledger change itself. Each operation returns its events in
//! emission order; they are also appended to the audit journal.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, PaymentId, Timestamp};

/// A single event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "args")]
pub enum ChannelEvent {
    /// Value was credited to `sender`'s deposit.
    NewDeposit { sender: Address, value: Amount },
    /// A co-signed payment was settled up to cumulative `value`.
    NewPayment {
        sender: Address,
        receiver: Address,
        id: PaymentId,
        value: Amount,
    },
    /// `value` left escrow and was paid out to `receiver`.
    NewWithdrawal { receiver: Address, value: Amount },
    /// `receiver` asked to withdraw; release is possible from `unlocked_at`.
    NewWithdrawalRequest {
        receiver: Address,
        unlocked_at: Timestamp,
    },
}

impl ChannelEvent {
    /// Event name as it appears in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewDeposit { .. } => "NewDeposit",
            Self::NewPayment { .. } => "NewPayment",
            Self::NewWithdrawal { .. } => "NewWithdrawal",
            Self::NewWithdrawalRequest { .. } => "NewWithdrawalRequest",
        }
    }
}

impl std::fmt::Display for ChannelEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewDeposit { sender, value } => write!(f, "NewDeposit({sender}, {value})"),
            Self::NewPayment {
                sender,
                receiver,
                id,
                value,
            } => write!(f, "NewPayment({sender}, {receiver}, {id}, {value})"),
            Self::NewWithdrawal { receiver, value } => {
                write!(f, "NewWithdrawal({receiver}, {value})")
            }
            Self::NewWithdrawalRequest {
                receiver,
                unlocked_at,
            } => write!(f, "NewWithdrawalRequest({receiver}, {unlocked_at})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names() {
        let a = Address([1u8; 20]);
        assert_eq!(
            ChannelEvent::NewDeposit { sender: a, value: 1 }.name(),
            "NewDeposit"
        );
        assert_eq!(
            ChannelEvent::NewWithdrawalRequest {
                receiver: a,
                unlocked_at: 9
            }
            .name(),
            "NewWithdrawalRequest"
        );
    }

    #[test]
    fn event_json_is_tagged() {
        let ev = ChannelEvent::NewWithdrawal {
            receiver: Address([2u8; 20]),
            value: 200,
        };
        let json = serde_json::to_value(ev).unwrap();
        assert_eq!(json["event"], "NewWithdrawal");
        assert_eq!(json["args"]["value"], 200);
        assert_eq!(json["args"]["receiver"], format!("0x{}", "02".repeat(20)));
    }

    #[test]
    fn event_display() {
        let ev = ChannelEvent::NewPayment {
            sender: Address([1u8; 20]),
            receiver: Address([2u8; 20]),
            id: PaymentId(1),
            value: 200,
        };
        let text = ev.to_string();
        assert!(text.starts_with("NewPayment(0x0101"));
        assert!(text.ends_with(", 1, 200)"));
    }
}
