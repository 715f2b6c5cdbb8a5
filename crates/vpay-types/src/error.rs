//! Error types for the vpay payment channel manager.
//!
//! All errors use the `VP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors
//! - 2xx: Balance errors
//! - 3xx: Payment record errors
//! - 4xx: Withdrawal timelock errors
//! - 5xx: Payout errors
//! - 8xx: Invariant errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{Address, Amount, PaymentKey, SignerRole, Timestamp};

/// Central error enum for all vpay operations.
#[derive(Debug, Error)]
pub enum VpayError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// A signature did not recover to the address required for its role.
    #[error("VP_ERR_100: Invalid {role} signature: {reason}")]
    InvalidSignature { role: SignerRole, reason: String },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough deposited balance to perform the debit.
    #[error("VP_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// An addition or subtraction left the representable range.
    #[error("VP_ERR_201: Arithmetic overflow")]
    ArithmeticOverflow,

    // =================================================================
    // Payment Record Errors (3xx)
    // =================================================================
    /// The submitted cumulative value does not exceed the settled value.
    #[error("VP_ERR_300: Stale payment {key}: recorded {recorded}, submitted {submitted}")]
    StalePayment {
        key: PaymentKey,
        recorded: Amount,
        submitted: Amount,
    },

    // =================================================================
    // Withdrawal Errors (4xx)
    // =================================================================
    /// A withdrawal request already exists for this address.
    #[error("VP_ERR_400: Withdrawal already pending until {unlocked_at}")]
    WithdrawalAlreadyPending { unlocked_at: Timestamp },

    /// Release attempted without a prior withdrawal request.
    #[error("VP_ERR_401: No pending withdrawal")]
    NoPendingWithdrawal,

    /// The lock period of the pending request has not elapsed yet.
    #[error("VP_ERR_402: Withdrawal locked until {unlocked_at} (now {now})")]
    WithdrawalLocked {
        unlocked_at: Timestamp,
        now: Timestamp,
    },

    // =================================================================
    // Payout Errors (5xx)
    // =================================================================
    /// The external transfer of funds could not complete.
    #[error("VP_ERR_500: Transfer of {amount} to {to} failed: {reason}")]
    TransferFailed {
        to: Address,
        amount: Amount,
        reason: String,
    },

    // =================================================================
    // Invariant Errors (8xx)
    // =================================================================
    /// Supply conservation invariant violated; the ledger is corrupt.
    #[error("VP_ERR_800: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("VP_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("VP_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("VP_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk).
    #[error("VP_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, VpayError>;

impl From<std::io::Error> for VpayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VpayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
