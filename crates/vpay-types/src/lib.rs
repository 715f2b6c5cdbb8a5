//! # vpay-types
//!
//! Shared types, errors, hashing and signature recovery for the **vpay**
//! virtual payment channel manager.
//!
//! This crate is the leaf dependency of the workspace: every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`PaymentId`], [`PaymentKey`], [`MessageHash`]
//! - **Arithmetic**: [`Amount`], [`Timestamp`], [`checked_add`], [`checked_sub`]
//! - **Deposit model**: [`Deposit`], [`WithdrawalState`]
//! - **Event model**: [`ChannelEvent`]
//! - **Message hashing**: [`payment_message_hash`], [`payment_key`], [`keccak256`]
//! - **Signatures**: [`Signature`], [`SignatureVerifier`], [`EcdsaRecoverer`]
//! - **Configuration**: [`ManagerConfig`]
//! - **Errors**: [`VpayError`] with `VP_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod amount;
pub mod config;
pub mod constants;
pub mod deposit;
pub mod error;
pub mod event;
pub mod ids;
pub mod message;
pub mod signature;

// Re-export all primary types at crate root for ergonomic imports:
//   use vpay_types::{Address, Deposit, ChannelEvent, ...};

pub use amount::*;
pub use config::*;
pub use deposit::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use message::*;
pub use signature::*;

// Constants are accessed via `vpay_types::constants::FOO`
// (not re-exported to avoid name collisions).
