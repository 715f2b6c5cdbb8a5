//! Value and time primitives with overflow-checked arithmetic.
//!
//! Balances never wrap: every addition or subtraction that leaves the
//! representable range fails with [`VpayError::ArithmeticOverflow`].

use crate::constants::WORD_LEN;
use crate::{Result, VpayError};

/// An amount of escrowed value, in the smallest indivisible unit.
pub type Amount = u128;

/// Seconds since the UNIX epoch.
pub type Timestamp = u64;

/// `a + b`, failing on overflow.
pub fn checked_add<T: CheckedOps>(a: T, b: T) -> Result<T> {
    a.add_checked(b).ok_or(VpayError::ArithmeticOverflow)
}

/// `a - b`, failing on underflow.
pub fn checked_sub<T: CheckedOps>(a: T, b: T) -> Result<T> {
    a.sub_checked(b).ok_or(VpayError::ArithmeticOverflow)
}

/// Unsigned integers usable with [`checked_add`] / [`checked_sub`].
pub trait CheckedOps: Copy {
    fn add_checked(self, rhs: Self) -> Option<Self>;
    fn sub_checked(self, rhs: Self) -> Option<Self>;
}

impl CheckedOps for u128 {
    fn add_checked(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }

    fn sub_checked(self, rhs: Self) -> Option<Self> {
        self.checked_sub(rhs)
    }
}

impl CheckedOps for u64 {
    fn add_checked(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }

    fn sub_checked(self, rhs: Self) -> Option<Self> {
        self.checked_sub(rhs)
    }
}

/// Left-padded 32-byte big-endian word, the packed encoding of a `uint256`.
#[must_use]
pub fn word(value: u128) -> [u8; WORD_LEN] {
    let mut out = [0u8; WORD_LEN];
    out[WORD_LEN - 16..].copy_from_slice(&value.to_be_bytes());
    out
}
