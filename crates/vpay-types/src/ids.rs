//! Identifiers used throughout vpay.
//!
//! Byte-array identifiers ([`Address`], [`PaymentKey`], [`MessageHash`]) are
//! displayed and serialized as `0x`-prefixed lowercase hex so that they can
//! be used as JSON object keys in snapshots and configuration files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::amount::word;
use crate::constants::{ADDRESS_LEN, WORD_LEN};
use crate::VpayError;

/// Implements hex `Display`/`Debug`/`FromStr` and string serde for a
/// fixed-size byte newtype.
macro_rules! hex_bytes_newtype {
    ($name:ident, $len:expr) => {
        impl $name {
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = VpayError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(digits).map_err(|e| {
                    VpayError::Serialization(format!(
                        "invalid {} hex {s:?}: {e}",
                        stringify!($name)
                    ))
                })?;
                let array: [u8; $len] = bytes.try_into().map_err(|b: Vec<u8>| {
                    VpayError::Serialization(format!(
                        "{} must be {} bytes, got {}",
                        stringify!($name),
                        $len,
                        b.len()
                    ))
                })?;
                Ok(Self(array))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account address (Ethereum-compatible).
///
/// Depositors, receivers, the guardian and the manager itself are all
/// identified by an `Address`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address. Never a valid guardian or manager identity.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Address from the last 20 bytes of a 32-byte hash.
    #[must_use]
    pub fn from_hash_tail(hash: &[u8; WORD_LEN]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&hash[WORD_LEN - ADDRESS_LEN..]);
        Self(bytes)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

hex_bytes_newtype!(Address, ADDRESS_LEN);

// ---------------------------------------------------------------------------
// PaymentKey
// ---------------------------------------------------------------------------

/// Derived identifier of a (sender, receiver, id) payment triple.
///
/// See [`crate::payment_key`] for the derivation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct PaymentKey(pub [u8; WORD_LEN]);

hex_bytes_newtype!(PaymentKey, WORD_LEN);

// ---------------------------------------------------------------------------
// MessageHash
// ---------------------------------------------------------------------------

/// Keccak-256 digest of a payment authorization message.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHash(pub [u8; WORD_LEN]);

hex_bytes_newtype!(MessageHash, WORD_LEN);

// ---------------------------------------------------------------------------
// PaymentId
// ---------------------------------------------------------------------------

/// Caller-chosen identifier of a virtual payment stream between a sender
/// and a receiver. Many increments may be settled under one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub u128);

impl PaymentId {
    /// 32-byte big-endian encoding, as packed into message hashes.
    #[must_use]
    pub fn to_word(self) -> [u8; WORD_LEN] {
        word(self.0)
    }
}

impl From<u128> for PaymentId {
    fn from(id: u128) -> Self {
        Self(id)
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
