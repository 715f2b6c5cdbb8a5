//! System-wide constants for the vpay payment channel manager.

/// Default deposit withdrawal lock period (one day), used by the
/// guardian-only constructor.
pub const DEFAULT_LOCK_PERIOD_SECS: u64 = 24 * 60 * 60;

/// Upper bound accepted for a configured lock period (ten years).
pub const MAX_LOCK_PERIOD_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Length of a recoverable `r || s || v` signature in bytes.
pub const SIGNATURE_LEN: usize = 65;

/// Width of an ABI-packed integer word.
pub const WORD_LEN: usize = 32;

/// Prefix applied by personal-message signers before hashing a 32-byte digest.
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Domain tag for deriving a manager identity when none is configured.
pub const MANAGER_ADDRESS_DOMAIN: &[u8] = b"vpay:manager:v1:";

/// Domain tag for the audit journal hash chain.
pub const JOURNAL_DOMAIN: &[u8] = b"vpay:journal:v1:";
