//! Payment message hashing.
//!
//! Signers authorize a payment by signing the Keccak-256 hash of the packed
//! (no padding between fields) encoding
//!
//! ```text
//! manager(20) || sender(20) || receiver(20) || id(32, BE) || value(32, BE)
//! ```
//!
//! Binding the manager address prevents a signature issued for one manager
//! instance from being replayed against another. The field order and widths
//! must never change: previously issued signatures depend on them.

use sha3::{Digest, Keccak256};

use crate::amount::word;
use crate::constants::{ETH_SIGNED_MESSAGE_PREFIX, MANAGER_ADDRESS_DOMAIN, WORD_LEN};
use crate::{Address, Amount, MessageHash, PaymentId, PaymentKey};

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; WORD_LEN] {
    Keccak256::digest(data).into()
}

/// The digest both the sender and the guardian sign for a payment.
#[must_use]
pub fn payment_message_hash(
    manager: Address,
    sender: Address,
    receiver: Address,
    id: PaymentId,
    value: Amount,
) -> MessageHash {
    let mut hasher = Keccak256::new();
    hasher.update(manager.as_bytes());
    hasher.update(sender.as_bytes());
    hasher.update(receiver.as_bytes());
    hasher.update(id.to_word());
    hasher.update(word(value));
    MessageHash(hasher.finalize().into())
}

/// Key of the cumulative payment record for a (sender, receiver, id) triple.
#[must_use]
pub fn payment_key(sender: Address, receiver: Address, id: PaymentId) -> PaymentKey {
    let mut hasher = Keccak256::new();
    hasher.update(sender.as_bytes());
    hasher.update(receiver.as_bytes());
    hasher.update(id.to_word());
    PaymentKey(hasher.finalize().into())
}

/// Digest actually signed by a personal-message signer for `hash`:
/// `keccak256("\x19Ethereum Signed Message:\n32" || hash)`.
#[must_use]
pub fn eth_signed_message_hash(hash: &MessageHash) -> [u8; WORD_LEN] {
    let mut hasher = Keccak256::new();
    hasher.update(ETH_SIGNED_MESSAGE_PREFIX);
    hasher.update(hash.as_bytes());
    hasher.finalize().into()
}

/// Identity for a manager created without an explicit address.
///
/// `salt` must differ between instances sharing a guardian and lock period.
#[must_use]
pub fn derive_manager_address(guardian: Address, lock_period: u64, salt: u128) -> Address {
    let mut hasher = Keccak256::new();
    hasher.update(MANAGER_ADDRESS_DOMAIN);
    hasher.update(guardian.as_bytes());
    hasher.update(lock_period.to_be_bytes());
    hasher.update(salt.to_be_bytes());
    let hash: [u8; WORD_LEN] = hasher.finalize().into();
    Address::from_hash_tail(&hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    #[test]
    fn keccak_empty_vector() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn message_hash_matches_packed_layout() {
        let mut packed = Vec::with_capacity(124);
        packed.extend_from_slice(&[1u8; 20]);
        packed.extend_from_slice(&[2u8; 20]);
        packed.extend_from_slice(&[3u8; 20]);
        packed.extend_from_slice(&word(7));
        packed.extend_from_slice(&word(200));
        assert_eq!(packed.len(), 124);

        let hash = payment_message_hash(addr(1), addr(2), addr(3), PaymentId(7), 200);
        assert_eq!(hash.0, keccak256(&packed));
    }

    #[test]
    fn message_hash_binds_manager() {
        let a = payment_message_hash(addr(1), addr(2), addr(3), PaymentId(1), 10);
        let b = payment_message_hash(addr(9), addr(2), addr(3), PaymentId(1), 10);
        assert_ne!(a, b);
    }

    #[test]
    fn message_hash_binds_value() {
        let a = payment_message_hash(addr(1), addr(2), addr(3), PaymentId(1), 10);
        let b = payment_message_hash(addr(1), addr(2), addr(3), PaymentId(1), 11);
        assert_ne!(a, b);
    }

    #[test]
    fn payment_key_matches_packed_layout() {
        let mut packed = Vec::new();
        packed.extend_from_slice(&[2u8; 20]);
        packed.extend_from_slice(&[3u8; 20]);
        packed.extend_from_slice(&word(1));
        assert_eq!(payment_key(addr(2), addr(3), PaymentId(1)).0, keccak256(&packed));
    }

    #[test]
    fn payment_key_is_directional() {
        assert_ne!(
            payment_key(addr(2), addr(3), PaymentId(1)),
            payment_key(addr(3), addr(2), PaymentId(1))
        );
    }

    #[test]
    fn eth_signed_hash_prefixes() {
        let hash = MessageHash([5u8; 32]);
        let mut data = b"\x19Ethereum Signed Message:\n32".to_vec();
        data.extend_from_slice(&[5u8; 32]);
        assert_eq!(eth_signed_message_hash(&hash), keccak256(&data));
    }

    #[test]
    fn derived_manager_addresses_differ_by_salt() {
        let a = derive_manager_address(addr(1), 86_400, 0);
        let b = derive_manager_address(addr(1), 86_400, 1);
        assert_ne!(a, b);
        assert!(!a.is_zero());
        assert_eq!(a, derive_manager_address(addr(1), 86_400, 0));
    }
}
