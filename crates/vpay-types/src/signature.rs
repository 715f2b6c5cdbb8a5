//! Recoverable secp256k1 signatures over payment message hashes.
//!
//! A payment is authorized when the sender's and the guardian's signatures
//! both recover to their respective addresses. Signatures follow the
//! personal-message convention: the signed digest is
//! [`eth_signed_message_hash`] of the payment message hash, and the wire
//! format is 65 bytes `r || s || v`.
//!
//! The [`SignatureVerifier`] trait is the seam for the recovery primitive;
//! [`EcdsaRecoverer`] is the production implementation.

use std::fmt;

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use thiserror::Error;

use crate::constants::SIGNATURE_LEN;
use crate::{eth_signed_message_hash, keccak256, Address, MessageHash, Result, VpayError};

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 65-byte recoverable signature: `r(32) || s(32) || v(1)`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
    /// Parse a signature from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            VpayError::Serialization(format!(
                "signature must be {SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Parse a `0x`-prefixed (optional) hex signature.
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.strip_prefix("0x").unwrap_or(text))
            .map_err(|e| VpayError::Serialization(format!("invalid signature hex: {e}")))?;
        Self::from_slice(&bytes)
    }

    /// The `r || s` half.
    #[must_use]
    pub fn rs(&self) -> &[u8] {
        &self.0[..SIGNATURE_LEN - 1]
    }

    /// The recovery byte `v`.
    #[must_use]
    pub fn v(&self) -> u8 {
        self.0[SIGNATURE_LEN - 1]
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

// ---------------------------------------------------------------------------
// Roles and errors
// ---------------------------------------------------------------------------

/// Which co-signer a signature is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerRole {
    Sender,
    Guardian,
}

impl fmt::Display for SignerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sender => write!(f, "sender"),
            Self::Guardian => write!(f, "guardian"),
        }
    }
}

/// Why a signature could not be turned into a signer address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("invalid recovery byte {0}")]
    BadRecoveryByte(u8),
    #[error("non-canonical (high-s) signature")]
    HighS,
    #[error("malformed signature: {0}")]
    Malformed(String),
    #[error("public key recovery failed: {0}")]
    Unrecoverable(String),
}

// ---------------------------------------------------------------------------
// Verifier
// ---------------------------------------------------------------------------

/// Recovers the signer of a payment message hash. Pure, no state.
pub trait SignatureVerifier: Send + Sync {
    /// The address whose key produced `signature` over `hash`.
    fn recover(
        &self,
        hash: &MessageHash,
        signature: &Signature,
    ) -> std::result::Result<Address, SignatureError>;

    /// Require that `signature` over `hash` was produced by `expected`.
    fn verify(
        &self,
        hash: &MessageHash,
        signature: &Signature,
        expected: Address,
        role: SignerRole,
    ) -> Result<()> {
        match self.recover(hash, signature) {
            Ok(signer) if signer == expected => Ok(()),
            Ok(signer) => Err(VpayError::InvalidSignature {
                role,
                reason: format!("recovered {signer}, expected {expected}"),
            }),
            Err(e) => Err(VpayError::InvalidSignature {
                role,
                reason: e.to_string(),
            }),
        }
    }
}

/// secp256k1 public-key recovery with the personal-message prefix.
///
/// Accepts `v` in `{0, 1, 27, 28}` and rejects high-`s` signatures so that
/// a signature has exactly one accepted encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaRecoverer;

impl SignatureVerifier for EcdsaRecoverer {
    fn recover(
        &self,
        hash: &MessageHash,
        signature: &Signature,
    ) -> std::result::Result<Address, SignatureError> {
        let v = signature.v();
        let recovery_byte = match v {
            0 | 1 => v,
            27 | 28 => v - 27,
            other => return Err(SignatureError::BadRecoveryByte(other)),
        };
        let recovery_id =
            RecoveryId::from_byte(recovery_byte).ok_or(SignatureError::BadRecoveryByte(v))?;

        let ecdsa = EcdsaSignature::from_slice(signature.rs())
            .map_err(|e| SignatureError::Malformed(e.to_string()))?;
        if ecdsa.normalize_s().is_some() {
            return Err(SignatureError::HighS);
        }

        let digest = eth_signed_message_hash(hash);
        let key = VerifyingKey::recover_from_prehash(&digest, &ecdsa, recovery_id)
            .map_err(|e| SignatureError::Unrecoverable(e.to_string()))?;
        Ok(address_of(&key))
    }
}

/// Address of a secp256k1 public key: last 20 bytes of the Keccak-256 hash
/// of the uncompressed point without its `0x04` tag.
#[must_use]
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.as_affine().to_encoded_point(false);
    Address::from_hash_tail(&keccak256(&point.as_bytes()[1..]))
}

// ---------------------------------------------------------------------------
// Test signer
// ---------------------------------------------------------------------------

/// Deterministic or random secp256k1 signer for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Clone)]
pub struct TestSigner {
    key: k256::ecdsa::SigningKey,
}

#[cfg(any(test, feature = "test-helpers"))]
impl TestSigner {
    /// Signer whose secret is `keccak256(label)`; the same label always
    /// yields the same address.
    pub fn from_seed(label: &str) -> Self {
        Self::from_secret(keccak256(label.as_bytes()))
    }

    /// Signer from a raw 32-byte secret scalar.
    pub fn from_secret(secret: [u8; 32]) -> Self {
        Self {
            key: k256::ecdsa::SigningKey::from_slice(&secret).expect("valid secp256k1 scalar"),
        }
    }

    /// Fresh random signer.
    pub fn random() -> Self {
        Self {
            key: k256::ecdsa::SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    pub fn address(&self) -> Address {
        address_of(self.key.verifying_key())
    }

    /// Personal-message signature over `hash`, with `v` in `{27, 28}`.
    pub fn sign(&self, hash: &MessageHash) -> Signature {
        let digest = eth_signed_message_hash(hash);
        let (sig, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .expect("signing a 32-byte prehash");
        let mut out = [0u8; SIGNATURE_LEN];
        out[..SIGNATURE_LEN - 1].copy_from_slice(&sig.to_bytes());
        out[SIGNATURE_LEN - 1] = recovery_id.to_byte() + 27;
        Signature(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{payment_message_hash, PaymentId};

    fn sample_hash() -> MessageHash {
        payment_message_hash(
            Address([1u8; 20]),
            Address([2u8; 20]),
            Address([3u8; 20]),
            PaymentId(1),
            200,
        )
    }

    #[test]
    fn secret_one_has_well_known_address() {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let signer = TestSigner::from_secret(secret);
        assert_eq!(
            signer.address().to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn recover_returns_signer() {
        let signer = TestSigner::from_seed("sender");
        let hash = sample_hash();
        let sig = signer.sign(&hash);
        assert_eq!(EcdsaRecoverer.recover(&hash, &sig).unwrap(), signer.address());
    }

    #[test]
    fn recover_accepts_zero_based_v() {
        let signer = TestSigner::random();
        let hash = sample_hash();
        let mut sig = signer.sign(&hash);
        sig.0[64] -= 27;
        assert_eq!(EcdsaRecoverer.recover(&hash, &sig).unwrap(), signer.address());
    }

    #[test]
    fn verify_rejects_other_signer() {
        let sender = TestSigner::from_seed("sender");
        let mallory = TestSigner::from_seed("mallory");
        let hash = sample_hash();
        let sig = mallory.sign(&hash);
        let err = EcdsaRecoverer
            .verify(&hash, &sig, sender.address(), SignerRole::Sender)
            .unwrap_err();
        assert!(matches!(
            err,
            VpayError::InvalidSignature {
                role: SignerRole::Sender,
                ..
            }
        ));
    }

    #[test]
    fn signature_over_other_hash_recovers_other_address() {
        let signer = TestSigner::from_seed("guardian");
        let sig = signer.sign(&sample_hash());
        let other = MessageHash([0xee; 32]);
        let recovered = EcdsaRecoverer.recover(&other, &sig);
        assert_ne!(recovered.ok(), Some(signer.address()));
    }

    #[test]
    fn bad_recovery_byte_rejected() {
        let signer = TestSigner::from_seed("sender");
        let hash = sample_hash();
        let mut sig = signer.sign(&hash);
        sig.0[64] = 5;
        assert_eq!(
            EcdsaRecoverer.recover(&hash, &sig).unwrap_err(),
            SignatureError::BadRecoveryByte(5)
        );
    }

    #[test]
    fn zero_signature_rejected() {
        let sig = Signature([0u8; SIGNATURE_LEN]);
        assert!(EcdsaRecoverer.recover(&sample_hash(), &sig).is_err());
    }

    #[test]
    fn high_s_rejected() {
        let signer = TestSigner::from_seed("sender");
        let hash = sample_hash();
        let sig = signer.sign(&hash);
        let ecdsa = EcdsaSignature::from_slice(sig.rs()).unwrap();
        let high_s = -*ecdsa.s();
        let flipped = EcdsaSignature::from_scalars(ecdsa.r().to_bytes(), high_s.to_bytes()).unwrap();
        let mut bytes = sig.0;
        bytes[..64].copy_from_slice(&flipped.to_bytes());
        // Negating s flips the parity of the recovered point.
        bytes[64] = if bytes[64] == 27 { 28 } else { 27 };
        assert_eq!(
            EcdsaRecoverer.recover(&hash, &Signature(bytes)).unwrap_err(),
            SignatureError::HighS
        );
    }

    #[test]
    fn hex_roundtrip() {
        let sig = TestSigner::from_seed("sender").sign(&sample_hash());
        let text = sig.to_string();
        assert_eq!(Signature::from_hex(&text).unwrap(), sig);
        assert!(Signature::from_slice(&[0u8; 64]).is_err());
    }
}
