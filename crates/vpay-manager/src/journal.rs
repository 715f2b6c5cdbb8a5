//! Hash-chained audit journal of committed channel events.
//!
//! Each entry commits to its predecessor:
//! ```text
//! hash = SHA-256("vpay:journal:v1:" || sequence_le || prev_hash || json(event))
//! ```
//! Appending is split into [`EventJournal::prepare`] (fallible, no state
//! change) and [`EventJournal::commit`] (infallible) so that the events of
//! an operation reach the journal only once the operation has succeeded.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use vpay_types::{constants::JOURNAL_DOMAIN, ChannelEvent, Result, VpayError};

/// Hash of the link before the first entry.
pub const GENESIS_HASH: [u8; 32] = [0u8; 32];

/// One committed event with its chain link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub sequence: u64,
    pub event: ChannelEvent,
    #[serde(with = "hex_hash")]
    pub prev_hash: [u8; 32],
    #[serde(with = "hex_hash")]
    pub hash: [u8; 32],
}

/// Tip of the chain: the next sequence number and the latest hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalHead {
    pub next_sequence: u64,
    #[serde(with = "hex_hash")]
    pub hash: [u8; 32],
}

impl Default for JournalHead {
    fn default() -> Self {
        Self {
            next_sequence: 0,
            hash: GENESIS_HASH,
        }
    }
}

/// Append-only event log.
///
/// A journal resumed from a [`JournalHead`] holds only the entries appended
/// since; [`EventJournal::verify_chain`] starts from that head.
#[derive(Debug, Clone, Default)]
pub struct EventJournal {
    base: JournalHead,
    head: JournalHead,
    entries: Vec<JournalEntry>,
}

impl EventJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a chain whose earlier entries are stored elsewhere.
    #[must_use]
    pub fn resume(head: JournalHead) -> Self {
        Self {
            base: head,
            head,
            entries: Vec::new(),
        }
    }

    /// Chain `events` onto the current head without appending them.
    ///
    /// # Errors
    /// Returns `Serialization` if an event cannot be encoded, or
    /// `ArithmeticOverflow` if the sequence space is exhausted.
    pub fn prepare(&self, events: &[ChannelEvent]) -> Result<Vec<JournalEntry>> {
        let mut head = self.head;
        let mut prepared = Vec::with_capacity(events.len());
        for event in events {
            let hash = link_hash(head.next_sequence, &head.hash, event)?;
            prepared.push(JournalEntry {
                sequence: head.next_sequence,
                event: *event,
                prev_hash: head.hash,
                hash,
            });
            head = JournalHead {
                next_sequence: head
                    .next_sequence
                    .checked_add(1)
                    .ok_or(VpayError::ArithmeticOverflow)?,
                hash,
            };
        }
        Ok(prepared)
    }

    /// Append entries produced by [`EventJournal::prepare`] on this journal.
    pub fn commit(&mut self, entries: Vec<JournalEntry>) {
        if let Some(last) = entries.last() {
            self.head = JournalHead {
                next_sequence: last.sequence + 1,
                hash: last.hash,
            };
        }
        self.entries.extend(entries);
    }

    /// Recompute every link from the base head.
    ///
    /// # Errors
    /// Returns `Internal` naming the first broken sequence number.
    pub fn verify_chain(&self) -> Result<()> {
        let mut expected_prev = self.base.hash;
        let mut expected_seq = self.base.next_sequence;
        for entry in &self.entries {
            if entry.sequence != expected_seq || entry.prev_hash != expected_prev {
                return Err(VpayError::Internal(format!(
                    "journal link broken at sequence {}",
                    entry.sequence
                )));
            }
            if link_hash(entry.sequence, &entry.prev_hash, &entry.event)? != entry.hash {
                return Err(VpayError::Internal(format!(
                    "journal hash mismatch at sequence {}",
                    entry.sequence
                )));
            }
            expected_prev = entry.hash;
            expected_seq += 1;
        }
        Ok(())
    }

    #[must_use]
    pub fn head(&self) -> JournalHead {
        self.head
    }

    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn link_hash(sequence: u64, prev_hash: &[u8; 32], event: &ChannelEvent) -> Result<[u8; 32]> {
    let mut hasher = Sha256::new();
    hasher.update(JOURNAL_DOMAIN);
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash);
    hasher.update(serde_json::to_vec(event)?);
    Ok(hasher.finalize().into())
}

mod hex_hash {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(hash)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(text.strip_prefix("0x").unwrap_or(&text)).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| D::Error::custom("expected 32-byte hash"))
    }
}
