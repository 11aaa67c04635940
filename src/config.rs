//! Index geometry and the input-hash acceptor.

use crate::error::{IndexError, Result};

/// Geometry of a fingerprint index: hash width, word width, and the match
/// threshold that separates the accelerated path from the linear scan.
///
/// All three are fixed at construction. Derived quantities: `slots()` word
/// positions per hash, `window_size()` per-word radius at the threshold,
/// `hex_len()` characters on the hex surface, `bytes()` of packed storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    hash_bits: usize,
    word_bits: usize,
    match_threshold: usize,
}

impl IndexConfig {
    /// Preset for 256-bit PDQ fingerprints: 16-bit words, threshold 32.
    #[must_use]
    pub fn pdq() -> Self {
        Self {
            hash_bits: 256,
            word_bits: 16,
            match_threshold: 32,
        }
    }

    /// Build a validated configuration.
    ///
    /// `hash_bits` must be a positive multiple of 8 and divisible by
    /// `word_bits`; `word_bits` must fit a `u64` slot key; the threshold
    /// must be even and no larger than the hash itself.
    pub fn new(hash_bits: usize, word_bits: usize, match_threshold: usize) -> Result<Self> {
        if hash_bits == 0 || hash_bits % 8 != 0 {
            return Err(IndexError::InvalidParameter(format!(
                "hash width must be a positive multiple of 8 bits, got {hash_bits}"
            )));
        }
        if word_bits == 0 || word_bits > 64 {
            return Err(IndexError::InvalidParameter(format!(
                "word width must be 1..=64 bits, got {word_bits}"
            )));
        }
        if hash_bits % word_bits != 0 {
            return Err(IndexError::InvalidParameter(format!(
                "hash width {hash_bits} is not divisible by word width {word_bits}"
            )));
        }
        if match_threshold % 2 != 0 {
            return Err(IndexError::InvalidParameter(format!(
                "match threshold must be even, got {match_threshold}"
            )));
        }
        if match_threshold > hash_bits {
            return Err(IndexError::InvalidParameter(format!(
                "match threshold {match_threshold} exceeds hash width {hash_bits}"
            )));
        }
        Ok(Self {
            hash_bits,
            word_bits,
            match_threshold,
        })
    }

    /// Hash size in bits.
    #[must_use]
    pub fn hash_bits(&self) -> usize {
        self.hash_bits
    }

    /// Word length in bits.
    #[must_use]
    pub fn word_bits(&self) -> usize {
        self.word_bits
    }

    /// Largest distance served by the accelerated path.
    #[must_use]
    pub fn match_threshold(&self) -> usize {
        self.match_threshold
    }

    /// Number of word slots per hash.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.hash_bits / self.word_bits
    }

    /// Per-word radius implied by the threshold.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.match_threshold / self.word_bits
    }

    /// Length of a hash on the hex surface.
    #[must_use]
    pub fn hex_len(&self) -> usize {
        self.hash_bits / 4
    }

    /// Packed storage per hash.
    #[must_use]
    pub fn bytes(&self) -> usize {
        self.hash_bits / 8
    }
}

/// Compiled acceptor for one index's hash surface syntax: exactly
/// `hash_bits / 4` characters of `[0-9a-fA-F]`.
///
/// A length check plus a character-class scan is all the "compilation"
/// this syntax needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashFormat {
    hex_len: usize,
}

impl HashFormat {
    pub(crate) fn new(hex_len: usize) -> Self {
        Self { hex_len }
    }

    /// Number of hex characters an accepted hash has.
    #[must_use]
    pub fn hex_len(&self) -> usize {
        self.hex_len
    }

    /// Whether `hash` matches the surface syntax.
    #[must_use]
    pub fn is_match(&self, hash: &str) -> bool {
        hash.len() == self.hex_len && hash.bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub(crate) fn check(&self, hash: &str) -> Result<()> {
        if self.is_match(hash) {
            Ok(())
        } else {
            Err(IndexError::InvalidHash {
                hash: hash.to_string(),
                expected_len: self.hex_len,
            })
        }
    }
}
