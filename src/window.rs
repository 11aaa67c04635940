//! Hamming-ball enumeration for index words.
//!
//! A word window is the set of every `W`-bit value within a given Hamming
//! distance of a reference word. The multi-index probe walks one window per
//! slot, so enumeration has to be exact and duplicate-free: the cardinality
//! is `Σ_{k=0..min(d,W)} C(W,k)`.
//!
//! Enumeration is iterative. For each weight `k` the XOR masks are walked
//! in ascending order with Gosper's hack (next mask of equal popcount).

use crate::error::{IndexError, Result};

/// All `word_bits`-bit values within Hamming distance `distance` of `word`.
///
/// The result contains `word` itself, has no duplicates, and covers every
/// qualifying value exactly once. Order is unspecified.
pub fn word_window(word: u64, word_bits: usize, distance: usize) -> Result<Vec<u64>> {
    check_word(word, word_bits)?;
    let mut out = vec![word];
    let limit: u128 = 1u128 << word_bits;
    for weight in 1..=distance.min(word_bits) {
        let mut mask: u128 = (1u128 << weight) - 1;
        while mask < limit {
            out.push(word ^ mask as u64);
            let low = mask & mask.wrapping_neg();
            let ripple = mask + low;
            mask = (((mask ^ ripple) >> 2) / low) | ripple;
        }
    }
    Ok(out)
}

/// [`word_window`] rendered as fixed-width lowercase hex strings.
///
/// `word_bits` must be a multiple of 4 so every value formats to exactly
/// `word_bits / 4` characters.
pub fn word_window_hex(word: u64, word_bits: usize, distance: usize) -> Result<Vec<String>> {
    if word_bits % 4 != 0 {
        return Err(IndexError::InvalidParameter(format!(
            "word width {word_bits} is not a whole number of hex digits"
        )));
    }
    let width = word_bits / 4;
    Ok(word_window(word, word_bits, distance)?
        .into_iter()
        .map(|value| format!("{value:0width$x}"))
        .collect())
}

fn check_word(word: u64, word_bits: usize) -> Result<()> {
    if word_bits == 0 || word_bits > 64 {
        return Err(IndexError::InvalidParameter(format!(
            "word width must be 1..=64 bits, got {word_bits}"
        )));
    }
    if word_bits < 64 && word >> word_bits != 0 {
        return Err(IndexError::InvalidParameter(format!(
            "word {word:#x} does not fit in {word_bits} bits"
        )));
    }
    Ok(())
}
