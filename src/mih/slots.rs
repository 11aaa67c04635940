//! Flat per-slot inverted indexes.

use rayon::prelude::*;

use crate::bits;

/// Inverted index for one word position: sorted distinct word values with
/// a grouped record-id payload.
///
/// Three flat arrays instead of a map of lists: `keys[k]` owns
/// `ids[starts[k]..starts[k + 1]]`, so a lookup is one binary search and
/// the payload stays contiguous. Built once at training time; read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub(crate) struct SlotIndex {
    keys: Vec<u64>,
    starts: Vec<u32>,
    ids: Vec<u32>,
}

impl SlotIndex {
    /// Build the index for `slot` over `count` records stored back to back
    /// in `records`, each `bytes_per_hash` long.
    pub(crate) fn build(
        records: &[u8],
        bytes_per_hash: usize,
        count: usize,
        slot: usize,
        word_bits: usize,
    ) -> Self {
        let mut pairs: Vec<(u64, u32)> = (0..count)
            .map(|id| {
                let record = &records[id * bytes_per_hash..(id + 1) * bytes_per_hash];
                (bits::word_at(record, slot, word_bits), id as u32)
            })
            .collect();
        pairs.sort_unstable();

        let mut keys = Vec::new();
        let mut starts = Vec::new();
        let mut ids = Vec::with_capacity(pairs.len());
        for (word, id) in pairs {
            if keys.last() != Some(&word) {
                keys.push(word);
                starts.push(ids.len() as u32);
            }
            ids.push(id);
        }
        starts.push(ids.len() as u32);

        Self { keys, starts, ids }
    }

    /// Build every slot index for a record store, one slot per rayon task.
    ///
    /// The per-slot builds are independent full passes over the records, so
    /// no shared map or per-key synchronization is involved.
    pub(crate) fn build_all(
        records: &[u8],
        bytes_per_hash: usize,
        count: usize,
        slot_count: usize,
        word_bits: usize,
    ) -> Vec<SlotIndex> {
        (0..slot_count)
            .into_par_iter()
            .map(|slot| SlotIndex::build(records, bytes_per_hash, count, slot, word_bits))
            .collect()
    }

    /// Record ids whose word at this slot equals `word`.
    #[inline]
    pub(crate) fn get(&self, word: u64) -> &[u32] {
        match self.keys.binary_search(&word) {
            Ok(k) => &self.ids[self.starts[k] as usize..self.starts[k + 1] as usize],
            Err(_) => &[],
        }
    }
}
