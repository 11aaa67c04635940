//! The two-phase fingerprint index: mutable ingest, then frozen queries.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use smallvec::SmallVec;

use crate::bits;
use crate::config::{HashFormat, IndexConfig};
use crate::error::{IndexError, Result};
use crate::window;

use super::query::QueryHits;
use super::slots::SlotIndex;

/// Exact Hamming-radius index over hex-encoded fingerprints.
///
/// Lifecycle is strictly two-phased: any number of [`Index::update`] calls
/// stage hash → category associations, a single [`Index::train`] freezes
/// them into an immutable record store plus per-slot inverted indexes, and
/// only then do queries run. Updating a frozen index or querying an open
/// one is an error; re-training is a no-op.
///
/// Queries at or below the configured threshold go through the multi-index
/// probe; larger radii fall back to a bounded linear scan.
#[derive(Debug)]
pub struct Index {
    config: IndexConfig,
    format: HashFormat,
    labels: Vec<String>,
    label_ids: HashMap<String, u32>,
    state: State,
}

#[derive(Debug)]
enum State {
    Open(Staging),
    Frozen(Snapshot),
}

/// Pending associations, keyed by decoded fingerprint.
///
/// Byte-lexicographic key order equals lowercase-hex order, so record
/// numbering after training is reproducible across runs.
#[derive(Debug, Default)]
struct Staging {
    pending: BTreeMap<Vec<u8>, BTreeSet<u32>>,
}

/// Immutable trained state: flat record storage plus one inverted index
/// per word slot.
#[derive(Debug)]
pub(super) struct Snapshot {
    bytes_per_hash: usize,
    /// Record fingerprints, back to back.
    records: Vec<u8>,
    /// Sorted category ids per record.
    categories: Vec<SmallVec<[u32; 4]>>,
    slots: Vec<SlotIndex>,
}

impl Snapshot {
    fn build(config: &IndexConfig, staging: Staging) -> Self {
        let bytes_per_hash = config.bytes();
        let count = staging.pending.len();
        let mut records = Vec::with_capacity(count * bytes_per_hash);
        let mut categories = Vec::with_capacity(count);
        for (fingerprint, ids) in staging.pending {
            records.extend_from_slice(&fingerprint);
            categories.push(ids.into_iter().collect::<SmallVec<[u32; 4]>>());
        }
        let slots = SlotIndex::build_all(
            &records,
            bytes_per_hash,
            count,
            config.slots(),
            config.word_bits(),
        );
        Self {
            bytes_per_hash,
            records,
            categories,
            slots,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.categories.len()
    }

    pub(super) fn record_bits(&self, id: u32) -> &[u8] {
        let start = id as usize * self.bytes_per_hash;
        &self.records[start..start + self.bytes_per_hash]
    }

    pub(super) fn category_ids(&self, id: u32) -> &[u32] {
        &self.categories[id as usize]
    }
}

impl Index {
    /// New open index with the given geometry.
    #[must_use]
    pub fn new(config: IndexConfig) -> Self {
        Self {
            format: HashFormat::new(config.hex_len()),
            config,
            labels: Vec::new(),
            label_ids: HashMap::new(),
            state: State::Open(Staging::default()),
        }
    }

    /// New open index with the PDQ preset geometry.
    #[must_use]
    pub fn pdq() -> Self {
        Self::new(IndexConfig::pdq())
    }

    /// Stage a batch of hex fingerprints under one category label.
    ///
    /// The label is interned before any hash is examined, so its id is
    /// assigned even for an empty batch or one that fails midway. Hashes
    /// staged before the first invalid one remain staged; callers that
    /// need atomic ingest should validate up front. Staging the same
    /// hash/category pair twice has no effect.
    pub fn update<I, S>(&mut self, hashes: I, category: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match &mut self.state {
            State::Frozen(_) => Err(IndexError::AlreadyTrained),
            State::Open(staging) => {
                let category_id = intern(&mut self.labels, &mut self.label_ids, category);
                for hash in hashes {
                    let hash = hash.as_ref();
                    self.format.check(hash)?;
                    let fingerprint = bits::from_hex(hash)?;
                    staging
                        .pending
                        .entry(fingerprint)
                        .or_default()
                        .insert(category_id);
                }
                Ok(())
            }
        }
    }

    /// Freeze the index: materialize records from staging and build the
    /// per-slot inverted indexes in parallel.
    ///
    /// Returns the number of records frozen (one per distinct normalized
    /// hash ever staged), or 0 when the index was already trained.
    pub fn train(&mut self) -> usize {
        let staging = match &mut self.state {
            State::Open(staging) => std::mem::take(staging),
            State::Frozen(_) => return 0,
        };
        let snapshot = Snapshot::build(&self.config, staging);
        let count = snapshot.len();
        self.state = State::Frozen(snapshot);
        count
    }

    /// Matches within the configured threshold.
    pub fn query(&self, hash: &str) -> Result<QueryHits<'_>> {
        self.query_within(hash, self.config.match_threshold())
    }

    /// Matches within `max_distance` bits of `hash`.
    ///
    /// Radii at or below the threshold probe the slot indexes; anything
    /// larger walks every record with a bounded distance check. Both paths
    /// yield lazily and produce each qualifying record exactly once.
    pub fn query_within(&self, hash: &str, max_distance: usize) -> Result<QueryHits<'_>> {
        let snapshot = match &self.state {
            State::Frozen(snapshot) => snapshot,
            State::Open(_) => return Err(IndexError::NotTrained),
        };
        self.format.check(hash)?;
        let query = bits::from_hex(hash)?;
        if max_distance > self.config.match_threshold() {
            return Ok(QueryHits::scan(snapshot, &self.labels, query, max_distance));
        }
        let ids = self.probe(snapshot, &query, max_distance)?;
        Ok(QueryHits::shortlist(
            snapshot,
            &self.labels,
            query,
            max_distance,
            ids,
        ))
    }

    /// Union of slot postings within the pigeon-hole radius of each query
    /// word.
    ///
    /// Two fingerprints within `max_distance` bits overall differ by at
    /// most `max_distance / slots` bits in at least one word, so probing
    /// every slot with that per-word radius yields a complete candidate
    /// shortlist. The bounded post-filter in the cursor makes it exact.
    fn probe(&self, snapshot: &Snapshot, query: &[u8], max_distance: usize) -> Result<Vec<u32>> {
        let word_bits = self.config.word_bits();
        let radius = max_distance / self.config.slots();
        let mut ids = Vec::new();
        for (slot, slot_index) in snapshot.slots.iter().enumerate() {
            let word = bits::word_at(query, slot, word_bits);
            for probe_word in window::word_window(word, word_bits, radius)? {
                ids.extend_from_slice(slot_index.get(probe_word));
            }
        }
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// All category labels in first-insertion order; a label's position is
    /// its stable id.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.labels
    }

    /// Labels for a set of category ids. Ids never assigned are skipped.
    #[must_use]
    pub fn categories_for(&self, ids: &[u32]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.labels.get(id as usize).cloned())
            .collect()
    }

    /// Number of frozen records; 0 before training.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.state {
            State::Frozen(snapshot) => snapshot.len(),
            State::Open(_) => 0,
        }
    }

    /// True when no records are frozen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the index has been frozen by [`Index::train`].
    #[must_use]
    pub fn is_trained(&self) -> bool {
        matches!(self.state, State::Frozen(_))
    }

    /// The index geometry.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The compiled acceptor for this index's hash surface.
    #[must_use]
    pub fn format(&self) -> &HashFormat {
        &self.format
    }

    /// Hash size in bits.
    #[must_use]
    pub fn hash_bits(&self) -> usize {
        self.config.hash_bits()
    }

    /// Word length in bits.
    #[must_use]
    pub fn word_bits(&self) -> usize {
        self.config.word_bits()
    }

    /// Largest distance served by the accelerated path.
    #[must_use]
    pub fn match_threshold(&self) -> usize {
        self.config.match_threshold()
    }

    /// Per-word radius implied by the threshold.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.config.window_size()
    }
}

fn intern(labels: &mut Vec<String>, label_ids: &mut HashMap<String, u32>, label: &str) -> u32 {
    if let Some(&id) = label_ids.get(label) {
        return id;
    }
    let id = labels.len() as u32;
    labels.push(label.to_string());
    label_ids.insert(label.to_string(), id);
    id
}
