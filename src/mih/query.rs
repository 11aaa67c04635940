//! Lazy query cursors.

use crate::{bits, hamming};

use super::index::Snapshot;

/// One record matched by a query.
///
/// Owns its strings; hits stay valid after the index is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHit {
    /// Canonical lowercase hex of the matched fingerprint.
    pub hash: String,
    /// Exact Hamming distance from the query.
    pub distance: usize,
    /// Labels of every category the fingerprint was ingested under, in
    /// ascending id order.
    pub categories: Vec<String>,
}

/// Lazy stream of query matches.
///
/// One candidate is examined per [`Iterator::next`] call, so dropping the
/// cursor early stops the remaining work. Every qualifying record is
/// yielded exactly once, in ascending record order.
#[derive(Debug)]
pub struct QueryHits<'a> {
    snapshot: &'a Snapshot,
    labels: &'a [String],
    query: Vec<u8>,
    max_distance: usize,
    candidates: Candidates,
}

#[derive(Debug)]
enum Candidates {
    /// Linear path: walk every record.
    Scan { next: u32, count: u32 },
    /// Accelerated path: sorted, deduplicated probe shortlist.
    Shortlist { ids: Vec<u32>, next: usize },
}

impl<'a> QueryHits<'a> {
    pub(super) fn scan(
        snapshot: &'a Snapshot,
        labels: &'a [String],
        query: Vec<u8>,
        max_distance: usize,
    ) -> Self {
        let count = snapshot.len() as u32;
        Self {
            snapshot,
            labels,
            query,
            max_distance,
            candidates: Candidates::Scan { next: 0, count },
        }
    }

    pub(super) fn shortlist(
        snapshot: &'a Snapshot,
        labels: &'a [String],
        query: Vec<u8>,
        max_distance: usize,
        ids: Vec<u32>,
    ) -> Self {
        Self {
            snapshot,
            labels,
            query,
            max_distance,
            candidates: Candidates::Shortlist { ids, next: 0 },
        }
    }

    fn next_candidate(&mut self) -> Option<u32> {
        match &mut self.candidates {
            Candidates::Scan { next, count } => {
                if next < count {
                    let id = *next;
                    *next += 1;
                    Some(id)
                } else {
                    None
                }
            }
            Candidates::Shortlist { ids, next } => {
                let id = ids.get(*next).copied()?;
                *next += 1;
                Some(id)
            }
        }
    }
}

impl Iterator for QueryHits<'_> {
    type Item = QueryHit;

    fn next(&mut self) -> Option<QueryHit> {
        loop {
            let id = self.next_candidate()?;
            let record = self.snapshot.record_bits(id);
            // query and records share the configured width
            let Some(distance) = hamming::within_unchecked(&self.query, record, self.max_distance)
            else {
                continue;
            };
            let categories = self
                .snapshot
                .category_ids(id)
                .iter()
                .filter_map(|&c| self.labels.get(c as usize).cloned())
                .collect();
            return Some(QueryHit {
                hash: bits::to_hex(record),
                distance,
                categories,
            });
        }
    }
}
