//! Multi-index hashing over fixed-width binary fingerprints.
//!
//! Implements the exact Hamming-range accelerator of Norouzi et al.: each
//! `H`-bit fingerprint is partitioned into `S = H/W` words of `W` bits and
//! one inverted index is built per word position. If two fingerprints are
//! within `d` bits overall, at least one of their `S` words is within
//! `⌊d/S⌋` bits (pigeon-hole), so probing every slot with the Hamming ball
//! of that radius around the query word produces a complete candidate
//! shortlist. A bounded-distance post-filter then makes the result exact;
//! recall is never approximate.
//!
//! Ingest is batched: hashes are staged under category labels with
//! [`Index::update`], frozen once with [`Index::train`], and queried
//! read-only afterwards.
//!
//! # Quick Start
//!
//! ```ignore
//! use dragnet::Index;
//!
//! let mut index = Index::pdq();
//! index.update(file_lines, "screenshots")?;
//! index.train();
//!
//! for hit in index.query("358c8664...")? {
//!     println!("{} at distance {} in {:?}", hit.hash, hit.distance, hit.categories);
//! }
//! ```
//!
//! # References
//!
//! - Norouzi, Punjani, Fleet (2012). "Fast Search in Hamming Space with
//!   Multi-Index Hashing"
//! - Facebook ThreatExchange (2019). "PDQ and TMK+PDQF: photo and video
//!   hashing" (the 256-bit preset)

mod index;
mod query;
mod slots;

pub use index::Index;
pub use query::{QueryHit, QueryHits};
