//! dragnet: exact Hamming-radius search over binary fingerprints.
//!
//! An in-memory similarity index for fixed-width perceptual hashes (PDQ
//! and friends). Hex-encoded fingerprints are staged under category
//! labels, frozen once with [`Index::train`], and then queried for every
//! record within a chosen Hamming distance of a probe hash, along with
//! the categories each match was ingested under.
//!
//! | Query radius | Path | Cost |
//! |--------------|------|------|
//! | `≤ match_threshold` | multi-index probe ([`mih`]) | sublinear in corpus size |
//! | `> match_threshold` | bounded linear scan | one distance check per record |
//!
//! Both paths are exact: the probe's candidate shortlist is complete by
//! the pigeon-hole argument and a bounded post-filter discards the rest.
//!
//! # Quick Start
//!
//! ```ignore
//! use dragnet::Index;
//!
//! let mut index = Index::pdq(); // 256-bit hashes, 16-bit words, threshold 32
//! index.update(hashes, "screenshots")?;
//! index.train();
//!
//! for hit in index.query("358c8664...")? {
//!     println!("{} at distance {}", hit.hash, hit.distance);
//! }
//! ```
//!
//! # Primitives
//!
//! The building blocks are public and usable on their own: [`bits`] for
//! the hex ↔ packed-bit contract, [`hamming`](crate::hamming()) for
//! bounded distances, and [`word_window`] for Hamming-ball enumeration.
//!
//! # References
//!
//! - Norouzi, Punjani, Fleet (2012). "Fast Search in Hamming Space with
//!   Multi-Index Hashing"

pub mod bits;
pub mod config;
pub mod error;
pub mod hamming;
pub mod mih;
pub mod window;

pub use bits::{from_hex, to_hex};
pub use config::{HashFormat, IndexConfig};
pub use error::{IndexError, Result};
pub use hamming::{hamming, hamming_within};
pub use mih::{Index, QueryHit, QueryHits};
pub use window::{word_window, word_window_hex};
