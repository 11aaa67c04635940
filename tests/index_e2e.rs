//! End-to-end scenarios for the PDQ-preset index.
//!
//! Exercises the full ingest → train → query lifecycle, the dispatch
//! boundary between the accelerated and linear paths, and the documented
//! lifecycle violations.

use dragnet::{hamming, Index, IndexConfig, IndexError, QueryHit};

const BASE: &str = "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927";
const NEAR_A: &str = "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071928";
const NEAR_B: &str = "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071936";
const UNRELATED: &str = "f0e1d2c3b4a5968778695a4b3c2d1e0ff0e1d2c3b4a5968778695a4b3c2d1e0f";

fn collect(index: &Index, hash: &str, max_distance: usize) -> Vec<QueryHit> {
    index
        .query_within(hash, max_distance)
        .expect("query failed")
        .collect()
}

fn brute_force(corpus: &[&str], query: &str, max_distance: usize) -> Vec<String> {
    let query_bits = dragnet::from_hex(query).expect("bad query hex");
    let mut hits: Vec<String> = corpus
        .iter()
        .filter(|hash| {
            let bits = dragnet::from_hex(hash).expect("bad corpus hex");
            hamming(&query_bits, &bits).expect("length mismatch") <= max_distance
        })
        .map(|hash| hash.to_lowercase())
        .collect();
    hits.sort();
    hits
}

// =============================================================================
// Single-record lifecycle
// =============================================================================

#[test]
fn single_hash_exact_match() {
    let mut index = Index::pdq();
    index.update([BASE], "ignorable").expect("update failed");
    assert_eq!(index.train(), 1);

    let hits = collect(&index, BASE, 0);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].hash, BASE);
    assert_eq!(hits[0].distance, 0);
    assert_eq!(hits[0].categories, vec!["ignorable".to_string()]);
}

// =============================================================================
// Small corpus, exact and near queries
// =============================================================================

#[test]
fn radius_zero_returns_only_the_exact_record() {
    let mut index = Index::pdq();
    index
        .update([BASE, NEAR_A, NEAR_B], "ignorable")
        .expect("update failed");
    assert_eq!(index.train(), 3);

    let hits = collect(&index, BASE, 0);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].hash, BASE);
}

#[test]
fn nearby_records_found_within_radius_ten() {
    let mut index = Index::pdq();
    index
        .update([BASE, NEAR_A, NEAR_B], "ignorable")
        .expect("update failed");
    index.train();

    let hits = collect(&index, BASE, 10);
    assert_eq!(hits.len(), 3);

    // last byte 0x27 vs 0x28 differs in 4 bits; 0x27 vs 0x36 in 2
    let by_hash: Vec<(String, usize)> =
        hits.iter().map(|h| (h.hash.clone(), h.distance)).collect();
    assert!(by_hash.contains(&(BASE.to_string(), 0)));
    assert!(by_hash.contains(&(NEAR_A.to_string(), 4)));
    assert!(by_hash.contains(&(NEAR_B.to_string(), 2)));
}

// =============================================================================
// Linear-path queries above the threshold
// =============================================================================

#[test]
fn above_threshold_queries_scan_every_record() {
    let corpus = [BASE, NEAR_A, NEAR_B, UNRELATED];
    let mut index = Index::pdq();
    index.update(corpus, "ignorable").expect("update failed");
    index.train();

    let mut hits: Vec<String> = collect(&index, UNRELATED, 34)
        .into_iter()
        .map(|h| h.hash)
        .collect();
    hits.sort();
    assert_eq!(hits, brute_force(&corpus, UNRELATED, 34));
    // the query hash itself is indexed, so at minimum it comes back
    assert!(hits.contains(&UNRELATED.to_string()));
}

#[test]
fn dispatch_boundary_agrees_across_paths() {
    let corpus = [BASE, NEAR_A, NEAR_B, UNRELATED];
    let mut index = Index::pdq();
    index.update(corpus, "ignorable").expect("update failed");
    index.train();

    // threshold 32 uses the probe, 33 the scan; results must agree with
    // brute force either way
    for max_distance in [32, 33] {
        let mut hits: Vec<String> = collect(&index, BASE, max_distance)
            .into_iter()
            .map(|h| h.hash)
            .collect();
        hits.sort();
        assert_eq!(
            hits,
            brute_force(&corpus, BASE, max_distance),
            "max_distance={max_distance}"
        );
    }
}

// =============================================================================
// Categories
// =============================================================================

#[test]
fn categories_union_across_updates() {
    let mut index = Index::pdq();
    index.update([BASE], "spam").expect("update failed");
    index.update([BASE, NEAR_A], "phishing").expect("update failed");
    index.update([BASE], "spam").expect("update failed");
    assert_eq!(index.train(), 2);

    let hits = collect(&index, BASE, 0);
    assert_eq!(
        hits[0].categories,
        vec!["spam".to_string(), "phishing".to_string()]
    );

    let near = collect(&index, NEAR_A, 0);
    assert_eq!(near[0].categories, vec!["phishing".to_string()]);
}

#[test]
fn category_listing_is_stable_and_filterable() {
    let mut index = Index::pdq();
    index.update([BASE], "one").expect("update failed");
    index.update([NEAR_A], "two").expect("update failed");
    index.update([NEAR_B], "one").expect("update failed");

    assert_eq!(index.categories(), &["one", "two"]);
    assert_eq!(index.categories_for(&[1]), vec!["two".to_string()]);
    assert_eq!(
        index.categories_for(&[1, 0]),
        vec!["two".to_string(), "one".to_string()]
    );
}

// =============================================================================
// Word windows
// =============================================================================

#[test]
fn window_around_ascii_8b_word() {
    // the 16-bit word spelled by the ASCII pair "8b"
    let word = u64::from(b'8') << 8 | u64::from(b'b');
    assert_eq!(word, 0x3862);

    let one = dragnet::word_window_hex(word, 16, 1).expect("window failed");
    assert_eq!(one.len(), 17);
    let two = dragnet::word_window_hex(word, 16, 2).expect("window failed");
    assert_eq!(two.len(), 137);
}

// =============================================================================
// Lifecycle violations and invalid construction
// =============================================================================

#[test]
fn lifecycle_violations_are_state_errors() {
    let mut index = Index::pdq();

    let err = index.query(BASE).expect_err("query before train must fail");
    assert_eq!(err, IndexError::NotTrained);
    assert!(err.is_state_violation());

    index.train();

    let err = index
        .update([BASE], "late")
        .expect_err("update after train must fail");
    assert_eq!(err, IndexError::AlreadyTrained);
    assert!(err.is_state_violation());
}

#[test]
fn invalid_geometry_is_rejected_at_construction() {
    let err = IndexConfig::new(254, 16, 32).expect_err("254 is not a byte multiple");
    assert!(matches!(err, IndexError::InvalidParameter(_)));
    assert!(!err.is_state_violation());
}

// =============================================================================
// Empty and lazy behavior
// =============================================================================

#[test]
fn empty_ingest_yields_an_empty_frozen_index() {
    let mut index = Index::pdq();
    assert_eq!(index.train(), 0);
    assert_eq!(index.len(), 0);
    assert!(collect(&index, BASE, 32).is_empty());
}

#[test]
fn cursor_can_be_dropped_after_the_first_hit() {
    let mut index = Index::pdq();
    index
        .update([BASE, NEAR_A, NEAR_B], "ignorable")
        .expect("update failed");
    index.train();

    let first = index
        .query_within(BASE, 10)
        .expect("query failed")
        .next()
        .expect("at least one hit");
    assert!(first.distance <= 10);
}
