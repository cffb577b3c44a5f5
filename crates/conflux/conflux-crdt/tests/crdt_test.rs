//! Unit tests for all CRDT primitives.
//!
//! Covers: VersionVector, GCounter, PNCounter, LWWRegister, MVRegister,
//! TwoPhaseSet.

use std::collections::{BTreeSet, HashSet};

use conflux_core::errors::SetError;
use conflux_core::hash::stable_name_hash;
use conflux_crdt::{
    Convergent, GCounter, GCounterPayload, LWWRegister, MVRegister, PNCounter, TwoPhaseSet,
    VersionVector,
};

// =============================================================================
// VersionVector
// =============================================================================

#[test]
fn version_vector_increment_and_read() {
    let mut clock = VersionVector::new();
    assert_eq!(clock.local_version("A"), 0);

    clock.increment("A", 1);
    clock.increment("A", 2);
    clock.increment("B", 1);

    assert_eq!(clock.local_version("A"), 3);
    assert_eq!(clock.local_version("B"), 1);
    assert_eq!(clock.local_version("C"), 0);
}

#[test]
fn version_vector_merge_pointwise_max() {
    let mut a = VersionVector::new();
    a.increment("A", 2);
    a.increment("B", 1);

    let mut b = VersionVector::new();
    b.increment("A", 1);
    b.increment("B", 2);
    b.increment("C", 1);

    a.merge(&b);
    assert_eq!(a.local_version("A"), 2);
    assert_eq!(a.local_version("B"), 2);
    assert_eq!(a.local_version("C"), 1);
}

#[test]
fn version_vector_merge_with_empty_is_identity() {
    let mut a = VersionVector::new();
    a.increment("A", 3);

    let before = a.clone();
    a.merge(&VersionVector::new());
    assert_eq!(a, before);
}

#[test]
fn version_vector_le_is_pointwise() {
    let mut small = VersionVector::new();
    small.increment("A", 1);

    let mut large = VersionVector::new();
    large.increment("A", 2);
    large.increment("B", 1);

    assert!(small.le(&large));
    assert!(!large.le(&small));

    // Equal vectors pass every pointwise check, so the fall-through is true.
    assert!(small.le(&small));
    assert!(VersionVector::new().le(&small));
}

#[test]
fn version_vector_lt_requires_inequality() {
    let mut a = VersionVector::new();
    a.increment("A", 1);

    let mut b = VersionVector::new();
    b.increment("A", 1);
    assert!(!a.lt(&b));

    b.increment("B", 1);
    assert!(a.lt(&b));
    assert!(!b.lt(&a));
}

#[test]
fn version_vector_concurrency_detection() {
    let mut a = VersionVector::new();
    a.increment("A", 1);

    let mut b = VersionVector::new();
    b.increment("B", 1);

    assert!(a.concurrent_with(&b));
    assert!(b.concurrent_with(&a));
    assert!(!a.concurrent_with(&a));

    a.merge(&b);
    assert!(a.dominates(&b));
    assert!(!a.concurrent_with(&b));
}

#[test]
fn version_vector_increment_by_zero_is_unobservable() {
    let mut a = VersionVector::new();
    a.increment("A", 1);

    let mut b = a.clone();
    b.increment("B", 0);

    assert_eq!(a, b);
    assert!(b.replicas() == vec!["A"]);

    // Hashing must agree with the zero-normalized equality.
    let mut set = HashSet::new();
    set.insert(a);
    set.insert(b);
    assert_eq!(set.len(), 1);
}

#[test]
fn version_vector_hash_is_order_independent() {
    let mut forward = VersionVector::new();
    forward.increment("A", 1);
    forward.increment("B", 2);

    let mut backward = VersionVector::new();
    backward.increment("B", 2);
    backward.increment("A", 1);

    let mut set = HashSet::new();
    set.insert(forward);
    set.insert(backward);
    assert_eq!(set.len(), 1);
}

// =============================================================================
// GCounter
// =============================================================================

#[test]
fn gcounter_increment_and_query() {
    let mut counter = GCounter::new("A");
    assert_eq!(counter.query(), 0);

    counter.increment(1);
    counter.increment(2);
    assert_eq!(counter.query(), 3);
    assert_eq!(counter.payload().local_value("A"), 3);
    assert_eq!(counter.payload().local_value("B"), 0);
}

#[test]
fn gcounter_merge_takes_pointwise_max() {
    let mut a = GCounter::new("A");
    a.increment(2);

    let mut b = GCounter::new("B");
    b.increment(5);

    // Merging twice from the same peer must not double-count.
    a.merge(b.payload());
    a.merge(b.payload());
    assert_eq!(a.query(), 7);

    b.merge(a.payload());
    assert_eq!(b.query(), 7);
}

#[test]
fn gcounter_payload_partial_order() {
    let mut smaller = GCounterPayload::new();
    smaller.increment("A", 1);

    let mut larger = smaller.clone();
    larger.increment("A", 1);
    larger.increment("B", 3);

    assert!(smaller.le(&larger));
    assert!(!larger.le(&smaller));

    // All pointwise checks passing means true, including for equal payloads.
    assert!(smaller.le(&smaller.clone()));
    assert!(GCounterPayload::new().le(&smaller));
}

#[test]
fn gcounter_local_update_is_monotone() {
    let mut counter = GCounter::new("A");
    counter.increment(4);

    let before = counter.payload();
    counter.increment(3);
    assert!(before.le(&counter.payload()));
}

// =============================================================================
// PNCounter
// =============================================================================

#[test]
fn pncounter_routes_by_sign() {
    let mut counter = PNCounter::new("A");
    counter.increment(5);
    counter.increment(-2);
    assert_eq!(counter.query(), 3);

    counter.increment(-7);
    assert_eq!(counter.query(), -4);
}

#[test]
fn pncounter_merge_is_componentwise() {
    let mut a = PNCounter::new("A");
    a.increment(-1);

    let mut b = PNCounter::new("B");
    b.increment(2);

    a.merge(b.payload());
    b.merge(a.payload());
    assert_eq!(a.query(), 1);
    assert_eq!(b.query(), 1);

    // Re-merging converged payloads changes nothing.
    let before = a.payload();
    a.merge(b.payload());
    assert_eq!(a.payload(), before);
}

// =============================================================================
// LWWRegister
// =============================================================================

#[test]
fn lww_register_starts_empty() {
    let register: LWWRegister<String> = LWWRegister::new("A");
    assert_eq!(register.query(), None);
}

#[test]
fn lww_register_assign_and_clear() {
    let mut register = LWWRegister::new("A");
    register.assign("hello");
    assert_eq!(register.query(), Some("hello"));

    register.clear();
    assert_eq!(register.query(), None);
}

#[test]
fn lww_register_later_write_wins() {
    let mut a = LWWRegister::new("A");
    let mut b = LWWRegister::new("B");

    a.assign("first");
    b.merge(a.payload());
    assert_eq!(b.query(), Some("first"));

    // B has observed A's write, so B's next write supersedes it.
    b.assign("second");
    a.merge(b.payload());
    assert_eq!(a.query(), Some("second"));
}

#[test]
fn lww_register_concurrent_writes_tie_break_on_replica_hash() {
    let mut a = LWWRegister::new("A");
    let mut b = LWWRegister::new("B");

    a.assign("from-a");
    b.assign("from-b");

    let expected = if stable_name_hash("A") > stable_name_hash("B") {
        Some("from-a")
    } else {
        Some("from-b")
    };

    let (a_payload, b_payload) = (a.payload(), b.payload());
    a.merge(b_payload);
    b.merge(a_payload);
    assert_eq!(a.query(), expected);
    assert_eq!(b.query(), expected);
}

#[test]
fn lww_register_clear_beats_earlier_assign() {
    let mut a = LWWRegister::new("A");
    let mut b = LWWRegister::new("B");

    a.assign("kept?");
    b.merge(a.payload());
    b.clear();

    a.merge(b.payload());
    assert_eq!(a.query(), None);
}

#[test]
fn lww_register_merge_is_idempotent() {
    let mut a = LWWRegister::new("A");
    a.assign("value");

    let snapshot = a.payload();
    a.merge(snapshot.clone());
    a.merge(snapshot);
    assert_eq!(a.query(), Some("value"));
}

// =============================================================================
// MVRegister
// =============================================================================

fn values<const N: usize>(items: [&'static str; N]) -> BTreeSet<&'static str> {
    items.into_iter().collect()
}

#[test]
fn mv_register_starts_empty() {
    let register: MVRegister<String> = MVRegister::new("A");
    assert!(register.query().is_empty());
}

#[test]
fn mv_register_query_deduplicates() {
    let mut register = MVRegister::new("A");
    register.assign(["pasta", "pasta", "popcorn"]);
    assert_eq!(register.query(), values(["pasta", "popcorn"]));
}

#[test]
fn mv_register_concurrent_writes_are_preserved() {
    let mut a = MVRegister::new("A");
    let mut b = MVRegister::new("B");

    a.assign(["pasta"]);
    b.assign(["popcorn"]);

    let (a_payload, b_payload) = (a.payload(), b.payload());
    a.merge(b_payload);
    b.merge(a_payload);

    assert_eq!(a.query(), values(["pasta", "popcorn"]));
    assert_eq!(a.payload(), b.payload());
}

#[test]
fn mv_register_observed_writes_are_superseded() {
    let mut a = MVRegister::new("A");
    let mut b = MVRegister::new("B");

    a.assign(["pasta"]);
    b.assign(["popcorn"]);
    a.merge(b.payload());

    // A has observed both concurrent writes; its next write dominates them.
    a.assign(["bread"]);
    b.merge(a.payload());

    assert_eq!(a.query(), values(["bread"]));
    assert_eq!(b.query(), values(["bread"]));
}

#[test]
fn mv_register_clear_is_a_write() {
    let mut a = MVRegister::new("A");
    let mut b = MVRegister::new("B");

    a.assign(["pasta"]);
    let stale = a.payload();
    b.merge(a.payload());
    b.clear();

    // B's clear dominates the assign it observed.
    a.merge(b.payload());
    assert!(a.query().is_empty());

    // Re-delivering the superseded write does not resurrect it.
    a.merge(stale);
    assert!(a.query().is_empty());
}

#[test]
fn mv_register_merge_is_idempotent() {
    let mut a = MVRegister::new("A");
    a.assign(["pasta", "popcorn"]);

    let before = a.payload();
    a.merge(before.clone());
    assert_eq!(a.payload(), before);
}

// =============================================================================
// TwoPhaseSet
// =============================================================================

#[test]
fn two_phase_set_add_and_query() {
    let mut set = TwoPhaseSet::new("A");
    set.add("pasta");
    set.add("pasta");
    set.add_many(["popcorn", "bread"]);

    assert_eq!(set.query(), values(["pasta", "popcorn", "bread"]));
}

#[test]
fn two_phase_set_remove_requires_presence() {
    let mut set = TwoPhaseSet::new("A");
    set.add("pasta");

    assert_eq!(set.remove(&"pasta"), Ok(()));
    assert!(set.query().is_empty());

    assert_eq!(
        set.remove(&"popcorn"),
        Err(SetError::ElementNotPresent("\"popcorn\"".to_string()))
    );
}

#[test]
fn two_phase_set_removed_elements_stay_removed() {
    let mut set = TwoPhaseSet::new("A");
    set.add("pasta");
    set.remove(&"pasta").unwrap();

    set.add("pasta");
    assert!(set.query().is_empty());
}

#[test]
fn two_phase_set_remove_many_is_atomic() {
    let mut set = TwoPhaseSet::new("A");
    set.add_many(["pasta", "popcorn"]);

    // One missing element fails the whole batch without mutating.
    assert!(set.remove_many(["pasta", "bread"]).is_err());
    assert_eq!(set.query(), values(["pasta", "popcorn"]));

    assert_eq!(set.remove_many(["pasta", "popcorn"]), Ok(()));
    assert!(set.query().is_empty());
}

#[test]
fn two_phase_set_merge_unions_both_halves() {
    let mut a = TwoPhaseSet::new("A");
    let mut b = TwoPhaseSet::new("B");

    a.add_many(["pasta", "popcorn"]);
    b.add("bread");
    a.remove(&"popcorn").unwrap();

    b.merge(a.payload());
    assert_eq!(b.query(), values(["pasta", "bread"]));

    // The tombstone travelled with the merge: popcorn cannot come back.
    b.add("popcorn");
    assert_eq!(b.query(), values(["pasta", "bread"]));
}

#[test]
fn two_phase_set_merge_is_idempotent() {
    let mut a = TwoPhaseSet::new("A");
    a.add_many(["pasta", "popcorn"]);
    a.remove(&"popcorn").unwrap();

    let before = a.payload();
    a.merge(before.clone());
    assert_eq!(a.payload(), before);
}
