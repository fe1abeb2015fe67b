//! Tests for AgeRange and AgeSet: range validity and overlap detection.

use proptest::prelude::*;
use rstest::rstest;

use harvest_spec::domain::{Age, AgeOrRange, AgeRange, AgeSet, DomainError};

fn range(start: Age, end: Age) -> AgeRange {
    AgeRange::new(start, end).expect("valid range")
}

// ============================================================
// AgeRange
// ============================================================

#[test]
fn given_start_after_end_when_creating_range_then_invalid_range() {
    // Act
    let result = AgeRange::new(30, 20);

    // Assert
    assert_eq!(result, Err(DomainError::InvalidRange { start: 30, end: 20 }));
}

#[test]
fn given_single_age_range_when_checking_bounds_then_contains_only_that_age() {
    let r = range(10, 10);

    assert!(r.contains(10));
    assert!(!r.contains(9));
    assert!(!r.contains(11));
}

#[rstest]
#[case(range(10, 20), range(20, 30), true)]
#[case(range(10, 20), range(5, 10), true)]
#[case(range(10, 20), range(12, 15), true)]
#[case(range(10, 20), range(21, 30), false)]
#[case(range(10, 20), range(0, 9), false)]
fn given_two_ranges_when_checking_overlap_then_inclusive_bounds_decide(
    #[case] a: AgeRange,
    #[case] b: AgeRange,
    #[case] expected: bool,
) {
    assert_eq!(a.overlaps(&b), expected);
    assert_eq!(b.overlaps(&a), expected);
}

// ============================================================
// AgeSet
// ============================================================

#[test]
fn given_repeated_age_when_adding_then_duplicate_age_echoes_token() {
    // Arrange
    let mut set = AgeSet::new();
    set.add(AgeOrRange::Age(10), "10").unwrap();

    // Act
    let result = set.add(AgeOrRange::Age(10), "10");

    // Assert
    assert_eq!(
        result,
        Err(DomainError::DuplicateAge {
            text: "10".to_string()
        })
    );
}

#[test]
fn given_range_then_inner_age_when_adding_then_age_in_range() {
    // Arrange
    let mut set = AgeSet::new();
    set.add(AgeOrRange::Range(range(5, 15)), "5-15").unwrap();

    // Act
    let err = set.add(AgeOrRange::Age(10), "10").unwrap_err();

    // Assert
    assert!(err.is_overlap());
    assert_eq!(
        err,
        DomainError::AgeInRange {
            text: "10".to_string(),
            range_start: 5,
            range_end: 15
        }
    );
}

#[test]
fn given_age_then_covering_range_when_adding_then_range_contains_age() {
    // Arrange
    let mut set = AgeSet::new();
    set.add(AgeOrRange::Age(10), "10").unwrap();

    // Act
    let err = set.add(AgeOrRange::Range(range(5, 15)), "5-15").unwrap_err();

    // Assert
    assert!(err.is_overlap());
    assert_eq!(
        err,
        DomainError::RangeContainsAge {
            text: "5-15".to_string(),
            age: 10
        }
    );
}

#[test]
fn given_overlapping_ranges_when_adding_then_reports_previous_range() {
    let mut set = AgeSet::new();
    set.add(AgeOrRange::Range(range(10, 20)), "10-20").unwrap();

    let err = set.add(AgeOrRange::Range(range(20, 25)), "20-25").unwrap_err();

    assert_eq!(
        err,
        DomainError::OverlappingRange {
            text: "20-25".to_string(),
            range_start: 10,
            range_end: 20
        }
    );
    assert_eq!(
        err.to_string(),
        "the age range 20-25 overlaps with the previous age range 10-20"
    );
}

#[test]
fn given_failed_add_when_inspecting_set_then_unchanged() {
    let mut set = AgeSet::new();
    set.add(AgeOrRange::Range(range(10, 20)), "10-20").unwrap();

    let _ = set.add(AgeOrRange::Age(15), "15");

    assert!(set.ages().is_empty());
    assert_eq!(set.ranges(), &[range(10, 20)]);
}

#[test]
fn given_disjoint_entries_when_frozen_then_selector_lists_them_in_age_order() {
    let mut set = AgeSet::new();
    set.add(AgeOrRange::Range(range(40, 60)), "40-60").unwrap();
    set.add(AgeOrRange::Age(5), "5").unwrap();
    set.add(AgeOrRange::Range(range(10, 20)), "10-20").unwrap();

    let selector = set.into_selector();

    assert_eq!(selector.to_string(), "5 10-20 40-60");
}

proptest! {
    #[test]
    fn age_inside_range_conflicts_in_either_order(
        start in 0u16..1000,
        len in 0u16..100,
        offset in 0u16..100,
    ) {
        let r = range(start, start + len);
        let age = start + offset.min(len);

        let mut range_first = AgeSet::new();
        range_first.add(AgeOrRange::Range(r), &r.to_string()).unwrap();
        let err = range_first.add(AgeOrRange::Age(age), &age.to_string()).unwrap_err();
        prop_assert!(err.is_overlap());

        let mut age_first = AgeSet::new();
        age_first.add(AgeOrRange::Age(age), &age.to_string()).unwrap();
        let err = age_first.add(AgeOrRange::Range(r), &r.to_string()).unwrap_err();
        prop_assert!(err.is_overlap());
    }

    #[test]
    fn overlapping_ranges_fail_and_disjoint_ranges_are_kept(
        a_start in 0u16..1000,
        a_len in 0u16..100,
        gap in 0u16..100,
        b_len in 0u16..100,
    ) {
        let a = range(a_start, a_start + a_len);
        let disjoint = range(a.end() + 1 + gap, a.end() + 1 + gap + b_len);
        let overlapping = range(a.end(), a.end() + b_len);

        let mut set = AgeSet::new();
        set.add(AgeOrRange::Range(a), &a.to_string()).unwrap();
        prop_assert!(set.add(AgeOrRange::Range(overlapping), &overlapping.to_string()).is_err());
        prop_assert!(set.add(AgeOrRange::Range(disjoint), &disjoint.to_string()).is_ok());
        prop_assert_eq!(set.ranges().len(), 2);
    }
}
