//! Property tests for the page enumerator.
//!
//! The page loop must emit exactly the ascending set-bit sequence, visiting
//! each index once regardless of page size or resume pattern, and the total
//! must match the population count.

use proptest::prelude::*;
use siftdb_bits::BitVector;

fn vector_from_indices(capacity: usize, indices: &[usize]) -> BitVector {
    let mut vector = BitVector::new(capacity);
    if capacity == 0 {
        return vector;
    }
    for &i in indices {
        vector.set(i % capacity, true);
    }
    vector
}

fn page_all(vector: &BitVector, page_size: usize) -> Vec<usize> {
    let mut page = vec![0usize; page_size];
    let mut from = 0isize;
    let mut rows = Vec::new();
    loop {
        let found = vector.page(&mut page, &mut from);
        rows.extend_from_slice(&page[..found]);
        if from == -1 {
            break;
        }
    }
    rows
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn page_round_trip(
        capacity in 1usize..600,
        indices in prop::collection::vec(0usize..600, 0..64),
        page_size in 1usize..70,
    ) {
        let vector = vector_from_indices(capacity, &indices);

        let expected: Vec<usize> = (0..capacity).filter(|&i| vector.get(i)).collect();

        let rows = page_all(&vector, page_size);
        prop_assert_eq!(&rows, &expected);
        prop_assert_eq!(rows.len(), vector.count());
    }

    #[test]
    fn page_resume_from_arbitrary_cursor(
        capacity in 64usize..400,
        indices in prop::collection::vec(0usize..400, 1..32),
        start in 0usize..400,
    ) {
        let vector = vector_from_indices(capacity, &indices);
        let start = start % capacity;

        let mut page = vec![0usize; capacity];
        let mut from = start as isize;
        let found = vector.page(&mut page, &mut from);

        let expected: Vec<usize> = (start..capacity).filter(|&i| vector.get(i)).collect();
        prop_assert_eq!(&page[..found], &expected[..]);
    }

    #[test]
    fn count_matches_naive(
        capacity in 0usize..600,
        indices in prop::collection::vec(0usize..600, 0..64),
    ) {
        let vector = vector_from_indices(capacity, &indices);
        let naive = (0..capacity).filter(|&i| vector.get(i)).count();
        prop_assert_eq!(vector.count(), naive);
    }
}
