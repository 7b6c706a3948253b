//! End-to-end query scenarios across the whole stack.

use waverel::wavelet::{count_distinct_symbols, nth_element, select_first};
use waverel::{BinaryRelation, BitVec, Bitmap, IntVec, Pair, WaveletTree};

fn letters(text: &str) -> WaveletTree {
    let mut vec = IntVec::new(text.len(), 3).unwrap();
    for (i, b) in text.bytes().enumerate() {
        vec.set(i, (b - b'A') as u64);
    }
    WaveletTree::new(&vec)
}

fn sym(c: char) -> u64 {
    (c as u8 - b'A') as u64
}

// ============================================================================
// Bitmap over a literal bit string
// ============================================================================

#[test]
fn test_bitmap_scenario() {
    let bm = Bitmap::new(BitVec::from_bit_str("10100110101111"));

    assert_eq!(bm.len(), 14);
    assert_eq!(bm.rank1(13), 9);
    assert_eq!(bm.rank1(0), 1);
    assert_eq!(bm.rank0(13), 5);
    assert_eq!(bm.select1(5), Some(5));
    assert_eq!(bm.select0(3), Some(9));
    assert_eq!(bm.select1(10), None);
}

// ============================================================================
// Wavelet tree over a small numeric alphabet
// ============================================================================

#[test]
fn test_wavelet_sigma4_scenario() {
    let vec = IntVec::from_slice(&[
        0, 2, 2, 1, 2, 3, 1, 3, 2, 1, 3, 0, 0, 1, 2, 0, 1, 0, 0, 0, 3, 3, 2, 1,
    ])
    .unwrap();
    let wt = WaveletTree::new(&vec);

    assert_eq!(wt.access(7), 3);
    assert_eq!(wt.rank(0, 23), 7);
    assert_eq!(wt.select(3, 5), Some(21));
    assert_eq!(wt.select(1, 7), None);

    // 7 zeros and 6 ones, so the 12th smallest is a 1; its position is the
    // fifth 1 of the sequence.
    assert_eq!(nth_element(&wt, 0..24, 12), Some((1, 16)));
}

// ============================================================================
// Wavelet tree over letters
// ============================================================================

#[test]
fn test_wavelet_letters_scenario() {
    let wt = letters("EHDHACEEGBCBGCF");

    assert_eq!(wt.rank(sym('E'), 14), 3);
    assert_eq!(wt.select(sym('G'), 2), Some(12));
    assert_eq!(select_first(&wt, 9, sym('C')..=sym('C')), Some(10));
    assert_eq!(select_first(&wt, 14, sym('C')..=sym('C')), None);
    assert_eq!(count_distinct_symbols(&wt, 0..15, ..), 8);
    assert_eq!(count_distinct_symbols(&wt, 0..5, ..), 4); // EHDHA
}

// ============================================================================
// Binary relation
// ============================================================================

#[test]
fn test_relation_scenario() {
    let mut pairs = Vec::new();
    let matrix: &[(usize, &[u64])] = &[
        (0, &[4, 8]),
        (1, &[2, 4]),
        (2, &[4]),
        (3, &[2, 4, 6]),
        (4, &[2, 4, 7, 8]),
        (5, &[1, 3, 8, 9]),
        (6, &[0, 2]),
        (7, &[1, 3, 6, 8]),
        (8, &[1, 3, 4, 7, 8, 9]),
        (9, &[0, 2, 6, 7]),
        (10, &[3, 4, 7, 9]),
        (11, &[1, 2, 4, 8]),
    ];
    for &(object, labels) in matrix {
        for &label in labels {
            pairs.push(Pair { object, label });
        }
    }

    let rel = BinaryRelation::new(&pairs);

    assert_eq!(rel.len(), 40);
    assert_eq!(rel.num_objects(), 12);
    assert_eq!(rel.num_labels(), 10);

    assert_eq!(rel.rank(3, 4), 6);
    assert_eq!(rel.rank(11, 9), 40);

    // Label 5 never occurs.
    assert_eq!(rel.count_distinct_labels(0..=11, 0..=9), 9);
    assert_eq!(rel.obj_select(0, 5, 1), None);

    // Walking a single column through obj_select.
    let mut column = Vec::new();
    let mut next = 0;
    while let Some(object) = rel.obj_select(next, 8, 1) {
        column.push(object);
        next = object + 1;
        if next >= rel.num_objects() {
            break;
        }
    }
    assert_eq!(column, vec![0, 4, 5, 7, 8, 11]);
}

// ============================================================================
// Default-constructed instances
// ============================================================================

#[test]
fn test_empty_stack() {
    assert_eq!(BitVec::new().len(), 0);
    assert_eq!(IntVec::default().len(), 0);

    let bm = Bitmap::default();
    assert_eq!(bm.len(), 0);
    assert_eq!(bm.count_ones(), 0);

    let wt = WaveletTree::default();
    assert_eq!(wt.len(), 0);
    assert_eq!(wt.bits_per_symbol(), 0);
    assert_eq!(wt.max_symbol(), 0);

    let rel = BinaryRelation::default();
    assert_eq!(rel.len(), 0);
    assert_eq!(rel.num_objects(), 0);
    assert_eq!(rel.num_labels(), 0);
}
