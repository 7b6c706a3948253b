//! Serde round-trips for the data-carrying types.
#![cfg(feature = "serde")]

use waverel::{BinaryRelation, BitVec, Bitmap, IntVec, Pair, WaveletTree};

#[test]
fn test_bitvec_roundtrip() {
    let vec = BitVec::from_bit_str("10100110101111");
    let json = serde_json::to_string(&vec).unwrap();
    let restored: BitVec = serde_json::from_str(&json).unwrap();
    assert_eq!(vec, restored);
}

#[test]
fn test_bitmap_roundtrip() {
    let bm = Bitmap::new(BitVec::from_bit_str("10100110101111"));
    let json = serde_json::to_string(&bm).unwrap();
    let restored: Bitmap = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), bm.len());
    for pos in 0..bm.len() {
        assert_eq!(restored.rank1(pos), bm.rank1(pos));
    }
    assert_eq!(restored.select1(5), bm.select1(5));
}

#[test]
fn test_wavelet_roundtrip() {
    let vec = IntVec::from_slice(&[0, 2, 2, 1, 2, 3, 1, 3, 2, 1, 3, 0]).unwrap();
    let wt = WaveletTree::new(&vec);
    let json = serde_json::to_string(&wt).unwrap();
    let restored: WaveletTree = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), wt.len());
    assert_eq!(restored.bits_per_symbol(), wt.bits_per_symbol());
    for pos in 0..wt.len() {
        assert_eq!(restored.access(pos), wt.access(pos));
    }
}

#[test]
fn test_relation_roundtrip() {
    let rel = BinaryRelation::new(&[
        Pair { object: 0, label: 1 },
        Pair { object: 1, label: 2 },
        Pair { object: 1, label: 4 },
        Pair { object: 3, label: 0 },
    ]);
    let json = serde_json::to_string(&rel).unwrap();
    let restored: BinaryRelation = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), rel.len());
    assert_eq!(restored.num_objects(), rel.num_objects());
    assert_eq!(restored.num_labels(), rel.num_labels());
    assert_eq!(restored.rank(3, 4), rel.rank(3, 4));
    assert_eq!(restored.obj_select(0, 4, 1), Some(1));
}
