//! Tests for `PatternBitset` membership, removal and iteration

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::PatternBitset;

    // Verifies new PatternBitset is empty
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = PatternBitset::new(10);
        assert_eq!(bitset.iter().next(), None);
        assert!((0..10).all(|i| !bitset.contains(i)));
    }

    // Tests insertion and containment checking
    // Verified by removing the bit-setting logic from insert method
    #[test]
    fn test_insert_and_contains() {
        let mut bitset = PatternBitset::new(10);
        bitset.insert(5);
        assert!(bitset.contains(5));
        assert!(!bitset.contains(3));
        assert_eq!(bitset.to_vec(), vec![5]);
    }

    // Tests out-of-range indices are ignored rather than growing the set
    // Verified by removing the bounds check in insert
    #[test]
    fn test_insert_out_of_range() {
        let mut bitset = PatternBitset::new(4);
        bitset.insert(4);
        bitset.insert(100);
        assert!(bitset.to_vec().is_empty());
        assert!(!bitset.contains(100));
    }

    // Tests remove reports whether the pattern was present
    // Verified by always returning true from remove
    #[test]
    fn test_remove_reports_presence() {
        let mut bitset = PatternBitset::all(3);
        assert!(bitset.remove(1));
        assert!(!bitset.remove(1));
        assert!(!bitset.remove(7));
        assert_eq!(bitset.to_vec(), vec![0, 2]);
    }

    // Tests creation of bitset with all bits set
    // Verified by initializing all bits to 0 instead of 1
    #[test]
    fn test_all_bits_set() {
        let bitset = PatternBitset::all(5);
        for i in 0..5 {
            assert!(bitset.contains(i));
        }
        assert!(!bitset.contains(5));
        assert_eq!(bitset.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    // Tests sets with the same members compare equal whatever the insertion order
    // Verified by deriving equality from an insertion log
    #[test]
    fn test_equality_ignores_order() {
        let mut first = PatternBitset::new(6);
        first.insert(4);
        first.insert(1);
        let mut second = PatternBitset::all(6);
        for pattern in [0, 2, 3, 5] {
            second.remove(pattern);
        }
        assert_eq!(first, second);
    }
}
