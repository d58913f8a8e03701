use crate::model::fingerprint::{BitVector, SparseIntVect};

/// Shift applied to second-map keys so both hash spaces land on different bits.
pub const OFFSET: u64 = 8_388_608;

/// Projects two sparse hash maps into one `n_bits` wide vector.
///
/// Every nonzero key `k` of `first` sets bit `k % n_bits`, and every nonzero
/// key `k` of `second` sets bit `(k + OFFSET) % n_bits`. Collisions are kept
/// as a single set bit. Panics if `n_bits` is zero.
pub fn fold(first: &SparseIntVect, second: &SparseIntVect, n_bits: usize) -> BitVector {
    let mut bits = fold_keys(first.nonzero_keys(), n_bits);
    let width = n_bits as u64;
    let shift = OFFSET % width;
    for key in second.nonzero_keys() {
        bits.set(((key % width + shift) % width) as usize);
    }
    bits
}

/// Projects arbitrary keys into an `n_bits` wide vector by `key % n_bits`.
///
/// Re-projecting the on-bits of a vector of the same width reproduces it.
pub fn fold_keys(keys: impl IntoIterator<Item = u64>, n_bits: usize) -> BitVector {
    let mut bits = BitVector::new(n_bits);
    for key in keys {
        bits.set(project(key, n_bits));
    }
    bits
}

#[inline]
fn project(key: u64, n_bits: usize) -> usize {
    (key % n_bits as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse(keys: &[u64]) -> SparseIntVect {
        let mut v = SparseIntVect::new(OFFSET);
        for &k in keys {
            v.increment(k);
        }
        v
    }

    #[test]
    fn combined_keys_land_on_expected_bits() {
        let bits = fold(&sparse(&[5]), &sparse(&[3]), 16);
        let expected = ((3 + OFFSET) % 16) as usize;
        assert_eq!(bits.len(), 16);
        assert!(bits.get(5));
        assert!(bits.get(expected));
        assert_eq!(bits.ones().collect::<Vec<_>>(), {
            let mut v = vec![5, expected];
            v.sort_unstable();
            v.dedup();
            v
        });
    }

    #[test]
    fn empty_maps_give_zero_vector() {
        let bits = fold(&SparseIntVect::default(), &SparseIntVect::default(), 64);
        assert_eq!(bits.len(), 64);
        assert_eq!(bits.count_ones(), 0);
    }

    #[test]
    fn folding_ignores_insertion_order_and_counts() {
        let a = fold(&sparse(&[900, 7, 7, 42]), &sparse(&[1, 8_000_000]), 128);
        let b = fold(&sparse(&[42, 900, 7]), &sparse(&[8_000_000, 1, 1]), 128);
        assert_eq!(a, b);
    }

    #[test]
    fn refolding_on_bits_is_idempotent() {
        let original = fold(&sparse(&[3, 77, 1_000_003]), &sparse(&[12, 4_000_000]), 256);
        let again = fold_keys(original.ones().map(|b| b as u64), 256);
        assert_eq!(original, again);
    }

    #[test]
    fn offset_projection_does_not_wrap_for_large_keys() {
        // (u64::MAX + 8_388_608) % 1000 == (615 + 608) % 1000
        let bits = fold(&SparseIntVect::default(), &sparse(&[u64::MAX]), 1000);
        assert_eq!(bits.ones().collect::<Vec<_>>(), vec![223]);
    }

    #[test]
    fn collisions_collapse_to_one_bit() {
        let bits = fold_keys([1, 17, 33], 16);
        assert_eq!(bits.count_ones(), 1);
        assert!(bits.get(1));
    }
}
