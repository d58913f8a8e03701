use std::collections::BTreeMap;

/// Fixed-width binary fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    n_bits: usize,
    words: Vec<u64>,
}

impl BitVector {
    pub fn new(n_bits: usize) -> Self {
        Self {
            n_bits,
            words: vec![0; n_bits.div_ceil(64)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n_bits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_bits == 0
    }

    /// Sets `bit`. Panics if `bit >= len()`.
    pub fn set(&mut self, bit: usize) {
        assert!(bit < self.n_bits, "bit {bit} out of range for {} bits", self.n_bits);
        self.words[bit / 64] |= 1 << (bit % 64);
    }

    pub fn get(&self, bit: usize) -> bool {
        bit < self.n_bits && self.words[bit / 64] & (1 << (bit % 64)) != 0
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_bits).filter(move |&bit| self.get(bit))
    }

    /// Dense 0/1 representation of length `len()`.
    pub fn to_dense(&self) -> Vec<u8> {
        (0..self.n_bits).map(|bit| u8::from(self.get(bit))).collect()
    }
}

/// Sparse count vector keyed by non-negative hash codes below `length`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SparseIntVect {
    length: u64,
    entries: BTreeMap<u64, u32>,
}

impl SparseIntVect {
    pub fn new(length: u64) -> Self {
        Self {
            length,
            entries: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn increment(&mut self, key: u64) {
        *self.entries.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: u64) -> u32 {
        self.entries.get(&key).copied().unwrap_or(0)
    }

    pub fn nonzero_keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&key, _)| key)
    }

    pub fn nonzero_count(&self) -> usize {
        self.nonzero_keys().count()
    }
}

impl FromIterator<u64> for SparseIntVect {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut vect = SparseIntVect::default();
        for key in iter {
            vect.length = vect.length.max(key.saturating_add(1));
            vect.increment(key);
        }
        vect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitvector_set_get_and_dense() {
        let mut fp = BitVector::new(70);
        fp.set(0);
        fp.set(65);
        assert_eq!(fp.len(), 70);
        assert!(fp.get(65));
        assert!(!fp.get(64));
        assert!(!fp.get(500));
        assert_eq!(fp.count_ones(), 2);
        assert_eq!(fp.ones().collect::<Vec<_>>(), vec![0, 65]);

        let dense = fp.to_dense();
        assert_eq!(dense.len(), 70);
        assert_eq!(dense.iter().filter(|&&b| b == 1).count(), 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn bitvector_rejects_out_of_range_bit() {
        BitVector::new(8).set(8);
    }

    #[test]
    fn sparse_counts_and_keys() {
        let mut v = SparseIntVect::new(1 << 23);
        v.increment(42);
        v.increment(42);
        v.increment(7);
        assert_eq!(v.get(42), 2);
        assert_eq!(v.get(1), 0);
        assert_eq!(v.nonzero_keys().collect::<Vec<_>>(), vec![7, 42]);
        assert_eq!(v.nonzero_count(), 2);
        assert_eq!(v.length(), 1 << 23);
    }

    #[test]
    fn sparse_from_keys_tracks_length() {
        let v: SparseIntVect = [3u64, 9, 3].into_iter().collect();
        assert_eq!(v.length(), 10);
        assert_eq!(v.get(3), 2);
    }
}
