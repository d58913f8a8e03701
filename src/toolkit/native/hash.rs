/// Mixes `value` into `seed` (the boost `hash_combine` recipe on 32 bits).
#[inline]
pub fn combine(seed: &mut u32, value: u32) {
    *seed ^= value
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(*seed << 6)
        .wrapping_add(*seed >> 2);
}

/// Hashes a sequence of values starting from a zero seed.
pub fn hash_values(values: impl IntoIterator<Item = u32>) -> u32 {
    let mut seed = 0;
    for v in values {
        combine(&mut seed, v);
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_order_sensitive_and_stable() {
        let a = hash_values([1, 2, 3]);
        assert_eq!(a, hash_values([1, 2, 3]));
        assert_ne!(a, hash_values([3, 2, 1]));
        assert_ne!(hash_values([]), hash_values([0]));
    }
}
