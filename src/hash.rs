//! Case-folded polynomial rolling hash for slot addressing.
//!
//! Keys hash by accumulating `h = h * 33 + byte` over their ASCII-lowercased
//! bytes in wrapping `u64` arithmetic, then reducing modulo the table
//! capacity. Because the reduction is part of the hash, slot positions are a
//! function of capacity and must be recomputed whenever the table grows.
//!
//! The case fold is one-sided by design: hashing lowercases, key equality
//! stays byte-exact. Keys that differ only in ASCII case therefore land in
//! the same bucket and resolve by probing, but remain distinct entries.

/// Rolling hash over the ASCII-lowercased bytes of `key`. No seed; the same
/// key always folds to the same value.
pub(crate) fn fold_hash(key: &str) -> u64 {
    let mut h: u64 = 0;
    for b in key.bytes() {
        h = h.wrapping_mul(33).wrapping_add(u64::from(b.to_ascii_lowercase()));
    }
    h
}

/// Home slot for `key` in a table of `capacity` slots.
pub(crate) fn home_slot(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (fold_hash(key) % capacity as u64) as usize
}
