//! OpenAddressMap: flat-array storage, linear probing, tombstone deletion.

use core::cell::Cell;
use core::fmt;
use core::mem;
use core::slice;

use crate::hash::home_slot;

/// Slot count used by `OpenAddressMap::new`.
const DEFAULT_CAPACITY: usize = 16;

/// Non-empty slot percentage (occupied plus tombstones) at which an insert
/// doubles the table before writing. Keeping headroom below 100% bounds
/// probe length and guarantees every probe terminates at an empty slot.
const FILL_LIMIT_PERCENT: usize = 70;

/// A slot never returns to `Empty` once a key has died in it: probing stops
/// at `Empty`, so erasure must leave a `Tombstone` for entries that probed
/// past this slot to stay reachable.
#[derive(Debug)]
enum Slot<V> {
    Empty,
    Tombstone,
    Occupied { key: String, value: V },
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot::Empty
    }
}

/// Outcome of `OpenAddressMap::insert`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertResult {
    /// The key was written to a slot. `grew` reports whether this insert
    /// doubled the table before writing.
    Inserted { grew: bool },
    /// The key was already present; the map is unchanged. Insert never
    /// updates in place; `get_mut` is the mutation path.
    Duplicate,
}

impl InsertResult {
    /// True when the key was written.
    pub fn is_inserted(self) -> bool {
        matches!(self, InsertResult::Inserted { .. })
    }

    /// True when this insert doubled the table.
    pub fn grew(self) -> bool {
        matches!(self, InsertResult::Inserted { grew: true })
    }
}

/// String-keyed map storing entries directly in a flat slot array.
///
/// Collisions resolve by linear probing: an entry whose home slot is taken
/// occupies the next free slot along, wrapping at the end of the table.
/// Erasure leaves a tombstone so probe chains survive deletions, and the
/// table doubles once occupied and tombstone slots together approach
/// 70% of capacity.
///
/// Hashing folds ASCII case but key equality is byte-exact, so `"Foo"` and
/// `"foo"` share a probe chain yet are distinct entries.
///
/// Lookups take `&self` but maintain an interior-mutable cursor (the resume
/// point for `first`/`next`), which makes the map `!Sync`: share it across
/// threads only behind an exclusive lock. Moving it to another thread is
/// fine when `V: Send`.
pub struct OpenAddressMap<V> {
    slots: Vec<Slot<V>>,
    /// Occupied slot count; tombstones excluded.
    len: usize,
    /// Tombstone count; feeds the growth policy together with `len`.
    tombstones: usize,
    /// Slot index of the last entry returned by search or a cursor call.
    /// Advisory resume state only, never correctness-critical.
    cursor: Cell<Option<usize>>,
}

impl<V> OpenAddressMap<V> {
    /// Create a map with the default capacity of 16 slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a map with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero: slot addressing reduces hashes modulo
    /// the capacity, so an empty table cannot address any key.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Default::default);
        Self {
            slots,
            len: 0,
            tombstones: 0,
            cursor: Cell::new(None),
        }
    }

    /// Number of live entries; tombstones do not count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no entry is live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot count. Grows by doubling; never shrinks.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert `key` (duplicated into an owned `String`) mapped to `value`.
    ///
    /// A key that is already present leaves the map untouched and reports
    /// `InsertResult::Duplicate`; the load check runs after the duplicate
    /// check, so duplicates can never grow the table. Otherwise the entry
    /// is written to the first empty or tombstone slot on the key's probe
    /// chain and the cursor moves to the written slot.
    /// `InsertResult::Inserted { grew }` reports whether the table doubled
    /// before the write; this is the only resize signal the map emits.
    pub fn insert(&mut self, key: &str, value: V) -> InsertResult {
        if self.position(key).is_some() {
            return InsertResult::Duplicate;
        }
        let grew = self.at_fill_limit();
        if grew {
            self.grow();
        }
        let pos = self.probe_write(key.to_owned(), value);
        self.cursor.set(Some(pos));
        InsertResult::Inserted { grew }
    }

    /// Look `key` up. A hit returns the stored key and value and moves the
    /// cursor to the hit slot, so `next` resumes after it.
    pub fn search(&self, key: &str) -> Option<(&str, &V)> {
        let pos = self.position(key)?;
        self.cursor.set(Some(pos));
        Some(self.entry_at(pos))
    }

    /// `search`, returning only the value.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.search(key).map(|(_, value)| value)
    }

    /// True when `key` is live. Pure query; the cursor is not touched.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Mutable access to the value for `key`; moves the cursor like
    /// `search`. This is the mutation path for stored values; `insert`
    /// never updates in place.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let pos = self.position(key)?;
        self.cursor.set(Some(pos));
        match &mut self.slots[pos] {
            Slot::Occupied { value, .. } => Some(value),
            _ => unreachable!("probe landed on a non-occupied slot"),
        }
    }

    /// Remove `key`, returning its value. The slot becomes a tombstone,
    /// never `Empty`, so probe chains running through it stay intact. The
    /// cursor moves to the erased slot on a hit, as after a search. Absent
    /// keys are a no-op returning `None`. Capacity never shrinks.
    pub fn erase(&mut self, key: &str) -> Option<V> {
        let pos = self.position(key)?;
        self.cursor.set(Some(pos));
        match mem::replace(&mut self.slots[pos], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.len -= 1;
                self.tombstones += 1;
                Some(value)
            }
            _ => unreachable!("probe landed on a non-occupied slot"),
        }
    }

    /// First occupied slot in ascending index order, or `None` for an
    /// empty map (which clears the cursor). Starts a cursor walk that
    /// `next` continues.
    ///
    /// Slot order is a function of hashing and probing history, not
    /// insertion order.
    pub fn first(&self) -> Option<(&str, &V)> {
        self.scan_from(0)
    }

    /// Occupied slot strictly after the cursor, or `None` at the end of
    /// the table (which also clears the cursor). With no cursor set
    /// (before any `first`, or after an exhausted walk) it returns `None`
    /// without scanning rather than restarting.
    ///
    /// Any insert, erase, or growth invalidates an in-progress walk: the
    /// remaining sequence is unspecified, though always memory-safe.
    pub fn next(&self) -> Option<(&str, &V)> {
        let after = self.cursor.get()?;
        self.scan_from(after + 1)
    }

    /// Iterate live entries in ascending slot order, independent of the
    /// cursor.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Iterate live entries with mutable values, in ascending slot order.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots.iter_mut(),
        }
    }

    /// Slot index holding `key`, probing linearly from its home slot.
    /// Tombstones are skipped, `Empty` ends the probe, and a full wrap
    /// without a match gives up (reachable only when no slot is empty).
    fn position(&self, key: &str) -> Option<usize> {
        let capacity = self.slots.len();
        let mut pos = home_slot(key, capacity);
        for _ in 0..capacity {
            match &self.slots[pos] {
                Slot::Empty => return None,
                Slot::Occupied { key: held, .. } if held == key => return Some(pos),
                _ => {}
            }
            pos = (pos + 1) % capacity;
        }
        None
    }

    /// View of the occupied slot at `pos`. Callers pass indices produced
    /// by a probe or scan, which only land on occupied slots.
    fn entry_at(&self, pos: usize) -> (&str, &V) {
        match &self.slots[pos] {
            Slot::Occupied { key, value } => (key.as_str(), value),
            _ => unreachable!("probe landed on a non-occupied slot"),
        }
    }

    /// Advance the cursor to the first occupied slot at or after `start`
    /// and return its entry; clear the cursor at the end of the table.
    fn scan_from(&self, start: usize) -> Option<(&str, &V)> {
        for pos in start..self.slots.len() {
            if let Slot::Occupied { key, value } = &self.slots[pos] {
                self.cursor.set(Some(pos));
                return Some((key.as_str(), value));
            }
        }
        self.cursor.set(None);
        None
    }

    /// True when one more non-empty slot would reach the growth threshold.
    /// Tombstones count toward the fill: they lengthen probe chains
    /// exactly like live entries. Pessimistic by one slot when the write
    /// ends up reusing a tombstone.
    fn at_fill_limit(&self) -> bool {
        100 * (self.len + self.tombstones + 1) >= FILL_LIMIT_PERCENT * self.slots.len()
    }

    /// Write an entry into the first non-occupied slot on `key`'s probe
    /// chain and return the slot index. Reusing a tombstone keeps the
    /// chain contiguous, so later probes behave as if the deletion never
    /// happened.
    fn probe_write(&mut self, key: String, value: V) -> usize {
        let capacity = self.slots.len();
        // The growth policy keeps at least one slot empty, so the probe
        // always terminates.
        debug_assert!(self.len + self.tombstones < capacity);
        let mut pos = home_slot(&key, capacity);
        while matches!(self.slots[pos], Slot::Occupied { .. }) {
            pos = (pos + 1) % capacity;
        }
        if matches!(self.slots[pos], Slot::Tombstone) {
            self.tombstones -= 1;
        }
        self.slots[pos] = Slot::Occupied { key, value };
        self.len += 1;
        pos
    }

    /// Double the table: swap in a fresh all-empty array and reinsert every
    /// occupied entry under the new modulus. Hashes are a function of
    /// capacity, so slot positions are not portable and the cursor is
    /// cleared. Tombstones are dropped, not carried over; `len` is
    /// recomputed by the reinsertion.
    fn grow(&mut self) {
        let doubled = self.slots.len() * 2;
        let mut fresh = Vec::with_capacity(doubled);
        fresh.resize_with(doubled, Default::default);
        let old = mem::replace(&mut self.slots, fresh);
        self.len = 0;
        self.tombstones = 0;
        self.cursor.set(None);
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                self.probe_write(key, value);
            }
        }
    }
}

impl<V> Default for OpenAddressMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for OpenAddressMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(&str, &V)` in ascending slot order.
pub struct Iter<'a, V> {
    slots: slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { key, value } = slot {
                return Some((key.as_str(), value));
            }
        }
        None
    }
}

/// Iterator over `(&str, &mut V)` in ascending slot order.
pub struct IterMut<'a, V> {
    slots: slice::IterMut<'a, Slot<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { key, value } = slot {
                return Some((key.as_str(), value));
            }
        }
        None
    }
}
