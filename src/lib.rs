//! open-address-map: a single-threaded, string-keyed map built on open
//! addressing with linear probing, tombstone deletion, and doubling
//! growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the whole table in one flat slot array so every operation
//!   is a short probe over contiguous memory, with no per-entry boxes or
//!   chain links.
//! - Layers:
//!   - hash: the case-folded rolling hash and the modulo reduction that
//!     turn a key into its home slot for a given capacity.
//!   - open_address_map: the slot array, probe loops, growth policy, and
//!     the cursor backing search/first/next resumption.
//!
//! Probing and deletion
//! - A lookup probes linearly from the key's home slot and stops at the
//!   first `Empty` slot; a byte-equal key ends the probe with a hit.
//! - Erasure therefore cannot empty a slot: it leaves a `Tombstone`,
//!   which lookups skip and inserts may reuse. Probe chains running
//!   through a tombstone stay intact.
//!
//! Growth policy
//! - Occupied and tombstone slots both count toward fill. When one more
//!   write would reach 70% of capacity, the table doubles and every live
//!   entry rehashes under the new modulus; tombstones are dropped.
//! - Growth is reported to the caller through
//!   `InsertResult::Inserted { grew }` rather than observed out of band.
//!
//! Hashing vs. equality (caution)
//! - The hash folds ASCII case but equality is byte-exact: `"Foo"` and
//!   `"foo"` collide into one probe chain yet remain distinct entries.
//!   Callers wanting case-insensitive keys must normalize before insert
//!   and lookup.
//!
//! Constraints
//! - Single-threaded: lookups take `&self` but update an interior-mutable
//!   cursor (`Cell`), so the map is `!Sync`.
//! - Hash values depend on table capacity; slot indices never survive a
//!   growth.
//! - Duplicate inserts are no-ops reporting `Duplicate`; `get_mut` is the
//!   in-place mutation path.
//! - Capacity is always positive and never shrinks.
//!
//! Notes and non-goals
//! - Keys are `str` only; values are any owned `V`.
//! - No update-on-insert, no entry API, no capacity reservation beyond
//!   the constructor.
//! - Iteration order is slot order (an artifact of hashing and probing
//!   history), not insertion order.
//! - Public API surface is `OpenAddressMap` with its iterators and
//!   `InsertResult`; the hash module is an implementation detail.

mod hash;
mod open_address_map;
mod open_address_map_proptest;

// Public surface
pub use open_address_map::{InsertResult, Iter, IterMut, OpenAddressMap};
