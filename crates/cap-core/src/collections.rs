//! Hash collection aliases shared by every `cap-*` crate.
//!
//! With the `fx-hash` feature these resolve to `rustc_hash`'s Fx maps;
//! otherwise to the std SipHash maps.  Call sites use `Map::default()`
//! rather than `Map::new()` so both resolutions compile.

#[cfg(feature = "fx-hash")]
pub type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(feature = "fx-hash")]
pub type Set<T> = rustc_hash::FxHashSet<T>;

#[cfg(not(feature = "fx-hash"))]
pub type Map<K, V> = std::collections::HashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub type Set<T> = std::collections::HashSet<T>;
