use std::hash::BuildHasherDefault;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
/// Insertion order is kept, so iteration is deterministic across runs
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Set counterpart of FxIndexMap - used for neighborhood labels
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
