//! Shorthand for some annoying-to-write types

pub type Set<T> = fxhash::FxHashSet<T>;
pub type Map<K, V> = im::HashMap<K, V, fxhash::FxBuildHasher>;
