use std::cmp::Ordering;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

/// Hashing and equality semantics for a [`HashTable`](crate::HashTable).
///
/// A strategy is bound at construction and consulted for every bucket
/// selection and key comparison. Implementations must be pure and
/// deterministic, and the two capabilities must agree with each other:
/// `compare(a, b) == Ordering::Equal` implies `hash(a) == hash(b)`.
/// A strategy that violates this makes equivalent keys land in different
/// buckets and silently breaks key uniqueness.
pub trait Strategy<K: ?Sized> {
    /// Returns the hash of `key`.
    fn hash(&self, key: &K) -> u64;

    /// Compares two keys. `Ordering::Equal` means the keys are equivalent;
    /// the table never distinguishes `Less` from `Greater`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// A [`Strategy`] built from two plain functions.
///
/// # Examples
///
/// ```
/// use liana::{FnStrategy, Strategy};
/// use std::cmp::Ordering;
///
/// let strategy = FnStrategy::new(
///     |key: &u32| u64::from(*key),
///     |a: &u32, b: &u32| a.cmp(b),
/// );
///
/// assert_eq!(strategy.hash(&7), 7);
/// assert_eq!(strategy.compare(&1, &1), Ordering::Equal);
/// ```
pub struct FnStrategy<H, C> {
    hash: H,
    compare: C,
}

impl<H, C> FnStrategy<H, C> {
    /// Creates a strategy from a hash function and a comparison function.
    pub fn new(hash: H, compare: C) -> FnStrategy<H, C> {
        FnStrategy { hash, compare }
    }
}

impl<K, H, C> Strategy<K> for FnStrategy<H, C>
where
    K: ?Sized,
    H: Fn(&K) -> u64,
    C: Fn(&K, &K) -> Ordering,
{
    fn hash(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.compare)(a, b)
    }
}

/// The default [`Strategy`]: hashes with a randomly seeded [`RandomState`]
/// and compares with [`Ord`].
///
/// Requires `K: Hash + Ord`. Two tables built from different
/// `DefaultStrategy` values hash the same key differently, so bucket
/// layouts are not reproducible across tables; observable behavior is.
pub struct DefaultStrategy<S = RandomState> {
    build_hasher: S,
}

impl DefaultStrategy {
    /// Creates a strategy with a random hash seed.
    pub fn new() -> DefaultStrategy {
        DefaultStrategy {
            build_hasher: RandomState::new(),
        }
    }
}

impl Default for DefaultStrategy {
    fn default() -> DefaultStrategy {
        DefaultStrategy::new()
    }
}

impl<S> DefaultStrategy<S> {
    /// Creates a strategy hashing with the given [`BuildHasher`].
    pub fn with_hasher(build_hasher: S) -> DefaultStrategy<S> {
        DefaultStrategy { build_hasher }
    }
}

impl<K, S> Strategy<K> for DefaultStrategy<S>
where
    K: ?Sized + Hash + Ord,
    S: BuildHasher,
{
    fn hash(&self, key: &K) -> u64 {
        self.build_hasher.hash_one(key)
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}
