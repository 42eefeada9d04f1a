use std::fmt;
use std::hash::Hash;

use crate::raw;
use crate::strategy::{DefaultStrategy, Strategy};

/// A chaining hash table over borrowed keys and values.
///
/// The table maps keys to values through separate chaining: each bucket of a
/// resizable array holds a singly linked chain of entries, and an entry's
/// bucket is chosen by the injected [`Strategy`]'s hash modulo the current
/// capacity. Whenever an insertion would push the load factor (entries per
/// bucket slot) past `0.7`, the bucket array doubles and every entry is
/// redistributed.
///
/// # Ownership
///
/// `HashTable` is non-owning: it stores `&'a K` and `&'a V`, never the keys
/// and values themselves. The caller keeps the referenced data alive for at
/// least `'a` and remains responsible for releasing it; dropping the table
/// frees only its own buckets and chain nodes. Shared-ownership handles work
/// the same way: store `&Arc<T>` or keep the `Arc`s in a side arena.
///
/// # Examples
///
/// ```
/// use liana::{HashTable, Insert};
///
/// let mut table: HashTable<u32, &str> = HashTable::with_capacity(4)?;
///
/// assert_eq!(table.insert(&1, &"a")?, Insert::Inserted);
/// assert_eq!(table.insert(&1, &"b")?, Insert::Replaced(&"a"));
/// assert_eq!(table.len(), 1);
///
/// assert_eq!(table.remove(&1), Some(&"b"));
/// assert!(table.is_empty());
/// # Ok::<(), liana::Error>(())
/// ```
pub struct HashTable<'a, K: ?Sized, V: ?Sized, S = DefaultStrategy> {
    raw: raw::HashTable<'a, K, V, S>,
}

/// The result of a successful [`HashTable::insert`].
///
/// A tagged result rather than an in-band sentinel: a stored value can never
/// be confused with "this key was new".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert<'a, V: ?Sized> {
    /// The key was not present; a new entry was created.
    Inserted,
    /// An equivalent key was already present; its value was replaced in
    /// place and the previous value is returned.
    Replaced(&'a V),
}

impl<'a, V: ?Sized> Insert<'a, V> {
    /// Returns the replaced value, or `None` if the key was newly inserted.
    pub fn replaced(self) -> Option<&'a V> {
        match self {
            Insert::Inserted => None,
            Insert::Replaced(value) => Some(value),
        }
    }
}

/// The failure modes of table construction and insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A constructor argument was unusable: the initial capacity was zero.
    InvalidArgument,
    /// Bucket storage could not be allocated, either at construction or
    /// while growing. After a failed growth the table is unchanged and
    /// remains fully usable; whether to retry is the caller's call.
    AllocationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::AllocationFailed => f.write_str("bucket storage allocation failed"),
        }
    }
}

impl std::error::Error for Error {}

impl<'a, K, V> HashTable<'a, K, V>
where
    K: ?Sized + Hash + Ord,
    V: ?Sized,
{
    /// Creates an empty table with `capacity` buckets and the
    /// [`DefaultStrategy`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `capacity` is zero,
    /// [`Error::AllocationFailed`] if the bucket array cannot be allocated.
    /// The capacity is not otherwise range-checked.
    pub fn with_capacity(capacity: usize) -> Result<HashTable<'a, K, V>, Error> {
        HashTable::with_capacity_and_strategy(capacity, DefaultStrategy::new())
    }
}

impl<'a, K: ?Sized, V: ?Sized, S> HashTable<'a, K, V, S> {
    /// Creates an empty table with `capacity` buckets, hashing and comparing
    /// keys with `strategy`.
    ///
    /// The strategy must stay consistent with itself for the table's whole
    /// lifetime: keys that compare equal must hash identically.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `capacity` is zero,
    /// [`Error::AllocationFailed`] if the bucket array cannot be allocated.
    pub fn with_capacity_and_strategy(
        capacity: usize,
        strategy: S,
    ) -> Result<HashTable<'a, K, V, S>, Error> {
        Ok(HashTable {
            raw: raw::HashTable::with_capacity_and_strategy(capacity, strategy)?,
        })
    }

    /// Returns the number of entries, counting each equivalence class of
    /// keys at most once.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Returns the current number of bucket slots. Starts at the requested
    /// capacity and only ever doubles.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

impl<'a, K, V, S> HashTable<'a, K, V, S>
where
    K: ?Sized,
    V: ?Sized,
    S: Strategy<K>,
{
    /// Inserts a key/value pair.
    ///
    /// If an equivalent key is already present its value is replaced in
    /// place and returned as [`Insert::Replaced`]; the entry count does not
    /// change. Otherwise a new entry links at the tail of its bucket's chain
    /// and [`Insert::Inserted`] is returned.
    ///
    /// Crossing the `0.7` load factor grows the table first, rehashing every
    /// existing entry.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if a required growth cannot allocate the
    /// larger bucket array. The insertion is abandoned and the table is left
    /// exactly as it was.
    pub fn insert(&mut self, key: &'a K, value: &'a V) -> Result<Insert<'a, V>, Error> {
        self.raw.insert(key, value)
    }

    /// Removes the entry whose key compares equal to `key`, returning its
    /// value, or `None` if no such entry exists.
    ///
    /// Only the table's own chain node is released; the key and value
    /// referenced by the entry are untouched.
    pub fn remove(&mut self, key: &K) -> Option<&'a V> {
        self.raw.remove(key)
    }

    /// Returns `true` if an entry whose key compares equal to `key` exists.
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.contains_key(key)
    }
}

impl<'a, K: ?Sized, V: ?Sized, S> fmt::Debug for HashTable<'a, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
