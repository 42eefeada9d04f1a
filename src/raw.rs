// A separately-chained hash table over borrowed keys and values.

use std::cmp::Ordering;
use std::mem;

use crate::map::{Error, Insert};
use crate::strategy::Strategy;

// Growth trigger: the table doubles before an insertion would push
// `len / capacity` past this ratio.
const LOAD_FACTOR: f64 = 0.7;

type Link<'a, K, V> = Option<Box<Entry<'a, K, V>>>;

// A node in a bucket's chain. Key and value are borrowed; the table
// owns only the node itself.
struct Entry<'a, K: ?Sized, V: ?Sized> {
    key: &'a K,
    value: &'a V,
    next: Link<'a, K, V>,
}

pub struct HashTable<'a, K: ?Sized, V: ?Sized, S> {
    buckets: Vec<Link<'a, K, V>>,
    len: usize,
    strategy: S,
}

// Reserves a zeroed bucket array, surfacing allocation failure instead
// of aborting.
fn alloc_buckets<'a, K: ?Sized, V: ?Sized>(capacity: usize) -> Result<Vec<Link<'a, K, V>>, Error> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|_| Error::AllocationFailed)?;
    buckets.resize_with(capacity, || None);
    Ok(buckets)
}

impl<'a, K: ?Sized, V: ?Sized, S> HashTable<'a, K, V, S> {
    pub fn with_capacity_and_strategy(capacity: usize, strategy: S) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidArgument);
        }

        Ok(HashTable {
            buckets: alloc_buckets(capacity)?,
            len: 0,
            strategy,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }
}

impl<'a, K, V, S> HashTable<'a, K, V, S>
where
    K: ?Sized,
    V: ?Sized,
    S: Strategy<K>,
{
    fn bucket_index(&self, key: &K) -> usize {
        // Capacity is at least 1 and only ever doubles, so the modulus
        // is never zero.
        (self.strategy.hash(key) % self.buckets.len() as u64) as usize
    }

    pub fn insert(&mut self, key: &'a K, value: &'a V) -> Result<Insert<'a, V>, Error> {
        // Grow first if this insertion could breach the load factor; the
        // epsilon keeps float rounding from triggering a spurious resize.
        // On growth failure the table is untouched and the insertion is
        // abandoned.
        if (self.len + 1) as f64 / self.buckets.len() as f64 > LOAD_FACTOR + f64::EPSILON {
            self.grow()?;
        }

        // Index under the (possibly new) capacity.
        let index = self.bucket_index(key);
        let strategy = &self.strategy;

        // Walk the chain end to end: an equivalent key is updated in
        // place, otherwise the new entry links at the tail.
        let mut link = &mut self.buckets[index];
        loop {
            match link {
                Some(entry) if strategy.compare(entry.key, key) == Ordering::Equal => {
                    let old = mem::replace(&mut entry.value, value);
                    return Ok(Insert::Replaced(old));
                }
                Some(entry) => link = &mut entry.next,
                None => {
                    *link = Some(Box::new(Entry {
                        key,
                        value,
                        next: None,
                    }));
                    self.len += 1;
                    return Ok(Insert::Inserted);
                }
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<&'a V> {
        let index = self.bucket_index(key);
        let strategy = &self.strategy;

        let mut link = &mut self.buckets[index];
        loop {
            match link {
                Some(entry) if strategy.compare(entry.key, key) == Ordering::Equal => {
                    // Unlink the node; its key and value stay alive in
                    // the caller's hands.
                    let value = entry.value;
                    *link = entry.next.take();
                    self.len -= 1;
                    return Some(value);
                }
                Some(entry) => link = &mut entry.next,
                None => return None,
            }
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        let mut entry = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(e) = entry {
            if self.strategy.compare(e.key, key) == Ordering::Equal {
                return true;
            }
            entry = e.next.as_deref();
        }
        false
    }

    // Doubles the bucket array and relinks every node under its new
    // index. The only fallible step is reserving the new array, and it
    // happens before the live table is touched; relinking reuses the
    // existing nodes, so a failed grow leaves the table exactly as it
    // was. Relinking also bypasses the insert path, so no nested
    // load-factor check can fire mid-rehash.
    fn grow(&mut self) -> Result<(), Error> {
        // Keep doubling until the pending insertion fits under the load
        // factor, in case the table was created far over capacity.
        let mut new_capacity = self.buckets.len() * 2;
        while (self.len + 1) as f64 / new_capacity as f64 > LOAD_FACTOR + f64::EPSILON {
            new_capacity *= 2;
        }

        let new_buckets = alloc_buckets(new_capacity)?;
        let old_buckets = mem::replace(&mut self.buckets, new_buckets);

        for mut head in old_buckets {
            while let Some(mut entry) = head {
                head = entry.next.take();

                let index = (self.strategy.hash(entry.key) % new_capacity as u64) as usize;
                entry.next = self.buckets[index].take();
                self.buckets[index] = Some(entry);
            }
        }

        Ok(())
    }
}

impl<'a, K: ?Sized, V: ?Sized, S> Drop for HashTable<'a, K, V, S> {
    fn drop(&mut self) {
        // Unlink chains iteratively; the default recursive drop of a
        // boxed chain can blow the stack when a hostile hash function
        // funnels every entry into one bucket.
        for head in &mut self.buckets {
            let mut link = head.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }
    }
}
