//! [Hash Table] implementation with separate chaining.
//!
//! Each bucket heads a singly-linked chain of owned entries. The number of
//! buckets is fixed when the table is built, so chains simply get longer as
//! the load factor rises.
//!
//! [Hash Table]: https://en.wikipedia.org/wiki/Hash_table

use std::fmt;

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash, Hasher};
use core::mem;
use core::ops::Index;

use log::debug;

use crate::collections::DynamicArray;
use crate::error::TableError;

/// Bucket count used by [`HashTable::new`] and [`Default`].
pub const DEFAULT_BUCKETS: usize = 16;

/// Fowler–Noll–Vo (FNV-1a) non-cryptographic hash function
#[derive(Debug, Copy, Clone)]
pub struct FnvHasher {
    hash: u64,
}

impl FnvHasher {
    const FNV_PRIME: u64 = 0x100000001B3;
    const FNV_OFFSET_BASIS: u64 = 0xCBF29CE484222325;

    /// Creates a new [`FnvHasher`], initialized with `FNV_OFFSET_BASIS`.
    pub fn new() -> Self {
        Self {
            hash: FnvHasher::FNV_OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.hash ^= *byte as u64;
            self.hash = self.hash.wrapping_mul(Self::FNV_PRIME);
        }
    }
}

/// Builder for [`FnvHasher`]. Stateless, so equal keys hash identically
/// across tables and runs.
#[derive(Debug, Copy, Clone, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> Self::Hasher {
        Self::Hasher::new()
    }
}

/// Owning link to the next entry of a chain.
type Link<K, V> = Option<Box<Entry<K, V>>>;

struct Entry<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

/// [Hash Table] mapping keys to values, resolving collisions by chaining.
///
/// A key lives in the chain at `hash(key) % capacity()`. New keys are
/// prepended to their chain; updates happen in place.
///
/// [Hash Table]: https://en.wikipedia.org/wiki/Hash_table
pub struct HashTable<K, V, H = FnvBuildHasher> {
    /// Chain heads, one per bucket. Never grows after construction.
    buckets: DynamicArray<Link<K, V>>,
    /// Number of entries across all chains.
    len: usize,
    /// Builds the hasher for per-key hashing.
    build_hasher: H,
}

impl<K: Eq + Hash, V> HashTable<K, V, FnvBuildHasher> {
    /// Creates an empty `HashTable<K, V>` with [`DEFAULT_BUCKETS`] buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    ///
    /// let table: HashTable<&str, i32> = HashTable::new();
    /// assert_eq!(table.capacity(), 16);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(FnvBuildHasher)
    }

    /// Creates an empty `HashTable` with exactly `capacity` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    /// use arrays_hashing::error::TableError;
    ///
    /// let table: HashTable<&str, i32> = HashTable::with_capacity(8).unwrap();
    /// assert_eq!(table.capacity(), 8);
    ///
    /// let err = HashTable::<&str, i32>::with_capacity(0).unwrap_err();
    /// assert_eq!(err, TableError::ZeroCapacity);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_hasher(capacity, FnvBuildHasher)
    }
}

impl<K: Eq + Hash, V, H: BuildHasher> HashTable<K, V, H> {
    /// Creates an empty `HashTable` with [`DEFAULT_BUCKETS`] buckets which
    /// will use the given hash builder to hash keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    /// use std::hash::RandomState;
    ///
    /// let mut table = HashTable::with_hasher(RandomState::new());
    /// table.set(1, 2);
    /// assert_eq!(table.get(&1), Ok(&2));
    /// ```
    pub fn with_hasher(build_hasher: H) -> Self {
        Self::build(DEFAULT_BUCKETS, build_hasher)
    }

    /// Creates an empty `HashTable` with exactly `capacity` buckets, using
    /// `build_hasher` to hash the keys.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ZeroCapacity`] if `capacity` is zero.
    pub fn with_capacity_and_hasher(capacity: usize, build_hasher: H) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }

        Ok(Self::build(capacity, build_hasher))
    }

    fn build(capacity: usize, build_hasher: H) -> Self {
        let mut buckets = DynamicArray::with_capacity(capacity);
        for _ in 0..capacity {
            buckets.append(None);
        }

        debug!("created hash table with {capacity} buckets");

        Self {
            buckets,
            len: 0,
            build_hasher,
        }
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, a new entry is placed at
    /// the head of its bucket's chain and [`None`] is returned.
    ///
    /// If the table did have this key present, the value is replaced in place
    /// and the old value is returned. The key is not updated and the length is
    /// unchanged.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*chain length*) time to rule out an existing entry. The
    /// bucket array is never resized.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// assert_eq!(table.set("banana", 7), None);
    /// assert_eq!(table.set("banana", 10), Some(7));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);

        let mut link = self.buckets[index].as_deref_mut();
        while let Some(entry) = link {
            if entry.key == key {
                return Some(mem::replace(&mut entry.value, value));
            }
            link = entry.next.as_deref_mut();
        }

        let head = &mut self.buckets[index];
        let next = head.take();
        *head = Some(Box::new(Entry { key, value, next }));

        self.len += 1;

        None
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the table's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for the
    /// key type.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if the key is absent.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*chain length*) time, *O*(1) expected with a
    /// well-distributed hash and a low load factor.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    /// use arrays_hashing::error::TableError;
    ///
    /// let mut table = HashTable::new();
    /// table.set(String::from("apple"), 3);
    ///
    /// assert_eq!(table.get("apple"), Ok(&3));
    /// assert_eq!(table.get("pear"), Err(TableError::KeyNotFound));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V, TableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut link = self.buckets[self.bucket_index(key)].as_deref();
        while let Some(entry) = link {
            if entry.key.borrow() == key {
                return Ok(&entry.value);
            }
            link = entry.next.as_deref();
        }

        Err(TableError::KeyNotFound)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.set(1, "a");
    /// if let Ok(x) = table.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(table[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, TableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);

        let mut link = self.buckets[index].as_deref_mut();
        while let Some(entry) = link {
            if entry.key.borrow() == key {
                return Ok(&mut entry.value);
            }
            link = entry.next.as_deref_mut();
        }

        Err(TableError::KeyNotFound)
    }

    /// Removes a key from the table, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if the key is absent. The table is
    /// left unchanged.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*chain length*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    /// use arrays_hashing::error::TableError;
    ///
    /// let mut table = HashTable::new();
    /// table.set(1, "a");
    /// assert_eq!(table.remove(&1), Ok("a"));
    /// assert_eq!(table.remove(&1), Err(TableError::KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);

        // Stops on the matching link, or on the empty tail of the chain.
        let mut link = &mut self.buckets[index];
        while link.as_ref().is_some_and(|entry| entry.key.borrow() != key) {
            link = &mut link.as_mut().ok_or(TableError::KeyNotFound)?.next;
        }

        let mut removed = link.take().ok_or(TableError::KeyNotFound)?;
        *link = removed.next.take();
        self.len -= 1;

        Ok(removed.value)
    }

    /// Returns `true` if the table contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.set(1, "a");
    /// assert_eq!(table.contains_key(&1), true);
    /// assert_eq!(table.contains_key(&2), false);
    /// ```
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_ok()
    }

    /// Returns the hash value of the provided key.
    #[inline]
    fn hash_key<Q: Hash + ?Sized>(&self, key: &Q) -> u64 {
        self.build_hasher.hash_one(key)
    }

    /// Returns the bucket holding the chain for `key`.
    #[inline]
    fn bucket_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hash_key(key) % self.buckets.len() as u64) as usize
    }
}

impl<K, V, H> HashTable<K, V, H> {
    /// Removes every entry. The bucket count is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(4).unwrap();
    /// table.set(1, "a");
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        for head in self.buckets.as_mut_slice() {
            // Unlink one entry at a time; dropping a long chain recursively
            // could exhaust the stack.
            let mut link = head.take();
            while let Some(mut entry) = link {
                link = entry.next.take();
            }
        }

        self.len = 0;
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets, fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of entries to buckets, i.e. the average chain
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(4).unwrap();
    /// table.set('a', 1);
    /// table.set('b', 2);
    /// assert_eq!(table.load_factor(), 0.5);
    /// ```
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Visits every entry, bucket by bucket and head to tail within a chain.
    fn for_each_entry<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        for head in self.buckets.as_slice() {
            let mut link = head.as_deref();
            while let Some(entry) = link {
                f(&entry.key, &entry.value);
                link = entry.next.as_deref();
            }
        }
    }
}

impl<K, V, H> Drop for HashTable<K, V, H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Eq + Hash, V> Default for HashTable<K, V, FnvBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> Clone for HashTable<K, V, H>
where
    K: Eq + Hash + Clone,
    V: Clone,
    H: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        let mut table = Self::build(self.capacity(), self.build_hasher.clone());
        self.for_each_entry(|k, v| {
            table.set(k.clone(), v.clone());
        });
        table
    }
}

impl<K, V, H> fmt::Debug for HashTable<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.for_each_entry(|k, v| {
            map.entry(k, v);
        });
        map.finish()
    }
}

impl<K, Q, V, H> Index<&Q> for HashTable<K, V, H>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    H: BuildHasher,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `HashTable`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::hash::{BuildHasherDefault, RandomState};
    use std::rc::Rc;

    use rand::Rng;

    use super::*;

    /// Sends every key to the same bucket.
    #[derive(Default)]
    struct ConstantHasher;

    impl Hasher for ConstantHasher {
        fn finish(&self) -> u64 {
            7
        }

        fn write(&mut self, _: &[u8]) {}
    }

    type Colliding = BuildHasherDefault<ConstantHasher>;

    #[derive(Debug)]
    struct DropCounter {
        count: Rc<Cell<usize>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.count.set(self.count.get() + 1);
        }
    }

    #[test]
    fn test_default_capacities() {
        let t: HashTable<i32, i32> = HashTable::new();
        assert_eq!(t.capacity(), DEFAULT_BUCKETS);

        let t: HashTable<i32, i32> = HashTable::default();
        assert_eq!(t.capacity(), DEFAULT_BUCKETS);

        let t: HashTable<i32, i32, RandomState> = HashTable::with_hasher(RandomState::new());
        assert_eq!(t.capacity(), DEFAULT_BUCKETS);
        assert!(t.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            HashTable::<i32, i32>::with_capacity(0).err(),
            Some(TableError::ZeroCapacity)
        );
        assert_eq!(
            HashTable::<i32, i32, _>::with_capacity_and_hasher(0, RandomState::new()).err(),
            Some(TableError::ZeroCapacity)
        );
    }

    #[test]
    fn test_demo_scenario() {
        let mut table = HashTable::with_capacity(8).unwrap();

        table.set("apple", 3);
        table.set("banana", 7);
        table.set("orange", 5);
        table.set("banana", 10);

        assert_eq!(table.get("banana"), Ok(&10));
        assert_eq!(table.len(), 3);

        assert_eq!(table.remove("apple"), Ok(3));
        assert_eq!(table.get("apple"), Err(TableError::KeyNotFound));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_set() {
        let mut t = HashTable::new();

        assert_eq!(t.len(), 0);
        assert!(t.set(1, 2).is_none());
        assert_eq!(t.len(), 1);
        assert!(t.set(2, 4).is_none());
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(&1), Ok(&2));
        assert_eq!(t.get(&2), Ok(&4));
    }

    #[test]
    fn test_set_overwrite_keeps_len() {
        let mut t = HashTable::new();

        assert!(t.set(1, 2).is_none());
        assert_eq!(t.set(1, 3), Some(2));

        assert_eq!(t.get(&1), Ok(&3));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_remove_then_get() {
        let mut t = HashTable::new();
        t.set("k", 1);
        let len = t.len();

        t.set("v", 2);
        assert_eq!(t.remove("v"), Ok(2));

        assert_eq!(t.get("v"), Err(TableError::KeyNotFound));
        assert_eq!(t.len(), len);
    }

    #[test]
    fn test_missing_key() {
        let mut t: HashTable<i32, bool> = HashTable::new();

        assert_eq!(t.get(&0), Err(TableError::KeyNotFound));
        assert_eq!(t.remove(&0), Err(TableError::KeyNotFound));

        t.set(1, true);
        assert_eq!(t.remove(&0), Err(TableError::KeyNotFound));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_collisions_independent() {
        let mut t = HashTable::with_capacity_and_hasher(4, Colliding::default()).unwrap();

        assert!(t.set(1, "one").is_none());
        assert!(t.set(5, "five").is_none());
        assert!(t.set(9, "nine").is_none());
        assert_eq!(t.len(), 3);

        assert_eq!(t.get(&1), Ok(&"one"));
        assert_eq!(t.get(&5), Ok(&"five"));
        assert_eq!(t.get(&9), Ok(&"nine"));

        // Middle of the chain.
        assert_eq!(t.remove(&5), Ok("five"));
        assert_eq!(t.get(&1), Ok(&"one"));
        assert_eq!(t.get(&9), Ok(&"nine"));
        assert_eq!(t.get(&5), Err(TableError::KeyNotFound));

        // Head of the chain, the most recent insertion.
        assert_eq!(t.remove(&9), Ok("nine"));
        assert_eq!(t.get(&1), Ok(&"one"));

        // Tail of the chain.
        assert_eq!(t.set(3, "three"), None);
        assert_eq!(t.remove(&1), Ok("one"));
        assert_eq!(t.get(&3), Ok(&"three"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_remove_from_single_chain() {
        let mut t = HashTable::with_capacity_and_hasher(1, Colliding::default()).unwrap();
        for i in 0..6 {
            t.set(i, i * 10);
        }

        // Chain order is 5, 4, 3, 2, 1, 0 after head insertion.
        assert_eq!(t.remove(&7), Err(TableError::KeyNotFound));
        assert_eq!(t.len(), 6);

        for (removed, key) in [3, 5, 0, 1, 4, 2].into_iter().enumerate() {
            assert_eq!(t.remove(&key), Ok(key * 10));
            assert_eq!(t.remove(&key), Err(TableError::KeyNotFound));
            assert_eq!(t.len(), 5 - removed);
        }

        assert!(t.is_empty());
        t.set(8, 80);
        assert_eq!(t.get(&8), Ok(&80));
    }

    #[test]
    fn test_collision_update_in_chain() {
        let mut t = HashTable::with_capacity_and_hasher(1, Colliding::default()).unwrap();

        for i in 0..10 {
            t.set(i, i);
        }
        assert_eq!(t.set(0, 100), Some(0));
        assert_eq!(t.set(9, 900), Some(9));

        assert_eq!(t.len(), 10);
        assert_eq!(t.get(&0), Ok(&100));
        assert_eq!(t.get(&9), Ok(&900));
        assert_eq!(t.get(&4), Ok(&4));
    }

    #[test]
    fn test_entry_lives_in_hashed_bucket() {
        let mut t = HashTable::with_capacity(8).unwrap();
        for i in 0..64u32 {
            t.set(i, i);
        }

        for (index, head) in t.buckets.as_slice().iter().enumerate() {
            let mut link = head.as_deref();
            while let Some(entry) = link {
                assert_eq!(t.bucket_index(&entry.key), index);
                link = entry.next.as_deref();
            }
        }
    }

    #[test]
    fn test_insertions() {
        let mut t = HashTable::new();
        let count = if cfg!(miri) { 66 } else { 1001 };

        for i in 1..count {
            assert!(t.set(i, i).is_none());

            for j in 1..=i {
                assert_eq!(t.get(&j), Ok(&j));
            }
        }

        for i in count..(2 * count) {
            assert!(!t.contains_key(&i));
        }

        // remove forwards
        for i in 1..count {
            assert!(t.remove(&i).is_ok());

            for j in 1..=i {
                assert!(!t.contains_key(&j));
            }
        }

        assert!(t.is_empty());
        assert_eq!(t.capacity(), DEFAULT_BUCKETS);
    }

    #[test]
    fn test_get_mut() {
        let mut t = HashTable::new();

        t.set(1, 12);
        t.set(2, 8);
        t.set(5, 14);

        match t.get_mut(&5) {
            Err(_) => panic!(),
            Ok(x) => *x = 100,
        }
        assert_eq!(t.get(&5), Ok(&100));
        assert_eq!(t.get_mut(&6), Err(TableError::KeyNotFound));
    }

    #[test]
    fn test_load_factor() {
        let mut t = HashTable::with_capacity(8).unwrap();
        assert_eq!(t.load_factor(), 0.0);

        for i in 0..20 {
            t.set(i, ());
        }

        // No rehashing: the bucket count stays put.
        assert_eq!(t.capacity(), 8);
        assert_eq!(t.load_factor(), 2.5);
    }

    #[test]
    fn test_clear() {
        let mut t = HashTable::with_capacity(2).unwrap();
        for i in 0..10 {
            t.set(i, i);
        }

        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.capacity(), 2);
        assert_eq!(t.get(&3), Err(TableError::KeyNotFound));

        t.set(3, 3);
        assert_eq!(t.get(&3), Ok(&3));
    }

    #[test]
    fn test_drops() {
        let count = Rc::new(Cell::new(0));
        {
            let mut t = HashTable::with_capacity(3).unwrap();
            for i in 0..6 {
                t.set(
                    i,
                    DropCounter {
                        count: Rc::clone(&count),
                    },
                );
            }

            drop(t.remove(&2).unwrap());
            assert_eq!(count.get(), 1);

            // Replaced value is handed back, not dropped in place.
            let old = t.set(
                0,
                DropCounter {
                    count: Rc::clone(&count),
                },
            );
            assert_eq!(count.get(), 1);
            drop(old);
            assert_eq!(count.get(), 2);
        }

        assert_eq!(count.get(), 7);
    }

    #[test]
    fn test_long_chain_drop() {
        let mut t = HashTable::with_capacity_and_hasher(1, Colliding::default()).unwrap();
        for i in 0..200_000u32 {
            // Link directly; `set` would rescan the whole chain every time.
            let head = &mut t.buckets[0];
            let next = head.take();
            *head = Some(Box::new(Entry {
                key: i,
                value: (),
                next,
            }));
            t.len += 1;
        }

        assert_eq!(t.len(), 200_000);
        drop(t);
    }

    #[test]
    fn test_clone() {
        let mut t = HashTable::with_capacity(4).unwrap();
        t.set(1, 2);
        t.set(2, 4);

        let t2 = t.clone();
        assert_eq!(t2.get(&1), Ok(&2));
        assert_eq!(t2.get(&2), Ok(&4));
        assert_eq!(t2.len(), 2);
        assert_eq!(t2.capacity(), 4);

        t.set(1, 3);
        assert_eq!(t2.get(&1), Ok(&2));
    }

    #[test]
    fn test_debug_print() {
        let mut table = HashTable::with_capacity_and_hasher(1, Colliding::default()).unwrap();
        let empty: HashTable<i32, i32> = HashTable::new();

        table.set(1, 2);
        table.set(3, 4);

        // Chains are head-first, newest entry leading.
        assert_eq!(format!("{table:?}"), "{3: 4, 1: 2}");
        assert_eq!(format!("{empty:?}"), "{}");
    }

    #[test]
    fn test_index() {
        let mut table = HashTable::new();

        table.set(1, 2);
        table.set(2, 1);
        table.set(3, 4);

        assert_eq!(table[&2], 1);
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn test_index_nonexistent() {
        let mut table = HashTable::new();

        table.set(1, 2);

        let _ = table[&4];
    }

    #[test]
    fn test_fnv_deterministic() {
        let a = FnvBuildHasher.hash_one("banana");
        let b = FnvBuildHasher.hash_one(String::from("banana"));
        assert_eq!(a, b);

        // FNV-1a of the empty input is the offset basis.
        assert_eq!(FnvHasher::new().finish(), 0xCBF29CE484222325);
    }

    #[test]
    fn test_against_hashmap() {
        let mut rng = rand::rng();
        let mut map: HashMap<u16, u32> = HashMap::new();
        let mut table = HashTable::with_capacity(7).unwrap();

        for _ in 0..4096 {
            // Small key space so updates and removals actually hit.
            let key: u16 = rng.random_range(0..64);

            match rng.random_range(0..4) {
                0 => {
                    let value = rng.random();
                    assert_eq!(table.set(key, value), map.insert(key, value));
                }
                1 => {
                    assert_eq!(table.remove(&key).ok(), map.remove(&key));
                }
                _ => {
                    assert_eq!(table.get(&key).ok(), map.get(&key));
                }
            }

            assert_eq!(table.len(), map.len());
        }

        for (key, value) in &map {
            assert_eq!(table.get(key), Ok(value));
        }
    }
}
