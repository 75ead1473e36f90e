use crate::Index;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::stats::{CompactionStats, StoreStats};
use ahash::{AHashMap, AHashSet};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::{Enumerate, FusedIterator};
use std::slice;
use tracing::{debug, instrument, trace, warn};

/// Bidirectional interning store assigning dense, stable indices to distinct values.
///
/// The `IndexStore` keeps two mappings that are exact inverses of each other: an
/// ordered sequence from index to value and a hash map from value to index. Indices
/// are handed out in first-insertion order and always form the contiguous range
/// `[0, len)`.
///
/// # Architecture
/// - **Sequence**: `Vec<V>` where the position of a value is its index
/// - **Reverse map**: `AHashMap<V, Index>` for O(1) value lookups
/// - **Next index**: always `len()`, since the range is dense
///
/// # Compaction
/// Values are never removed in place. [`batch_delete`](Self::batch_delete) and
/// [`retain_where`](Self::retain_where) take `&self` and build a brand-new store
/// holding the survivors in their original relative order, reindexed from 0. The
/// source store is left untouched and stays usable.
///
/// # Performance Characteristics
/// - **Intern / lookup by value**: O(1) average
/// - **Lookup by index**: O(1) direct slice access
/// - **Batch delete**: O(k log k + n) for `k` requested values over `n` stored values
///
/// # Thread Safety
/// The store is not internally synchronised. Mutating calls take `&mut self`, so
/// sharing a store across threads requires an external lock around them; read-only
/// calls may run concurrently through shared references.
///
/// # Usage Example
/// ```rust
/// use vocab_core::IndexStore;
///
/// let mut store: IndexStore<String> = IndexStore::new();
/// assert_eq!(store.get_index("cat"), 0);
/// assert_eq!(store.get_index("dog"), 1);
/// assert_eq!(store.get_index("cat"), 0);
///
/// let pruned = store.batch_delete(["cat"]).unwrap();
/// assert_eq!(pruned.index_of("dog"), Some(0));
/// assert_eq!(pruned.count(), 1);
///
/// // The source store is unchanged
/// assert_eq!(store.count(), 2);
/// assert_eq!(store.index_of("cat"), Some(0));
/// ```
#[derive(Clone)]
pub struct IndexStore<V> {
    values: Vec<V>,              // index -> value
    indices: AHashMap<V, Index>, // value -> index
    trace_interning: bool,
}

impl<V> IndexStore<V>
where
    V: Eq + Hash + Clone,
{
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self { values: Vec::new(), indices: AHashMap::new(), trace_interning: false }
    }

    /// Creates a new empty store with room for `capacity` values.
    ///
    /// # Example
    /// ```rust
    /// use vocab_core::IndexStore;
    ///
    /// let store: IndexStore<u32> = IndexStore::with_capacity(1_000);
    /// assert!(store.is_empty());
    /// assert!(store.stats().sequence_capacity >= 1_000);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            indices: AHashMap::with_capacity(capacity),
            trace_interning: false,
        }
    }

    /// Creates a new empty store configured by `config`.
    pub fn with_config(config: &StoreConfig) -> Self {
        debug!(
            initial_capacity = config.initial_capacity,
            trace_interning = config.trace_interning,
            "Creating index store from configuration"
        );
        let mut store = Self::with_capacity(config.initial_capacity);
        store.trace_interning = config.trace_interning;
        store
    }

    /// Returns the index of `value`, interning it first if it is new.
    ///
    /// A known value is a pure read. A new value is appended to the sequence and
    /// receives the next index, which equals the store's length before the call.
    ///
    /// # Arguments
    /// * `value` - The value to look up or intern, borrowed in any form `V` can lend
    ///
    /// # Returns
    /// The value's dense index. Never fails.
    pub fn get_index<Q>(&mut self, value: &Q) -> Index
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = V> + ?Sized,
    {
        match self.indices.get(value) {
            Some(&index) => index,
            None => self.push_new(value.to_owned()),
        }
    }

    /// Interns an owned value, returning its index.
    ///
    /// Same semantics as [`get_index`](Self::get_index) but avoids a copy when the
    /// caller already owns the value.
    pub fn intern(&mut self, value: V) -> Index {
        match self.indices.get(&value) {
            Some(&index) => index,
            None => self.push_new(value),
        }
    }

    fn push_new(&mut self, value: V) -> Index {
        let index = self.values.len();
        if self.trace_interning {
            trace!(index, "Interned new value");
        }
        self.values.push(value.clone());
        self.indices.insert(value, index);
        index
    }

    /// Returns the index of `value` without ever interning it.
    pub fn index_of<Q>(&self, value: &Q) -> Option<Index>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.indices.get(value).copied()
    }

    /// Returns the value stored at `index`.
    ///
    /// # Errors
    /// [`StoreError::IndexOutOfRange`] if `index` is not in `[0, len)`.
    pub fn get_value(&self, index: Index) -> Result<&V> {
        self.values
            .get(index)
            .ok_or_else(|| StoreError::index_out_of_range(index, self.values.len()))
    }

    /// Checks whether `value` has been interned.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.indices.contains_key(value)
    }

    /// Checks whether `index` is currently assigned.
    pub fn has_index(&self, index: Index) -> bool {
        index < self.values.len()
    }

    /// Number of distinct interned values, which is also the next index to assign.
    pub fn count(&self) -> Index {
        self.values.len()
    }

    /// Alias of [`count`](Self::count).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns every interned value exactly once, in no particular order.
    pub fn values(&self) -> AHashSet<&V> {
        self.values.iter().collect()
    }

    /// Returns `(index, value)` pairs in ascending index order.
    ///
    /// Each call starts a fresh traversal from index 0.
    pub fn items(&self) -> Items<'_, V> {
        Items { inner: self.values.iter().enumerate() }
    }

    /// Iterates over values in index order.
    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.values.iter()
    }

    /// The index-to-value sequence; position `i` holds the value with index `i`.
    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    /// Builds a new store without the listed values.
    ///
    /// Survivors keep their original relative order and are reindexed densely from
    /// 0. Duplicate entries in `values` are tolerated. The receiver is never
    /// modified.
    ///
    /// # Arguments
    /// * `values` - Values to drop; every one must currently be interned
    ///
    /// # Errors
    /// [`StoreError::NotFound`] naming the first value that is not interned. No
    /// store is built in that case.
    ///
    /// # Example
    /// ```rust
    /// use vocab_core::IndexStore;
    ///
    /// let store: IndexStore<&str> = ["a", "b", "c", "d"].into_iter().collect();
    /// let derived = store.batch_delete(&["b"]).unwrap();
    ///
    /// assert_eq!(derived.as_slice(), &["a", "c", "d"]);
    /// assert_eq!(store.index_of("b"), Some(1));
    /// assert!(store.batch_delete(&["z"]).is_err());
    /// ```
    pub fn batch_delete<'a, I, Q>(&self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Q>,
        V: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized + 'a,
    {
        self.batch_delete_with_stats(values).map(|(store, _)| store)
    }

    /// [`batch_delete`](Self::batch_delete) that also reports what the compaction did.
    #[instrument(skip_all, fields(original_count = self.values.len()))]
    pub fn batch_delete_with_stats<'a, I, Q>(&self, values: I) -> Result<(Self, CompactionStats)>
    where
        I: IntoIterator<Item = &'a Q>,
        V: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized + 'a,
    {
        // Resolve everything before building anything.
        let mut doomed = Vec::new();
        for value in values {
            match self.index_of(value) {
                Some(index) => doomed.push(index),
                None => {
                    warn!(value = ?value, "Batch delete named a value that is not interned");
                    return Err(StoreError::not_found(value));
                }
            }
        }
        let requested = doomed.len();
        doomed.sort_unstable();
        doomed.dedup();

        let mut survivors = Vec::with_capacity(self.values.len() - doomed.len());
        let mut span_start = 0;
        for &index in &doomed {
            survivors.extend_from_slice(&self.values[span_start..index]);
            span_start = index + 1;
        }
        survivors.extend_from_slice(&self.values[span_start..]);

        let derived = self.derive(survivors);
        let stats = CompactionStats {
            original_count: self.values.len(),
            requested,
            removed: doomed.len(),
            surviving: derived.len(),
        };

        debug!(
            requested = stats.requested,
            removed = stats.removed,
            surviving = stats.surviving,
            "Compacted index store"
        );

        Ok((derived, stats))
    }

    /// Builds a new store keeping only the values for which `keep` returns `true`.
    ///
    /// `keep` sees each `(index, value)` pair once, in index order. Survivors are
    /// reindexed exactly as with [`batch_delete`](Self::batch_delete).
    ///
    /// # Example
    /// ```rust
    /// use vocab_core::IndexStore;
    ///
    /// let store: IndexStore<u32> = (10..20).collect();
    /// let evens = store.retain_where(|_, value| value % 2 == 0);
    ///
    /// assert_eq!(evens.as_slice(), &[10, 12, 14, 16, 18]);
    /// assert_eq!(evens.index_of(&14), Some(2));
    /// ```
    #[instrument(skip_all, fields(original_count = self.values.len()))]
    pub fn retain_where<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(Index, &V) -> bool,
    {
        let survivors: Vec<V> = self
            .values
            .iter()
            .enumerate()
            .filter(|&(index, value)| keep(index, value))
            .map(|(_, value)| value.clone())
            .collect();

        let derived = self.derive(survivors);
        debug!(
            removed = self.values.len() - derived.len(),
            surviving = derived.len(),
            "Filtered index store"
        );
        derived
    }

    /// Snapshot of the store's size and reserved capacity.
    pub fn stats(&self) -> StoreStats {
        let sequence_capacity = self.values.capacity();
        let map_capacity = self.indices.capacity();
        StoreStats {
            value_count: self.values.len(),
            sequence_capacity,
            map_capacity,
            estimated_memory_bytes: sequence_capacity * std::mem::size_of::<V>()
                + map_capacity * (std::mem::size_of::<V>() + std::mem::size_of::<Index>()),
        }
    }

    /// Rebuilds the reverse map for a sequence of distinct values.
    fn derive(&self, values: Vec<V>) -> Self {
        let indices =
            values.iter().cloned().enumerate().map(|(index, value)| (value, index)).collect();
        Self { values, indices, trace_interning: self.trace_interning }
    }
}

impl<V> Default for IndexStore<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for IndexStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexStore")
            .field("len", &self.values.len())
            .field("values", &self.values)
            .finish()
    }
}

// Equal sequences imply equal reverse maps.
impl<V: PartialEq> PartialEq for IndexStore<V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V: Eq> Eq for IndexStore<V> {}

impl<V> FromIterator<V> for IndexStore<V>
where
    V: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<V> Extend<V> for IndexStore<V>
where
    V: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        for value in iter {
            self.intern(value);
        }
    }
}

impl<'a, V> IntoIterator for &'a IndexStore<V>
where
    V: Eq + Hash + Clone,
{
    type Item = (Index, &'a V);
    type IntoIter = Items<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

impl<V> IntoIterator for IndexStore<V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Iterator over `(index, value)` pairs of an [`IndexStore`], in index order.
#[derive(Debug, Clone)]
pub struct Items<'a, V> {
    inner: Enumerate<slice::Iter<'a, V>>,
}

impl<'a, V> Iterator for Items<'a, V> {
    type Item = (Index, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Items<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for Items<'_, V> {}

impl<V> FusedIterator for Items<'_, V> {}
