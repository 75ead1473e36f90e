//! Statistics snapshots for index stores

/// Size snapshot of a single store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Number of distinct interned values
    pub value_count: usize,
    /// Reserved slots in the index-to-value sequence
    pub sequence_capacity: usize,
    /// Reserved slots in the value-to-index map
    pub map_capacity: usize,
    /// Rough heap footprint of both mappings, excluding data owned by the values
    pub estimated_memory_bytes: usize,
}

/// What a single compaction did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactionStats {
    /// Values in the source store
    pub original_count: usize,
    /// Entries in the deletion request, duplicates included
    pub requested: usize,
    /// Distinct values actually removed
    pub removed: usize,
    /// Values in the derived store
    pub surviving: usize,
}

impl CompactionStats {
    /// Fraction of the source store that was removed
    pub fn removal_ratio(&self) -> f64 {
        if self.original_count == 0 {
            0.0
        } else {
            self.removed as f64 / self.original_count as f64
        }
    }

    /// Deletion entries that named an already-requested value
    pub fn duplicate_requests(&self) -> usize {
        self.requested - self.removed
    }
}
