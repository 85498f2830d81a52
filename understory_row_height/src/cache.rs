// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-row height storage.

use hashbrown::HashMap;

use crate::RowId;

/// Map from [`RowId`] to a previously measured height.
///
/// At most one height is stored per row. Entries are never refreshed on
/// their own; they leave the cache only through [`HeightCache::remove`],
/// [`HeightCache::remove_section`], or [`HeightCache::clear`].
///
/// The cache also remembers the content width its entries were measured at,
/// so that owners can detect a width change and drop heights that no longer
/// match the layout.
#[derive(Clone, Debug, Default)]
pub struct HeightCache {
    heights: HashMap<RowId, f64>,
    measured_width: Option<f64>,
}

impl HeightCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached height for `row`, if any.
    #[must_use]
    pub fn get(&self, row: RowId) -> Option<f64> {
        self.heights.get(&row).copied()
    }

    /// Returns `true` if a height is cached for `row`.
    #[must_use]
    pub fn contains(&self, row: RowId) -> bool {
        self.heights.contains_key(&row)
    }

    /// Stores `height` for `row`, measured at `width`.
    ///
    /// Returns the previously cached height, if one existed.
    pub fn insert(&mut self, row: RowId, height: f64, width: f64) -> Option<f64> {
        self.measured_width = Some(width);
        self.heights.insert(row, height)
    }

    /// Removes the entry for `row` and returns it.
    ///
    /// Other rows are left untouched.
    pub fn remove(&mut self, row: RowId) -> Option<f64> {
        self.heights.remove(&row)
    }

    /// Removes every entry that belongs to `section`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_section(&mut self, section: usize) -> usize {
        let before = self.heights.len();
        self.heights.retain(|row, _| row.section != section);
        before - self.heights.len()
    }

    /// Removes every entry and forgets the measured width.
    pub fn clear(&mut self) {
        self.heights.clear();
        self.measured_width = None;
    }

    /// Content width the current entries were measured at.
    ///
    /// `None` until the first insertion after construction or [`HeightCache::clear`].
    #[must_use]
    pub fn measured_width(&self) -> Option<f64> {
        self.measured_width
    }

    /// Number of cached rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Iterates over cached `(row, height)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, f64)> + '_ {
        self.heights.iter().map(|(row, height)| (*row, *height))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::HeightCache;
    use crate::RowId;

    #[test]
    fn remove_touches_only_the_given_row() {
        let mut cache = HeightCache::new();
        cache.insert(RowId::new(0, 0), 10.0, 320.0);
        cache.insert(RowId::new(0, 1), 20.0, 320.0);

        assert_eq!(cache.remove(RowId::new(0, 0)), Some(10.0));
        assert_eq!(cache.get(RowId::new(0, 0)), None);
        assert_eq!(cache.get(RowId::new(0, 1)), Some(20.0));

        // Removing an absent row is a no-op.
        assert_eq!(cache.remove(RowId::new(0, 0)), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_replaces_the_single_entry_for_a_row() {
        let mut cache = HeightCache::new();
        assert_eq!(cache.insert(RowId::new(3, 3), 10.0, 100.0), None);
        assert_eq!(cache.insert(RowId::new(3, 3), 12.0, 100.0), Some(10.0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(RowId::new(3, 3)), Some(12.0));
    }

    #[test]
    fn remove_section_keeps_other_sections() {
        let mut cache = HeightCache::new();
        cache.insert(RowId::new(0, 0), 1.0, 100.0);
        cache.insert(RowId::new(1, 0), 2.0, 100.0);
        cache.insert(RowId::new(1, 1), 3.0, 100.0);
        cache.insert(RowId::new(2, 0), 4.0, 100.0);

        assert_eq!(cache.remove_section(1), 2);

        let mut rows: Vec<_> = cache.iter().map(|(row, _)| row).collect();
        rows.sort_unstable();
        assert_eq!(rows, [RowId::new(0, 0), RowId::new(2, 0)]);
        assert_eq!(cache.remove_section(7), 0);
    }

    #[test]
    fn clear_forgets_entries_and_width() {
        let mut cache = HeightCache::new();
        assert_eq!(cache.measured_width(), None);
        cache.insert(RowId::new(0, 0), 1.0, 240.0);
        assert_eq!(cache.measured_width(), Some(240.0));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.measured_width(), None);
    }
}
