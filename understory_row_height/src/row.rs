// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row addressing.

use core::fmt;

/// Address of a row in a sectioned list: `(section, index)`.
///
/// Identity is positional. A `RowId` stays meaningful only as long as the
/// host's data source does not insert, remove, or reorder rows; callers that
/// do so are expected to invalidate the affected heights.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId {
    /// Section the row belongs to.
    pub section: usize,
    /// Position of the row within its section.
    pub index: usize,
}

impl RowId {
    /// Creates a row identifier.
    #[must_use]
    pub const fn new(section: usize, index: usize) -> Self {
        Self { section, index }
    }
}

impl From<(usize, usize)> for RowId {
    fn from((section, index): (usize, usize)) -> Self {
        Self::new(section, index)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.index)
    }
}
