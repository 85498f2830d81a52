// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams between the helper and the host list widget.
//!
//! The helper never owns the widget, its cells, or the delegate. It borrows a
//! [`ListHost`] and a [`RowHeightDelegate`] for the duration of a single call
//! and asks them for everything toolkit-specific: how wide the content area
//! is, how to build an off-screen cell, how to dequeue a live one, and how to
//! put row content into a cell.

use alloc::borrow::Cow;

use kurbo::Size;

use crate::RowId;

/// A cell whose layout can be resolved off-screen.
pub trait MeasureCell {
    /// Resolves the cell's layout at a fixed `width` with unconstrained height
    /// and returns the fitting size.
    ///
    /// Only the height of the result is used; the width is reported back for
    /// hosts that want to assert on it.
    fn fitting_size(&mut self, width: f64) -> Size;

    /// Resets content left over from a previous measurement.
    ///
    /// Called on an off-screen template before it is repopulated for another
    /// row. The default does nothing.
    fn prepare_for_reuse(&mut self) {}
}

/// The list-display widget the helper answers for.
pub trait ListHost {
    /// Cell type produced by this host.
    type Cell: MeasureCell;

    /// Current width of the list's content area, in the host's logical units.
    ///
    /// Off-screen cells are measured at exactly this width so that wrapped
    /// content breaks the same way it will on screen.
    fn content_width(&self) -> f64;

    /// Builds a fresh cell for `reuse_id` that is not part of the visible
    /// hierarchy.
    ///
    /// The helper calls this at most once per identifier and keeps the result
    /// as the off-screen template for every later measurement.
    fn make_offscreen_cell(&mut self, reuse_id: &str) -> Self::Cell;

    /// Obtains a live cell for `reuse_id` from the widget's reuse pool.
    fn dequeue_cell(&mut self, reuse_id: &str, row: RowId) -> Self::Cell;

    /// Height to report when the host sizes its rows natively.
    ///
    /// Returning `Some` makes the helper pass the value straight through
    /// without measuring or caching anything. The default, `None`, means the
    /// host relies on the helper to measure.
    ///
    /// The value is the host's own sentinel (for example a negative
    /// "automatic" marker) and is not clamped or checked like measured
    /// extents are.
    fn self_sizing_height(&self) -> Option<f64> {
        None
    }
}

/// Optional callbacks used by [`RowHeightHelper`](crate::RowHeightHelper).
///
/// Both methods have defaults, so implementors only provide what they need.
pub trait RowHeightDelegate<C> {
    /// Reuse identifier for `row`.
    ///
    /// Consulted only when the helper has no fixed identifier. The default
    /// returns `None`, meaning this delegate cannot resolve identifiers.
    fn reuse_identifier(&mut self, row: RowId) -> Option<Cow<'_, str>> {
        let _ = row;
        None
    }

    /// Applies the content of `row` to `cell`.
    ///
    /// `offscreen` is `true` when the cell is only being measured and `false`
    /// when it is about to be displayed; work that cannot change the layout
    /// (image loading, animations) can be skipped in the first case.
    fn prepare_cell(&mut self, cell: &mut C, row: RowId, offscreen: bool) {
        let _ = (cell, row, offscreen);
    }
}

/// Delegate with neither capability.
///
/// Useful when a fixed reuse identifier is configured and cells need no
/// per-row content, for example in tests or placeholder lists.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDelegate;

impl<C> RowHeightDelegate<C> for NoDelegate {}
