// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_row_height --heading-base-level=0

//! Understory Row Height: measured row heights for lists of self-laid-out cells.
//!
//! Some list widgets must be told the height of every row before they render
//! it, but the cells themselves only know their height once their layout has
//! been resolved against the list's content width. This crate bridges the two:
//! it measures an off-screen instance of the row's cell, caches the result per
//! row, and answers later height requests from the cache until told otherwise.
//!
//! The core concepts are:
//!
//! - [`RowId`]: a `(section, index)` row address.
//! - [`HeightCache`]: the per-row height map, usable on its own.
//! - [`ListHost`] and [`MeasureCell`]: what the host widget provides (content
//!   width, off-screen cell construction, the live reuse pool, and layout).
//! - [`RowHeightDelegate`]: optional per-row callbacks for resolving a reuse
//!   identifier and populating a cell, told whether the cell is being measured
//!   off-screen or is about to be displayed.
//! - [`RowHeightHelper`]: ties these together and exposes
//!   [`height_for_row`](RowHeightHelper::height_for_row),
//!   [`cell_for_row`](RowHeightHelper::cell_for_row), and invalidation.
//!
//! This crate does **not** know about any particular UI toolkit. Hosts are
//! responsible for:
//!
//! - Forwarding their row-height and cell-for-row requests to the helper.
//! - Translating content changes into [`RowHeightHelper::invalidate`] or
//!   [`RowHeightHelper::invalidate_all`] calls.
//! - Calling the helper from the one thread that drives the widget.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_row_height::{ListHost, MeasureCell, NoDelegate, RowHeightHelper, RowId};
//!
//! // A cell whose text wraps every 10 units of width into 20-unit lines.
//! struct TextCell {
//!     chars: usize,
//! }
//!
//! impl MeasureCell for TextCell {
//!     fn fitting_size(&mut self, width: f64) -> Size {
//!         let per_line = (width / 10.0).max(1.0) as usize;
//!         let lines = self.chars.div_ceil(per_line).max(1);
//!         Size::new(width, lines as f64 * 20.0)
//!     }
//! }
//!
//! struct Host {
//!     width: f64,
//! }
//!
//! impl ListHost for Host {
//!     type Cell = TextCell;
//!
//!     fn content_width(&self) -> f64 {
//!         self.width
//!     }
//!
//!     fn make_offscreen_cell(&mut self, _reuse_id: &str) -> TextCell {
//!         TextCell { chars: 25 }
//!     }
//!
//!     fn dequeue_cell(&mut self, _reuse_id: &str, _row: RowId) -> TextCell {
//!         TextCell { chars: 25 }
//!     }
//! }
//!
//! let mut host = Host { width: 100.0 };
//! let mut helper = RowHeightHelper::with_reuse_identifier("Cell");
//!
//! let row = RowId::new(0, 0);
//! // 25 characters at 10 per line: 3 lines.
//! assert_eq!(helper.height_for_row(&mut host, &mut NoDelegate, row), 60.0);
//! assert_eq!(helper.cached_height(row), Some(60.0));
//!
//! // Narrower content: the cache notices the width change and remeasures.
//! host.width = 50.0;
//! assert_eq!(helper.height_for_row(&mut host, &mut NoDelegate, row), 100.0);
//! ```
//!
//! All extents live in the host's logical coordinate space and are expected
//! to be finite and non-negative.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod error;
mod helper;
mod host;
mod row;

pub use cache::HeightCache;
pub use error::MissingReuseIdentifier;
pub use helper::{RowHeightHelper, WidthPolicy};
pub use host::{ListHost, MeasureCell, NoDelegate, RowHeightDelegate};
pub use row::RowId;
