// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The row height helper.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;

use crate::{
    HeightCache, ListHost, MeasureCell, MissingReuseIdentifier, RowHeightDelegate, RowId,
};

/// What to do with cached heights when the host's content width changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum WidthPolicy {
    /// Drop every cached height as soon as a request arrives at a content
    /// width different from the one the cache was filled at.
    #[default]
    InvalidateOnChange,
    /// Keep serving cached heights until the caller invalidates them.
    ///
    /// Callers are responsible for calling
    /// [`RowHeightHelper::invalidate_all`] on rotation, resize, or any other
    /// change to the content width.
    Manual,
}

/// Caches row heights for a list whose cells are sized by their own layout.
///
/// Hosts forward their "height for row" and "cell for row" requests to
/// [`height_for_row`](Self::height_for_row) and
/// [`cell_for_row`](Self::cell_for_row). The first height request for a row
/// measures an off-screen template cell at the current content width; later
/// requests are answered from the cache until the row is invalidated.
///
/// Reuse identifiers come from the fixed identifier when one is set, and
/// from [`RowHeightDelegate::reuse_identifier`] otherwise.
///
/// The helper is confined to the thread that drives the list widget. It
/// holds no locks; all mutation goes through `&mut self`.
pub struct RowHeightHelper<C> {
    reuse_identifier: Option<String>,
    width_policy: WidthPolicy,
    separator_extent: f64,
    cache: HeightCache,
    templates: HashMap<String, C>,
}

impl<C> fmt::Debug for RowHeightHelper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowHeightHelper")
            .field("reuse_identifier", &self.reuse_identifier)
            .field("width_policy", &self.width_policy)
            .field("separator_extent", &self.separator_extent)
            .field("cache", &self.cache)
            .field("templates", &self.templates.len())
            .finish_non_exhaustive()
    }
}

impl<C> Default for RowHeightHelper<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RowHeightHelper<C> {
    /// Creates a helper with no fixed reuse identifier.
    ///
    /// Identifiers must then be resolved by the delegate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reuse_identifier: None,
            width_policy: WidthPolicy::default(),
            separator_extent: 0.0,
            cache: HeightCache::new(),
            templates: HashMap::new(),
        }
    }

    /// Creates a helper that uses `reuse_identifier` for every row.
    #[must_use]
    pub fn with_reuse_identifier(reuse_identifier: impl Into<String>) -> Self {
        let mut helper = Self::new();
        helper.set_reuse_identifier(Some(reuse_identifier.into()));
        helper
    }

    /// Sets the width policy, builder style.
    #[must_use]
    pub fn with_width_policy(mut self, policy: WidthPolicy) -> Self {
        self.set_width_policy(policy);
        self
    }

    /// Sets the separator extent, builder style.
    #[must_use]
    pub fn with_separator_extent(mut self, extent: f64) -> Self {
        self.set_separator_extent(extent);
        self
    }

    /// The fixed reuse identifier, if one is set.
    #[must_use]
    pub fn reuse_identifier(&self) -> Option<&str> {
        self.reuse_identifier.as_deref()
    }

    /// Sets or clears the fixed reuse identifier.
    ///
    /// An empty identifier is treated as unset.
    pub fn set_reuse_identifier(&mut self, reuse_identifier: Option<String>) {
        self.reuse_identifier = reuse_identifier.filter(|id| !id.is_empty());
    }

    /// The current width policy.
    #[must_use]
    pub fn width_policy(&self) -> WidthPolicy {
        self.width_policy
    }

    /// Sets the width policy.
    ///
    /// Switching to [`WidthPolicy::InvalidateOnChange`] drops every cached
    /// height, since entries cached under [`WidthPolicy::Manual`] may have
    /// been measured at different widths.
    pub fn set_width_policy(&mut self, policy: WidthPolicy) {
        if policy == self.width_policy {
            return;
        }
        if policy == WidthPolicy::InvalidateOnChange {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                removed = self.cache.len(),
                "width policy changed; dropping row heights"
            );
            self.cache.clear();
        }
        self.width_policy = policy;
    }

    /// Extent added to every measured height.
    #[must_use]
    pub fn separator_extent(&self) -> f64 {
        self.separator_extent
    }

    /// Sets the extent added to every measured height.
    ///
    /// Hosts that draw a row separator outside the cell's content view use
    /// this to account for it. Already cached heights are not adjusted; call
    /// [`invalidate_all`](Self::invalidate_all) if that matters.
    pub fn set_separator_extent(&mut self, extent: f64) {
        debug_assert!(
            extent.is_finite() && extent >= 0.0,
            "separator extent must be finite and non-negative, got {extent}"
        );
        self.separator_extent = sanitize(extent);
    }

    /// The cached height for `row`, without measuring.
    #[must_use]
    pub fn cached_height(&self, row: RowId) -> Option<f64> {
        self.cache.get(row)
    }

    /// Read access to the underlying cache.
    #[must_use]
    pub fn cache(&self) -> &HeightCache {
        &self.cache
    }

    /// Drops the cached height of `row`, if any.
    ///
    /// Call this when the row's content changed in a way that may change its
    /// height. Other rows keep their heights.
    pub fn invalidate(&mut self, row: RowId) {
        let _removed = self.cache.remove(row);
        #[cfg(feature = "tracing")]
        tracing::debug!(%row, removed = _removed.is_some(), "invalidated row height");
    }

    /// Drops the cached heights of every row in `section`.
    pub fn invalidate_section(&mut self, section: usize) {
        let _removed = self.cache.remove_section(section);
        #[cfg(feature = "tracing")]
        tracing::debug!(section, removed = _removed, "invalidated section heights");
    }

    /// Drops every cached height.
    ///
    /// Call this on bulk reloads and on font or content width changes.
    pub fn invalidate_all(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(removed = self.cache.len(), "invalidated all row heights");
        self.cache.clear();
    }

    /// Number of off-screen template cells currently kept.
    #[must_use]
    pub fn offscreen_templates_len(&self) -> usize {
        self.templates.len()
    }

    /// Drops the off-screen template cells.
    ///
    /// New templates are requested from the host on the next measurement.
    /// Cached heights are kept.
    pub fn clear_offscreen_templates(&mut self) {
        self.templates.clear();
    }
}

impl<C: MeasureCell> RowHeightHelper<C> {
    /// Returns the height of `row`, measuring it if it is not cached.
    ///
    /// A cached height is returned without touching the host or the delegate
    /// beyond reading the content width. Otherwise the off-screen template
    /// for the row's reuse identifier is populated through
    /// [`RowHeightDelegate::prepare_cell`] with `offscreen == true`, laid out
    /// at the host's content width, and its fitting height is cached.
    ///
    /// If the host reports [`ListHost::self_sizing_height`], that value is
    /// returned as is, without validation, and nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`MissingReuseIdentifier`] when a measurement is needed and no
    /// reuse identifier can be determined for `row`.
    pub fn try_height_for_row<H, D>(
        &mut self,
        host: &mut H,
        delegate: &mut D,
        row: RowId,
    ) -> Result<f64, MissingReuseIdentifier>
    where
        H: ListHost<Cell = C> + ?Sized,
        D: RowHeightDelegate<C> + ?Sized,
    {
        if let Some(height) = host.self_sizing_height() {
            return Ok(height);
        }

        let width = host.content_width();
        debug_assert!(
            width.is_finite() && width >= 0.0,
            "content width must be finite and non-negative, got {width}"
        );
        let width = sanitize(width);

        if self.width_policy == WidthPolicy::InvalidateOnChange
            && let Some(measured) = self.cache.measured_width()
            && measured != width
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = measured,
                to = width,
                removed = self.cache.len(),
                "content width changed; dropping row heights"
            );
            self.cache.clear();
        }

        if let Some(height) = self.cache.get(row) {
            #[cfg(feature = "tracing")]
            tracing::trace!(%row, height, "row height cache hit");
            return Ok(height);
        }

        let reuse_id =
            resolve_reuse_id::<C, D>(self.reuse_identifier.as_deref(), delegate, row)?;
        let template = self
            .templates
            .entry_ref(reuse_id.as_ref())
            .or_insert_with(|| host.make_offscreen_cell(&reuse_id));
        template.prepare_for_reuse();
        delegate.prepare_cell(template, row, true);

        let fitted = template.fitting_size(width).height;
        debug_assert!(
            fitted.is_finite() && fitted >= 0.0,
            "fitting height must be finite and non-negative, got {fitted}"
        );
        let height = sanitize(fitted) + self.separator_extent;

        #[cfg(feature = "tracing")]
        tracing::debug!(%row, reuse_id = %reuse_id, width, height, "measured row height");
        self.cache.insert(row, height, width);
        Ok(height)
    }

    /// Returns the height of `row`, measuring it if it is not cached.
    ///
    /// See [`try_height_for_row`](Self::try_height_for_row).
    ///
    /// # Panics
    ///
    /// Panics if a measurement is needed and no reuse identifier can be
    /// determined for `row`.
    pub fn height_for_row<H, D>(&mut self, host: &mut H, delegate: &mut D, row: RowId) -> f64
    where
        H: ListHost<Cell = C> + ?Sized,
        D: RowHeightDelegate<C> + ?Sized,
    {
        match self.try_height_for_row(host, delegate, row) {
            Ok(height) => height,
            Err(err) => panic!("{err}"),
        }
    }

    /// Dequeues a live cell for `row` and populates it for display.
    ///
    /// The delegate's [`prepare_cell`](RowHeightDelegate::prepare_cell) is
    /// called with `offscreen == false`. The height cache is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`MissingReuseIdentifier`] when no reuse identifier can be
    /// determined for `row`.
    pub fn try_cell_for_row<H, D>(
        &self,
        host: &mut H,
        delegate: &mut D,
        row: RowId,
    ) -> Result<C, MissingReuseIdentifier>
    where
        H: ListHost<Cell = C> + ?Sized,
        D: RowHeightDelegate<C> + ?Sized,
    {
        let reuse_id =
            resolve_reuse_id::<C, D>(self.reuse_identifier.as_deref(), delegate, row)?;
        let mut cell = host.dequeue_cell(&reuse_id, row);
        delegate.prepare_cell(&mut cell, row, false);
        Ok(cell)
    }

    /// Dequeues a live cell for `row` and populates it for display.
    ///
    /// See [`try_cell_for_row`](Self::try_cell_for_row).
    ///
    /// # Panics
    ///
    /// Panics if no reuse identifier can be determined for `row`.
    pub fn cell_for_row<H, D>(&self, host: &mut H, delegate: &mut D, row: RowId) -> C
    where
        H: ListHost<Cell = C> + ?Sized,
        D: RowHeightDelegate<C> + ?Sized,
    {
        match self.try_cell_for_row(host, delegate, row) {
            Ok(cell) => cell,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Fixed identifier first, then the delegate. Empty identifiers count as missing.
fn resolve_reuse_id<'a, C, D>(
    fixed: Option<&'a str>,
    delegate: &mut D,
    row: RowId,
) -> Result<Cow<'a, str>, MissingReuseIdentifier>
where
    D: RowHeightDelegate<C> + ?Sized,
{
    if let Some(id) = fixed {
        return Ok(Cow::Borrowed(id));
    }
    match delegate.reuse_identifier(row) {
        Some(id) if !id.is_empty() => Ok(Cow::Owned(id.into_owned())),
        _ => Err(MissingReuseIdentifier { row }),
    }
}

/// Clamps non-finite and negative extents to zero.
fn sanitize(extent: f64) -> f64 {
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}
