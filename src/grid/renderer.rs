use crate::{
    foundation::error::SpriteGridResult,
    grid::perf::{DeviceProfile, OverscanConfig, estimate_overscan_rows},
    grid::window::{GridGeometry, RenderWindow, WindowLayout, WindowPolicy, compute_layout},
};

/// An ordered, indexable item sequence, stable within a window epoch.
pub trait ItemSource {
    /// Item type handed to the render callback.
    type Item;

    /// Total item count.
    fn len(&self) -> usize;

    /// Whether the source holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `index`, or `None` when the index is out of range.
    fn get(&self, index: usize) -> Option<&Self::Item>;
}

impl<T> ItemSource for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

/// Grid configuration, serializable so hosts can persist it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridOptions {
    /// Number of columns; must be >= 1.
    pub column_count: usize,
    /// Gap between rows/columns in pixels.
    pub gap_px: u32,
    /// Overscan configuration.
    pub overscan: OverscanConfig,
    /// Render-window retention policy.
    pub window_policy: WindowPolicy,
    /// Device capability used by the overscan estimator.
    pub device_profile: DeviceProfile,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            column_count: 4,
            gap_px: 8,
            overscan: OverscanConfig::default(),
            window_policy: WindowPolicy::default(),
            device_profile: DeviceProfile::detect(),
        }
    }
}

/// Windowed grid over an [`ItemSource`].
///
/// Inputs are push-based: layout measurements, scroll offsets, and option
/// changes mark the state dirty, and a single [`GridRenderer::refresh`]
/// coalesces them into at most one window update. Epoch resets (item count or
/// column count changed) are likewise deferred to the next refresh so a reset
/// can never re-enter an in-progress render pass.
#[derive(Debug)]
pub struct GridRenderer<S> {
    source: S,
    options: GridOptions,
    visible_height_px: u32,
    item_size_px: u32,
    scroll_offset_px: u64,
    epoch: (usize, usize),
    window: Option<RenderWindow>,
    layout: WindowLayout,
    pending_reset: bool,
}

impl<S: ItemSource> GridRenderer<S> {
    /// Construct a renderer over `source`. Layout starts unmeasured; the
    /// window stays empty until the first [`GridRenderer::refresh`] after
    /// [`GridRenderer::set_layout`].
    pub fn new(source: S, options: GridOptions) -> Self {
        let epoch = (source.len(), options.column_count);
        Self {
            source,
            options,
            visible_height_px: 0,
            item_size_px: 0,
            scroll_offset_px: 0,
            epoch,
            window: None,
            layout: WindowLayout::empty(),
            pending_reset: false,
        }
    }

    /// Current options.
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Replace options. A column-count change starts a new epoch at the next
    /// refresh.
    pub fn set_options(&mut self, options: GridOptions) {
        if options.column_count != self.options.column_count {
            self.pending_reset = true;
        }
        self.options = options;
    }

    /// Clone current options, apply `f`, and delegate to
    /// [`GridRenderer::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut GridOptions)) {
        let mut next = self.options;
        f(&mut next);
        self.set_options(next);
    }

    /// Push a layout measurement: visible container height and per-item size.
    pub fn set_layout(&mut self, visible_height_px: u32, item_size_px: u32) {
        self.visible_height_px = visible_height_px;
        self.item_size_px = item_size_px;
    }

    /// Push a scroll offset in pixels.
    pub fn set_scroll_offset(&mut self, scroll_offset_px: u64) {
        self.scroll_offset_px = scroll_offset_px;
    }

    /// Borrow the item source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the item source. Length changes are picked up as an
    /// epoch reset at the next refresh.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Replace the item source, starting a new epoch at the next refresh.
    pub fn set_source(&mut self, source: S) {
        self.source = source;
        self.pending_reset = true;
    }

    /// Per-item size for a container width: width divided by columns, minus
    /// the gaps between them.
    pub fn item_size_for_width(&self, container_width_px: u32) -> u32 {
        let columns = self.options.column_count.max(1) as u32;
        let gaps = self.options.gap_px * (columns - 1);
        container_width_px.saturating_sub(gaps) / columns
    }

    /// Flex basis of one column as a percentage of the container width.
    ///
    /// Hosts subtract `options().gap_px` in their own unit system (CSS
    /// `calc(basis% - gap)`), keeping columns stable independent of content.
    pub fn flex_basis_percent(&self) -> f64 {
        100.0 / self.options.column_count.max(1) as f64
    }

    /// Recompute the window from all pushed inputs, applying at most one
    /// state update. Returns the new layout.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self) -> SpriteGridResult<WindowLayout> {
        let epoch_now = (self.source.len(), self.options.column_count);
        let previous = if self.pending_reset || epoch_now != self.epoch {
            tracing::debug!(?epoch_now, "render window epoch reset");
            None
        } else {
            self.window
        };

        let layout = if self.item_size_px == 0 || self.visible_height_px == 0 {
            // Layout not measured yet: render a safe empty default.
            WindowLayout::empty()
        } else {
            let overscan_rows = estimate_overscan_rows(
                self.options.overscan,
                self.options.device_profile,
                self.visible_height_px,
                self.item_size_px,
                self.options.column_count,
            );
            let geometry = GridGeometry {
                item_count: epoch_now.0,
                column_count: epoch_now.1,
                item_size_px: self.item_size_px,
                gap_px: self.options.gap_px,
                scroll_offset_px: self.scroll_offset_px,
                visible_height_px: self.visible_height_px,
                overscan_rows,
            };
            compute_layout(&geometry, self.options.window_policy, previous)?
        };

        self.epoch = epoch_now;
        self.window = Some(layout.window);
        self.layout = layout;
        self.pending_reset = false;
        tracing::trace!(window = ?layout.window, "grid window refreshed");
        Ok(layout)
    }

    /// Layout from the last refresh.
    pub fn layout(&self) -> WindowLayout {
        self.layout
    }

    /// Materialized window from the last refresh.
    pub fn window(&self) -> RenderWindow {
        self.layout.window
    }

    /// Invoke `f` for each materialized item in index order. Indices the
    /// source no longer covers are skipped.
    pub fn for_each_visible(&self, mut f: impl FnMut(usize, &S::Item)) {
        let window = self.layout.window;
        for index in window.min..window.max {
            if let Some(item) = self.source.get(index) {
                f(index, item);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/renderer.rs"]
mod tests;
