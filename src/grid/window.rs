use crate::foundation::error::{SpriteGridError, SpriteGridResult};

/// Inputs to one window computation. Derived on every relevant input change;
/// carries no persisted identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridGeometry {
    /// Total item count.
    pub item_count: usize,
    /// Column count; must be >= 1.
    pub column_count: usize,
    /// Per-item size in pixels, excluding the gap.
    pub item_size_px: u32,
    /// Gap between rows/columns in pixels.
    pub gap_px: u32,
    /// Current scroll offset in pixels.
    pub scroll_offset_px: u64,
    /// Viewport-visible height of the scroll container in pixels.
    pub visible_height_px: u32,
    /// Extra rows rendered beyond the visible viewport.
    pub overscan_rows: u32,
}

impl GridGeometry {
    /// Row pitch: item size plus trailing gap.
    pub fn slot_px(&self) -> u64 {
        u64::from(self.item_size_px) + u64::from(self.gap_px)
    }

    /// Number of rows implied by `item_count` and `column_count`.
    pub fn row_count(&self) -> usize {
        self.item_count.div_ceil(self.column_count.max(1))
    }
}

/// Half-open item index range currently materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderWindow {
    /// First materialized index.
    pub min: usize,
    /// One past the last materialized index.
    pub max: usize,
}

impl RenderWindow {
    /// Whether the window materializes nothing.
    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    /// Number of materialized indices.
    pub fn len(&self) -> usize {
        self.max.saturating_sub(self.min)
    }

    /// Whether `index` is materialized.
    pub fn contains(&self, index: usize) -> bool {
        self.min <= index && index < self.max
    }
}

/// Growth bound for the accumulated render window.
///
/// The expansion-only policy trades memory for the elimination of remount
/// flicker; without a bound a long scroll session accumulates every row it
/// ever touched. Once the accumulated window spans more rows than the limit,
/// the edge farther from the visible band is clamped back. `None` disables
/// the bound and replicates the unbounded historical behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WindowPolicy {
    /// Maximum number of rows the accumulated window may span.
    pub retained_rows_limit: Option<usize>,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            retained_rows_limit: Some(512),
        }
    }
}

/// Output of [`compute_layout`]: scroll-illusion metrics plus the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WindowLayout {
    /// Full content height backing the scrollbar illusion.
    pub total_height_px: u64,
    /// Leading spacer height positioning the materialized subset.
    pub offset_top_px: u64,
    /// Materialized index range.
    pub window: RenderWindow,
}

impl WindowLayout {
    /// Layout for an empty grid.
    pub fn empty() -> Self {
        Self {
            total_height_px: 0,
            offset_top_px: 0,
            window: RenderWindow { min: 0, max: 0 },
        }
    }
}

/// Compute the materialized window for the current geometry.
///
/// `previous` carries the accumulated window of the current
/// `(item_count, column_count)` epoch; the result never shrinks relative to
/// it (unidirectional expansion) except where `policy` bounds retention. On an
/// epoch change the caller passes `None` and the window resets to exactly the
/// freshly desired range.
pub fn compute_layout(
    geometry: &GridGeometry,
    policy: WindowPolicy,
    previous: Option<RenderWindow>,
) -> SpriteGridResult<WindowLayout> {
    if geometry.column_count == 0 {
        return Err(SpriteGridError::validation("column_count must be >= 1"));
    }
    if geometry.item_count == 0 {
        return Ok(WindowLayout::empty());
    }
    if geometry.item_size_px == 0 {
        return Err(SpriteGridError::validation("item_size_px must be > 0"));
    }

    let columns = geometry.column_count;
    let slot = geometry.slot_px();
    let row_count = geometry.row_count();
    let total_height_px = row_count as u64 * slot - u64::from(geometry.gap_px);

    let visible_start_row =
        ((geometry.scroll_offset_px / slot) as usize).min(row_count.saturating_sub(1));
    // One extra row covers the partially visible row at the bottom edge.
    let visible_row_count = (u64::from(geometry.visible_height_px) / slot) as usize + 1;
    let overscan = geometry.overscan_rows as usize;

    let desired_start_row = visible_start_row.saturating_sub(overscan);
    let desired_end_row = row_count.min(visible_start_row + visible_row_count + overscan);

    let desired = RenderWindow {
        min: desired_start_row * columns,
        max: geometry.item_count.min(desired_end_row * columns),
    };

    let mut window = match previous {
        None => desired,
        Some(prev) => RenderWindow {
            min: prev.min.min(desired.min),
            max: prev.max.max(desired.max),
        },
    };

    if let Some(limit) = policy.retained_rows_limit {
        window = clamp_retention(
            window,
            desired_start_row,
            desired_end_row,
            columns,
            geometry.item_count,
            limit,
        );
    }

    let offset_top_px = (window.min / columns) as u64 * slot;
    Ok(WindowLayout {
        total_height_px,
        offset_top_px,
        window,
    })
}

/// Shrink an accumulated window that spans more rows than `limit`, trimming
/// the side with the larger excess beyond the desired range first. The desired
/// range itself is never trimmed.
fn clamp_retention(
    window: RenderWindow,
    desired_start_row: usize,
    desired_end_row: usize,
    columns: usize,
    item_count: usize,
    limit: usize,
) -> RenderWindow {
    let mut start_row = window.min / columns;
    let mut end_row = window.max.div_ceil(columns);
    let desired_rows = desired_end_row.saturating_sub(desired_start_row);
    let limit = limit.max(desired_rows);

    let mut excess = (end_row - start_row).saturating_sub(limit);
    if excess == 0 {
        return window;
    }
    tracing::debug!(excess_rows = excess, "render window exceeds retention limit");

    let above = desired_start_row.saturating_sub(start_row);
    let below = end_row.saturating_sub(desired_end_row);
    if above >= below {
        let trim = excess.min(above);
        start_row += trim;
        excess -= trim;
        end_row -= excess.min(below);
    } else {
        let trim = excess.min(below);
        end_row -= trim;
        excess -= trim;
        start_row += excess.min(above);
    }

    RenderWindow {
        min: start_row * columns,
        max: item_count.min(end_row * columns),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/window.rs"]
mod tests;
