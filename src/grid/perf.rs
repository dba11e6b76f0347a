/// Observed device capability used to pick a performance tier.
///
/// Detection is isolated behind [`DeviceProfile::detect`] so tests can stub a
/// profile; the tier-to-multiplier mapping is a pure lookup.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceProfile {
    /// Logical CPU count.
    pub logical_cpus: usize,
    /// Device memory in GB, when the platform reports it.
    pub memory_gb: Option<f64>,
}

impl DeviceProfile {
    /// Probe the running machine. Memory is left unreported; callers with a
    /// platform source for it can fill the field in.
    pub fn detect() -> Self {
        let logical_cpus = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1);
        Self {
            logical_cpus,
            memory_gb: None,
        }
    }
}

/// Render-budget tier derived from a [`DeviceProfile`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum PerformanceTier {
    /// Single-core or memory-starved devices.
    Low,
    /// Dual/triple-core devices.
    Medium,
    /// Quad-core-class devices.
    High,
    /// 8+ core devices with ample (or unreported) memory.
    VeryHigh,
}

impl PerformanceTier {
    /// Classify a device profile.
    ///
    /// Unreported memory biases toward the CPU-implied tier (modern-device
    /// assumption); reported memory can only pull the tier down.
    pub fn classify(profile: DeviceProfile) -> Self {
        let cpu_score = match profile.logical_cpus {
            0 | 1 => 0,
            2 | 3 => 1,
            4..=7 => 2,
            _ => 3,
        };
        let score = match profile.memory_gb {
            None => cpu_score,
            Some(gb) => cpu_score.min(memory_score(gb)),
        };
        match score {
            0 => Self::Low,
            1 => Self::Medium,
            2 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// Multiplier applied to the visible height to get the target rendered
    /// pixel height.
    pub fn height_multiplier(self) -> f64 {
        match self {
            Self::Low => 2.0,
            Self::Medium => 3.0,
            Self::High => 4.0,
            Self::VeryHigh => 5.0,
        }
    }

    fn overscan_bonus(self) -> f64 {
        match self {
            Self::Low | Self::Medium => 1.0,
            Self::High => 1.25,
            Self::VeryHigh => 1.5,
        }
    }

    fn min_overscan_rows(self) -> u32 {
        match self {
            Self::Low => 5,
            Self::Medium => 7,
            Self::High => 10,
            Self::VeryHigh => 15,
        }
    }
}

fn memory_score(gb: f64) -> u32 {
    if gb >= 8.0 {
        3
    } else if gb >= 4.0 {
        2
    } else if gb >= 2.0 {
        1
    } else {
        0
    }
}

/// Overscan rows returned while grid layout has not been measured yet.
pub const FALLBACK_OVERSCAN_ROWS: u32 = 5;

/// Overscan configuration; an explicit override always wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverscanConfig {
    /// Manually configured overscan row count, including 0.
    pub manual_override: Option<u32>,
}

/// Estimate how many extra rows to render beyond the visible viewport.
///
/// Pure function, safe to call on every refresh. Degenerate inputs (layout not
/// yet measured) return [`FALLBACK_OVERSCAN_ROWS`].
pub fn estimate_overscan_rows(
    config: OverscanConfig,
    profile: DeviceProfile,
    visible_height_px: u32,
    item_size_px: u32,
    column_count: usize,
) -> u32 {
    if let Some(rows) = config.manual_override {
        return rows;
    }
    if visible_height_px == 0 || item_size_px == 0 || column_count == 0 {
        return FALLBACK_OVERSCAN_ROWS;
    }

    let tier = PerformanceTier::classify(profile);
    let visible_rows = visible_height_px.div_ceil(item_size_px);
    let target_rows = (f64::from(visible_height_px) * tier.height_multiplier()
        / f64::from(item_size_px))
    .ceil() as u32;
    let base = target_rows.saturating_sub(visible_rows);
    let boosted = (f64::from(base) * tier.overscan_bonus()).round() as u32;
    boosted.max(tier.min_overscan_rows())
}

#[cfg(test)]
#[path = "../../tests/unit/grid/perf.rs"]
mod tests;
