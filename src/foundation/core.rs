use crate::foundation::error::{SpriteGridError, SpriteGridResult};

/// Duration of one animation tick in milliseconds.
///
/// Frame durations in animation metadata are expressed in ticks of this size,
/// matching the source game's timing convention.
pub const TICK_MS: u64 = 50;

/// Pixel dimensions of an image, frame, or surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dims {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dims {
    /// Construct dimensions, rejecting zero-sized extents.
    pub fn new(width: u32, height: u32) -> SpriteGridResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpriteGridError::validation("Dims must be non-zero"));
        }
        Ok(Self { width, height })
    }

    /// Total pixel count.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Byte length of an RGBA8 buffer with these dimensions.
    pub fn rgba8_len(self) -> usize {
        self.area() as usize * 4
    }
}

/// Converts elapsed wall time into whole animation ticks.
///
/// Hosts drive players from arbitrary timers; the clock accumulates elapsed
/// milliseconds and emits one tick per [`TICK_MS`], carrying the remainder
/// forward so no time is lost across calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickClock {
    carry_ms: u64,
}

impl TickClock {
    /// Fresh clock with no accumulated time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `elapsed_ms` and return the number of whole ticks due.
    pub fn advance_ms(&mut self, elapsed_ms: u64) -> u32 {
        self.carry_ms = self.carry_ms.saturating_add(elapsed_ms);
        let ticks = self.carry_ms / TICK_MS;
        self.carry_ms -= ticks * TICK_MS;
        ticks.min(u64::from(u32::MAX)) as u32
    }

    /// Drop accumulated partial-tick time.
    pub fn reset(&mut self) {
        self.carry_ms = 0;
    }
}
