use crate::{
    anim::compositor::{FrameBlend, draw_frame},
    anim::descriptor::{ResolvedAnimation, descriptor_or_static},
    anim::surface::Surface,
    assets::decode::DecodedImage,
    assets::sheet::SpriteSheet,
    foundation::core::{Dims, TickClock},
    foundation::error::SpriteGridResult,
};

/// Lifecycle phase of a [`SpritePlayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPhase {
    /// No source loaded yet.
    Uninitialized,
    /// Source loaded; not ticking (static image, hidden, or single frame).
    Ready,
    /// Visible, unpaused, multi-frame: the clock is running.
    Playing,
    /// Explicitly paused or scrolled out of view; cursor state retained.
    Paused,
    /// Source released; the player ignores all further inputs.
    Disposed,
}

/// Result of loading a sprite into a player: what the host needs to size and
/// label the element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Natural dimensions of the source image.
    pub original_dims: Dims,
    /// Dimensions of a single frame (equal to `original_dims` for statics).
    pub frame_dims: Dims,
    /// Whether the animation requests interpolation.
    pub interpolate: bool,
}

/// Per-sprite animation state machine.
///
/// `Uninitialized -> Ready -> {Playing, Paused} -> Disposed`. Visibility and
/// pause are input events; all transitions are idempotent and synchronous.
/// Frame advancement is monotonic, and each player owns its state exclusively.
#[derive(Debug)]
pub struct SpritePlayer {
    phase: PlayerPhase,
    sheet: Option<SpriteSheet>,
    animation: Option<ResolvedAnimation>,
    position: usize,
    ticks_on_frame: u32,
    visible: bool,
    explicitly_paused: bool,
    clock: TickClock,
}

impl Default for SpritePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpritePlayer {
    /// Fresh player with nothing loaded.
    pub fn new() -> Self {
        Self {
            phase: PlayerPhase::Uninitialized,
            sheet: None,
            animation: None,
            position: 0,
            ticks_on_frame: 0,
            visible: false,
            explicitly_paused: false,
            clock: TickClock::new(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Current playback cursor: `(frame position, ticks on that frame)`.
    pub fn cursor(&self) -> (usize, u32) {
        (self.position, self.ticks_on_frame)
    }

    /// Sheet frame shown by the current cursor position, when loaded.
    pub fn current_sprite_index(&self) -> Option<u32> {
        match &self.animation {
            Some(anim) => Some(anim.frames[self.position].sprite_index),
            None => self.sheet.as_ref().map(|_| 0),
        }
    }

    /// Load a decoded image and optional raw `.mcmeta` bytes.
    ///
    /// Loading into an already-loaded player is a source change: the cursor
    /// resets and the new source replaces the old. Metadata that fails to
    /// parse or resolve degrades to a static image; it never fails the load.
    pub fn load(
        &mut self,
        image: DecodedImage,
        metadata: Option<&[u8]>,
    ) -> SpriteGridResult<LoadOutcome> {
        let sheet = SpriteSheet::new(image);
        let original_dims = sheet.dims();

        let animation = metadata
            .and_then(descriptor_or_static)
            .and_then(|descriptor| match descriptor.resolve(&sheet) {
                Ok(resolved) => Some(resolved),
                Err(e) => {
                    tracing::debug!(error = %e, "descriptor does not fit sheet, treating as static");
                    None
                }
            });

        let (frame_dims, interpolate) = match &animation {
            Some(anim) => (anim.frame_dims, anim.interpolate),
            None => (original_dims, false),
        };

        self.sheet = Some(sheet);
        self.animation = animation;
        self.position = 0;
        self.ticks_on_frame = 0;
        self.clock.reset();
        self.phase = PlayerPhase::Ready;
        self.sync_phase();

        Ok(LoadOutcome {
            original_dims,
            frame_dims,
            interpolate,
        })
    }

    fn can_animate(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.is_animated())
    }

    /// Recompute Playing/Paused/Ready from the current input signals.
    /// Starting an already-running clock or stopping a stopped one is a
    /// no-op.
    fn sync_phase(&mut self) {
        if matches!(
            self.phase,
            PlayerPhase::Uninitialized | PlayerPhase::Disposed
        ) {
            return;
        }
        if !self.can_animate() {
            // Single frame or no descriptor: bypass Playing entirely.
            self.phase = PlayerPhase::Ready;
            return;
        }
        let next = if self.visible && !self.explicitly_paused {
            PlayerPhase::Playing
        } else {
            PlayerPhase::Paused
        };
        if next != self.phase {
            tracing::trace!(from = ?self.phase, to = ?next, "player phase transition");
            self.phase = next;
        }
    }

    /// Viewport intersection signal.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.sync_phase();
    }

    /// Explicit pause: the clock stops but the cursor is retained.
    pub fn pause(&mut self) {
        self.explicitly_paused = true;
        self.sync_phase();
    }

    /// Clear an explicit pause.
    pub fn resume(&mut self) {
        self.explicitly_paused = false;
        self.sync_phase();
    }

    /// Release the source and all retained buffers. Idempotent; every later
    /// input is ignored.
    pub fn dispose(&mut self) {
        self.phase = PlayerPhase::Disposed;
        self.sheet = None;
        self.animation = None;
        self.clock.reset();
    }

    /// Advance one 50ms tick while Playing. Returns whether the host should
    /// redraw: always during interpolated playback, otherwise only when the
    /// frame advanced.
    pub fn tick(&mut self) -> bool {
        if self.phase != PlayerPhase::Playing {
            return false;
        }
        let Some(anim) = &self.animation else {
            return false;
        };

        self.ticks_on_frame += 1;
        let advanced = if self.ticks_on_frame >= anim.frames[self.position].duration_ticks {
            self.ticks_on_frame = 0;
            self.position = (self.position + 1) % anim.frames.len();
            true
        } else {
            false
        };
        advanced || anim.interpolate
    }

    /// Feed elapsed wall time; runs every due tick. Returns whether any tick
    /// requested a redraw.
    pub fn advance_ms(&mut self, elapsed_ms: u64) -> bool {
        if self.phase != PlayerPhase::Playing {
            return false;
        }
        let due = self.clock.advance_ms(elapsed_ms);
        let mut needs_draw = false;
        for _ in 0..due {
            needs_draw |= self.tick();
        }
        needs_draw
    }

    /// Draw the current frame onto `target`, blending toward the next frame
    /// when the animation interpolates.
    pub fn draw(&self, target: &mut dyn Surface) -> SpriteGridResult<()> {
        let Some(sheet) = &self.sheet else {
            return Ok(());
        };
        match &self.animation {
            None => {
                let dims = sheet.dims();
                draw_frame(target, sheet, 0, dims.width, dims.height, None)
            }
            Some(anim) => {
                let spec = anim.frames[self.position];
                let blend = (anim.interpolate && spec.duration_ticks > 1).then(|| FrameBlend {
                    next_sprite_index: anim.next_sprite_index(self.position),
                    ticks_on_frame: self.ticks_on_frame,
                    duration_ticks: spec.duration_ticks,
                });
                draw_frame(
                    target,
                    sheet,
                    spec.sprite_index,
                    anim.frame_dims.width,
                    anim.frame_dims.height,
                    blend,
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/player.rs"]
mod tests;
