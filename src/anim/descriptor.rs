use crate::{
    assets::sheet::SpriteSheet,
    foundation::core::Dims,
    foundation::error::{SpriteGridError, SpriteGridResult},
};

/// Default frame duration in ticks when metadata gives none.
pub const DEFAULT_FRAME_TIME_TICKS: u32 = 1;

/// One animation step: which sheet frame to show, for how many ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSpec {
    /// Index of the frame inside the sprite sheet.
    pub sprite_index: u32,
    /// Display duration in ticks; always >= 1.
    pub duration_ticks: u32,
}

/// Parsed animation metadata, independent of any particular sheet.
///
/// Immutable once parsed; one instance per distinct metadata source, safe to
/// cache by URL or key. Sheet-dependent values (frame pixel size, implied
/// sequential frames) are filled in by [`AnimationDescriptor::resolve`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationDescriptor {
    /// Explicit frame sequence; empty means sequential over the whole sheet.
    pub explicit_frames: Vec<FrameSpec>,
    /// Whether playback blends linearly toward the next frame.
    pub interpolate: bool,
    /// Frame width hint in pixels, when the metadata carries one.
    pub frame_width_hint: Option<u32>,
    /// Frame height hint in pixels, when the metadata carries one.
    pub frame_height_hint: Option<u32>,
    /// Duration applied to frames given without an explicit time.
    pub default_frame_time: u32,
}

/// A descriptor bound to a concrete sheet: pixel sizes and a non-empty frame
/// sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAnimation {
    /// Pixel size of one frame.
    pub frame_dims: Dims,
    /// Number of frames the sheet holds.
    pub sheet_frame_count: u32,
    /// Ordered playback sequence; never empty.
    pub frames: Vec<FrameSpec>,
    /// Whether playback blends linearly toward the next frame.
    pub interpolate: bool,
}

impl ResolvedAnimation {
    /// Whether playback needs a ticking clock at all.
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Sprite index of the frame after `position`, wrapping to the start.
    pub fn next_sprite_index(&self, position: usize) -> u32 {
        self.frames[(position + 1) % self.frames.len()].sprite_index
    }
}

impl AnimationDescriptor {
    /// Bind this descriptor to a sheet, deriving frame pixel dimensions and
    /// the effective frame sequence.
    ///
    /// Frame width defaults to the sheet width and frame height to the frame
    /// width (square frames); hints override either. The sheet height must be
    /// an exact multiple of the frame height, and every referenced sprite
    /// index must exist in the sheet.
    pub fn resolve(&self, sheet: &SpriteSheet) -> SpriteGridResult<ResolvedAnimation> {
        let sheet_dims = sheet.dims();
        let frame_width = self.frame_width_hint.unwrap_or(sheet_dims.width);
        let frame_height = self.frame_height_hint.unwrap_or(frame_width);
        if frame_width == 0 || frame_height == 0 {
            return Err(SpriteGridError::metadata("frame size hints must be > 0"));
        }
        if frame_width > sheet_dims.width {
            return Err(SpriteGridError::metadata(format!(
                "frame width {} exceeds sheet width {}",
                frame_width, sheet_dims.width
            )));
        }
        let sheet_frame_count = sheet
            .frame_count(frame_height)
            .map_err(|e| SpriteGridError::metadata(e.to_string()))?;

        let frames = if self.explicit_frames.is_empty() {
            (0..sheet_frame_count)
                .map(|sprite_index| FrameSpec {
                    sprite_index,
                    duration_ticks: self.default_frame_time,
                })
                .collect()
        } else {
            for spec in &self.explicit_frames {
                if spec.sprite_index >= sheet_frame_count {
                    return Err(SpriteGridError::metadata(format!(
                        "frame index {} out of range for {}-frame sheet",
                        spec.sprite_index, sheet_frame_count
                    )));
                }
            }
            self.explicit_frames.clone()
        };
        if frames.is_empty() {
            return Err(SpriteGridError::metadata("animation has no frames"));
        }

        Ok(ResolvedAnimation {
            frame_dims: Dims::new(frame_width, frame_height)?,
            sheet_frame_count,
            frames,
            interpolate: self.interpolate,
        })
    }
}

#[derive(serde::Deserialize)]
struct McmetaDoc {
    animation: Option<McmetaAnimation>,
}

#[derive(Default, serde::Deserialize)]
#[serde(default)]
struct McmetaAnimation {
    interpolate: bool,
    width: Option<u32>,
    height: Option<u32>,
    frametime: Option<u32>,
    frames: Option<Vec<McmetaFrame>>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum McmetaFrame {
    Index(u32),
    Timed { index: u32, time: Option<u32> },
}

/// Parse a `.mcmeta` metadata document.
///
/// Returns `Ok(None)` when the document carries no `animation` block. Frames
/// may be bare sprite indices or `{index, time}` pairs; a missing `frames`
/// list means sequential playback over the whole sheet at the default
/// `frametime`.
pub fn parse_descriptor(bytes: &[u8]) -> SpriteGridResult<Option<AnimationDescriptor>> {
    let doc: McmetaDoc = serde_json::from_slice(bytes)
        .map_err(|e| SpriteGridError::metadata(format!("parse mcmeta: {e}")))?;
    let Some(anim) = doc.animation else {
        return Ok(None);
    };

    let default_frame_time = anim.frametime.unwrap_or(DEFAULT_FRAME_TIME_TICKS);
    if default_frame_time == 0 {
        return Err(SpriteGridError::metadata("frametime must be >= 1"));
    }

    let explicit_frames = match anim.frames {
        None => Vec::new(),
        Some(frames) => {
            let mut out = Vec::with_capacity(frames.len());
            for frame in frames {
                let (sprite_index, duration_ticks) = match frame {
                    McmetaFrame::Index(index) => (index, default_frame_time),
                    McmetaFrame::Timed { index, time } => {
                        (index, time.unwrap_or(default_frame_time))
                    }
                };
                if duration_ticks == 0 {
                    return Err(SpriteGridError::metadata("frame time must be >= 1"));
                }
                out.push(FrameSpec {
                    sprite_index,
                    duration_ticks,
                });
            }
            out
        }
    };

    Ok(Some(AnimationDescriptor {
        explicit_frames,
        interpolate: anim.interpolate,
        frame_width_hint: anim.width,
        frame_height_hint: anim.height,
        default_frame_time,
    }))
}

/// Lenient variant of [`parse_descriptor`] for the playback path: any parse
/// failure degrades to "no animation" rather than surfacing an error.
pub fn descriptor_or_static(bytes: &[u8]) -> Option<AnimationDescriptor> {
    match parse_descriptor(bytes) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            tracing::debug!(error = %e, "animation metadata rejected, treating as static");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/descriptor.rs"]
mod tests;
