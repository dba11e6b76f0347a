use crate::{
    anim::surface::Surface,
    assets::sheet::SpriteSheet,
    foundation::error::{SpriteGridError, SpriteGridResult},
    foundation::math::lerp_u8,
};

/// Interpolation inputs for [`draw_frame`].
#[derive(Clone, Copy, Debug)]
pub struct FrameBlend {
    /// Sheet index of the frame being blended toward.
    pub next_sprite_index: u32,
    /// Ticks already spent on the current frame.
    pub ticks_on_frame: u32,
    /// Total tick duration of the current frame.
    pub duration_ticks: u32,
}

impl FrameBlend {
    /// Blend factor `ticks_on_frame / duration_ticks`.
    pub fn delta(&self) -> f32 {
        if self.duration_ticks == 0 {
            return 0.0;
        }
        self.ticks_on_frame as f32 / self.duration_ticks as f32
    }
}

/// Linear blend of two equal-length straight-RGBA8 buffers:
/// `out = base + delta * (next - base)` on every channel.
pub fn blend_linear(base: &[u8], next: &[u8], delta: f32) -> SpriteGridResult<Vec<u8>> {
    let mut out = base.to_vec();
    blend_linear_in_place(&mut out, next, delta)?;
    Ok(out)
}

/// In-place variant of [`blend_linear`]: `out` starts as the base buffer.
pub fn blend_linear_in_place(out: &mut [u8], next: &[u8], delta: f32) -> SpriteGridResult<()> {
    if out.len() != next.len() {
        return Err(SpriteGridError::validation(
            "blend expects equal-length rgba8 buffers",
        ));
    }
    for (o, &n) in out.iter_mut().zip(next.iter()) {
        *o = lerp_u8(*o, n, delta);
    }
    Ok(())
}

/// Nearest-neighbor scale of an RGBA8 buffer (pixelated rendering mode).
pub fn scale_nearest(
    src: &[u8],
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
) -> SpriteGridResult<Vec<u8>> {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return Err(SpriteGridError::validation("scale extents must be > 0"));
    }
    if src.len() != src_w as usize * src_h as usize * 4 {
        return Err(SpriteGridError::validation(
            "source buffer length does not match extents",
        ));
    }
    if src_w == dst_w && src_h == dst_h {
        return Ok(src.to_vec());
    }

    let mut out = Vec::with_capacity(dst_w as usize * dst_h as usize * 4);
    for dy in 0..dst_h as u64 {
        let sy = (dy * u64::from(src_h) / u64::from(dst_h)) as usize;
        let src_row = sy * src_w as usize * 4;
        for dx in 0..dst_w as u64 {
            let sx = (dx * u64::from(src_w) / u64::from(dst_w)) as usize;
            let px = src_row + sx * 4;
            out.extend_from_slice(&src[px..px + 4]);
        }
    }
    Ok(out)
}

/// Draw one sheet frame onto a surface.
///
/// Clears the target, copies the frame rectangle scaled to the surface with
/// nearest-neighbor sampling, and, when `blend` is present with
/// `duration_ticks > 1`, re-reads the just-drawn pixels and blends them
/// toward the next frame. Mutates the target only; the sheet is never
/// touched.
pub fn draw_frame(
    target: &mut dyn Surface,
    sheet: &SpriteSheet,
    sprite_index: u32,
    frame_width: u32,
    frame_height: u32,
    blend: Option<FrameBlend>,
) -> SpriteGridResult<()> {
    let dims = target.dims();
    target.clear();

    let frame = sheet.frame_pixels(sprite_index, frame_width, frame_height)?;
    let scaled = scale_nearest(&frame, frame_width, frame_height, dims.width, dims.height)?;
    target.write_pixels(&scaled)?;

    let Some(blend) = blend else {
        return Ok(());
    };
    if blend.duration_ticks <= 1 {
        return Ok(());
    }

    let next = sheet.frame_pixels(blend.next_sprite_index, frame_width, frame_height)?;
    let next_scaled = scale_nearest(&next, frame_width, frame_height, dims.width, dims.height)?;
    let mut blended = target.read_pixels().to_vec();
    blend_linear_in_place(&mut blended, &next_scaled, blend.delta())?;
    target.write_pixels(&blended)
}

#[cfg(test)]
#[path = "../../tests/unit/anim/compositor.rs"]
mod tests;
