use std::sync::Arc;

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    anim::compositor::blend_linear,
    anim::descriptor::ResolvedAnimation,
    assets::sheet::SpriteSheet,
    foundation::cache::BoundedCache,
    foundation::core::TICK_MS,
    foundation::error::{SpriteGridError, SpriteGridResult},
    foundation::math::Fnv1a64,
};

/// One frame of the encoded output: raw pixels plus display delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubFrame {
    /// Straight-RGBA8 pixels at frame resolution.
    pub pixels: Vec<u8>,
    /// Display delay in milliseconds.
    pub delay_ms: u32,
}

/// Expand an animation into the flat sub-frame sequence the container stores.
///
/// Interpolated frames with `duration_ticks > 1` synthesize one blended
/// sub-frame per tick (50ms each), reproducing tick-stepped playback exactly;
/// otherwise each declared frame becomes a single sub-frame displayed for
/// `duration_ticks * 50ms`.
pub fn synthesize_subframes(
    sheet: &SpriteSheet,
    anim: &ResolvedAnimation,
) -> SpriteGridResult<Vec<SubFrame>> {
    let fw = anim.frame_dims.width;
    let fh = anim.frame_dims.height;

    let per_frame: Vec<Vec<SubFrame>> = anim
        .frames
        .par_iter()
        .enumerate()
        .map(|(position, spec)| {
            let base = sheet.frame_pixels(spec.sprite_index, fw, fh)?;
            if anim.interpolate && spec.duration_ticks > 1 {
                let next = sheet.frame_pixels(anim.next_sprite_index(position), fw, fh)?;
                (0..spec.duration_ticks)
                    .map(|tick| {
                        let delta = tick as f32 / spec.duration_ticks as f32;
                        Ok(SubFrame {
                            pixels: blend_linear(&base, &next, delta)?,
                            delay_ms: TICK_MS as u32,
                        })
                    })
                    .collect()
            } else {
                Ok(vec![SubFrame {
                    pixels: base,
                    delay_ms: spec.duration_ticks * TICK_MS as u32,
                }])
            }
        })
        .collect::<SpriteGridResult<_>>()?;

    Ok(per_frame.into_iter().flatten().collect())
}

/// Encode an animation as a standalone APNG blob.
///
/// The output plays back without a driving clock; it is a purely additive
/// optimization, and callers fall back to compositor playback on any error.
#[tracing::instrument(skip(sheet, anim), fields(frames = anim.frames.len()))]
pub fn encode_apng(sheet: &SpriteSheet, anim: &ResolvedAnimation) -> SpriteGridResult<Vec<u8>> {
    let subframes = synthesize_subframes(sheet, anim)?;
    let count = u32::try_from(subframes.len())
        .map_err(|_| SpriteGridError::encode("too many sub-frames"))?;
    if count == 0 {
        return Err(SpriteGridError::encode("animation has no sub-frames"));
    }

    let mut bytes = Vec::new();
    {
        let mut encoder =
            png::Encoder::new(&mut bytes, anim.frame_dims.width, anim.frame_dims.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .set_animated(count, 0)
            .context("declare animation control")
            .map_err(encode_err)?;

        let mut writer = encoder.write_header().context("write png header").map_err(encode_err)?;
        for sub in &subframes {
            let delay_num = u16::try_from(sub.delay_ms).unwrap_or(u16::MAX);
            writer
                .set_frame_delay(delay_num, 1000)
                .context("set frame delay")
                .map_err(encode_err)?;
            writer
                .write_image_data(&sub.pixels)
                .context("write frame data")
                .map_err(encode_err)?;
        }
        writer.finish().context("finish apng").map_err(encode_err)?;
    }

    Ok(bytes)
}

fn encode_err(e: anyhow::Error) -> SpriteGridError {
    SpriteGridError::encode(format!("{e:#}"))
}

/// Stable memoization key over everything the encoded output depends on.
pub fn apng_cache_key(source_key: &str, anim: &ResolvedAnimation) -> u64 {
    let mut hasher = Fnv1a64::new_default();
    hasher.write_bytes(source_key.as_bytes());
    hasher.write_u8(0);
    hasher.write_u32(anim.frame_dims.width);
    hasher.write_u32(anim.frame_dims.height);
    hasher.write_u8(u8::from(anim.interpolate));
    for spec in &anim.frames {
        hasher.write_u32(spec.sprite_index);
        hasher.write_u32(spec.duration_ticks);
    }
    hasher.finish()
}

/// Memoizing wrapper around [`encode_apng`].
///
/// Encoded blobs are shared via `Arc` so concurrent sprite instances reuse
/// one conversion; a failed encode is not cached, and the caller falls back
/// to compositor playback.
#[derive(Clone, Debug)]
pub struct ApngCache {
    inner: BoundedCache<u64, Arc<Vec<u8>>>,
}

impl ApngCache {
    /// Cache holding at most `capacity` encoded animations.
    pub fn new(capacity: usize) -> SpriteGridResult<Self> {
        Ok(Self {
            inner: BoundedCache::new(capacity)?,
        })
    }

    /// Encoded blob for `(source_key, anim)`, encoding on first use.
    pub fn get_or_encode(
        &mut self,
        source_key: &str,
        sheet: &SpriteSheet,
        anim: &ResolvedAnimation,
    ) -> SpriteGridResult<Arc<Vec<u8>>> {
        let key = apng_cache_key(source_key, anim);
        if let Some(blob) = self.inner.get(&key) {
            return Ok(Arc::clone(blob));
        }
        let blob = match encode_apng(sheet, anim) {
            Ok(bytes) => Arc::new(bytes),
            Err(e) => {
                tracing::warn!(source_key, error = %e, "apng re-encode failed, caller falls back to compositor playback");
                return Err(e);
            }
        };
        self.inner.insert(key, Arc::clone(&blob));
        Ok(blob)
    }

    /// Number of cached conversions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/apng.rs"]
mod tests;
