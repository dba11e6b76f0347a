use crate::{
    assets::decode::DecodedImage,
    foundation::core::Dims,
    foundation::error::{SpriteGridError, SpriteGridResult},
};

/// A sprite sheet: one image holding animation frames stacked vertically.
///
/// Frames are read-only views addressed by `index * frame_height` vertical
/// offset; the sheet itself is never mutated.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    image: DecodedImage,
}

impl SpriteSheet {
    /// Wrap a decoded image as a sprite sheet.
    pub fn new(image: DecodedImage) -> Self {
        Self { image }
    }

    /// Natural dimensions of the whole sheet.
    pub fn dims(&self) -> Dims {
        self.image.dims
    }

    /// Raw straight-RGBA8 bytes of the whole sheet.
    pub fn rgba8(&self) -> &[u8] {
        &self.image.rgba8
    }

    /// Number of frames the sheet holds for a given frame height.
    pub fn frame_count(&self, frame_height: u32) -> SpriteGridResult<u32> {
        if frame_height == 0 {
            return Err(SpriteGridError::validation("frame_height must be > 0"));
        }
        if !self.image.dims.height.is_multiple_of(frame_height) {
            return Err(SpriteGridError::validation(format!(
                "sheet height {} is not a multiple of frame height {}",
                self.image.dims.height, frame_height
            )));
        }
        Ok(self.image.dims.height / frame_height)
    }

    /// Copy the straight-RGBA8 pixels of one frame.
    ///
    /// The frame rectangle is `[0, sprite_index * frame_height]` with extent
    /// `frame_width x frame_height`; it must lie fully inside the sheet.
    pub fn frame_pixels(
        &self,
        sprite_index: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> SpriteGridResult<Vec<u8>> {
        let dims = self.image.dims;
        if frame_width == 0 || frame_height == 0 {
            return Err(SpriteGridError::validation("frame extents must be > 0"));
        }
        if frame_width > dims.width {
            return Err(SpriteGridError::validation(format!(
                "frame width {} exceeds sheet width {}",
                frame_width, dims.width
            )));
        }
        let y0 = u64::from(sprite_index) * u64::from(frame_height);
        if y0 + u64::from(frame_height) > u64::from(dims.height) {
            return Err(SpriteGridError::validation(format!(
                "frame {} at height {} lies outside sheet height {}",
                sprite_index, frame_height, dims.height
            )));
        }

        let row_stride = dims.width as usize * 4;
        let frame_row = frame_width as usize * 4;
        let mut out = Vec::with_capacity(frame_row * frame_height as usize);
        for row in 0..frame_height as usize {
            let src_row = (y0 as usize + row) * row_stride;
            out.extend_from_slice(&self.image.rgba8[src_row..src_row + frame_row]);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sheet.rs"]
mod tests;
