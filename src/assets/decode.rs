use std::sync::Arc;

use anyhow::Context;

use crate::{
    SpriteGridResult,
    foundation::core::Dims,
    foundation::error::SpriteGridError,
};

/// Decoded raster image in straight (non-premultiplied) RGBA8 form.
///
/// Buffers stay straight-alpha because animation interpolation blends every
/// channel, including alpha, independently.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    /// Natural pixel dimensions.
    pub dims: Dims,
    /// Pixel bytes in row-major straight RGBA8.
    pub rgba8: Arc<Vec<u8>>,
}

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> SpriteGridResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| SpriteGridError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let dims = Dims::new(width, height)
        .map_err(|_| SpriteGridError::decode("image has zero-sized dimensions"))?;

    Ok(DecodedImage {
        dims,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

/// Build a [`DecodedImage`] from raw RGBA8 bytes, validating the length.
pub fn image_from_rgba8(dims: Dims, rgba8: Vec<u8>) -> SpriteGridResult<DecodedImage> {
    if rgba8.len() != dims.rgba8_len() {
        return Err(SpriteGridError::validation(format!(
            "rgba8 buffer length {} does not match {}x{}",
            rgba8.len(),
            dims.width,
            dims.height
        )));
    }
    Ok(DecodedImage {
        dims,
        rgba8: Arc::new(rgba8),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
