use crate::foundation::core::Dims;
use crate::foundation::error::{SpriteGridError, SpriteGridResult};

/// A mutable RGBA8 render target.
///
/// Canvas-style pixel read/write is modeled as an explicit surface so the
/// blend math stays a pure function over byte buffers and the compositor can
/// be unit-tested without a real canvas.
pub trait Surface {
    /// Target dimensions.
    fn dims(&self) -> Dims;

    /// Reset every pixel to transparent black.
    fn clear(&mut self);

    /// Replace the full pixel contents. The buffer length must match
    /// `dims().rgba8_len()`.
    fn write_pixels(&mut self, rgba8: &[u8]) -> SpriteGridResult<()>;

    /// Read the full pixel contents.
    fn read_pixels(&self) -> &[u8];
}

/// Heap-backed [`Surface`] implementation.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    dims: Dims,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Allocate a transparent surface.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            pixels: vec![0; dims.rgba8_len()],
        }
    }
}

impl Surface for PixelSurface {
    fn dims(&self) -> Dims {
        self.dims
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn write_pixels(&mut self, rgba8: &[u8]) -> SpriteGridResult<()> {
        if rgba8.len() != self.pixels.len() {
            return Err(SpriteGridError::validation(format!(
                "pixel buffer length {} does not match surface {}x{}",
                rgba8.len(),
                self.dims.width,
                self.dims.height
            )));
        }
        self.pixels.copy_from_slice(rgba8);
        Ok(())
    }

    fn read_pixels(&self) -> &[u8] {
        &self.pixels
    }
}
