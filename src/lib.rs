//! Spritegrid is the headless core of a repository image browser.
//!
//! It turns a large, flat list of images into a windowed grid and plays
//! sprite-sheet animations in the Minecraft `.mcmeta` format, without owning
//! any UI: hosts push layout measurements and scroll offsets in, and render
//! whatever the engine materializes.
//!
//! # Pipeline overview
//!
//! 1. **Measure**: the host pushes viewport height, item size, and scroll
//!    offset into a [`GridRenderer`]
//! 2. **Window**: overscan is estimated from a [`DeviceProfile`] and the
//!    render window expands over the scroll session ([`compute_layout`])
//! 3. **Animate**: each visible sprite owns a [`SpritePlayer`] ticking at
//!    50ms, drawing through a [`Surface`]
//! 4. **Re-encode** (optional): animations are converted to standalone APNG
//!    blobs ([`ApngCache`]) so playback no longer needs a driving clock
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: window math and blending are pure and
//!   stable for a given input; device probing sits behind one seam.
//! - **No IO in the core**: decoding and metadata fetching are front-loaded
//!   by the host; failures in enhancement paths degrade, never crash.
#![forbid(unsafe_code)]

pub mod anim;
pub mod assets;
pub mod foundation;
pub mod grid;

pub use anim::apng::{ApngCache, SubFrame, apng_cache_key, encode_apng, synthesize_subframes};
pub use anim::compositor::{
    FrameBlend, blend_linear, blend_linear_in_place, draw_frame, scale_nearest,
};
pub use anim::descriptor::{
    AnimationDescriptor, DEFAULT_FRAME_TIME_TICKS, FrameSpec, ResolvedAnimation,
    descriptor_or_static, parse_descriptor,
};
pub use anim::player::{LoadOutcome, PlayerPhase, SpritePlayer};
pub use anim::surface::{PixelSurface, Surface};
pub use assets::decode::{DecodedImage, decode_image, image_from_rgba8};
pub use assets::sheet::SpriteSheet;
pub use foundation::cache::BoundedCache;
pub use foundation::core::{Dims, TICK_MS, TickClock};
pub use foundation::error::{SpriteGridError, SpriteGridResult};
pub use grid::perf::{
    DeviceProfile, FALLBACK_OVERSCAN_ROWS, OverscanConfig, PerformanceTier,
    estimate_overscan_rows,
};
pub use grid::renderer::{GridOptions, GridRenderer, ItemSource};
pub use grid::window::{
    GridGeometry, RenderWindow, WindowLayout, WindowPolicy, compute_layout,
};
