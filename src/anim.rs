//! Sprite-sheet animation: metadata descriptors, the per-sprite playback
//! state machine, frame compositing, and APNG re-encoding.

pub mod apng;
pub mod compositor;
pub mod descriptor;
pub mod player;
pub mod surface;
