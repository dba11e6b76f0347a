//! Virtualized grid: device-adaptive overscan, window calculation with
//! unidirectional expansion, and the windowed renderer tying them together.

pub mod perf;
pub mod renderer;
pub mod window;
