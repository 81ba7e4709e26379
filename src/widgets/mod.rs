//! Indicator widgets.
//!
//! - [`bar`]: the three-segment rotating bar
//! - [`status`]: the status line or failed attempt counter
//!
//! Both are generic over `DrawTarget<Color = Rgb888>` and draw in logical
//! units, leaving DPI scaling to the caller.

pub mod bar;
pub mod status;

pub use bar::{SEGMENT_COUNT, SEGMENTS, draw_bar, segment_base_x};
pub use status::{StatusText, draw_status};
