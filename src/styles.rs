//! Pre-computed text styles for the status line.
//!
//! `MonoTextStyle::new` is a const fn, so the styles are built at compile
//! time and shared by every redraw.
//!
//! The status line uses `ProFont` at two sizes: 18pt light gray for state
//! messages, 24pt red for the failed attempt counter. The counter is drawn
//! with [`BOLD_OFFSETS`] to thicken the strokes.

use embedded_graphics::{mono_font::MonoTextStyle, pixelcolor::Rgb888};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{COUNTER_RED, TEXT_GRAY};

/// State messages ("Verifying…", "Wrong!", ...).
pub const STATUS_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_18_POINT, TEXT_GRAY);

/// Failed attempt counter, larger and red.
pub const COUNTER_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&PROFONT_24_POINT, COUNTER_RED);

/// Strike offsets for regular text.
pub const REGULAR_OFFSETS: &[(i32, i32)] = &[(0, 0)];

/// Strike offsets for emboldened text: the glyphs again, one pixel right.
pub const BOLD_OFFSETS: &[(i32, i32)] = &[(0, 0), (1, 0)];
