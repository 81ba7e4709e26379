//! Color constants and background color parsing.
//!
//! The bar palette is a fixed pixel-art asset: three shades of blue stacked
//! into bands by [`widgets::bar`](crate::widgets). None of these are
//! configurable.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Bar Palette
// =============================================================================

/// Light blue (83, 118, 237). Caps, highlight and lower body bands.
pub const BAR_LIGHT_BLUE: Rgb888 = Rgb888::new(83, 118, 237);

/// Pale blue (129, 153, 245). Midtone band.
pub const BAR_PALE_BLUE: Rgb888 = Rgb888::new(129, 153, 245);

/// Dark blue (37, 53, 197). Base band and bottom cap.
pub const BAR_DARK_BLUE: Rgb888 = Rgb888::new(37, 53, 197);

// =============================================================================
// Text Colors
// =============================================================================

/// Light gray (0.85 intensity) for status messages.
pub const TEXT_GRAY: Rgb888 = Rgb888::new(217, 217, 217);

/// Pure red for the failed attempt counter.
pub const COUNTER_RED: Rgb888 = Rgb888::RED;

/// Default lock background.
pub const WHITE: Rgb888 = Rgb888::WHITE;

// =============================================================================
// Hex Parsing
// =============================================================================

/// Parse a 6-digit `RRGGBB` string into a color.
///
/// Each 2-character group is read like `strtol(group, NULL, 16)`: the longest
/// run of leading hex digits is used and an empty run gives 0. Malformed input
/// never fails, it just degrades to 0 for the affected channel.
pub fn parse_hex_color(hex: &str) -> Rgb888 {
    let bytes = hex.as_bytes();
    let channel = |i: usize| {
        let group = bytes.get(i * 2..(i * 2 + 2).min(bytes.len())).unwrap_or(&[]);
        parse_hex_prefix(group)
    };
    Rgb888::new(channel(0), channel(1), channel(2))
}

fn parse_hex_prefix(group: &[u8]) -> u8 {
    let mut value = 0u8;
    for &b in group {
        let Some(digit) = (b as char).to_digit(16) else {
            break;
        };
        value = (value << 4) | digit as u8;
    }
    value
}

/// Color components normalized to `[0, 1]`.
pub fn unit_rgb(color: Rgb888) -> (f64, f64, f64) {
    (
        f64::from(color.r()) / 255.0,
        f64::from(color.g()) / 255.0,
        f64::from(color.b()) / 255.0,
    )
}
