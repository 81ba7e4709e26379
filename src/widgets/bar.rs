//! Three-segment progress bar.
//!
//! Each segment is a stack of horizontal bands shading from a light blue top
//! to a dark blue base. The top and bottom caps are one pixel narrower on
//! each side, which rounds the corners. Segments differ slightly in where the
//! midtone ends, giving the dial a faint curvature.
//!
//! # Geometry
//!
//! Segment `i` starts at `rotation * 20 - 60 + i * 20` in logical units.
//! At rotation 0 all three sit left of the buffer and are clipped; each step
//! moves them 20 units right, and after 15 steps they wrap back:
//!
//! ```text
//! rotation 0:   x = -60, -40, -20   (off-buffer)
//! rotation 3:   x =   0,  20,  40
//! rotation 14:  x = 220, 240, 260   (partly clipped)
//! ```
//!
//! The bands are a pixel-art table. They are reproduced as-is rather than
//! computed from proportions.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::colors::{BAR_DARK_BLUE as DARK, BAR_LIGHT_BLUE as LIGHT, BAR_PALE_BLUE as PALE};
use crate::config::{SEGMENT_ORIGIN_X, SEGMENT_PITCH};
use crate::state::BarRotation;

/// Number of segments in the bar.
pub const SEGMENT_COUNT: usize = 3;

/// Full width of a segment body.
pub const SEGMENT_WIDTH: u32 = 15;

/// One filled band of a segment, relative to the segment's base X.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Band {
    pub dx: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb888,
}

const fn band(
    dx: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgb888,
) -> Band {
    Band {
        dx,
        y,
        width,
        height,
        color,
    }
}

/// Bands for each segment, top to bottom.
pub const SEGMENTS: [[Band; 6]; SEGMENT_COUNT] = [
    [
        band(1, 0, 13, 1, LIGHT),
        band(0, 1, 15, 3, LIGHT),
        band(0, 4, 15, 5, PALE),
        band(0, 9, 15, 4, LIGHT),
        band(0, 13, 15, 8, DARK),
        band(1, 21, 13, 1, DARK),
    ],
    [
        band(1, 0, 13, 1, LIGHT),
        band(0, 1, 15, 3, LIGHT),
        band(0, 4, 15, 6, PALE),
        band(0, 10, 15, 4, LIGHT),
        band(0, 14, 15, 7, DARK),
        band(1, 21, 13, 1, DARK),
    ],
    [
        band(1, 0, 13, 1, LIGHT),
        band(0, 1, 15, 3, LIGHT),
        band(0, 4, 15, 6, PALE),
        band(0, 10, 15, 6, LIGHT),
        band(0, 16, 15, 5, DARK),
        band(1, 21, 13, 1, DARK),
    ],
];

/// Base X of segment `index` at the given rotation, in logical units.
pub const fn segment_base_x(
    rotation: BarRotation,
    index: usize,
) -> i32 {
    rotation.value() as i32 * SEGMENT_PITCH + SEGMENT_ORIGIN_X + index as i32 * SEGMENT_PITCH
}

/// Draw the bar at `rotation`. Coordinates are logical; wrap the target in
/// [`Scaled`](crate::surface::Scaled) for DPI scaling.
pub fn draw_bar<D>(
    display: &mut D,
    rotation: BarRotation,
) where
    D: DrawTarget<Color = Rgb888>,
{
    for (index, bands) in SEGMENTS.iter().enumerate() {
        let base_x = segment_base_x(rotation, index);
        for b in bands {
            Rectangle::new(Point::new(base_x + b.dx, b.y), Size::new(b.width, b.height))
                .into_styled(PrimitiveStyle::with_fill(b.color))
                .draw(display)
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BAR_HEIGHT, BAR_SIZE};
    use crate::surface::{Canvas, Scaled};

    fn bar_canvas(rotation: u8) -> Canvas {
        let mut canvas = Canvas::new(BAR_SIZE).unwrap();
        draw_bar(&mut canvas, BarRotation::new(rotation));
        canvas
    }

    #[test]
    fn test_segment_base_positions() {
        for o in 0..15u8 {
            let rotation = BarRotation::new(o);
            let expected = i32::from(o) * 20 - 60;
            assert_eq!(segment_base_x(rotation, 0), expected);
            assert_eq!(segment_base_x(rotation, 1), expected + 20);
            assert_eq!(segment_base_x(rotation, 2), expected + 40);
        }
    }

    #[test]
    fn test_bands_fill_segment_height() {
        for bands in &SEGMENTS {
            let body: u32 = bands[1..5].iter().map(|b| b.height).sum();
            assert_eq!(bands[0].y, 0);
            assert_eq!(bands[1].y, 1);
            assert_eq!(1 + body, bands[5].y as u32);
            assert_eq!(bands[5].y as u32 + bands[5].height, BAR_HEIGHT);
            // Each band starts where the previous one ended
            for pair in bands[1..5].windows(2) {
                assert_eq!(pair[0].y + pair[0].height as i32, pair[1].y);
            }
        }
    }

    #[test]
    fn test_caps_are_trimmed() {
        for bands in &SEGMENTS {
            for cap in [bands[0], bands[5]] {
                assert_eq!(cap.dx, 1);
                assert_eq!(cap.width, SEGMENT_WIDTH - 2);
            }
        }
    }

    #[test]
    fn test_rotation_zero_is_offscreen() {
        assert!(bar_canvas(0).is_blank());
    }

    #[test]
    fn test_rotation_three_layout() {
        let canvas = bar_canvas(3);
        // Segments at x = 0, 20, 40, each 15 wide
        assert_eq!(
            canvas.painted_bounds(),
            Some(Rectangle::new(Point::new(0, 0), Size::new(55, BAR_HEIGHT)))
        );
        assert_eq!(canvas.pixel(Point::new(0, 0)), None);
        assert_eq!(canvas.pixel(Point::new(1, 0)), Some(LIGHT));
        assert_eq!(canvas.pixel(Point::new(0, 5)), Some(PALE));
        assert_eq!(canvas.pixel(Point::new(0, 15)), Some(DARK));
        assert_eq!(canvas.pixel(Point::new(17, 10)), None);
        assert_eq!(canvas.pixel(Point::new(20, 12)), Some(LIGHT));
        assert_eq!(canvas.pixel(Point::new(40, 14)), Some(LIGHT));
    }

    #[test]
    fn test_last_rotation_is_clipped() {
        let canvas = bar_canvas(14);
        // Segment 0 at x = 220 is the only one inside the 236-wide buffer
        assert_eq!(
            canvas.painted_bounds(),
            Some(Rectangle::new(Point::new(220, 0), Size::new(15, BAR_HEIGHT)))
        );
    }

    #[test]
    fn test_scaled_bar_doubles_segments() {
        let mut canvas = Canvas::new(Size::new(236 * 2, 22 * 2)).unwrap();
        draw_bar(&mut Scaled::new(&mut canvas, 2.0), BarRotation::new(3));
        assert_eq!(
            canvas.painted_bounds(),
            Some(Rectangle::new(Point::new(0, 0), Size::new(110, 44)))
        );
    }
}
