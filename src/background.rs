//! Full-screen background painting.
//!
//! The configured color always goes down first. An image is then painted on
//! top, either once at the reference-canvas offset or tiled from the origin.
//! The color shows wherever a centered image does not reach, so the surface
//! never has gaps.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, PrimitiveStyle, Rectangle};

use crate::config::{BackgroundConfig, REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::surface::Canvas;

/// Offset of the reference canvas inside `resolution`, `(res - 1920x1080) / 2`.
///
/// Negative on screens smaller than the reference canvas. Fractions truncate
/// toward zero.
pub fn reference_origin(resolution: Size) -> Point {
    Point::new(
        centered_offset(resolution.width, REFERENCE_WIDTH),
        centered_offset(resolution.height, REFERENCE_HEIGHT),
    )
}

fn centered_offset(
    extent: u32,
    reference: u32,
) -> i32 {
    ((f64::from(extent) - f64::from(reference)) / 2.0) as i32
}

/// Paint `background` over `resolution` on `target`.
pub fn paint_background(
    target: &mut Canvas,
    background: &BackgroundConfig,
    resolution: Size,
) {
    let screen = Rectangle::new(Point::zero(), resolution);
    screen
        .into_styled(PrimitiveStyle::with_fill(background.color))
        .draw(target)
        .ok();

    match &background.image {
        Some(image) if background.tile => tile_image(target, image, screen),
        Some(image) => target.composite(image, reference_origin(resolution)),
        None => {}
    }
}

/// Repeat `image` over `area`, anchored at the surface origin.
fn tile_image(
    target: &mut Canvas,
    image: &Canvas,
    area: Rectangle,
) {
    let tile = image.size();
    if tile.width == 0 || tile.height == 0 {
        return;
    }
    let area = area.intersection(&target.bounding_box());
    let pixels = area.points().filter_map(|p| {
        let src = Point::new(p.x.rem_euclid(tile.width as i32), p.y.rem_euclid(tile.height as i32));
        image.pixel(src).map(|color| Pixel(p, color))
    });
    target.draw_iter(pixels).ok();
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::Rgb888;

    use super::*;
    use crate::colors::parse_hex_color;

    const RED: Rgb888 = Rgb888::new(255, 0, 0);
    const GREEN: Rgb888 = Rgb888::new(0, 255, 0);

    #[test]
    fn test_reference_origin() {
        assert_eq!(reference_origin(Size::new(1920, 1080)), Point::new(0, 0));
        assert_eq!(reference_origin(Size::new(2560, 1440)), Point::new(320, 180));
        assert_eq!(reference_origin(Size::new(1366, 768)), Point::new(-277, -156));
        // -277.5 truncates toward zero
        assert_eq!(reference_origin(Size::new(1365, 1080)), Point::new(-277, 0));
    }

    #[test]
    fn test_solid_fill_covers_screen() {
        let size = Size::new(64, 48);
        let mut canvas = Canvas::new(size).unwrap();
        let bg = BackgroundConfig::from_hex("FF00AA");
        paint_background(&mut canvas, &bg, size);

        assert_eq!(canvas.count_color(parse_hex_color("FF00AA")), 64 * 48);
        assert_eq!(canvas.pixel(Point::new(0, 0)), Some(Rgb888::new(255, 0, 170)));
    }

    #[test]
    fn test_centered_image_is_not_scaled() {
        // 2000x1100 screen: reference canvas starts at (40, 10)
        let size = Size::new(2000, 1100);
        let mut canvas = Canvas::new(size).unwrap();
        let image = Canvas::filled(Size::new(100, 50), RED).unwrap();
        let bg = BackgroundConfig::from_hex("00FF00").with_image(image, false);
        paint_background(&mut canvas, &bg, size);

        assert_eq!(canvas.count_color(RED), 100 * 50);
        assert_eq!(canvas.pixel(Point::new(40, 10)), Some(RED));
        assert_eq!(canvas.pixel(Point::new(139, 59)), Some(RED));
        assert_eq!(canvas.pixel(Point::new(140, 59)), Some(GREEN));
        assert_eq!(canvas.pixel(Point::new(39, 10)), Some(GREEN));
        assert!(canvas.painted_bounds() == Some(Rectangle::new(Point::zero(), size)));
    }

    #[test]
    fn test_tiled_image_repeats() {
        let size = Size::new(10, 7);
        let mut canvas = Canvas::new(size).unwrap();
        let mut image = Canvas::filled(Size::new(4, 3), GREEN).unwrap();
        image.fill_solid(&Rectangle::new(Point::zero(), Size::new(1, 1)), RED).ok();
        let bg = BackgroundConfig::from_hex("000000").with_image(image, true);
        paint_background(&mut canvas, &bg, size);

        for (x, y) in [(0, 0), (4, 0), (8, 0), (0, 3), (4, 6), (8, 6)] {
            assert_eq!(canvas.pixel(Point::new(x, y)), Some(RED), "({x}, {y})");
        }
        assert_eq!(canvas.count_color(RED), 9);
        assert_eq!(canvas.count_color(GREEN), 70 - 9);
    }
}
