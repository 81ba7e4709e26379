//! In-memory drawing surfaces.
//!
//! - [`Canvas`]: RGB buffer with per-pixel transparency
//! - [`Scaled`]: uniform scale adapter over any draw target
//! - [`InkProbe`]: records the extents of everything drawn into it
//!
//! All three implement embedded-graphics' `DrawTarget`, so widgets draw onto
//! them exactly as they would onto a display.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

use crate::error::{IndicatorError, Result};

// =============================================================================
// Canvas
// =============================================================================

/// Owned pixel buffer. `None` pixels are transparent.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Canvas {
    size: Size,
    pixels: Vec<Option<Rgb888>>,
}

impl Canvas {
    /// Allocate a fully transparent canvas.
    pub fn new(size: Size) -> Result<Self> { Self::allocate(size, None) }

    /// Allocate a canvas painted with `color` everywhere.
    pub fn filled(
        size: Size,
        color: Rgb888,
    ) -> Result<Self> {
        Self::allocate(size, Some(color))
    }

    fn allocate(
        size: Size,
        fill: Option<Rgb888>,
    ) -> Result<Self> {
        let error = || IndicatorError::SurfaceAllocation {
            width: size.width,
            height: size.height,
        };
        let len = (size.width as usize).checked_mul(size.height as usize).ok_or_else(error)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| error())?;
        pixels.resize(len, fill);
        Ok(Self { size, pixels })
    }

    fn index(
        &self,
        point: Point,
    ) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Color at `point`, or `None` if transparent or out of bounds.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb888> {
        self.index(point).and_then(|i| self.pixels[i])
    }

    /// Whether nothing has been painted.
    pub fn is_blank(&self) -> bool { self.pixels.iter().all(Option::is_none) }

    /// Smallest rectangle containing every painted pixel.
    pub fn painted_bounds(&self) -> Option<Rectangle> {
        let mut bounds = Bounds::default();
        for (i, pixel) in self.pixels.iter().enumerate() {
            if pixel.is_some() {
                let width = self.size.width as usize;
                bounds.include(Point::new((i % width) as i32, (i / width) as i32));
            }
        }
        bounds.rectangle()
    }

    /// Number of pixels painted with exactly `color`.
    #[cfg(test)]
    pub(crate) fn count_color(
        &self,
        color: Rgb888,
    ) -> usize {
        self.pixels.iter().filter(|p| **p == Some(color)).count()
    }

    /// Paint `src` over this canvas with its top-left corner at `at`.
    ///
    /// Painted source pixels replace the destination, transparent ones leave
    /// it untouched. Anything outside this canvas is clipped.
    pub fn composite(
        &mut self,
        src: &Self,
        at: Point,
    ) {
        let src_area = Rectangle::new(at, src.size);
        let visible = src_area.intersection(&self.bounding_box());
        for point in visible.points() {
            if let Some(color) = src.pixel(point - at)
                && let Some(i) = self.index(point)
            {
                self.pixels[i] = Some(color);
            }
        }
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = Some(color);
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> core::result::Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let width = self.size.width as usize;
        for y in area.rows() {
            let row = y as usize * width;
            for x in area.columns() {
                self.pixels[row + x as usize] = Some(color);
            }
        }
        Ok(())
    }
}

// =============================================================================
// Scale Adapter
// =============================================================================

/// Draws in logical units onto a device target scaled by a constant factor.
///
/// A logical rectangle `[x, x + w)` covers device pixels
/// `[floor(x * f), floor((x + w) * f))`, so adjacent rectangles stay adjacent
/// at any factor. At `1.0` this is the identity.
pub struct Scaled<'a, D> {
    target: &'a mut D,
    factor: f32,
}

impl<'a, D> Scaled<'a, D> {
    pub fn new(
        target: &'a mut D,
        factor: f32,
    ) -> Self {
        Self { target, factor }
    }

    fn to_device(
        &self,
        area: &Rectangle,
    ) -> Rectangle {
        let scale = |v: i32| (v as f32 * self.factor).floor() as i32;
        let x0 = scale(area.top_left.x);
        let y0 = scale(area.top_left.y);
        let x1 = scale(area.top_left.x + area.size.width as i32);
        let y1 = scale(area.top_left.y + area.size.height as i32);
        Rectangle::new(
            Point::new(x0, y0),
            Size::new((x1 - x0).max(0) as u32, (y1 - y0).max(0) as u32),
        )
    }
}

/// Device size of a `size` logical area at `factor`.
pub fn device_size(
    size: Size,
    factor: f32,
) -> Size {
    let scale = |v: u32| (v as f32 * factor).floor() as u32;
    Size::new(scale(size.width), scale(size.height))
}

impl<D> Dimensions for Scaled<'_, D>
where
    D: Dimensions,
{
    fn bounding_box(&self) -> Rectangle {
        let device = self.target.bounding_box();
        let unscale = |v: u32| (v as f32 / self.factor).ceil() as u32;
        Rectangle::new(
            Point::new(
                (device.top_left.x as f32 / self.factor).floor() as i32,
                (device.top_left.y as f32 / self.factor).floor() as i32,
            ),
            Size::new(unscale(device.size.width), unscale(device.size.height)),
        )
    }
}

impl<D> DrawTarget for Scaled<'_, D>
where
    D: DrawTarget,
{
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let area = self.to_device(&Rectangle::new(point, Size::new(1, 1)));
            self.target.fill_solid(&area, color)?;
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> core::result::Result<(), Self::Error> {
        let area = self.to_device(area);
        self.target.fill_solid(&area, color)
    }
}

// =============================================================================
// Ink Probe
// =============================================================================

/// Half-extent of the probe's addressable area.
const PROBE_REACH: i32 = 4096;

/// Ink extents of drawn content, relative to the drawing origin.
///
/// Mirrors a font-metrics extents record: the bearing is the offset from the
/// origin to the top-left of the ink, so centering on it accounts for glyphs
/// that do not start at the pen position.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct TextExtents {
    pub x_bearing: f64,
    pub y_bearing: f64,
    pub width: f64,
    pub height: f64,
}

/// Draw target that only records where pixels land.
#[derive(Default)]
pub struct InkProbe {
    bounds: Bounds,
}

impl InkProbe {
    pub fn new() -> Self { Self::default() }

    /// Extents of everything drawn so far. Empty drawings report zero.
    pub fn extents(&self) -> TextExtents {
        self.bounds.rectangle().map_or_else(TextExtents::default, |r| TextExtents {
            x_bearing: f64::from(r.top_left.x),
            y_bearing: f64::from(r.top_left.y),
            width: f64::from(r.size.width),
            height: f64::from(r.size.height),
        })
    }
}

impl Dimensions for InkProbe {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            Point::new(-PROBE_REACH, -PROBE_REACH),
            Size::new(2 * PROBE_REACH as u32, 2 * PROBE_REACH as u32),
        )
    }
}

impl DrawTarget for InkProbe {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, _) in pixels {
            self.bounds.include(point);
        }
        Ok(())
    }
}

/// Running min/max of a set of points.
#[derive(Default)]
struct Bounds {
    min: Option<Point>,
    max: Option<Point>,
}

impl Bounds {
    fn include(
        &mut self,
        point: Point,
    ) {
        self.min = Some(self.min.map_or(point, |m| m.component_min(point)));
        self.max = Some(self.max.map_or(point, |m| m.component_max(point)));
    }

    fn rectangle(&self) -> Option<Rectangle> {
        Some(Rectangle::with_corners(self.min?, self.max?))
    }
}
