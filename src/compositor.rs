//! Placement of the indicator on each display.
//!
//! The bar sits at (815, 771) on a 1920x1080 reference canvas centered in a
//! display region, and the text buffer 100 units below it. With multiple
//! monitors the indicator repeats once per region. Without any region
//! information the whole virtual screen is treated as a single display.
//!
//! Compositing order is fixed: background, then bar, then text.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

use crate::config::{BAR_OFFSET_X, BAR_OFFSET_Y, REFERENCE_HEIGHT, REFERENCE_WIDTH, TEXT_DROP};
use crate::surface::Canvas;

/// Ordered display regions within the virtual screen.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct DisplayLayout {
    regions: Vec<Rectangle>,
}

impl DisplayLayout {
    pub fn new(regions: Vec<Rectangle>) -> Self { Self { regions } }

    pub fn regions(&self) -> &[Rectangle] { &self.regions }

    /// One placement per region, or a single placement over the whole
    /// `resolution` when no regions are known.
    pub fn placements(
        &self,
        resolution: Size,
    ) -> Vec<Placement> {
        if self.regions.is_empty() {
            return vec![Placement::for_region(&Rectangle::new(Point::zero(), resolution))];
        }
        self.regions.iter().map(Placement::for_region).collect()
    }
}

impl From<Vec<Rectangle>> for DisplayLayout {
    fn from(regions: Vec<Rectangle>) -> Self { Self::new(regions) }
}

/// Top-left corners of the bar and text buffers on the full-screen surface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Placement {
    pub bar: Point,
    pub text: Point,
}

impl Placement {
    /// The offset is added before truncating, so odd sizes below the
    /// reference canvas round toward zero once.
    pub fn for_region(region: &Rectangle) -> Self {
        let bar = region.top_left
            + Point::new(
                offset_in(region.size.width, REFERENCE_WIDTH, BAR_OFFSET_X),
                offset_in(region.size.height, REFERENCE_HEIGHT, BAR_OFFSET_Y),
            );
        Self {
            bar,
            text: bar + Point::new(0, TEXT_DROP),
        }
    }
}

/// `(extent - reference) / 2 + offset`, truncated toward zero.
fn offset_in(
    extent: u32,
    reference: u32,
    offset: i32,
) -> i32 {
    ((f64::from(extent) - f64::from(reference)) / 2.0 + f64::from(offset)) as i32
}

/// Paint the bar and text buffers onto `target` at every placement.
pub fn composite(
    target: &mut Canvas,
    bar: &Canvas,
    text: &Canvas,
    placements: &[Placement],
) {
    for placement in placements {
        trace!("compositing indicator at bar {:?}, text {:?}", placement.bar, placement.text);
        target.composite(bar, placement.bar);
        target.composite(text, placement.text);
    }
}
