//! Layout constants and runtime configuration.
//!
//! The numeric layout is a fixed visual asset laid out against a 1920x1080
//! design canvas. It is reproduced verbatim, not derived from the screen.
//!
//! Runtime options ([`IndicatorConfig`], [`Screen`]) are supplied by the
//! embedding program, which owns command-line parsing and display queries.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use log::warn;

use crate::colors::{WHITE, parse_hex_color};
use crate::compositor::DisplayLayout;
use crate::surface::Canvas;

// =============================================================================
// Indicator Buffers
// =============================================================================

/// Width of the bar and text buffers.
pub const BAR_WIDTH: u32 = 236;

/// Height of the bar buffer.
pub const BAR_HEIGHT: u32 = 22;

/// Height of the text buffer.
pub const TEXT_HEIGHT: u32 = 100;

pub const BAR_SIZE: Size = Size::new(BAR_WIDTH, BAR_HEIGHT);
pub const TEXT_SIZE: Size = Size::new(BAR_WIDTH, TEXT_HEIGHT);

// =============================================================================
// Reference Canvas Placement
// =============================================================================

/// Design-time canvas the image and indicator are laid out against.
pub const REFERENCE_WIDTH: u32 = 1920;
pub const REFERENCE_HEIGHT: u32 = 1080;

/// Bar position on the reference canvas.
pub const BAR_OFFSET_X: i32 = 815;
pub const BAR_OFFSET_Y: i32 = 771;

/// Vertical distance from the bar origin to the text origin.
pub const TEXT_DROP: i32 = 100;

// =============================================================================
// Bar Animation
// =============================================================================

/// Number of distinct rotation positions.
pub const ROTATION_STEPS: u8 = 15;

/// Horizontal pitch between segments, and per rotation step.
pub const SEGMENT_PITCH: i32 = 20;

/// Base X of the first segment at rotation 0.
pub const SEGMENT_ORIGIN_X: i32 = -60;

// =============================================================================
// DPI
// =============================================================================

/// DPI at which logical units equal device pixels.
pub const BASE_DPI: f32 = 96.0;

/// Lock background: solid color with an optional image on top.
#[derive(Clone, Debug)]
pub struct BackgroundConfig {
    pub color: Rgb888,
    pub image: Option<Canvas>,
    pub tile: bool,
}

impl BackgroundConfig {
    /// Solid background from a `RRGGBB` string (malformed digits read as 0).
    pub fn from_hex(hex: &str) -> Self {
        Self {
            color: parse_hex_color(hex),
            image: None,
            tile: false,
        }
    }

    #[must_use]
    pub fn with_image(
        mut self,
        image: Canvas,
        tile: bool,
    ) -> Self {
        self.image = Some(image);
        self.tile = tile;
        self
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            color: WHITE,
            image: None,
            tile: false,
        }
    }
}

/// Options that do not change while the screen is locked.
#[derive(Clone, Debug)]
pub struct IndicatorConfig {
    pub background: BackgroundConfig,
    /// Draw the bar and status text at all.
    pub unlock_indicator: bool,
    /// Replace idle text with the failed attempt counter.
    pub show_failed_attempts: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            background: BackgroundConfig::default(),
            unlock_indicator: true,
            show_failed_attempts: false,
        }
    }
}

/// Geometry of the virtual screen being locked.
#[derive(Clone, Debug)]
pub struct Screen {
    pub resolution: Size,
    pub layout: DisplayLayout,
    pub dpi: f32,
}

impl Screen {
    pub fn new(resolution: Size) -> Self {
        Self {
            resolution,
            layout: DisplayLayout::default(),
            dpi: BASE_DPI,
        }
    }

    #[must_use]
    pub fn with_layout(
        mut self,
        layout: DisplayLayout,
    ) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_dpi(
        mut self,
        dpi: f32,
    ) -> Self {
        self.dpi = dpi;
        self
    }

    /// Logical-to-device scale, `dpi / 96`.
    ///
    /// A DPI that is not a positive finite number is treated as 96.
    pub fn scaling_factor(&self) -> f32 {
        if self.dpi.is_finite() && self.dpi > 0.0 {
            self.dpi / BASE_DPI
        } else {
            warn!("ignoring invalid DPI {}, using {}", self.dpi, BASE_DPI);
            1.0
        }
    }
}
