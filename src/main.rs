//! indicator-preview - render the unlock indicator to PNG files.
//!
//! Drives an [`Indicator`] through a scripted lock session and writes every
//! background it installs to `<out>/frame_NN.png`:
//!
//! | Frame | Event |
//! |-------|-------|
//! | 00 | Lock screen shown, nothing typed |
//! | 01 | First key press |
//! | 02-04 | Three characters typed |
//! | 05 | Backspace |
//! | 06 | Backspace on an empty buffer |
//! | 07 | Password submitted |
//! | 08 | Wrong password |
//! | 09 | Idle after two failed attempts |
//! | 10 | Lock failed |
//! | 11 | Idle after many failed attempts |
//! | 12 | Password buffer cleared |
//!
//! Set `RUST_LOG=debug` to see each redraw.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::info;
use unlock_indicator::{
    AuthState, BackgroundConfig, Canvas, DisplayLayout, Indicator, IndicatorConfig, IndicatorError, LockSurface,
    Screen, UnlockState,
};

// =============================================================================
// Command Line
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "indicator-preview", version, about = "Render unlock indicator frames to PNG")]
struct Args {
    /// Virtual screen width in pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Virtual screen height in pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Screen DPI (96 draws at 1:1)
    #[arg(long, default_value_t = 96.0)]
    dpi: f32,

    /// Background color as RRGGBB
    #[arg(long, default_value = "ffffff")]
    color: String,

    /// Draw a checkerboard image with cells of this size over the color
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..=4096))]
    checker: Option<u32>,

    /// Tile the background image instead of centering it
    #[arg(long)]
    tile: bool,

    /// Display region as x,y,w,h (repeat for multiple displays)
    #[arg(long = "region", value_name = "X,Y,W,H", value_parser = parse_region)]
    regions: Vec<Rectangle>,

    /// Only draw the background
    #[arg(long)]
    no_indicator: bool,

    /// Show the failed attempt counter when idle
    #[arg(long)]
    show_failed_attempts: bool,

    /// Output directory
    #[arg(long, default_value = "frames")]
    out: PathBuf,
}

fn parse_region(value: &str) -> std::result::Result<Rectangle, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(format!("expected x,y,w,h, got '{value}'"));
    };
    let int = |s: &str| s.parse::<i32>().map_err(|e| format!("'{s}': {e}"));
    let dim = |s: &str| s.parse::<u32>().map_err(|e| format!("'{s}': {e}"));
    Ok(Rectangle::new(Point::new(int(x)?, int(y)?), Size::new(dim(w)?, dim(h)?)))
}

// =============================================================================
// PNG Surface
// =============================================================================

/// Writes each flushed background to a numbered PNG.
struct PngSurface {
    dir: PathBuf,
    background: Option<Canvas>,
    frame: usize,
}

impl PngSurface {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            background: None,
            frame: 0,
        }
    }
}

impl LockSurface for PngSurface {
    fn install_background(
        &mut self,
        image: Canvas,
    ) -> unlock_indicator::Result<()> {
        self.background = Some(image);
        Ok(())
    }

    fn clear_area(
        &mut self,
        area: Rectangle,
    ) -> unlock_indicator::Result<()> {
        if self.background.is_none() {
            return Err(IndicatorError::windowing(format!("clear of {area:?} before any background")));
        }
        Ok(())
    }

    fn flush(&mut self) -> unlock_indicator::Result<()> {
        let Some(background) = &self.background else {
            return Err(IndicatorError::windowing("flush before any background"));
        };

        let mut display = SimulatorDisplay::<Rgb888>::new(background.size());
        let pixels = background
            .bounding_box()
            .points()
            .filter_map(|p| background.pixel(p).map(|color| Pixel(p, color)));
        display.draw_iter(pixels).ok();

        let path = self.dir.join(format!("frame_{:02}.png", self.frame));
        let output_settings = OutputSettingsBuilder::new().scale(1).build();
        display
            .to_rgb_output_image(&output_settings)
            .save_png(&path)
            .map_err(|e| IndicatorError::windowing(format!("{}: {e}", path.display())))?;

        info!("wrote {}", path.display());
        self.frame += 1;
        Ok(())
    }
}

// =============================================================================
// Main
// =============================================================================

/// Two-tone checkerboard for exercising image backgrounds.
fn checkerboard(cell: u32) -> unlock_indicator::Result<Canvas> {
    let cell = cell.max(1);
    let side = cell.checked_mul(2).ok_or(IndicatorError::SurfaceAllocation {
        width: u32::MAX,
        height: u32::MAX,
    })?;
    let mut image = Canvas::filled(Size::new(side, side), Rgb888::new(40, 40, 40))?;
    let light = Rgb888::new(90, 90, 90);
    for top_left in [Point::zero(), Point::new(cell as i32, cell as i32)] {
        image.fill_solid(&Rectangle::new(top_left, Size::new(cell, cell)), light).ok();
    }
    Ok(image)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;

    let mut background = BackgroundConfig::from_hex(&args.color);
    if let Some(cell) = args.checker {
        background = background.with_image(checkerboard(cell)?, args.tile);
    }
    let config = IndicatorConfig {
        background,
        unlock_indicator: !args.no_indicator,
        show_failed_attempts: args.show_failed_attempts,
    };
    let screen = Screen::new(Size::new(args.width, args.height))
        .with_layout(DisplayLayout::new(args.regions))
        .with_dpi(args.dpi);

    let mut indicator = Indicator::new(config, screen, PngSurface::new(args.out));
    indicator.redraw()?;

    let typing = [
        UnlockState::KeyPressed,
        UnlockState::KeyActive,
        UnlockState::KeyActive,
        UnlockState::KeyActive,
        UnlockState::BackspaceActive,
        UnlockState::NothingToDelete,
    ];
    for unlock in typing {
        indicator.state_mut().set_unlock_state(unlock);
        indicator.redraw()?;
    }

    indicator.state_mut().set_auth_state(AuthState::Verify);
    indicator.redraw()?;

    indicator.state_mut().set_auth_state(AuthState::Wrong);
    indicator.state_mut().set_failed_attempts(1);
    indicator.redraw()?;

    indicator.state_mut().set_auth_state(AuthState::Idle);
    indicator.state_mut().set_failed_attempts(2);
    indicator.redraw()?;

    indicator.state_mut().set_auth_state(AuthState::LockFailed);
    indicator.redraw()?;

    indicator.state_mut().set_auth_state(AuthState::Idle);
    indicator.state_mut().set_failed_attempts(1500);
    indicator.redraw()?;

    indicator.clear(true)?;

    Ok(())
}
