//! Redraw orchestration.
//!
//! A redraw builds a complete new background and hands it to the windowing
//! layer:
//!
//! 1. Snapshot [`IndicatorState`] into a [`RenderContext`]
//! 2. Paint the background over the full resolution
//! 3. If visible, draw the bar and status line into their own buffers,
//!    scaled by `dpi / 96` (the buffers grow with the scale, their screen
//!    position does not)
//! 4. Composite both buffers once per display region
//! 5. Install the surface as the lock window background, repaint the whole
//!    window and flush
//!
//! [`draw_image`] is a pure function of its inputs, so redrawing an unchanged
//! state produces an identical surface. Redraws are synchronous and never
//! batched: every state change that needs one calls [`Indicator::redraw`]
//! directly.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::background::paint_background;
use crate::compositor::composite;
use crate::config::{BAR_SIZE, IndicatorConfig, Screen, TEXT_SIZE};
use crate::error::Result;
use crate::state::{IndicatorState, RenderContext};
use crate::surface::{Canvas, Scaled, device_size};
use crate::widgets::{draw_bar, draw_status};

// =============================================================================
// Windowing Seam
// =============================================================================

/// The lock window, as seen by the renderer.
pub trait LockSurface {
    /// Take ownership of `image` as the new window background.
    fn install_background(
        &mut self,
        image: Canvas,
    ) -> Result<()>;

    /// Repaint `area` of the window from its background.
    fn clear_area(
        &mut self,
        area: Rectangle,
    ) -> Result<()>;

    /// Push pending requests to the window system.
    fn flush(&mut self) -> Result<()>;
}

// =============================================================================
// Frame Rendering
// =============================================================================

/// Build the full-screen surface for `ctx`.
pub fn draw_image(
    ctx: &RenderContext,
    config: &IndicatorConfig,
    screen: &Screen,
) -> Result<Canvas> {
    let mut output = Canvas::new(screen.resolution)?;
    paint_background(&mut output, &config.background, screen.resolution);

    if !(config.unlock_indicator && ctx.indicator_visible()) {
        return Ok(output);
    }

    let scaling_factor = screen.scaling_factor();
    let mut bar = Canvas::new(device_size(BAR_SIZE, scaling_factor))?;
    let mut text = Canvas::new(device_size(TEXT_SIZE, scaling_factor))?;

    draw_bar(&mut Scaled::new(&mut bar, scaling_factor), ctx.rotation);
    draw_status(&mut Scaled::new(&mut text, scaling_factor), ctx, config.show_failed_attempts);

    composite(&mut output, &bar, &text, &screen.layout.placements(screen.resolution));
    Ok(output)
}

// =============================================================================
// Indicator
// =============================================================================

/// Owns everything needed to redraw the lock screen.
pub struct Indicator<S> {
    config: IndicatorConfig,
    screen: Screen,
    state: IndicatorState,
    surface: S,
}

impl<S: LockSurface> Indicator<S> {
    pub fn new(
        config: IndicatorConfig,
        screen: Screen,
        surface: S,
    ) -> Self {
        Self {
            config,
            screen,
            state: IndicatorState::new(),
            surface,
        }
    }

    pub const fn screen(&self) -> &Screen { &self.screen }

    /// Replace the screen geometry, e.g. after a resolution change. Takes
    /// effect on the next redraw.
    pub fn set_screen(
        &mut self,
        screen: Screen,
    ) {
        self.screen = screen;
    }

    pub const fn state(&self) -> &IndicatorState { &self.state }

    /// State for the event layer to update before calling [`redraw`](Self::redraw).
    pub const fn state_mut(&mut self) -> &mut IndicatorState { &mut self.state }

    pub const fn surface(&self) -> &S { &self.surface }

    /// Render the current state and publish it as the window background.
    pub fn redraw(&mut self) -> Result<()> {
        let ctx = self.state.snapshot();
        debug!("redraw_screen(unlock_state = {:?}, auth_state = {:?})", ctx.unlock, ctx.auth);

        let image = draw_image(&ctx, &self.config, &self.screen)?;
        self.surface.install_background(image)?;
        self.surface
            .clear_area(Rectangle::new(Point::zero(), self.screen.resolution))?;
        self.surface.flush()
    }

    /// Hide the indicator when the password buffer is empty, otherwise show
    /// the idle "typed" state. Always redraws.
    pub fn clear(
        &mut self,
        input_empty: bool,
    ) -> Result<()> {
        self.state.clear(input_empty);
        self.redraw()
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::primitives::PointsIter;

    use super::*;
    use crate::colors::{BAR_DARK_BLUE, COUNTER_RED, TEXT_GRAY};
    use crate::compositor::DisplayLayout;
    use crate::config::BackgroundConfig;
    use crate::error::IndicatorError;
    use crate::state::{AuthState, UnlockState};

    const BG: Rgb888 = Rgb888::new(0, 0, 0);

    #[derive(Debug, PartialEq)]
    enum Call {
        Install,
        Clear(Rectangle),
        Flush,
    }

    /// Records every request and keeps the last installed background.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
        installed: Vec<Canvas>,
        fail_install: bool,
    }

    impl LockSurface for RecordingSurface {
        fn install_background(
            &mut self,
            image: Canvas,
        ) -> Result<()> {
            if self.fail_install {
                return Err(IndicatorError::windowing("install rejected"));
            }
            self.calls.push(Call::Install);
            self.installed.push(image);
            Ok(())
        }

        fn clear_area(
            &mut self,
            area: Rectangle,
        ) -> Result<()> {
            self.calls.push(Call::Clear(area));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.calls.push(Call::Flush);
            Ok(())
        }
    }

    fn config() -> IndicatorConfig {
        IndicatorConfig {
            background: BackgroundConfig::from_hex("000000"),
            unlock_indicator: true,
            show_failed_attempts: true,
        }
    }

    fn screen() -> Screen { Screen::new(Size::new(1920, 1080)) }

    fn indicator() -> Indicator<RecordingSurface> { Indicator::new(config(), screen(), RecordingSurface::default()) }

    fn ctx(
        unlock: UnlockState,
        auth: AuthState,
    ) -> RenderContext {
        let mut state = IndicatorState::new();
        for _ in 0..4 {
            state.set_unlock_state(UnlockState::KeyActive);
        }
        state.set_unlock_state(unlock);
        state.set_auth_state(auth);
        state.snapshot()
    }

    /// Whether `area` contains any non-background pixel.
    fn has_indicator_at(
        image: &Canvas,
        area: Rectangle,
    ) -> bool {
        area.points().any(|p| image.pixel(p) != Some(BG))
    }

    fn bar_area(top_left: Point) -> Rectangle { Rectangle::new(top_left, BAR_SIZE) }

    #[test]
    fn test_idle_frame_is_plain_background() {
        let image = draw_image(&RenderContext::default(), &config(), &screen()).unwrap();
        assert_eq!(image.count_color(BG), 1920 * 1080);
    }

    #[test]
    fn test_disabled_indicator_draws_nothing() {
        let config = IndicatorConfig {
            unlock_indicator: false,
            ..config()
        };
        let image = draw_image(&ctx(UnlockState::KeyActive, AuthState::Wrong), &config, &screen()).unwrap();
        assert_eq!(image.count_color(BG), 1920 * 1080);
    }

    #[test]
    fn test_typing_shows_bar_without_text() {
        let image = draw_image(&ctx(UnlockState::KeyActive, AuthState::Idle), &config(), &screen()).unwrap();
        assert!(has_indicator_at(&image, bar_area(Point::new(815, 771))));
        assert!(!has_indicator_at(&image, Rectangle::new(Point::new(815, 871), TEXT_SIZE)));
        assert_eq!(image.pixel(Point::new(814, 780)), Some(BG));
    }

    #[test]
    fn test_wrong_shows_status_text() {
        let image = draw_image(&ctx(UnlockState::KeyPressed, AuthState::Wrong), &config(), &screen()).unwrap();
        assert!(image.count_color(TEXT_GRAY) > 0);
        assert_eq!(image.count_color(COUNTER_RED), 0);
    }

    #[test]
    fn test_counter_drawn_in_red() {
        let mut state = IndicatorState::new();
        state.set_unlock_state(UnlockState::KeyPressed);
        state.set_failed_attempts(3);
        let image = draw_image(&state.snapshot(), &config(), &screen()).unwrap();
        assert!(image.count_color(COUNTER_RED) > 0);
        assert_eq!(image.count_color(TEXT_GRAY), 0);
    }

    #[test]
    fn test_indicator_repeats_per_display() {
        let layout = DisplayLayout::new(vec![
            Rectangle::new(Point::new(0, 0), Size::new(1920, 1080)),
            Rectangle::new(Point::new(1920, 0), Size::new(1920, 1080)),
        ]);
        let screen = Screen::new(Size::new(3840, 1080)).with_layout(layout);
        let image = draw_image(&ctx(UnlockState::KeyActive, AuthState::Idle), &config(), &screen).unwrap();

        assert!(has_indicator_at(&image, bar_area(Point::new(815, 771))));
        assert!(has_indicator_at(&image, bar_area(Point::new(1920 + 815, 771))));
        // Fallback center of the 3840 wide screen stays empty
        assert!(!has_indicator_at(&image, bar_area(Point::new(960 + 815, 771))));
    }

    #[test]
    fn test_high_dpi_scales_bar() {
        let state = ctx(UnlockState::KeyActive, AuthState::Idle);
        let normal = draw_image(&state, &config(), &screen()).unwrap();
        let doubled = draw_image(&state, &config(), &screen().with_dpi(192.0)).unwrap();
        assert!(normal.count_color(BAR_DARK_BLUE) > 0);
        assert_eq!(doubled.count_color(BAR_DARK_BLUE), 4 * normal.count_color(BAR_DARK_BLUE));
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let mut indicator = indicator();
        indicator.state_mut().set_unlock_state(UnlockState::KeyActive);
        indicator.redraw().unwrap();
        indicator.redraw().unwrap();

        let installed = &indicator.surface().installed;
        assert_eq!(installed.len(), 2);
        assert_eq!(installed[0], installed[1]);
    }

    #[test]
    fn test_redraw_installs_then_repaints() {
        let mut indicator = indicator();
        indicator.redraw().unwrap();
        assert_eq!(
            indicator.surface().calls,
            vec![
                Call::Install,
                Call::Clear(Rectangle::new(Point::zero(), Size::new(1920, 1080))),
                Call::Flush,
            ]
        );
    }

    #[test]
    fn test_clear_always_redraws() {
        let mut indicator = indicator();
        for _ in 0..5 {
            indicator.state_mut().set_unlock_state(UnlockState::KeyActive);
        }
        indicator.clear(true).unwrap();

        assert_eq!(indicator.state().unlock(), UnlockState::Started);
        assert_eq!(indicator.state().rotation().value(), 0);
        assert_eq!(indicator.surface().installed.len(), 1);

        indicator.clear(false).unwrap();
        assert_eq!(indicator.state().unlock(), UnlockState::KeyPressed);
        assert_eq!(indicator.surface().installed.len(), 2);
    }

    #[test]
    fn test_windowing_error_propagates() {
        let surface = RecordingSurface {
            fail_install: true,
            ..RecordingSurface::default()
        };
        let mut indicator = Indicator::new(config(), screen(), surface);
        let err = indicator.redraw().unwrap_err();
        assert!(matches!(err, IndicatorError::Windowing { .. }));
        assert!(indicator.surface().calls.is_empty());
    }

    #[test]
    fn test_set_screen_changes_resolution() {
        let mut indicator = indicator();
        indicator.set_screen(Screen::new(Size::new(800, 600)));
        indicator.redraw().unwrap();
        assert_eq!(indicator.surface().installed[0].size(), Size::new(800, 600));
    }
}
