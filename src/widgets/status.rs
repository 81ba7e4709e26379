//! Status text below the bar.
//!
//! Selection, first match wins:
//!
//! 1. Authentication messages: `Verify`, `Lock`, `Wrong`, `LockFailed`
//! 2. Idle: the failed attempt counter if enabled and non-zero, else
//!    "No input" after a backspace on an empty buffer, else nothing
//!
//! The text is centered on its ink, not its advance box, so glyphs with
//! side bearings still land visually in the middle of the buffer.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;

use crate::config::{BAR_WIDTH, TEXT_HEIGHT};
use crate::state::{AuthState, RenderContext, UnlockState};
use crate::styles::{BOLD_OFFSETS, COUNTER_STYLE, REGULAR_OFFSETS, STATUS_STYLE};
use crate::surface::{InkProbe, TextExtents};

/// Highest counter value shown as a number.
pub const MAX_DISPLAYED_ATTEMPTS: u32 = 999;

/// Capacity of a rendered label.
pub const LABEL_LEN: usize = 16;

/// What the status line says.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StatusText {
    Verifying,
    Locking,
    Wrong,
    LockFailed,
    NoInput,
    FailedAttempts(u32),
}

impl StatusText {
    /// Pick the message for `ctx`, or `None` if the line stays empty.
    pub fn select(
        ctx: &RenderContext,
        show_failed_attempts: bool,
    ) -> Option<Self> {
        match ctx.auth {
            AuthState::Verify => Some(Self::Verifying),
            AuthState::Lock => Some(Self::Locking),
            AuthState::Wrong => Some(Self::Wrong),
            AuthState::LockFailed => Some(Self::LockFailed),
            AuthState::Idle => {
                if show_failed_attempts && ctx.failed_attempts > 0 {
                    Some(Self::FailedAttempts(ctx.failed_attempts))
                } else if ctx.unlock == UnlockState::NothingToDelete {
                    Some(Self::NoInput)
                } else {
                    None
                }
            }
        }
    }

    /// Display string. The counter never exceeds three digits.
    pub fn label(self) -> String<LABEL_LEN> {
        let mut s: String<LABEL_LEN> = String::new();
        match self {
            Self::Verifying => s.push_str("Verifying…").ok(),
            Self::Locking => s.push_str("Locking…").ok(),
            Self::Wrong => s.push_str("Wrong!").ok(),
            Self::LockFailed => s.push_str("Lock failed!").ok(),
            Self::NoInput => s.push_str("No input").ok(),
            Self::FailedAttempts(n) if n > MAX_DISPLAYED_ATTEMPTS => s.push_str("> 999").ok(),
            Self::FailedAttempts(n) => write!(s, "{n}").ok(),
        };
        s
    }

    pub const fn style(self) -> MonoTextStyle<'static, Rgb888> {
        match self {
            Self::FailedAttempts(_) => COUNTER_STYLE,
            _ => STATUS_STYLE,
        }
    }

    const fn strikes(self) -> &'static [(i32, i32)] {
        match self {
            Self::FailedAttempts(_) => BOLD_OFFSETS,
            _ => REGULAR_OFFSETS,
        }
    }
}

/// Replace characters the bitmap fonts lack with ASCII lookalikes.
fn glyph_text(label: &str) -> String<LABEL_LEN> {
    let mut s: String<LABEL_LEN> = String::new();
    for c in label.chars() {
        if c == '…' {
            s.push_str("...").ok();
        } else {
            s.push(c).ok();
        }
    }
    s
}

/// Draw `text` with its pen (alphabetic baseline origin) at `origin`.
fn strike<D>(
    display: &mut D,
    text: StatusText,
    glyphs: &str,
    origin: Point,
) where
    D: DrawTarget<Color = Rgb888>,
{
    for &(dx, dy) in text.strikes() {
        Text::new(glyphs, origin + Point::new(dx, dy), text.style())
            .draw(display)
            .ok();
    }
}

/// Ink extents of `text` drawn with its pen at the origin.
pub fn measure(text: StatusText) -> TextExtents {
    let mut probe = InkProbe::new();
    strike(&mut probe, text, &glyph_text(&text.label()), Point::zero());
    probe.extents()
}

/// Pen position that centers `extents` in the text buffer.
pub fn centered_origin(extents: &TextExtents) -> Point {
    let x = f64::from(BAR_WIDTH / 2) - (extents.width / 2.0 + extents.x_bearing);
    let y = f64::from(TEXT_HEIGHT / 2) - (extents.height / 2.0 + extents.y_bearing);
    Point::new(x.round() as i32, y.round() as i32)
}

/// Draw the status line for `ctx`, centered in a `BAR_WIDTH x TEXT_HEIGHT`
/// buffer. Returns what was drawn.
pub fn draw_status<D>(
    display: &mut D,
    ctx: &RenderContext,
    show_failed_attempts: bool,
) -> Option<StatusText>
where
    D: DrawTarget<Color = Rgb888>,
{
    let text = StatusText::select(ctx, show_failed_attempts)?;
    let glyphs = glyph_text(&text.label());
    let origin = centered_origin(&measure(text));
    strike(display, text, &glyphs, origin);
    Some(text)
}
