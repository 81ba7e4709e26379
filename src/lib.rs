// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for screen sizes
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive

//! Unlock indicator for a screen-lock surface.
//!
//! Renders the full-screen lock background together with a small indicator
//! showing typing feedback and authentication status:
//!
//! - A rotating three-segment bar that steps on every key press or backspace
//! - A status line ("Verifying…", "Locking…", "Wrong!", "Lock failed!",
//!   "No input") or a red failed attempt counter
//!
//! The indicator repeats once per display region and scales with the
//! screen DPI. Windowing is abstracted behind [`LockSurface`].
//!
//! # Modules
//!
//! - [`surface`]: off-screen canvas, DPI scale adapter and text measurement
//! - [`colors`]: palette and hex color parsing
//! - [`config`]: layout constants, configuration and screen geometry
//! - [`background`]: solid, centered and tiled backgrounds
//! - [`state`]: unlock/auth state machine and render snapshots
//! - [`styles`]: text styles for the status line
//! - [`widgets`]: bar and status drawing
//! - [`compositor`]: per-display placement of the indicator
//! - [`render`]: frame rendering and redraw orchestration
//! - [`error`]: error type

pub mod background;
pub mod colors;
pub mod compositor;
pub mod config;
pub mod error;
pub mod render;
pub mod state;
pub mod styles;
pub mod surface;
pub mod widgets;

pub use compositor::DisplayLayout;
pub use config::{BackgroundConfig, IndicatorConfig, Screen};
pub use error::{IndicatorError, Result};
pub use render::{Indicator, LockSurface, draw_image};
pub use state::{AuthState, IndicatorState, RenderContext, UnlockState};
pub use surface::Canvas;
