//! Input and authentication state driving the indicator.
//!
//! The event layer owns an [`IndicatorState`] and feeds it transitions as
//! keys arrive and the authentication backend reports progress. Each redraw
//! works from a [`RenderContext`] snapshot, so nothing can change mid-frame
//! and drawing the same snapshot twice gives the same pixels.
//!
//! # Bar Rotation
//!
//! The three bar segments march one step right per typed character and one
//! step left per deleted character, wrapping after [`ROTATION_STEPS`]:
//!
//! | Transition | Rotation |
//! |------------|----------|
//! | `KeyActive` | `+1 mod 15` |
//! | `BackspaceActive` | `-1 mod 15` |
//! | auth enters `Verify` | `0` |
//! | `clear()` with empty input | `0` |

use crate::config::ROTATION_STEPS;

// =============================================================================
// State Enums
// =============================================================================

/// Most recent edit to the password buffer.
///
/// Ordered: anything at or above `KeyPressed` means the user has typed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Debug)]
pub enum UnlockState {
    #[default]
    Started,
    KeyPressed,
    KeyActive,
    BackspaceActive,
    NothingToDelete,
}

/// Progress of the authentication pipeline. Takes visual precedence over
/// [`UnlockState`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Debug)]
pub enum AuthState {
    #[default]
    Idle,
    Verify,
    Lock,
    Wrong,
    LockFailed,
}

// =============================================================================
// Bar Rotation
// =============================================================================

/// Rotation offset of the bar segments, always in `[0, 15)`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct BarRotation(u8);

impl BarRotation {
    pub const fn new(offset: u8) -> Self { Self(offset % ROTATION_STEPS) }

    #[inline]
    pub const fn value(self) -> u8 { self.0 }

    /// Step forward, wrapping 14 -> 0.
    pub fn advance(&mut self) { self.0 = (self.0 + 1) % ROTATION_STEPS; }

    /// Step back, wrapping 0 -> 14.
    pub fn retreat(&mut self) { self.0 = (self.0 + ROTATION_STEPS - 1) % ROTATION_STEPS; }

    pub fn reset(&mut self) { self.0 = 0; }
}

// =============================================================================
// Render Snapshot
// =============================================================================

/// Everything a frame depends on that changes during a lock session.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct RenderContext {
    pub unlock: UnlockState,
    pub auth: AuthState,
    pub rotation: BarRotation,
    pub failed_attempts: u32,
}

impl RenderContext {
    /// Whether the bar and text are drawn, given the indicator is enabled.
    pub fn indicator_visible(&self) -> bool { self.unlock >= UnlockState::KeyPressed || self.auth > AuthState::Idle }
}

// =============================================================================
// Indicator State
// =============================================================================

/// Mutable state updated by input and authentication callbacks.
#[derive(Clone, Default, Debug)]
pub struct IndicatorState {
    unlock: UnlockState,
    auth: AuthState,
    rotation: BarRotation,
    failed_attempts: u32,
}

impl IndicatorState {
    pub fn new() -> Self { Self::default() }

    /// Record a password-buffer edit, moving the bar for typed and deleted
    /// characters.
    pub fn set_unlock_state(
        &mut self,
        unlock: UnlockState,
    ) {
        match unlock {
            UnlockState::KeyActive => self.rotation.advance(),
            UnlockState::BackspaceActive => self.rotation.retreat(),
            _ => {}
        }
        self.unlock = unlock;
    }

    /// Record authentication progress. Entering `Verify` restarts the bar so
    /// the next attempt begins from the left.
    pub fn set_auth_state(
        &mut self,
        auth: AuthState,
    ) {
        if auth == AuthState::Verify {
            self.rotation.reset();
        }
        self.auth = auth;
    }

    pub fn set_failed_attempts(
        &mut self,
        count: u32,
    ) {
        self.failed_attempts = count;
    }

    /// Hide the indicator if the password buffer is empty, otherwise fall
    /// back to the plain "typed" state.
    pub fn clear(
        &mut self,
        input_empty: bool,
    ) {
        if input_empty {
            self.unlock = UnlockState::Started;
            self.rotation.reset();
        } else {
            self.unlock = UnlockState::KeyPressed;
        }
    }

    #[inline]
    pub const fn unlock(&self) -> UnlockState { self.unlock }

    #[inline]
    pub const fn auth(&self) -> AuthState { self.auth }

    #[inline]
    pub const fn rotation(&self) -> BarRotation { self.rotation }

    #[inline]
    pub const fn failed_attempts(&self) -> u32 { self.failed_attempts }

    pub const fn snapshot(&self) -> RenderContext {
        RenderContext {
            unlock: self.unlock,
            auth: self.auth,
            rotation: self.rotation,
            failed_attempts: self.failed_attempts,
        }
    }
}
