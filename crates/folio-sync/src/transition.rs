//! Staged visual transition for one stat element.
//!
//! A value swap runs through a fixed sequence of phases driven from a single
//! loop: the element fades out, its text is swapped while highlighted, then
//! it settles back to rest.

use std::time::Duration;

use folio_config::AnimationConfig;
use folio_core::StatField;

use crate::display::{ElementStyle, StatDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    FadingOut,
    Swapped,
    FadingIn,
}

impl TransitionPhase {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Idle => Self::FadingOut,
            Self::FadingOut => Self::Swapped,
            Self::Swapped => Self::FadingIn,
            Self::FadingIn => Self::Idle,
        }
    }
}

/// Pacing of field transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    pub fade_out: Duration,
    pub fade_in: Duration,
    /// Pause between two consecutive field transitions.
    pub field_spacing: Duration,
}

impl AnimationTimings {
    /// No pauses at all.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            fade_out: Duration::ZERO,
            fade_in: Duration::ZERO,
            field_spacing: Duration::ZERO,
        }
    }
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self::from(&AnimationConfig::default())
    }
}

impl From<&AnimationConfig> for AnimationTimings {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            fade_out: Duration::from_millis(config.fade_out_ms),
            fade_in: Duration::from_millis(config.fade_in_ms),
            field_spacing: Duration::from_millis(config.field_spacing_ms),
        }
    }
}

pub(crate) async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

/// Swap the text of `field` to `value` through the full phase sequence.
///
/// Returns `false` without touching the display if the element is absent.
pub async fn run_transition<D>(
    display: &mut D,
    field: StatField,
    value: &str,
    timings: &AnimationTimings,
) -> bool
where
    D: StatDisplay + ?Sized,
{
    if display.read(field).is_none() {
        tracing::debug!(%field, "no element to update");
        return false;
    }

    let mut written = false;
    let mut phase = TransitionPhase::Idle.next();
    while phase != TransitionPhase::Idle {
        tracing::trace!(%field, ?phase, "transition phase");
        match phase {
            TransitionPhase::FadingOut => {
                display.apply_style(field, ElementStyle::FadedOut);
                pause(timings.fade_out).await;
            }
            TransitionPhase::Swapped => {
                written = display.write(field, value);
                display.apply_style(field, ElementStyle::Highlighted);
            }
            TransitionPhase::FadingIn => {
                pause(timings.fade_in).await;
                display.apply_style(field, ElementStyle::Resting);
            }
            TransitionPhase::Idle => {}
        }
        phase = phase.next();
    }
    written
}
