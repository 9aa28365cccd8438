//! Update cadence and visual pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_initial_delay_ms() -> u64 {
    2_000
}

const fn default_interval_minutes() -> u64 {
    30
}

const fn default_format_check_delay_ms() -> u64 {
    1_000
}

const fn default_fade_out_ms() -> u64 {
    300
}

const fn default_fade_in_ms() -> u64 {
    400
}

const fn default_field_spacing_ms() -> u64 {
    200
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Delay before the first cycle after startup.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Period of the recurring cycle.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// Delay before the one-off format check run by `watch`.
    #[serde(default = "default_format_check_delay_ms")]
    pub format_check_delay_ms: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            interval_minutes: default_interval_minutes(),
            format_check_delay_ms: default_format_check_delay_ms(),
        }
    }
}

impl ScheduleConfig {
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }

    #[must_use]
    pub const fn format_check_delay(&self) -> Duration {
        Duration::from_millis(self.format_check_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimationConfig {
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,

    #[serde(default = "default_fade_in_ms")]
    pub fade_in_ms: u64,

    /// Pause between two consecutive field transitions.
    #[serde(default = "default_field_spacing_ms")]
    pub field_spacing_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fade_out_ms: default_fade_out_ms(),
            fade_in_ms: default_fade_in_ms(),
            field_spacing_ms: default_field_spacing_ms(),
        }
    }
}
