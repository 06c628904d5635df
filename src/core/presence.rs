//! Presence indicator: "working" or "away" from the local hour at a fixed
//! UTC offset.

use tracing::debug;

use super::config::PresenceConfig;

const MS_PER_HOUR: i64 = 3_600_000;

/// Indicator state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Active,
    Away,
}

impl Presence {
    /// Classify an hour of day against the half-open window `[from, until)`
    pub fn for_hour(hour: u32, config: &PresenceConfig) -> Self {
        if hour >= config.active_from && hour < config.active_until {
            Presence::Active
        } else {
            Presence::Away
        }
    }

    /// Classify a wall-clock instant given as Unix milliseconds (UTC)
    pub fn at_unix_ms(unix_ms: f64, config: &PresenceConfig) -> Self {
        let hour = local_hour(unix_ms, config.utc_offset_hours);
        let presence = Self::for_hour(hour, config);
        debug!(hour, ?presence, "Presence evaluated");
        presence
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Presence::Active)
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            Presence::Active => "Active Now (Working)",
            Presence::Away => "Away (Resting / Off-hours)",
        }
    }
}

/// Hour of day (0-23) at `offset_hours` from UTC
pub fn local_hour(unix_ms: f64, offset_hours: i32) -> u32 {
    let hours = (unix_ms as i64).div_euclid(MS_PER_HOUR) + offset_hours as i64;
    hours.rem_euclid(24) as u32
}
