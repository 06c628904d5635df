//! Site configuration
//!
//! Every field has a default matching the published site, so an empty JSON
//! object (or no config at all) yields the stock behaviour.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::error::{FxError, Result};
use super::surface::Rgba;

/// Default number of particles in the background field
pub const PARTICLE_COUNT: usize = 60;
/// Pointer repulsion reach
pub const INTERACTION_RADIUS: f64 = 150.0;
/// Maximum distance at which two particles are linked
pub const CONNECTION_DISTANCE: f64 = 150.0;

/// Particle field tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub interaction_radius: f64,
    pub connection_distance: f64,
    /// Per-axis speed bound, velocities are drawn from `[-max_speed, max_speed)`
    pub max_speed: f64,
    pub radius_range: Range<f64>,
    pub density_range: Range<f64>,
    pub particle_color: Rgba,
    pub glow_color: Rgba,
    pub glow_blur: f64,
    pub line_color: Rgba,
    pub line_width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            interaction_radius: INTERACTION_RADIUS,
            connection_distance: CONNECTION_DISTANCE,
            max_speed: 0.4,
            radius_range: 1.0..3.0,
            density_range: 1.0..31.0,
            particle_color: Rgba::new(0, 123, 255, 0.8),
            glow_color: Rgba::opaque(0, 123, 255),
            glow_blur: 10.0,
            line_color: Rgba::opaque(255, 77, 77),
            line_width: 0.8,
        }
    }
}

/// Presence indicator window, in hours of the configured UTC offset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    pub utc_offset_hours: i32,
    pub active_from: u32,
    pub active_until: u32,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: 3,
            active_from: 13,
            active_until: 22,
        }
    }
}

/// Text and pacing for the typewriter headings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub text: String,
    pub logo_speed_ms: u32,
    pub hero_speed_ms: u32,
    pub hero_delay_ms: u32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            text: "Abdullah Almousa".to_string(),
            logo_speed_ms: 100,
            hero_speed_ms: 150,
            hero_delay_ms: 500,
        }
    }
}

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub field: FieldConfig,
    pub presence: PresenceConfig,
    pub typewriter: TypewriterConfig,
}

impl SiteConfig {
    /// Decode and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let f = &self.field;
        if !(f.interaction_radius.is_finite() && f.interaction_radius > 0.0) {
            return Err(FxError::InvalidConfig(format!(
                "interaction_radius must be positive, got {}",
                f.interaction_radius
            )));
        }
        if !(f.connection_distance.is_finite() && f.connection_distance > 0.0) {
            return Err(FxError::InvalidConfig(format!(
                "connection_distance must be positive, got {}",
                f.connection_distance
            )));
        }
        if !(f.max_speed.is_finite() && f.max_speed >= 0.0) {
            return Err(FxError::InvalidConfig(format!(
                "max_speed must be non-negative, got {}",
                f.max_speed
            )));
        }
        for (name, range) in [("radius_range", &f.radius_range), ("density_range", &f.density_range)] {
            if !(range.start.is_finite() && range.end.is_finite() && range.start < range.end) {
                return Err(FxError::InvalidConfig(format!(
                    "{name} must be a non-empty finite range, got {range:?}"
                )));
            }
        }

        let p = &self.presence;
        if !(-12..=14).contains(&p.utc_offset_hours) {
            return Err(FxError::InvalidConfig(format!(
                "utc_offset_hours out of range: {}",
                p.utc_offset_hours
            )));
        }
        if p.active_from >= p.active_until || p.active_until > 24 {
            return Err(FxError::InvalidConfig(format!(
                "presence window {}..{} is empty or exceeds a day",
                p.active_from, p.active_until
            )));
        }

        if self.typewriter.text.is_empty() {
            return Err(FxError::InvalidConfig("typewriter text is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.field.particle_count, 60);
        assert_eq!(config.presence.active_from, 13);
    }

    #[test]
    fn test_partial_override() {
        let config =
            SiteConfig::from_json(r#"{"field": {"particle_count": 12}, "presence": {"utc_offset_hours": 0}}"#)
                .unwrap();
        assert_eq!(config.field.particle_count, 12);
        assert_eq!(config.field.interaction_radius, INTERACTION_RADIUS);
        assert_eq!(config.presence.utc_offset_hours, 0);
        assert_eq!(config.presence.active_until, 22);
    }

    #[test]
    fn test_rejects_bad_window() {
        let err = SiteConfig::from_json(r#"{"presence": {"active_from": 22, "active_until": 13}}"#)
            .unwrap_err();
        assert!(matches!(err, FxError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = SiteConfig::from_json(r#"{"field": {"interaction_radius": 0.0}}"#).unwrap_err();
        assert!(matches!(err, FxError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, FxError::ConfigParse(_)));
    }
}
