//! Scroll-position driven styling for the hero section and the navbar

/// Scroll distance over which the hero fades out completely
pub const HERO_FADE_DISTANCE: f64 = 500.0;
/// Scroll offset past which the navbar compacts
pub const NAVBAR_COMPACT_AFTER: f64 = 50.0;

/// Fraction of the hero fade completed, in `[0, 1]`
pub fn hero_progress(scroll_y: f64) -> f64 {
    if !scroll_y.is_finite() || scroll_y <= 0.0 {
        return 0.0;
    }
    (scroll_y / HERO_FADE_DISTANCE).min(1.0)
}

/// Styles applied to the hero background and overlay
#[derive(Clone, Debug, PartialEq)]
pub struct HeroStyle {
    pub background_opacity: f64,
    pub overlay_gradient: String,
}

impl HeroStyle {
    pub fn at(scroll_y: f64) -> Self {
        let p = hero_progress(scroll_y);
        let overlay_gradient = format!(
            "linear-gradient(to bottom, rgba(5, 5, 5, {}) 0%, rgba(5, 5, 5, {}) 70%, rgba(5, 5, 5, 1) 100%)",
            round3(0.4 + p * 0.6),
            round3(0.8 + p * 0.2),
        );
        Self {
            background_opacity: 1.0 - p,
            overlay_gradient,
        }
    }
}

/// Navbar padding and background
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavbarStyle {
    pub padding: &'static str,
    pub background: &'static str,
}

impl NavbarStyle {
    pub fn at(scroll_y: f64) -> Self {
        if scroll_y > NAVBAR_COMPACT_AFTER {
            Self {
                padding: "10px 0",
                background: "rgba(5, 5, 5, 0.95)",
            }
        } else {
            Self {
                padding: "20px 0",
                background: "rgba(5, 5, 5, 0.8)",
            }
        }
    }
}

// Keeps CSS free of float noise like 0.7000000000000001
fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
