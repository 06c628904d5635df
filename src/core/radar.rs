//! Skill radar chart: dataset and polar geometry
//!
//! Drawn through [`Surface`] like the particle field, so the same canvas
//! backend serves both.

use std::f64::consts::PI;

use super::error::Result;
use super::surface::{Rgba, Surface};

pub const SCALE_MAX: f64 = 100.0;
pub const GRID_STEP: f64 = 20.0;

pub const SKILL_LABELS: [&str; 8] = [
    "EDA",
    "Algorithms",
    "Predictive Modeling",
    "Classification",
    "CV (OpenCV)",
    "NLP",
    "Deep Learning (TF/PT)",
    "Data Visualization",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: &'static str,
    pub values: [f64; 8],
    pub color: Rgba,
}

pub fn skill_datasets() -> [Dataset; 2] {
    [
        Dataset {
            label: "Core Skills (Primary)",
            values: [95.0, 90.0, 85.0, 88.0, 92.0, 80.0, 85.0, 90.0],
            color: Rgba::opaque(0, 123, 255),
        },
        Dataset {
            label: "Tools & Innovation (Secondary)",
            values: [85.0, 95.0, 80.0, 85.0, 95.0, 75.0, 90.0, 85.0],
            color: Rgba::opaque(255, 77, 77),
        },
    ]
}

/// Layout of a radar chart inside a rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarGeometry {
    pub center: (f64, f64),
    pub radius: f64,
    pub axes: usize,
}

impl RadarGeometry {
    /// Fit the chart into `width` x `height`, leaving `margin` for labels
    pub fn fit(width: f64, height: f64, axes: usize, margin: f64) -> Self {
        Self {
            center: (width / 2.0, height / 2.0),
            radius: (width.min(height) / 2.0 - margin).max(0.0),
            axes,
        }
    }

    /// Angle of axis `k`; the first axis points straight up
    pub fn angle(&self, k: usize) -> f64 {
        -PI / 2.0 + 2.0 * PI * k as f64 / self.axes.max(1) as f64
    }

    /// Canvas point for `value` on axis `k`; values are clamped to the scale
    pub fn point(&self, k: usize, value: f64) -> (f64, f64) {
        let r = value.clamp(0.0, SCALE_MAX) / SCALE_MAX * self.radius;
        let a = self.angle(k);
        (self.center.0 + r * a.cos(), self.center.1 + r * a.sin())
    }

    pub fn polygon(&self, values: &[f64]) -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(k, &v)| self.point(k, v))
            .collect()
    }
}

/// Draw grid rings, spokes, axis labels and both datasets
pub fn draw_radar<S: Surface + ?Sized>(surface: &mut S, datasets: &[Dataset]) -> Result<()> {
    let geo = RadarGeometry::fit(surface.width(), surface.height(), SKILL_LABELS.len(), 60.0);
    let grid = Rgba::new(255, 255, 255, 0.1);
    let label_color = Rgba::opaque(240, 240, 240);

    surface.clear()?;

    let mut level = GRID_STEP;
    while level <= SCALE_MAX {
        let ring = geo.polygon(&[level; 8]);
        surface.polygon(&ring, None, Some((grid, 1.0)))?;
        level += GRID_STEP;
    }

    for (k, label) in SKILL_LABELS.iter().enumerate() {
        surface.stroke_line(geo.center, geo.point(k, SCALE_MAX), grid, 1.0)?;
        // Labels sit just outside the outer ring
        let a = geo.angle(k);
        let outside = geo.radius + 24.0;
        let (lx, ly) = (geo.center.0 + outside * a.cos(), geo.center.1 + outside * a.sin());
        surface.label(label, lx, ly, label_color, 12.0)?;
    }

    for set in datasets {
        let shape = geo.polygon(&set.values);
        surface.polygon(&shape, Some(set.color.with_alpha(0.2)), Some((set.color, 2.0)))?;
        for &(x, y) in &shape {
            surface.fill_circle(x, y, 3.0, set.color, None)?;
        }
    }
    Ok(())
}
