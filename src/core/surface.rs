//! 2D drawing surface abstraction
//!
//! The renderer only talks to [`Surface`]; the browser implements it over a
//! canvas 2D context and tests/CLI use [`RecordingSurface`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{FxError, Result};

/// RGBA colour, channels 0-255 plus alpha 0.0-1.0 (CSS `rgba()` semantics)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same colour with a different alpha
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS colour string, e.g. `rgba(0, 123, 255, 0.8)`
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Soft glow drawn behind a filled shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub blur: f64,
    pub color: Rgba,
}

/// Minimal raster drawing API needed by the page features.
///
/// Every primitive may fail on a real host; the frame loop logs the error
/// and carries on with the next frame.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Clear the whole surface to transparent
    fn clear(&mut self) -> Result<()>;

    /// Filled circle, optionally with a glow
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba, glow: Option<Glow>)
        -> Result<()>;

    /// Straight line segment
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64)
        -> Result<()>;

    /// Closed polygon; `fill` and `stroke` are each optional
    fn polygon(
        &mut self,
        points: &[(f64, f64)],
        fill: Option<Rgba>,
        stroke: Option<(Rgba, f64)>,
    ) -> Result<()>;

    /// Text label anchored at its centre
    fn label(&mut self, text: &str, x: f64, y: f64, color: Rgba, size: f64) -> Result<()>;
}

/// Backing-store pixels for a logical extent at a device pixel ratio.
///
/// A non-finite or non-positive ratio counts as 1.
pub fn device_pixels(logical: f64, ratio: f64) -> u32 {
    let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
    if logical.is_finite() && logical > 0.0 {
        (logical * ratio).round() as u32
    } else {
        0
    }
}

/// A single recorded primitive
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        fill: Rgba,
        glow: Option<Glow>,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgba,
        width: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Option<Rgba>,
        stroke: Option<(Rgba, f64)>,
    },
    Label {
        text: String,
        x: f64,
        y: f64,
    },
}

/// Surface that records commands instead of drawing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    pub commands: Vec<DrawCommand>,
    /// Fail every primitive after this many successful ones (fault injection)
    fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            fail_after: None,
        }
    }

    /// Make the surface reject primitives once `count` have been recorded
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    fn record(&mut self, cmd: DrawCommand) -> Result<()> {
        if let Some(limit) = self.fail_after {
            if self.commands.len() >= limit {
                return Err(FxError::Surface("recording surface exhausted".into()));
            }
        }
        self.commands.push(cmd);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) -> Result<()> {
        // A clear starts a fresh frame
        self.commands.clear();
        self.record(DrawCommand::Clear)
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        fill: Rgba,
        glow: Option<Glow>,
    ) -> Result<()> {
        self.record(DrawCommand::Circle { x, y, radius, fill, glow })
    }

    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        color: Rgba,
        width: f64,
    ) -> Result<()> {
        self.record(DrawCommand::Line { from, to, color, width })
    }

    fn polygon(
        &mut self,
        points: &[(f64, f64)],
        fill: Option<Rgba>,
        stroke: Option<(Rgba, f64)>,
    ) -> Result<()> {
        self.record(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            stroke,
        })
    }

    fn label(&mut self, text: &str, x: f64, y: f64, _color: Rgba, _size: f64) -> Result<()> {
        self.record(DrawCommand::Label {
            text: text.to_string(),
            x,
            y,
        })
    }
}
