//! Canvas 2D backend for [`Surface`]

use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::dom::js_err;
use crate::core::{device_pixels, FxError, Glow, Result, Rgba, Surface};

/// Drawing happens in CSS pixels; the backing store is `scale` times larger
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scale: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| FxError::Host("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::Host("not a 2d context".into()))?;
        Ok(Self {
            canvas,
            ctx,
            scale: 1.0,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to a new size at one device pixel per CSS pixel
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.resize_scaled(width, height, 1.0)
    }

    /// Match the backing store to `width` x `height` CSS pixels on a display
    /// with the given device pixel ratio
    pub fn resize_scaled(&mut self, width: f64, height: f64, ratio: f64) -> Result<()> {
        self.scale = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        self.canvas.set_width(device_pixels(width, self.scale));
        self.canvas.set_height(device_pixels(height, self.scale));
        // Resetting the size also resets the transform
        self.ctx
            .set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0)
            .map_err(js_err)
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64 / self.scale
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64 / self.scale
    }

    fn clear(&mut self) -> Result<()> {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
        Ok(())
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        fill: Rgba,
        glow: Option<Glow>,
    ) -> Result<()> {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, TAU).map_err(js_err)?;
        self.ctx.set_fill_style_str(&fill.to_css());
        if let Some(glow) = glow {
            self.ctx.set_shadow_blur(glow.blur);
            self.ctx.set_shadow_color(&glow.color.to_css());
        }
        self.ctx.fill();
        // Shadows are expensive on every later primitive
        self.ctx.set_shadow_blur(0.0);
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        color: Rgba,
        width: f64,
    ) -> Result<()> {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
        Ok(())
    }

    fn polygon(
        &mut self,
        points: &[(f64, f64)],
        fill: Option<Rgba>,
        stroke: Option<(Rgba, f64)>,
    ) -> Result<()> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.0, first.1);
        for p in rest {
            self.ctx.line_to(p.0, p.1);
        }
        self.ctx.close_path();
        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(&fill.to_css());
            self.ctx.fill();
        }
        if let Some((color, width)) = stroke {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(width);
            self.ctx.stroke();
        }
        Ok(())
    }

    fn label(&mut self, text: &str, x: f64, y: f64, color: Rgba, size: f64) -> Result<()> {
        self.ctx.set_font(&format!("{size}px Inter, sans-serif"));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_text(text, x, y).map_err(js_err)
    }
}
