//! Scroll reveal bindings and the radar chart canvas

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};
use web_sys::{HtmlCanvasElement, HtmlElement};

use super::canvas::CanvasSurface;
use super::dom::{self, Listener};
use crate::core::radar::{draw_radar, skill_datasets};
use crate::core::reveal::{RevealPreset, RevealTracker, PRESETS, STYLED_PROPERTIES};
use crate::core::Result;

/// Radar width used when the canvas has no laid-out container
const RADAR_FALLBACK_SIDE: i32 = 300;

struct RevealGroup {
    preset: RevealPreset,
    elements: Vec<HtmlElement>,
    tracker: RevealTracker,
}

impl RevealGroup {
    fn poll(&mut self, viewport_height: f64) -> Result<()> {
        if self.tracker.all_played() {
            return Ok(());
        }
        let tops: Vec<f64> = self
            .elements
            .iter()
            .map(|el| el.get_bounding_client_rect().top())
            .collect();
        for idx in self.tracker.poll(&self.preset, &tops, viewport_height) {
            let el = &self.elements[idx];
            for (property, value) in self.preset.revealed_style() {
                dom::set_style(el, property, &value)?;
            }
            let settled = el.clone();
            dom::set_timeout(self.preset.settle_ms(), move || {
                for property in STYLED_PROPERTIES {
                    if let Err(e) = dom::clear_style(&settled, property) {
                        warn!(error = %e, property, "Could not clear reveal style");
                    }
                }
            })?;
        }
        Ok(())
    }
}

/// Hide every reveal target and play each one when it scrolls into view
pub fn init_reveals() -> Result<()> {
    let window = dom::window()?;

    let mut groups = Vec::new();
    for preset in PRESETS {
        let elements = dom::query_all(preset.selector)?;
        for el in &elements {
            for (property, value) in preset.initial_style() {
                dom::set_style(el, property, &value)?;
            }
        }
        debug!(selector = preset.selector, count = elements.len(), "Reveal targets");
        groups.push(RevealGroup {
            preset: *preset,
            tracker: RevealTracker::new(elements.len()),
            elements,
        });
    }
    let groups = Rc::new(RefCell::new(groups));
    let finished = Rc::new(Cell::new(false));

    let check = {
        let window = window.clone();
        move || {
            if finished.get() {
                return;
            }
            let (_, height) = dom::viewport_size(&window);
            let mut groups = groups.borrow_mut();
            for group in groups.iter_mut() {
                if let Err(e) = group.poll(height) {
                    warn!(error = %e, selector = group.preset.selector, "Reveal failed");
                }
            }
            if groups.iter().all(|g| g.tracker.all_played()) {
                finished.set(true);
                debug!("Every reveal played");
            }
        }
    };

    // Let the hidden state reach the screen before anything in view plays
    let first = check.clone();
    dom::next_frame(move || {
        if let Err(e) = dom::next_frame(first) {
            warn!(error = %e, "Could not schedule first reveal pass");
        }
    })?;

    let on_scroll = check.clone();
    Listener::new(&window, "scroll", move |_| on_scroll()).map(Listener::forget)?;
    // Layout shifts once images and fonts arrive
    Listener::new(&window, "load", move |_| check()).map(Listener::forget)?;

    info!("Scroll reveals ready");
    Ok(())
}

/// Size the radar to its container at the display's pixel ratio and redraw
fn draw_radar_fitted(surface: &mut CanvasSurface) -> Result<f64> {
    let window = dom::window()?;
    let canvas = surface.canvas().clone();
    let side = canvas
        .parent_element()
        .map(|parent| parent.client_width())
        .filter(|&w| w > 0)
        .unwrap_or(RADAR_FALLBACK_SIDE) as f64;

    dom::set_style(&canvas, "width", &format!("{side}px"))?;
    dom::set_style(&canvas, "height", &format!("{side}px"))?;
    surface.resize_scaled(side, side, window.device_pixel_ratio())?;
    draw_radar(surface, &skill_datasets())?;
    Ok(side)
}

/// Draw the skill radar onto `#skillsChart` if the page has one, and keep
/// it fitted to its container
pub fn init_radar() -> Result<()> {
    let Ok(canvas) = dom::by_id::<HtmlCanvasElement>("skillsChart") else {
        return Ok(());
    };
    let mut surface = CanvasSurface::new(canvas)?;
    let side = draw_radar_fitted(&mut surface)?;
    info!(side, "Skill radar drawn");

    let surface = Rc::new(RefCell::new(surface));
    Listener::new(&dom::window()?, "resize", move |_| {
        if let Err(e) = draw_radar_fitted(&mut surface.borrow_mut()) {
            warn!(error = %e, "Radar redraw failed");
        }
    })
    .map(Listener::forget)?;
    Ok(())
}
