//! Small DOM helpers shared by the page features

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::core::{FxError, Result};

/// Convert a thrown JS value into the crate error
pub fn js_err(e: JsValue) -> FxError {
    FxError::Host(
        e.as_string()
            .unwrap_or_else(|| format!("{e:?}")),
    )
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| FxError::MissingElement("window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| FxError::MissingElement("document".into()))
}

/// Element by id, cast to the requested type
pub fn by_id<T: JsCast>(id: &str) -> Result<T> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| FxError::MissingElement(format!("#{id}")))?
        .dyn_into::<T>()
        .map_err(|_| FxError::MissingElement(format!("#{id} has unexpected type")))
}

/// First element matching `selector` within `root`
pub fn query<T: JsCast>(root: &Element, selector: &str) -> Result<T> {
    root.query_selector(selector)
        .map_err(js_err)?
        .ok_or_else(|| FxError::MissingElement(selector.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| FxError::MissingElement(format!("{selector} has unexpected type")))
}

/// Every element matching `selector` in the document
pub fn query_all(selector: &str) -> Result<Vec<HtmlElement>> {
    let list = document()?.query_selector_all(selector).map_err(js_err)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<()> {
    el.style().set_property(property, value).map_err(js_err)
}

pub fn clear_style(el: &HtmlElement, property: &str) -> Result<()> {
    el.style().remove_property(property).map(drop).map_err(js_err)
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

/// Run `f` once after `ms` milliseconds
pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> Result<i32> {
    let cb = Closure::once_into_js(f);
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32)
        .map_err(js_err)
}

/// Run `f` once before the next repaint
pub fn next_frame(f: impl FnOnce() + 'static) -> Result<i32> {
    let cb = Closure::once_into_js(f);
    window()?
        .request_animation_frame(cb.unchecked_ref())
        .map_err(js_err)
}

/// Event listener that unregisters itself when dropped
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure: Some(closure),
        })
    }

    /// Keep the listener registered for the lifetime of the page
    pub fn forget(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, closure.as_ref().unchecked_ref());
        }
    }
}
