//! Browser entry point
//!
//! Every page feature starts independently: a feature that fails to
//! initialise is logged and the rest of the page keeps working.

mod canvas;
mod contact;
mod dom;
mod field_loop;
mod page;
mod reveal;

use std::cell::RefCell;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

use crate::core::{Result, SiteConfig};
use field_loop::FieldRunner;

/// Global holding a JSON object that overrides the default config
const CONFIG_GLOBAL: &str = "__portfolio_config";

thread_local! {
    static FIELD: RefCell<Option<FieldRunner>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    let config = load_config();

    match FieldRunner::start(config.field.clone()) {
        Ok(runner) => FIELD.with(|f| *f.borrow_mut() = Some(runner)),
        Err(e) => warn!(error = %e, "Background field unavailable"),
    }

    report("typewriter", page::init_typewriters(&config.typewriter));
    report("scroll styling", page::init_scroll_styling());
    report("scroll reveals", reveal::init_reveals());
    report("radar chart", reveal::init_radar());
    report("contact form", contact::init());
    report("presence", page::update_presence(&config.presence).map(|p| {
        info!(presence = ?p, "Presence indicator set");
    }));
}

/// Stop the background animation and release its listeners
#[wasm_bindgen]
pub fn stop_background() {
    FIELD.with(|f| {
        if let Some(runner) = f.borrow_mut().take() {
            let stats = runner.stats();
            info!(
                frames = stats.frames,
                failed = stats.failed_frames,
                "Stopping background field"
            );
        }
    });
}

fn report(feature: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!(feature, error = %e, "Feature failed to start");
    }
}

/// Defaults, overridden by `window.__portfolio_config` when present and valid
fn load_config() -> SiteConfig {
    let Some(window) = web_sys::window() else {
        return SiteConfig::default();
    };
    let value = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => return SiteConfig::default(),
    };
    let json: Option<String> = js_sys::JSON::stringify(&value).ok().map(String::from);
    match json.as_deref().map(SiteConfig::from_json) {
        Some(Ok(config)) => {
            info!("Loaded page config override");
            config
        }
        Some(Err(e)) => {
            warn!(error = %e, "Ignoring invalid page config");
            SiteConfig::default()
        }
        None => SiteConfig::default(),
    }
}
