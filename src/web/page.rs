//! Presence indicator, typewriter headings and scroll styling

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use web_sys::{Element, HtmlElement};

use super::dom::{self, Listener};
use crate::core::scroll::{HeroStyle, NavbarStyle};
use crate::core::typewriter::Typewriter;
use crate::core::{Presence, PresenceConfig, Result, TypewriterConfig};
use crate::time::unix_millis;

/// Set the presence dot and text from the current wall clock
pub fn update_presence(config: &PresenceConfig) -> Result<Presence> {
    let indicator: Element = dom::by_id("presenceIndicator")?;
    let dot: Element = dom::query(&indicator, ".status-dot")?;
    let text: Element = dom::query(&indicator, ".status-text")?;

    let presence = Presence::at_unix_ms(unix_millis(), config);
    let classes = dot.class_list();
    let toggled = if presence.is_active() {
        classes.add_1("active")
    } else {
        classes.remove_1("active")
    };
    toggled.map_err(dom::js_err)?;
    text.set_text_content(Some(presence.status_text()));
    Ok(presence)
}

/// Start the logo and hero-name typewriters; absent elements are skipped
pub fn init_typewriters(config: &TypewriterConfig) -> Result<()> {
    let document = dom::document()?;

    if let Some(logo) = document.query_selector(".logo").map_err(dom::js_err)? {
        start_typewriter(logo, &config.text, config.logo_speed_ms, 0, true)?;
    }
    if let Some(hero) = document.get_element_by_id("typewriter-name") {
        start_typewriter(hero, &config.text, config.hero_speed_ms, config.hero_delay_ms, true)?;
    }
    Ok(())
}

fn start_typewriter(el: Element, text: &str, speed_ms: u32, delay_ms: u32, looping: bool) -> Result<()> {
    el.set_text_content(Some(""));
    let tw = Rc::new(RefCell::new(Typewriter::new(text, speed_ms, looping)));
    debug!(text, speed_ms, delay_ms, "Typewriter scheduled");
    dom::set_timeout(delay_ms, move || type_step(el, tw))?;
    Ok(())
}

fn type_step(el: Element, tw: Rc<RefCell<Typewriter>>) {
    let next = {
        let mut writer = tw.borrow_mut();
        let step = writer.step();
        el.set_text_content(Some(step.visible));
        step.next_delay_ms
    };
    if let Some(delay) = next {
        if let Err(e) = dom::set_timeout(delay, move || type_step(el, tw)) {
            warn!(error = %e, "Typewriter stopped");
        }
    }
}

/// Hero fade and navbar compaction on scroll
pub fn init_scroll_styling() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;
    let hero_bg = find_html(&document, ".hero-bg");
    let hero_overlay = find_html(&document, ".hero-overlay");
    let navbar = dom::by_id::<HtmlElement>("navbar").ok();

    let apply = move |scroll_y: f64| -> Result<()> {
        let hero = HeroStyle::at(scroll_y);
        if let Some(bg) = &hero_bg {
            dom::set_style(bg, "opacity", &hero.background_opacity.to_string())?;
        }
        if let Some(overlay) = &hero_overlay {
            dom::set_style(overlay, "background", &hero.overlay_gradient)?;
        }
        if let Some(nav) = &navbar {
            let style = NavbarStyle::at(scroll_y);
            dom::set_style(nav, "padding", style.padding)?;
            dom::set_style(nav, "background", style.background)?;
        }
        Ok(())
    };

    let scroll_window = window.clone();
    Listener::new(&window, "scroll", move |_| {
        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
        if let Err(e) = apply(scroll_y) {
            warn!(error = %e, "Scroll styling failed");
        }
    })?
    .forget();

    info!("Scroll styling ready");
    Ok(())
}

fn find_html(document: &web_sys::Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| wasm_bindgen::JsCast::dyn_into::<HtmlElement>(el).ok())
}
