//! Contact form: POST via `fetch`, status line from the response

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, HtmlElement, HtmlFormElement, HtmlInputElement, Request, RequestInit, Response};

use super::dom::{self, Listener};
use crate::core::contact::ORG_NONE;
use crate::core::{ContactForm, FormStatus, Result, SubmitOutcome};

/// Wire the submit handler and the "None" organisation button
pub fn init() -> Result<()> {
    init_org_none_button();

    let form_el: HtmlFormElement = dom::by_id("contactForm")?;
    let status_el: HtmlElement = dom::by_id("formStatus")?;
    let controller = Rc::new(RefCell::new(ContactForm::new()));

    let form_clone = form_el.clone();
    Listener::new(&form_el, "submit", move |e| {
        e.prevent_default();
        let Some(sending) = controller.borrow_mut().begin() else {
            return;
        };
        show_status(&status_el, &sending);

        let form = form_clone.clone();
        let status_el = status_el.clone();
        let controller = controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = match post_form(&form).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(error = ?e, "Contact submission failed");
                    SubmitOutcome::Failed
                }
            };
            if outcome.resets_form() {
                form.reset();
                info!("Contact form submitted");
            }
            let status = controller.borrow_mut().finish(outcome);
            show_status(&status_el, &status);
        });
    })?
    .forget();

    info!("Contact form ready");
    Ok(())
}

fn init_org_none_button() {
    let (Ok(button), Ok(input)) = (
        dom::by_id::<HtmlElement>("btnNone"),
        dom::by_id::<HtmlInputElement>("orgInput"),
    ) else {
        return;
    };
    match Listener::new(&button, "click", move |_| input.set_value(ORG_NONE)) {
        Ok(listener) => listener.forget(),
        Err(e) => warn!(error = %e, "Organisation shortcut unavailable"),
    }
}

async fn post_form(form: &HtmlFormElement) -> std::result::Result<SubmitOutcome, JsValue> {
    let url = form.action();
    info!(url = %url, "Submitting contact form");

    let data = FormData::new_with_form(form)?;
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&data);

    let request = Request::new_with_str_and_init(&url, &opts)?;
    request.headers().set("Accept", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    info!(status = response.status(), "Contact response");

    if response.ok() {
        return Ok(SubmitOutcome::Sent);
    }
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();
    Ok(SubmitOutcome::from_response(response.status(), &body))
}

fn show_status(el: &HtmlElement, status: &FormStatus) {
    el.set_text_content(Some(&status.text));
    if let Err(e) = dom::set_style(el, "color", &status.color.to_css()) {
        warn!(error = %e, "Could not colour form status");
    }
}
