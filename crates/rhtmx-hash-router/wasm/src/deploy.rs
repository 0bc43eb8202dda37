//! DOM event wiring
//!
//! Both triggers end in [`Router::save`], so the router's path gate decides
//! whether anything runs:
//! 1. a click on a routed anchor, read after the configured settle delay
//! 2. the window's `hashchange` event

use std::rc::Rc;

use rhtmx_hash_router::{Location, Router, RouterError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlAnchorElement};

/// Attaches the router to the page
///
/// Listeners are leaked on purpose: the router lives as long as the page.
pub fn deploy<L: Location + 'static>(router: Rc<Router<L>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let selector = router.config().link_selector();
    let delay = i32::try_from(router.config().link_settle_delay_ms).unwrap_or(i32::MAX);

    // 1. Routed anchor clicks (event delegation)
    let click_router = Rc::clone(&router);
    let link_selector = selector.clone();
    let timer_window = window.clone();
    let link_handler = Closure::wrap(Box::new(move |event: Event| {
        let Some(anchor) = routed_anchor(&event, &link_selector) else {
            return;
        };
        let href = anchor.href();
        let router = Rc::clone(&click_router);

        // Let the browser finish its own fragment update first
        let settle = Closure::once_into_js(move || {
            report(router.on_link_activated(&href));
        });

        if let Err(err) = timer_window
            .set_timeout_with_callback_and_timeout_and_arguments_0(settle.unchecked_ref(), delay)
        {
            tracing::warn!(error = ?err, "failed to schedule routed link");
        }
    }) as Box<dyn FnMut(_)>);

    document.add_event_listener_with_callback("click", link_handler.as_ref().unchecked_ref())?;
    link_handler.forget();

    // 2. Fragment changes (back/forward, address bar, anchor default action)
    let hashchange_handler = Closure::wrap(Box::new(move |_event: Event| {
        report(router.on_hash_change());
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback(
        "hashchange",
        hashchange_handler.as_ref().unchecked_ref(),
    )?;
    hashchange_handler.forget();

    tracing::debug!(%selector, delay_ms = delay, "hash router deployed");
    Ok(())
}

/// The routed anchor an event came from, walking up from the target
fn routed_anchor(event: &Event, selector: &str) -> Option<HtmlAnchorElement> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    let anchor = element.closest(selector).ok()??;
    anchor.dyn_into::<HtmlAnchorElement>().ok()
}

/// Event handlers have nowhere to return errors to
fn report<T>(result: Result<T, RouterError>) {
    if let Err(err) = result {
        crate::console_error(&crate::describe_error(err));
    }
}
