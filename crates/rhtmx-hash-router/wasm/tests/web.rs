//! Browser tests for the hash router bindings
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use rhtmx_hash_router::Location;
use rhtmx_hash_router_wasm::{BrowserLocation, HashRouter};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn global(name: &str) -> JsValue {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn browser_location_round_trips_fragment() {
    let location = BrowserLocation::from_window().unwrap();
    location.set_fragment("users/7");
    assert_eq!(location.fragment(), "users/7");
}

#[wasm_bindgen_test]
fn browser_location_decodes_escaped_fragment() {
    let location = BrowserLocation::from_window().unwrap();
    location.set_fragment("my page/café");
    assert_eq!(location.fragment(), "my page/café");
}

#[wasm_bindgen_test]
fn non_ascii_route_fires_once() {
    let router = HashRouter::new(JsValue::UNDEFINED).unwrap();
    let callback = js_sys::Function::new_with_args(
        "ctx",
        "globalThis.__hashRouterCafe = (globalThis.__hashRouterCafe || 0) + 1;",
    );

    router.connect("/café/:id", callback).unwrap();
    assert!(router.navigate("café/1").unwrap());
    assert_eq!(router.path(), "café/1");

    // The echoed hash change carries the same path
    assert!(!router.save(&router.path(), true).unwrap());
    assert_eq!(global("__hashRouterCafe").as_f64().unwrap(), 1.0);
}

#[wasm_bindgen_test]
async fn deploy_routes_clicks_inside_ctrl_anchor() {
    let router = HashRouter::new(JsValue::UNDEFINED).unwrap();
    let callback = js_sys::Function::new_with_args(
        "ctx",
        "globalThis.__hashRouterClicked = ctx.params.id;",
    );
    router.connect("/clicked/:id", callback).unwrap().deploy().unwrap();

    let document = web_sys::window().unwrap().document().unwrap();
    let anchor = document.create_element("a").unwrap();
    anchor.set_class_name("ctrl");
    anchor.set_attribute("href", "#clicked/5").unwrap();
    let label = document.create_element("span").unwrap();
    anchor.append_child(&label).unwrap();
    document.body().unwrap().append_child(&anchor).unwrap();

    // The click starts on a child, so the listener has to walk up to the anchor
    label.dyn_into::<HtmlElement>().unwrap().click();
    TimeoutFuture::new(100).await;

    assert_eq!(global("__hashRouterClicked").as_string().unwrap(), "5");
    assert_eq!(router.current_path(), "clicked/5");
    assert_eq!(router.path(), "clicked/5");

    anchor.remove();
}

#[wasm_bindgen_test]
fn navigate_calls_js_callback_with_plain_object() {
    let router = HashRouter::new(JsValue::UNDEFINED).unwrap();
    let callback = js_sys::Function::new_with_args(
        "ctx",
        "globalThis.__hashRouterSeen = ctx.params.id + '|' + ctx.current;",
    );

    router.connect("/items/:id", callback).unwrap();
    assert!(router.navigate("items/99").unwrap());

    assert_eq!(global("__hashRouterSeen").as_string().unwrap(), "99|items/99");
    assert_eq!(router.current_path(), "items/99");
    assert_eq!(router.path(), "items/99");
}

#[wasm_bindgen_test]
fn save_same_path_is_noop() {
    let router = HashRouter::new(JsValue::UNDEFINED).unwrap();
    let callback = js_sys::Function::new_no_args(
        "globalThis.__hashRouterCount = (globalThis.__hashRouterCount || 0) + 1;",
    );

    router.connect("/counted", callback).unwrap();
    assert!(router.save("counted", false).unwrap());
    assert!(!router.save("counted", false).unwrap());

    assert_eq!(global("__hashRouterCount").as_f64().unwrap(), 1.0);
}

#[wasm_bindgen_test]
fn throwing_callback_is_reported_as_error() {
    let router = HashRouter::new(JsValue::UNDEFINED).unwrap();
    let callback = js_sys::Function::new_no_args("throw 'nope';");

    router.connect("/fails", callback).unwrap();
    let err = router.navigate("fails").unwrap_err();

    assert!(err.as_string().unwrap().contains("nope"));
    assert_eq!(router.current_path(), "fails");
}

#[wasm_bindgen_test]
fn malformed_template_throws() {
    let router = HashRouter::new(JsValue::UNDEFINED).unwrap();
    let callback = js_sys::Function::new_no_args("");
    assert!(router.connect("/users/:userId", callback).is_err());
}

#[wasm_bindgen_test]
fn config_object_is_parsed() {
    let config = js_sys::Object::new();
    js_sys::Reflect::set(&config, &"linkClass".into(), &"nav".into()).unwrap();

    let router = HashRouter::new(config.into()).unwrap();
    assert_eq!(router.router().config().link_class, "nav");
}
