//! RHTMX Hash Router WASM
//!
//! WebAssembly bindings for the RHTMX hash router.
//! Provides the browser location, DOM event wiring, and a `HashRouter`
//! handle for JavaScript callers.

use std::rc::Rc;

use rhtmx_hash_router::{NavigationOrigin, Outcome, RouteContext, Router, RouterConfig, RouterError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

mod deploy;
mod location;

pub use deploy::deploy;
pub use location::BrowserLocation;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

pub(crate) fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// Full error chain on one line, e.g. `handler for route "/a" failed: boom`
pub(crate) fn describe_error(err: RouterError) -> String {
    let message = format!("{:#}", anyhow::Error::new(err));
    tracing::error!(error = %message, "hash router error");
    message
}

fn to_js_error(err: RouterError) -> JsValue {
    JsValue::from_str(&describe_error(err))
}

/// Wraps a JavaScript function as a route handler
///
/// The function is called with `{ params, current }` as a plain object.
/// A thrown exception becomes the handler's error.
fn js_handler(callback: js_sys::Function) -> impl Fn(&RouteContext) -> anyhow::Result<()> {
    move |context: &RouteContext| {
        let arg = context
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| anyhow::anyhow!("failed to convert route context: {}", e))?;

        callback.call1(&JsValue::NULL, &arg).map_err(|thrown| {
            let message = thrown.as_string().unwrap_or_else(|| format!("{:?}", thrown));
            anyhow::anyhow!("route callback threw: {}", message)
        })?;

        Ok(())
    }
}

/// Router handle exported to JavaScript
///
/// Handles are cheap to clone and share one router, so registration chains:
///
/// # Example (JavaScript)
/// ```javascript
/// const router = new HashRouter({ linkClass: 'ctrl' })
///     .connect('/users/:id', ({ params, current }) => showUser(params.id))
///     .connect('/home', () => showHome())
///     .deploy();
/// ```
#[wasm_bindgen]
#[derive(Clone)]
pub struct HashRouter {
    inner: Rc<Router<BrowserLocation>>,
}

#[wasm_bindgen]
impl HashRouter {
    /// Creates a router on `window.location`
    ///
    /// `config` may be `undefined` for defaults, or an object with
    /// `linkClass` and `linkSettleDelayMs`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<HashRouter, JsValue> {
        let config: RouterConfig = if config.is_undefined() || config.is_null() {
            RouterConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse router config: {}", e)))?
        };

        let location = BrowserLocation::from_window()?;
        Ok(HashRouter {
            inner: Rc::new(Router::with_config(location, config)),
        })
    }

    /// Registers a route; throws on a malformed template
    pub fn connect(&self, template: &str, callback: js_sys::Function) -> Result<HashRouter, JsValue> {
        self.inner
            .connect(template, js_handler(callback))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.clone())
    }

    /// Sets the callback run when no route matches
    #[wasm_bindgen(js_name = notFound)]
    pub fn not_found(&self, callback: js_sys::Function) -> HashRouter {
        self.inner.not_found(js_handler(callback));
        self.clone()
    }

    /// Navigates to `path`; returns whether a route matched
    pub fn navigate(&self, path: &str) -> Result<bool, JsValue> {
        self.inner
            .navigate(path)
            .map(|outcome| matches!(outcome, Outcome::Matched { .. }))
            .map_err(to_js_error)
    }

    /// Saves `path` and dispatches it if it differs from the remembered path
    ///
    /// With `from_hash_change` set, the location is assumed to be up to date
    /// and is not written.
    pub fn save(&self, path: &str, from_hash_change: bool) -> Result<bool, JsValue> {
        let origin = if from_hash_change {
            NavigationOrigin::HashChange
        } else {
            NavigationOrigin::Programmatic
        };

        self.inner
            .save(path, origin)
            .map(|outcome| matches!(outcome, Outcome::Matched { .. }))
            .map_err(to_js_error)
    }

    /// Dispatches the current fragment regardless of the remembered path
    pub fn dispatch(&self) -> Result<bool, JsValue> {
        self.inner
            .dispatch()
            .map(|outcome| matches!(outcome, Outcome::Matched { .. }))
            .map_err(to_js_error)
    }

    /// Current fragment without `#`
    pub fn path(&self) -> String {
        self.inner.path()
    }

    #[wasm_bindgen(js_name = currentPath)]
    pub fn current_path(&self) -> String {
        self.inner.current_path()
    }

    /// Starts listening for routed link clicks and hash changes
    pub fn deploy(&self) -> Result<HashRouter, JsValue> {
        deploy::deploy(Rc::clone(&self.inner))?;
        Ok(self.clone())
    }
}

impl HashRouter {
    /// The shared router, for Rust callers
    pub fn router(&self) -> Rc<Router<BrowserLocation>> {
        Rc::clone(&self.inner)
    }
}
