//! `window.location` as a router location

use rhtmx_hash_router::{decode_fragment, strip_hash, Location};
use wasm_bindgen::JsValue;

/// Reads and writes `location.hash`
///
/// Reads are percent-decoded, so a path written as `café/1` reads back the same.
#[derive(Debug, Clone)]
pub struct BrowserLocation {
    location: web_sys::Location,
}

impl BrowserLocation {
    pub fn new(location: web_sys::Location) -> Self {
        Self { location }
    }

    /// Location of the global `window`
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
        Ok(Self::new(window.location()))
    }
}

impl Location for BrowserLocation {
    fn fragment(&self) -> String {
        match self.location.hash() {
            Ok(hash) => decode_fragment(strip_hash(&hash)).into_owned(),
            Err(err) => {
                tracing::warn!(error = ?err, "failed to read location.hash");
                String::new()
            }
        }
    }

    fn set_fragment(&self, fragment: &str) {
        if let Err(err) = self.location.set_hash(fragment) {
            tracing::warn!(fragment, error = ?err, "failed to write location.hash");
            crate::console_error(&format!("Failed to set location hash to `{}`", fragment));
        }
    }
}
