//! The document location seen by the router
//!
//! The router never touches the browser directly. It reads and writes the
//! fragment through [`Location`], which the wasm bindings implement on top
//! of `window.location` and which [`MemoryLocation`] implements for native
//! use and tests.

use std::cell::RefCell;
use std::rc::Rc;

/// Source of the current fragment and target of fragment writes
///
/// Implementations use interior mutability: the router runs on a single
/// thread and hands out shared references while handlers run.
pub trait Location {
    /// Current fragment without its leading `#`
    fn fragment(&self) -> String;

    /// Replaces the fragment. `fragment` carries no leading `#`.
    fn set_fragment(&self, fragment: &str);
}

impl<L: Location + ?Sized> Location for &L {
    fn fragment(&self) -> String {
        (**self).fragment()
    }

    fn set_fragment(&self, fragment: &str) {
        (**self).set_fragment(fragment)
    }
}

impl<L: Location + ?Sized> Location for Rc<L> {
    fn fragment(&self) -> String {
        (**self).fragment()
    }

    fn set_fragment(&self, fragment: &str) {
        (**self).set_fragment(fragment)
    }
}

/// In-memory location
///
/// Keeps every write so tests can assert on what the router pushed.
///
/// # Examples
///
/// ```
/// use rhtmx_hash_router::{Location, MemoryLocation};
///
/// let location = MemoryLocation::new("#users/1");
/// assert_eq!(location.fragment(), "users/1");
///
/// location.set_fragment("users/2");
/// assert_eq!(location.writes(), vec!["users/2".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryLocation {
    fragment: RefCell<String>,
    writes: RefCell<Vec<String>>,
}

impl MemoryLocation {
    /// Creates a location; a leading `#` on `initial` is dropped
    pub fn new(initial: &str) -> Self {
        Self {
            fragment: RefCell::new(crate::strip_hash(initial).to_string()),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Changes the fragment the way a user would (back button, address bar)
    ///
    /// Unlike [`Location::set_fragment`], this is not recorded as a write.
    pub fn replace(&self, fragment: &str) {
        *self.fragment.borrow_mut() = crate::strip_hash(fragment).to_string();
    }

    /// Fragments written through [`Location::set_fragment`], oldest first
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        let fragment = crate::strip_hash(fragment).to_string();
        self.writes.borrow_mut().push(fragment.clone());
        *self.fragment.borrow_mut() = fragment;
    }
}
