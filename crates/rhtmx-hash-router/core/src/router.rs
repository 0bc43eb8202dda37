//! Hash router: ordered routes, dispatch and navigation bookkeeping

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::{
    decode_fragment, extract_fragment, Location, Params, RouteError, RoutePattern, RouterConfig, RouterError,
};

/// Route handler
///
/// Returning `Err` does not undo the navigation; the error is logged and
/// surfaced from [`Router::dispatch`].
pub type Handler = Rc<dyn Fn(&RouteContext) -> anyhow::Result<()>>;

/// Argument passed to a route handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteContext {
    /// Captured placeholders of the matched route
    pub params: Params,
    /// The path the router dispatched on
    pub current: String,
}

/// Where a navigation request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOrigin {
    /// Application code called [`Router::navigate`]
    Programmatic,
    /// A routed anchor was clicked; its default action already moved the fragment
    LinkClick,
    /// The platform reported a fragment change; the location is already up to date
    HashChange,
}

impl NavigationOrigin {
    /// Whether saving a path from this origin should write the fragment
    pub fn writes_fragment(self) -> bool {
        matches!(self, NavigationOrigin::Programmatic)
    }
}

/// Result of a dispatch or save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Path equal to the last dispatched one; nothing ran
    Unchanged,
    /// First matching route ran
    Matched { template: String },
    /// No route matched. The not-found handler ran if one is set.
    NotFound,
}

struct Route {
    pattern: RoutePattern,
    handler: Handler,
}

/// Fragment router
///
/// Routes are tried in registration order and the first match wins;
/// specificity plays no part. The router is a plain value owned by the
/// application's startup code. Every method takes `&self`, so handlers can
/// navigate again while a dispatch is running.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use rhtmx_hash_router::{MemoryLocation, NavigationOrigin, Router};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let log = Rc::clone(&seen);
///
/// let router = Router::new(MemoryLocation::new(""));
/// router
///     .connect("/users/:id", move |ctx| {
///         log.borrow_mut().push(ctx.params["id"].to_string());
///         Ok(())
///     })
///     .unwrap();
///
/// router.save("users/42", NavigationOrigin::Programmatic).unwrap();
/// assert_eq!(*seen.borrow(), vec!["42".to_string()]);
/// ```
pub struct Router<L: Location> {
    routes: RefCell<Vec<Route>>,
    not_found: RefCell<Option<Handler>>,
    current_path: RefCell<String>,
    location: L,
    config: RouterConfig,
}

impl<L: Location> fmt::Debug for Router<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.templates())
            .field("current_path", &self.current_path())
            .field("has_not_found", &self.not_found.borrow().is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl<L: Location> Router<L> {
    /// Creates a router with default settings
    ///
    /// The remembered path is seeded from the location, so the page's
    /// initial fragment is not dispatched again by an echoing hash change.
    pub fn new(location: L) -> Self {
        Self::with_config(location, RouterConfig::default())
    }

    /// Creates a router with explicit settings
    pub fn with_config(location: L, config: RouterConfig) -> Self {
        let current_path = location.fragment();
        Self {
            routes: RefCell::new(Vec::new()),
            not_found: RefCell::new(None),
            current_path: RefCell::new(current_path),
            location,
            config,
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a route, returning the router for chaining
    ///
    /// Identical or overlapping templates are allowed; only the first one
    /// registered can ever fire for a given path.
    ///
    /// # Errors
    ///
    /// Fails when the template does not compile (see [`RoutePattern::parse`]).
    pub fn connect<F>(&self, template: &str, handler: F) -> Result<&Self, RouteError>
    where
        F: Fn(&RouteContext) -> anyhow::Result<()> + 'static,
    {
        let pattern = RoutePattern::parse(template)?;
        Ok(self.connect_pattern(pattern, handler))
    }

    /// Registers an already compiled pattern
    pub fn connect_pattern<F>(&self, pattern: RoutePattern, handler: F) -> &Self
    where
        F: Fn(&RouteContext) -> anyhow::Result<()> + 'static,
    {
        tracing::debug!(template = pattern.source(), "registered route");
        self.routes.borrow_mut().push(Route {
            pattern,
            handler: Rc::new(handler),
        });
        self
    }

    /// Sets the handler run when nothing matches
    ///
    /// It receives empty params and the unmatched path.
    pub fn not_found<F>(&self, handler: F) -> &Self
    where
        F: Fn(&RouteContext) -> anyhow::Result<()> + 'static,
    {
        *self.not_found.borrow_mut() = Some(Rc::new(handler));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current fragment from the location, read fresh on every call
    pub fn path(&self) -> String {
        self.location.fragment()
    }

    /// Last path the router saved and dispatched on
    pub fn current_path(&self) -> String {
        self.current_path.borrow().clone()
    }

    /// Registered templates in priority order
    pub fn templates(&self) -> Vec<String> {
        self.routes
            .borrow()
            .iter()
            .map(|route| route.pattern.source().to_string())
            .collect()
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.routes.borrow().len()
    }

    /// Whether no route is registered
    pub fn is_empty(&self) -> bool {
        self.routes.borrow().is_empty()
    }

    /// Settings the router was built with
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The location the router reads and writes
    pub fn location(&self) -> &L {
        &self.location
    }

    // ========================================================================
    // Matching and dispatch
    // ========================================================================

    /// Finds the first route matching `path` without running it
    ///
    /// Returns the matched template and its params.
    pub fn resolve(&self, path: &str) -> Option<(String, Params)> {
        self.find(path)
            .map(|(template, params, _)| (template, params))
    }

    fn find(&self, path: &str) -> Option<(String, Params, Handler)> {
        self.routes.borrow().iter().find_map(|route| {
            tracing::trace!(template = route.pattern.source(), path, "testing route");
            route.pattern.matches(path).map(|params| {
                (
                    route.pattern.source().to_string(),
                    params,
                    Rc::clone(&route.handler),
                )
            })
        })
    }

    /// Resolves the location's current path and runs the first matching route
    ///
    /// No match is not an error: the not-found handler runs if set and the
    /// result is [`Outcome::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns the handler's error, wrapped with the route template. The
    /// error is also logged.
    pub fn dispatch(&self) -> Result<Outcome, RouterError> {
        let path = self.path();

        // The routes borrow ends here; handlers may register or navigate.
        let found = self.find(&path);

        match found {
            Some((template, params, handler)) => {
                tracing::debug!(%template, %path, "dispatching route");
                let context = RouteContext {
                    params,
                    current: path,
                };

                if let Err(source) = handler(&context) {
                    tracing::error!(%template, error = %source, "route handler failed");
                    return Err(RouterError::Handler { template, source });
                }

                Ok(Outcome::Matched { template })
            }
            None => {
                tracing::debug!(%path, "no route matched");
                let handler = self.not_found.borrow().clone();

                if let Some(handler) = handler {
                    let context = RouteContext {
                        params: Params::new(),
                        current: path.clone(),
                    };
                    if let Err(source) = handler(&context) {
                        tracing::error!(%path, error = %source, "not-found handler failed");
                        return Err(RouterError::NotFoundHandler { path, source });
                    }
                }

                Ok(Outcome::NotFound)
            }
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Records a navigation to `path` and dispatches it if the path changed
    ///
    /// Saving the remembered path again is a no-op, which is what absorbs the
    /// hash change the router's own fragment write triggers. Only
    /// [`NavigationOrigin::Programmatic`] writes the fragment, and only when
    /// it differs. The remembered path is updated before
    /// dispatching, so a failing handler does not roll it back.
    pub fn save(&self, path: &str, origin: NavigationOrigin) -> Result<Outcome, RouterError> {
        if *self.current_path.borrow() == path {
            tracing::trace!(path, ?origin, "path unchanged, skipping dispatch");
            return Ok(Outcome::Unchanged);
        }

        if origin.writes_fragment() && self.location.fragment() != path {
            self.location.set_fragment(path);
        }

        *self.current_path.borrow_mut() = path.to_string();
        tracing::debug!(path, ?origin, "navigation saved");

        self.dispatch()
    }

    /// Programmatic navigation
    pub fn navigate(&self, path: &str) -> Result<Outcome, RouterError> {
        self.save(path, NavigationOrigin::Programmatic)
    }

    /// Entry point for the platform's fragment-change notification
    pub fn on_hash_change(&self) -> Result<Outcome, RouterError> {
        let path = self.path();
        self.save(&path, NavigationOrigin::HashChange)
    }

    /// Entry point for a routed anchor click, once its navigation has settled
    ///
    /// `href` is the anchor's resolved href; its fragment is the target path.
    /// The click only counts while the location still shows that target. A
    /// later click or hash change that already moved the location wins, and
    /// the stale click is dropped as [`Outcome::Unchanged`].
    pub fn on_link_activated(&self, href: &str) -> Result<Outcome, RouterError> {
        let target = decode_fragment(extract_fragment(href));
        let settled = self.location.fragment();

        if settled != target {
            tracing::debug!(target = %target, settled = %settled, "location moved past link target, ignoring click");
            return Ok(Outcome::Unchanged);
        }

        self.save(&target, NavigationOrigin::LinkClick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryLocation;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<usize>>, impl Fn(&RouteContext) -> anyhow::Result<()>) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move |_: &RouteContext| {
            inner.set(inner.get() + 1);
            Ok(())
        })
    }

    #[test]
    fn test_seeds_current_path_from_location() {
        let router = Router::new(MemoryLocation::new("#home"));
        assert_eq!(router.current_path(), "home");
        assert_eq!(router.path(), "home");
    }

    #[test]
    fn test_save_same_as_seed_is_noop() {
        let (count, handler) = counter();
        let router = Router::new(MemoryLocation::new("home"));
        router.connect("/home", handler).unwrap();

        assert_eq!(router.on_hash_change().unwrap(), Outcome::Unchanged);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_connect_rejects_bad_template() {
        let router = Router::new(MemoryLocation::new(""));
        assert!(router.connect("/users/:ID", |_| Ok(())).is_err());
        assert!(router.is_empty());
    }

    #[test]
    fn test_hash_change_does_not_write_fragment() {
        let location = Rc::new(MemoryLocation::new(""));
        let router = Router::new(Rc::clone(&location));
        router.connect("/a", |_| Ok(())).unwrap();

        location.replace("a");
        router.on_hash_change().unwrap();
        assert!(location.writes().is_empty());
    }

    #[test]
    fn test_link_activation_uses_href_fragment() {
        let location = Rc::new(MemoryLocation::new(""));
        let router = Router::new(Rc::clone(&location));
        router.connect("/posts/:id", |_| Ok(())).unwrap();

        location.replace("posts/9");
        let outcome = router
            .on_link_activated("https://example.com/index.html#posts/9")
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Matched {
                template: "/posts/:id".to_string()
            }
        );
        assert_eq!(router.current_path(), "posts/9");
        assert!(location.writes().is_empty());
    }

    #[test]
    fn test_link_activation_decodes_href() {
        let location = Rc::new(MemoryLocation::new(""));
        let router = Router::new(Rc::clone(&location));
        router.connect("/café/:id", |_| Ok(())).unwrap();

        location.replace("café/1");
        let outcome = router.on_link_activated("http://x/#caf%C3%A9/1").unwrap();
        assert!(matches!(outcome, Outcome::Matched { .. }));
        assert_eq!(router.current_path(), "café/1");
    }

    #[test]
    fn test_only_programmatic_origin_writes() {
        assert!(NavigationOrigin::Programmatic.writes_fragment());
        assert!(!NavigationOrigin::LinkClick.writes_fragment());
        assert!(!NavigationOrigin::HashChange.writes_fragment());
    }

    #[test]
    fn test_debug_lists_templates() {
        let router = Router::new(MemoryLocation::new(""));
        router.connect("/a", |_| Ok(())).unwrap();
        let debug = format!("{:?}", router);
        assert!(debug.contains("\"/a\""));
    }
}
