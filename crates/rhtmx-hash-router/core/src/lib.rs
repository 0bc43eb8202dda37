//! # RHTMX Hash Router
//!
//! A client-side router driven by the URL fragment (`#users/42`):
//! - Route templates with named segments (`/users/:id/:action`)
//! - First registered match wins, no specificity ranking
//! - Idempotent navigation: saving the current path again does nothing
//! - Browser-free core; the `Location` trait is the only seam to the page
//!
//! ## Template Syntax
//!
//! | Template | Matches | Params |
//! |----------|---------|--------|
//! | `/home` | `home`, `/home`, `home/` | none |
//! | `/users/:id` | `users/42` | `id = "42"` |
//! | `/users/:id/:action` | `users/42/edit` | `id`, `action` |
//! | `/` | `""`, `/` | none |
//!
//! Placeholder names are lowercase letters and hyphens. Captured values are
//! one or more lowercase letters or digits; anything else does not match.
//!
//! ## Example
//!
//! ```
//! use rhtmx_hash_router::{MemoryLocation, Outcome, Router};
//!
//! let router = Router::new(MemoryLocation::new(""));
//! router
//!     .connect("/users/:id", |ctx| {
//!         assert_eq!(ctx.params.get("id"), Some("42"));
//!         Ok(())
//!     })
//!     .unwrap()
//!     .connect("/home", |_| Ok(()))
//!     .unwrap();
//!
//! let outcome = router.navigate("users/42").unwrap();
//! assert_eq!(outcome, Outcome::Matched { template: "/users/:id".to_string() });
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod config;
mod error;
mod fragment;
mod location;
mod params;
pub mod route;
mod router;

pub use config::RouterConfig;
pub use error::{RouteError, RouterError};
pub use fragment::{decode_fragment, extract_fragment, strip_hash};
pub use location::{Location, MemoryLocation};
pub use params::Params;
pub use route::{is_segment_value, tokenize, RoutePattern, Token};
pub use router::{Handler, NavigationOrigin, Outcome, RouteContext, Router};
