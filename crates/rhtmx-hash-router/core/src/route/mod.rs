//! Route module for template compilation
//!
//! Contains pure functional components for route tokenizing and matching:
//! - [`token`] splits a template into literal text and placeholders
//! - [`pattern`] compiles tokens into an anchored matcher

pub mod pattern;
pub mod token;

// Re-export commonly used types
pub use pattern::{is_segment_value, RoutePattern};
pub use token::{tokenize, Token};
