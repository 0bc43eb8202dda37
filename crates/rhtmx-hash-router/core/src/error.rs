//! Error types for route construction and dispatch

use thiserror::Error;

/// Errors raised while compiling a route template or building a path from one
///
/// Every variant is a construction-time problem: a template that fails here is
/// rejected at registration instead of producing a matcher that never fires.
#[derive(Debug, Error)]
pub enum RouteError {
    /// `/:` with no name after the colon
    #[error("empty placeholder at byte {offset} in route template `{template}`")]
    EmptyPlaceholder { template: String, offset: usize },

    /// Placeholder name runs into an uppercase letter, digit or underscore
    #[error("invalid placeholder `{name}` in route template `{template}`: names are lowercase letters and hyphens only")]
    InvalidPlaceholderName { template: String, name: String },

    /// Same placeholder name declared twice
    #[error("placeholder `{name}` declared more than once in route template `{template}`")]
    DuplicateParam { template: String, name: String },

    /// `build` was not given a value for a placeholder
    #[error("missing value for placeholder `{name}` of route template `{template}`")]
    MissingParam { template: String, name: String },

    /// `build` was given a value the matcher would not capture
    #[error("value `{value}` for placeholder `{name}` must be lowercase letters and digits")]
    InvalidParamValue { name: String, value: String },

    #[error("failed to compile route matcher: {0}")]
    Regex(#[from] regex::Error),
}

/// Errors surfaced by dispatch
#[derive(Debug, Error)]
pub enum RouterError {
    /// A route handler returned an error. The navigation itself already happened.
    #[error("handler for route `{template}` failed")]
    Handler {
        template: String,
        #[source]
        source: anyhow::Error,
    },

    /// The not-found handler returned an error
    #[error("not-found handler failed for path `{path}`")]
    NotFoundHandler {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_error_messages_name_the_template() {
        let err = RouteError::InvalidPlaceholderName {
            template: "/users/:Id".to_string(),
            name: "Id".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/users/:Id"));
        assert!(msg.contains("lowercase"));
    }

    #[test]
    fn test_handler_error_keeps_source() {
        let err = RouterError::Handler {
            template: "/home".to_string(),
            source: anyhow::anyhow!("boom"),
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "boom");
    }
}
