//! Route pattern compilation and matching
//!
//! Turns a template like `/users/:id` into an anchored matcher plus the
//! ordered list of placeholder names, in one fold over the template tokens.
//! Matching is **pure**: the captured values are returned, never stored.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use super::token::{tokenize, Token};
use crate::{Params, RouteError};

/// Sub-pattern substituted for every `/:name` placeholder
const SEGMENT_CAPTURE: &str = "/([a-z0-9]+)";

/// Whether `value` is something a placeholder can capture
pub fn is_segment_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// Internal state accumulator for fold-based compilation
///
/// All mutations are local to the fold accumulator.
#[derive(Default)]
struct CompileState {
    body: String,
    param_names: Vec<String>,
}

impl CompileState {
    fn with_literal(mut self, text: &str) -> Self {
        self.body.push_str(&regex::escape(text));
        self
    }

    fn with_param(mut self, name: &str) -> Self {
        self.body.push_str(SEGMENT_CAPTURE);
        self.param_names.push(name.to_string());
        self
    }

    /// Anchors the body at both ends
    ///
    /// One leading and one trailing slash are optional in candidates, so
    /// `/users/:id` accepts `users/42`, `/users/42` and `users/42/`.
    fn finalize(self) -> (String, Vec<String>) {
        let body = self.body.strip_prefix('/').unwrap_or(&self.body);
        let body = body.strip_suffix('/').unwrap_or(body);

        let source = if body.is_empty() {
            "^/?$".to_string()
        } else {
            format!("^/?{}/?$", body)
        };

        (source, self.param_names)
    }
}

fn process_token(state: CompileState, token: &Token) -> CompileState {
    match token {
        Token::Literal(text) => state.with_literal(text),
        Token::Param(name) => state.with_param(name),
    }
}

/// A compiled route template
///
/// # Examples
///
/// ```
/// use rhtmx_hash_router::RoutePattern;
///
/// let pattern = RoutePattern::parse("/posts/:id").unwrap();
///
/// assert_eq!(pattern.matches("posts/42").unwrap().get("id"), Some("42"));
/// assert!(pattern.matches("posts/42/comments").is_none());
/// assert!(pattern.matches("posts/").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    tokens: Vec<Token>,
    param_names: Vec<String>,
    matcher: Regex,
}

impl RoutePattern {
    /// Compiles a route template
    ///
    /// Placeholder names must be lowercase letters and hyphens; anything else
    /// is rejected here rather than compiled into a matcher that never fires.
    ///
    /// # Errors
    ///
    /// See [`tokenize`] for the template errors. [`RouteError::Regex`] is
    /// only reachable if the generated matcher exceeds the regex size limit.
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        let tokens = tokenize(template)?;

        let (source, param_names) = tokens
            .iter()
            .fold(CompileState::default(), process_token)
            .finalize();

        let matcher = Regex::new(&source)?;

        tracing::trace!(template, matcher = %source, "compiled route pattern");

        Ok(Self {
            source: template.to_string(),
            tokens,
            param_names,
            matcher,
        })
    }

    /// The template this pattern was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in template order
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Tokens the template was split into
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Anchored regex source, mostly useful for debugging
    pub fn matcher(&self) -> &str {
        self.matcher.as_str()
    }

    /// Whether `candidate` matches, without building params
    pub fn is_match(&self, candidate: &str) -> bool {
        self.matcher.is_match(candidate)
    }

    /// Matches `candidate`, returning the captured params on success
    ///
    /// The result always has one entry per placeholder, in template order.
    /// A template without placeholders yields empty params.
    pub fn matches(&self, candidate: &str) -> Option<Params> {
        let captures = self.matcher.captures(candidate)?;

        Some(
            self.param_names
                .iter()
                .zip(captures.iter().skip(1))
                .map(|(name, group)| {
                    (name.as_str(), group.map_or("", |m| m.as_str()))
                })
                .collect(),
        )
    }

    /// Builds a concrete path by substituting `params` into the template
    ///
    /// The result keeps the template's literal text, leading slash included,
    /// and always matches this pattern again with the same values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_hash_router::{Params, RoutePattern};
    ///
    /// let pattern = RoutePattern::parse("/users/:id/:action").unwrap();
    /// let params: Params = [("id", "42"), ("action", "edit")].into_iter().collect();
    ///
    /// assert_eq!(pattern.build(&params).unwrap(), "/users/42/edit");
    /// ```
    pub fn build(&self, params: &Params) -> Result<String, RouteError> {
        self.tokens
            .iter()
            .map(|token| match token {
                Token::Literal(text) => Ok(text.clone()),
                Token::Param(name) => {
                    let value = params.get(name).ok_or_else(|| RouteError::MissingParam {
                        template: self.source.clone(),
                        name: name.clone(),
                    })?;

                    if !is_segment_value(value) {
                        return Err(RouteError::InvalidParamValue {
                            name: name.clone(),
                            value: value.to_string(),
                        });
                    }

                    Ok(format!("/{}", value))
                }
            })
            .collect()
    }
}

impl FromStr for RoutePattern {
    type Err = RouteError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        Self::parse(template)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
