//! Tokenizer for route templates
//!
//! Pure functional scanning of templates like `/users/:id/:action` into a
//! sequence of literal text and named placeholders.
//! All functions are **pure**: same input → same output, no side effects.

use std::fmt;

use crate::RouteError;

/// One piece of a route template
///
/// Functional sum type for pattern matching template pieces.
///
/// # Examples
///
/// ```
/// use rhtmx_hash_router::route::token::{tokenize, Token};
///
/// let tokens = tokenize("/users/:id/edit").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Literal("/users".to_string()),
///         Token::Param("id".to_string()),
///         Token::Literal("/edit".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, matched verbatim
    Literal(String),
    /// `/:name` placeholder; the slash belongs to the placeholder
    Param(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) => f.write_str(text),
            Token::Param(name) => write!(f, "/:{}", name),
        }
    }
}

/// Bytes allowed in a placeholder name
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b == b'-'
}

/// Bytes that would silently extend a name if we let them
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Splits a route template into tokens (pure function)
///
/// A placeholder is `/:` followed by one or more lowercase letters or
/// hyphens. The name ends at the first byte outside that class; anything
/// after it is literal text again, so `/:id.json` is a placeholder followed
/// by the literal `.json`.
///
/// # Errors
///
/// - [`RouteError::EmptyPlaceholder`] for `/:` with no name
/// - [`RouteError::InvalidPlaceholderName`] when the name contains uppercase
///   letters, digits or underscores (`/:userId`, `/:id2`)
/// - [`RouteError::DuplicateParam`] when a name appears twice
///
/// # Examples
///
/// ```
/// use rhtmx_hash_router::route::token::{tokenize, Token};
///
/// assert_eq!(tokenize("/home").unwrap(), vec![Token::Literal("/home".to_string())]);
/// assert!(tokenize("/users/:").is_err());
/// assert!(tokenize("/users/:userId").is_err());
/// ```
pub fn tokenize(template: &str) -> Result<Vec<Token>, RouteError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut names: Vec<&str> = Vec::new();
    let mut rest = template;

    while !rest.is_empty() {
        let offset = template.len() - rest.len();

        match rest.strip_prefix("/:") {
            Some(after_colon) => {
                let word_len = after_colon.bytes().take_while(|b| is_word_byte(*b)).count();
                let word = &after_colon[..word_len];

                if word.is_empty() {
                    return Err(RouteError::EmptyPlaceholder {
                        template: template.to_string(),
                        offset,
                    });
                }
                if !word.bytes().all(is_name_byte) {
                    return Err(RouteError::InvalidPlaceholderName {
                        template: template.to_string(),
                        name: word.to_string(),
                    });
                }
                if names.contains(&word) {
                    return Err(RouteError::DuplicateParam {
                        template: template.to_string(),
                        name: word.to_string(),
                    });
                }

                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Param(word.to_string()));
                names.push(word);
                rest = &after_colon[word_len..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    literal.push(c);
                }
                rest = chars.as_str();
            }
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Token {
        Token::Literal(s.to_string())
    }

    fn param(s: &str) -> Token {
        Token::Param(s.to_string())
    }

    #[test]
    fn test_tokenize_static() {
        assert_eq!(tokenize("/about").unwrap(), vec![lit("/about")]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_params_in_order() {
        assert_eq!(
            tokenize("/users/:id/:action").unwrap(),
            vec![lit("/users"), param("id"), param("action")]
        );
    }

    #[test]
    fn test_tokenize_leading_param() {
        assert_eq!(tokenize("/:slug").unwrap(), vec![param("slug")]);
    }

    #[test]
    fn test_tokenize_hyphenated_name() {
        assert_eq!(
            tokenize("/posts/:post-id").unwrap(),
            vec![lit("/posts"), param("post-id")]
        );
    }

    #[test]
    fn test_tokenize_name_stops_at_punctuation() {
        assert_eq!(
            tokenize("/files/:name.json").unwrap(),
            vec![lit("/files"), param("name"), lit(".json")]
        );
    }

    #[test]
    fn test_tokenize_colon_without_slash_is_literal() {
        assert_eq!(tokenize("/a:b").unwrap(), vec![lit("/a:b")]);
    }

    #[test]
    fn test_tokenize_non_ascii_literal() {
        assert_eq!(
            tokenize("/café/:id").unwrap(),
            vec![lit("/café"), param("id")]
        );
    }

    #[test]
    fn test_tokenize_empty_placeholder() {
        let err = tokenize("/users/:/edit").unwrap_err();
        assert!(matches!(err, RouteError::EmptyPlaceholder { offset: 6, .. }));
    }

    #[test]
    fn test_tokenize_uppercase_name() {
        let err = tokenize("/users/:userId").unwrap_err();
        match err {
            RouteError::InvalidPlaceholderName { name, .. } => assert_eq!(name, "userId"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tokenize_digit_in_name() {
        assert!(matches!(
            tokenize("/v/:id2").unwrap_err(),
            RouteError::InvalidPlaceholderName { .. }
        ));
    }

    #[test]
    fn test_tokenize_duplicate_name() {
        assert!(matches!(
            tokenize("/a/:id/b/:id").unwrap_err(),
            RouteError::DuplicateParam { .. }
        ));
    }

    #[test]
    fn test_token_display_round_trips_template() {
        let template = "/users/:id/posts/:post-id";
        let rendered: String = tokenize(template)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, template);
    }
}
