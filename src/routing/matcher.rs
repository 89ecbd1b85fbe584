//! Route pattern matching.
//!
//! # Responsibilities
//! - Compile a route pattern anchored to the whole path
//! - Test a request path against the compiled pattern
//! - Extract named capture groups into [`Params`]
//!
//! # Design Decisions
//! - The pattern is wrapped as `^(?:pattern)$` so alternations cannot
//!   escape the anchors; partial matches are never accepted
//! - Path matching is case-sensitive
//! - Compilation happens at registration, never on the request path
//! - Patterns are matched against the percent-decoded path
//! - Perl classes (`\d`, `\w`, `\s`) follow the `regex` crate and are
//!   Unicode-aware; write `[0-9]` or `(?-u:\d)` for ASCII-only classes

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use regex::Regex;
use thiserror::Error;

use crate::routing::params::Params;

/// Errors raised while registering a route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled, fully anchored path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile `pattern` so that it must match the entire path.
    pub fn new(pattern: impl Into<String>) -> Result<Self, RouteError> {
        let source = pattern.into();
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            RouteError::InvalidPattern {
                pattern: source.clone(),
                source: e,
            }
        })?;
        Ok(Self { source, regex })
    }

    /// The pattern as it was registered, without anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole path matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match the path and collect its named groups.
    ///
    /// Unnamed groups and groups that did not take part in the match are
    /// left out.
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        let params = self
            .regex
            .capture_names()
            .enumerate()
            .filter_map(|(i, name)| {
                let name = name.filter(|n| !n.is_empty())?;
                caps.get(i).map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();
        Some(params)
    }
}

/// Percent-decode a request path.
///
/// Returns `None` when a `%` is not followed by two hex digits or when the
/// decoded bytes are not UTF-8.
pub fn decode_path(path: &str) -> Option<Cow<'_, str>> {
    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .map_or(false, |hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    percent_decode_str(path).decode_utf8().ok()
}
