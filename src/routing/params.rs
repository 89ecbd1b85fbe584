//! Path parameters extracted from a matched route.
//!
//! The router stores a [`Params`] in the request extensions right before
//! the handler is invoked. The set lives and dies with that one request.

use std::collections::HashMap;

use axum::http::Request;

/// Named capture groups of the route that handled the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: HashMap<String, String>,
}

impl Params {
    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Number of extracted parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when the route had no named groups that matched.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

/// Read a path parameter for the current request.
///
/// Returns `None` if the matched route has no group with that name, or if
/// the request was not dispatched through a matched route at all.
pub fn get_param<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    req.extensions().get::<Params>()?.get(name)
}
