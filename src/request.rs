//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;

/// An incoming HTTP request.
///
/// Owned by the dispatch pipeline: middleware receive it by value and hand
/// it back via [`Flow::Continue`](crate::Flow::Continue), the matched handler
/// consumes it. The body has already been collected into memory by the time
/// user code sees it.
pub struct Request {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: impl Into<String>,
        headers: Vec<(String, String)>,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
            body,
            params: HashMap::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns
    /// `Some("42")`. `None` before routing (i.e. inside middleware) and for
    /// names the matched pattern does not capture.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
