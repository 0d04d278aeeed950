//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it. That is the entire
//! job description.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use ruta::{Response, StatusCode};
///
/// Response::text("HELLO!");
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::status(StatusCode::CREATED);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use ruta::{Response, StatusCode};
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .json(br#"{"id":42}"#.to_vec());
/// ```
pub struct Response {
    body: Bytes,
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl Response {
    /// `200 OK` with a `text/plain; charset=utf-8` body.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_content_type("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// `200 OK` with an `application/json` body.
    ///
    /// Pass bytes from your serialiser directly — no intermediate allocation:
    /// `serde_json::to_vec(&val)` or `format!(r#"{{"id":{id}}}"#).into_bytes()`.
    pub fn json(body: Vec<u8>) -> Self {
        Self::with_content_type("application/json", body)
    }

    /// Status-only response with an empty body.
    pub fn status(status: StatusCode) -> Self {
        Self { body: Bytes::new(), headers: Vec::new(), status }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
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

    fn with_content_type(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body: body.into(),
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status: StatusCode::OK,
        }
    }

    /// Converts into the hyper response handed back to the connection task.
    ///
    /// A header that fails validation downgrades the whole response to a
    /// bare 500 rather than panicking on the request path.
    pub(crate) fn into_hyper(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(self.body)).unwrap_or_else(|_| {
            let mut fallback = http::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by a
/// typed body method, so you always know what you're sending.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish("application/json", body)
    }

    /// Terminate with no body.
    pub fn no_body(self) -> Response {
        Response { body: Bytes::new(), headers: self.headers, status: self.status }
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body: body.into(), headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Anything a handler returns must implement this. Provided for [`Response`]
/// itself, string bodies (`200 OK`, plain text), and bare [`StatusCode`]s
/// (empty body). Implement it on your own types to return them directly.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

/// Return a [`StatusCode`] directly from a handler: `return StatusCode::CREATED`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sets_status_and_content_type() {
        let res = Response::text("HELLO!");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"HELLO!");
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    }

    #[test]
    fn status_only_has_empty_body() {
        let res = Response::status(StatusCode::CREATED);
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-type"), None);
    }

    #[test]
    fn builder_keeps_status_and_extra_headers() {
        let res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/users/42")
            .no_body();
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(res.header("location"), Some("/users/42"));
    }

    #[test]
    fn into_hyper_preserves_status_headers_and_body() {
        let hyper_res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/users/42")
            .text("created")
            .into_hyper();
        assert_eq!(hyper_res.status(), StatusCode::CREATED);
        assert_eq!(hyper_res.headers()["location"], "/users/42");
        assert_eq!(hyper_res.headers()["content-type"], "text/plain; charset=utf-8");
    }

    #[test]
    fn invalid_header_downgrades_to_500() {
        let hyper_res = Response::builder()
            .header("bad header name", "x")
            .no_body()
            .into_hyper();
        assert_eq!(hyper_res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn status_code_converts_into_empty_response() {
        let res = StatusCode::NO_CONTENT.into_response();
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
        assert!(res.body().is_empty());
    }
}
