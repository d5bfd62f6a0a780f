//! Incoming HTTP request type.

use std::collections::HashMap;

use crate::method::Method;

/// An incoming HTTP request: method, target, headers and the fully
/// collected body, plus any path parameters the router matched.
///
/// The server builds these from hyper requests; tests build them directly:
///
/// ```rust
/// use welcome::{Method, Request};
///
/// let req = Request::new(Method::Get, "/?name=vijay&age=30");
/// assert_eq!(req.path(), "/");
/// assert_eq!(req.query_value("age").as_deref(), Some("30"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    /// Creates a request for `target`, an origin-form request target
    /// (`/path?query`).
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_owned())),
            None => (target, None),
        };
        Self {
            method,
            path: path.to_owned(),
            query,
            headers: Vec::new(),
            body: Vec::new(),
            params: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter, percent-decoded.
    ///
    /// For a route `/products/{product_sku}`, `req.param("product_sku")` on
    /// `/products/AB%2012` returns `Some("AB 12")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a decoded query parameter.
    ///
    /// When a key repeats, the last occurrence wins.
    pub fn query_value(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .filter(|(k, _)| k == key)
            .last()
            .map(|(_, v)| v.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_target_into_path_and_query() {
        let req = Request::new(Method::Get, "/products/abc?x=1");
        assert_eq!(req.path(), "/products/abc");
        assert_eq!(req.query(), Some("x=1"));

        let req = Request::new(Method::Get, "/");
        assert_eq!(req.query(), None);
        assert_eq!(req.query_value("name"), None);
    }

    #[test]
    fn query_values_are_decoded_and_last_wins() {
        let req = Request::new(Method::Get, "/?name=a%20b&name=c+d&age=");
        assert_eq!(req.query_value("name").as_deref(), Some("c d"));
        assert_eq!(req.query_value("age").as_deref(), Some(""));
        assert_eq!(req.query_value("missing"), None);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Method::Post, "/").with_header("Content-Type", "application/json");
        assert_eq!(req.header("content-type"), Some("application/json"));
    }
}
