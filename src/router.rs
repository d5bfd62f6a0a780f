//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust
    /// # use welcome::{Method, Request, Response, Router};
    /// # async fn product_page(_: Request) -> Response { Response::text("") }
    /// # async fn submit(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/products/{product_sku}", product_page)
    ///     .on(Method::Post, "/",                       submit);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    /// Routes one request and runs its handler.
    ///
    /// `HEAD` falls back to the `GET` route and drops the body. Unmatched
    /// paths get `404 Not Found`; paths registered only under other methods
    /// get `405 Method Not Allowed` with an `allow` header.
    pub async fn handle(&self, mut req: Request) -> Response {
        let head = req.method() == Method::Head;
        let found = match self.lookup(req.method(), req.path()) {
            None if head => self.lookup(Method::Get, req.path()),
            found => found,
        };

        if let Some((handler, params)) = found {
            req.params = params;
            let mut response = handler.call(req).await;
            if head {
                response.body.clear();
            }
            return response;
        }

        let allowed = self.allowed_methods(req.path());
        if allowed.is_empty() {
            return Response::status(Status::NotFound);
        }
        Response::builder()
            .status(Status::MethodNotAllowed)
            .header("allow", &allowed.join(", "))
            .no_body()
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
            .collect();
        Some((handler, params))
    }

    fn allowed_methods(&self, path: &str) -> Vec<&'static str> {
        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| *method)
            .collect();
        if allowed.contains(&Method::Get) && !allowed.contains(&Method::Head) {
            allowed.push(Method::Head);
        }
        allowed.sort();
        allowed.into_iter().map(Method::as_str).collect()
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_sku(req: Request) -> String {
        req.param("sku").unwrap_or_default().to_owned()
    }

    async fn created(_req: Request) -> &'static str {
        "created"
    }

    fn router() -> Router {
        Router::new()
            .get("/items/{sku}", echo_sku)
            .post("/items/{sku}", created)
    }

    #[tokio::test]
    async fn dispatches_by_method_and_decodes_params() {
        let res = router().handle(Request::new(Method::Get, "/items/a%20b")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"a b");

        let res = router().handle(Request::new(Method::Post, "/items/x")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"created");
    }

    #[tokio::test]
    async fn head_uses_the_get_route_without_a_body() {
        let res = router().handle(Request::new(Method::Head, "/items/abc")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert!(res.body().is_empty());

        let res = router().handle(Request::new(Method::Head, "/nope")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let res = router().handle(Request::new(Method::Get, "/nope")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn wrong_method_lists_allowed_ones() {
        let res = router().handle(Request::new(Method::Delete, "/items/x")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("GET, HEAD, POST"));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::new()
            .get("/items/{sku}", echo_sku)
            .get("/items/{id}", echo_sku);
    }
}
