//! The route dispatcher.
//!
//! One radix tree per HTTP method, one global middleware chain. A request
//! walks the chain in registration order, then lands on the single handler
//! registered for its (method, path) pair. No match, no handler: 404.

use std::collections::HashMap;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;
use tracing::warn;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{BoxedMiddleware, Flow, Middleware};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup with chained calls, then pass it to
/// [`Server::serve`](crate::Server::serve). Immutable from then on — routes
/// and middleware cannot be added, removed, or reordered while serving.
///
/// ```rust,no_run
/// # use ruta::{middleware, Request, Response, Router, StatusCode};
/// # async fn hello(_: Request) -> Response { Response::text("") }
/// # async fn register(_: Request) -> Response { Response::status(StatusCode::CREATED) }
/// # async fn update_user(_: Request) -> Response { Response::status(StatusCode::OK) }
/// Router::new()
///     .wrap(middleware::log)
///     .get("/", hello)
///     .post("/register", register)
///     .put("/user/Cee", update_user);
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    chain: Vec<BoxedMiddleware>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), chain: Vec::new() }
    }

    /// Appends a middleware step to the global chain.
    ///
    /// Steps run for every request — matched or not — in the order they were
    /// registered, before any handler. See the [`middleware`](crate::middleware)
    /// module for the control-flow model.
    pub fn wrap(mut self, step: impl Middleware) -> Self {
        self.chain.push(step.into_boxed_middleware());
        self
    }

    /// Registers a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves
    /// them. Registering the same (method, path) pair twice keeps the first
    /// handler and logs a warning — first registered wins. An invalid
    /// pattern panics, since it is a programming error caught at startup.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.add(method, path, handler)
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::PUT, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::PATCH, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::DELETE, path, handler)
    }

    fn add(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        let tree = self.routes.entry(method.clone()).or_default();
        if let Err(e) = tree.insert(path, handler.into_boxed_handler()) {
            match e {
                matchit::InsertError::Conflict { .. } => {
                    warn!(%method, path, "duplicate route ignored, first registration wins");
                }
                other => panic!("invalid route `{path}`: {other}"),
            }
        }
        self
    }

    /// Dispatches one request: middleware chain first, matched handler second.
    ///
    /// Each step runs to completion before the next starts; a [`Flow::Halt`]
    /// ends the request immediately. An exhausted chain with no matching
    /// route yields `404 Not Found` with an empty body.
    pub async fn handle(&self, req: Request) -> Response {
        let mut req = req;
        for step in &self.chain {
            match step.call(req).await {
                Flow::Continue(next) => req = next,
                Flow::Halt(res) => return res,
            }
        }

        let matched = self.lookup(req.method(), req.path());
        match matched {
            Some((handler, params)) => {
                req.params = params;
                handler.call(req).await
            }
            None => Response::status(StatusCode::NOT_FOUND),
        }
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = std::sync::Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;

    use super::*;

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path, Vec::new(), Bytes::new())
    }

    fn hello_app() -> Router {
        Router::new()
            .get("/", |_req: Request| async { Response::text("HELLO!") })
            .post("/register", |_req: Request| async {
                Response::status(StatusCode::CREATED)
            })
            .put("/user/Cee", |_req: Request| async {
                Response::status(StatusCode::OK)
            })
            .patch("/user/Cee", |_req: Request| async {
                Response::status(StatusCode::OK)
            })
            .delete("/user/Cee", |_req: Request| async {
                Response::status(StatusCode::OK)
            })
    }

    #[tokio::test]
    async fn routes_return_their_registered_status_and_body() {
        let app = hello_app();

        let res = app.handle(request(Method::GET, "/")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"HELLO!");

        let res = app.handle(request(Method::POST, "/register")).await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert!(res.body().is_empty());

        for method in [Method::PUT, Method::PATCH, Method::DELETE] {
            let res = app.handle(request(method, "/user/Cee")).await;
            assert_eq!(res.status_code(), StatusCode::OK);
            assert!(res.body().is_empty());
        }
    }

    #[tokio::test]
    async fn unregistered_method_path_pair_is_404() {
        let app = hello_app();

        let res = app.handle(request(Method::GET, "/nope")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

        // Right path, wrong method.
        let res = app.handle(request(Method::DELETE, "/register")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn middleware_runs_in_order_before_the_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            move |req: Request| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push("first");
                    Flow::Continue(req)
                }
            }
        };
        let second = {
            let seen = Arc::clone(&seen);
            move |req: Request| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push("second");
                    Flow::Continue(req)
                }
            }
        };
        let handler = {
            let seen = Arc::clone(&seen);
            move |_req: Request| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push("handler");
                    Response::text("ok")
                }
            }
        };

        let app = Router::new().wrap(first).wrap(second).get("/", handler);
        let res = app.handle(request(Method::GET, "/")).await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "handler"]);
    }

    #[tokio::test]
    async fn middleware_runs_even_when_no_route_matches() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let step = {
            let seen = Arc::clone(&seen);
            move |req: Request| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push(req.path().to_owned());
                    Flow::Continue(req)
                }
            }
        };

        let app = Router::new().wrap(step);
        let res = app.handle(request(Method::GET, "/nope")).await;

        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(*seen.lock().unwrap(), vec!["/nope"]);
    }

    #[tokio::test]
    async fn halt_short_circuits_the_chain_and_the_handler() {
        let handler_ran = Arc::new(Mutex::new(false));

        let gate = |_req: Request| async {
            Flow::Halt(Response::status(StatusCode::UNAUTHORIZED))
        };
        let handler = {
            let handler_ran = Arc::clone(&handler_ran);
            move |_req: Request| {
                let handler_ran = Arc::clone(&handler_ran);
                async move {
                    *handler_ran.lock().unwrap() = true;
                    Response::text("never")
                }
            }
        };

        let app = Router::new().wrap(gate).get("/", handler);
        let res = app.handle(request(Method::GET, "/")).await;

        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert!(!*handler_ran.lock().unwrap());
    }

    #[tokio::test]
    async fn first_registration_wins_on_duplicate_routes() {
        let app = Router::new()
            .get("/", |_req: Request| async { Response::text("first") })
            .get("/", |_req: Request| async { Response::text("second") });

        let res = app.handle(request(Method::GET, "/")).await;
        assert_eq!(res.body(), b"first");
    }

    #[tokio::test]
    async fn path_params_reach_the_handler() {
        let app = Router::new().get("/user/{name}", |req: Request| async move {
            Response::text(req.param("name").unwrap_or("unknown").to_owned())
        });

        let res = app.handle(request(Method::GET, "/user/Cee")).await;
        assert_eq!(res.body(), b"Cee");
    }
}
