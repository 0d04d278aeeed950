//! Middleware chain.
//!
//! Middleware intercepts requests before routing and is the right place for
//! cross-cutting concerns: request logging, request-id injection,
//! authentication-header inspection.
//!
//! The chain is global and ordered: every step runs for every request, in
//! the order it was registered with [`Router::wrap`](crate::Router::wrap),
//! before the route handler — and before the 404 path when nothing matches.
//!
//! A step does not receive a `next()` callback. It receives the request by
//! value and returns a [`Flow`]:
//!
//! - [`Flow::Continue`] hands the (possibly modified) request to the next
//!   step, or to the router once the chain is exhausted.
//! - [`Flow::Halt`] short-circuits with a response; later steps and the
//!   handler never run.
//!
//! Control flow lives in the return type, so the classic hang bug — a
//! middleware that forgets to invoke its continuation — cannot be written.
//!
//! ```rust
//! use ruta::{Flow, Request, Response, StatusCode};
//!
//! async fn require_api_key(req: Request) -> Flow {
//!     if req.header("x-api-key").is_none() {
//!         return Flow::Halt(Response::status(StatusCode::UNAUTHORIZED));
//!     }
//!     Flow::Continue(req)
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::info;

use crate::request::Request;
use crate::response::Response;

/// Outcome of one middleware step.
pub enum Flow {
    /// Pass control (and the request) to the next step or the router.
    Continue(Request),
    /// Stop the chain and respond immediately.
    Halt(Response),
}

pub(crate) type BoxFlowFuture = Pin<Box<dyn Future<Output = Flow> + Send + 'static>>;

/// Internal dispatch interface, mirroring `ErasedHandler`.
#[doc(hidden)]
pub trait ErasedMiddleware {
    fn call(&self, req: Request) -> BoxFlowFuture;
}

#[doc(hidden)]
pub type BoxedMiddleware = Arc<dyn ErasedMiddleware + Send + Sync + 'static>;

/// Implemented for every valid middleware step.
///
/// Automatically satisfied for any `async fn(Request) -> Flow`; never
/// implemented by hand. Sealed for the same reason as
/// [`Handler`](crate::Handler).
pub trait Middleware: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_middleware(self) -> BoxedMiddleware;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Flow> + Send + 'static,
{
}

impl<F, Fut> Middleware for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Flow> + Send + 'static,
{
    fn into_boxed_middleware(self) -> BoxedMiddleware {
        Arc::new(FnMiddleware(self))
    }
}

struct FnMiddleware<F>(F);

impl<F, Fut> ErasedMiddleware for FnMiddleware<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Flow> + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFlowFuture {
        Box::pin((self.0)(req))
    }
}

// ── Built-in middleware ───────────────────────────────────────────────────────

/// Request logger.
///
/// Emits two diagnostic lines per request — the method, then the path — and
/// always continues. Runs before the matched handler (and before the 404
/// path) when installed:
///
/// ```rust,no_run
/// use ruta::{middleware, Router};
///
/// let app = Router::new().wrap(middleware::log);
/// ```
pub async fn log(req: Request) -> Flow {
    info!("request method: {}", req.method());
    info!("request url: {}", req.path());
    Flow::Continue(req)
}
