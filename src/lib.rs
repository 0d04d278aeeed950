//! # ruta
//!
//! A tiny HTTP framework: exact-match routing plus an ordered middleware
//! chain. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Every request walks the global middleware chain in registration order,
//! then reaches the one handler registered for its (method, path) pair.
//! No match means `404 Not Found`. That is the whole dispatch model.
//!
//! Middleware here is not callback-with-`next`. Each step is an async
//! function that returns a [`Flow`]: either `Continue` with the request
//! (control moves to the next step) or `Halt` with a response (the chain
//! short-circuits and the handler never runs). A forgotten continuation
//! call cannot hang a request, because there is no continuation to forget.
//!
//! What ruta does:
//!
//! - Radix-tree routing — O(path-length) lookup via [`matchit`]
//! - Ordered global middleware — run before every handler, for every request
//! - Async I/O — tokio + hyper, HTTP/1.1 and HTTP/2
//! - Graceful shutdown — SIGTERM / Ctrl-C, drains in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use ruta::{middleware, Request, Response, Router, Server, StatusCode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .wrap(middleware::log)
//!         .get("/", hello)
//!         .post("/register", register);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn hello(_req: Request) -> Response {
//!     Response::text("HELLO!")
//! }
//!
//! async fn register(_req: Request) -> Response {
//!     Response::status(StatusCode::CREATED)
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;

pub use error::Error;
pub use handler::Handler;
pub use http::{Method, StatusCode};
pub use middleware::{Flow, Middleware};
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
