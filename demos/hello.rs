//! The hello server — every route returns a literal.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example hello
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl -i -X POST http://localhost:3000/register
//!   curl -i -X PUT http://localhost:3000/user/Cee
//!   curl -i -X PATCH http://localhost:3000/user/Cee
//!   curl -i -X DELETE http://localhost:3000/user/Cee
//!
//! Each request logs two lines (method, then url) before its handler runs.

use ruta::{middleware, Request, Response, Router, Server, StatusCode};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .wrap(middleware::log)
        .get("/", hello)
        .post("/register", register)
        .put("/user/Cee", update_user)
        .patch("/user/Cee", patch_user)
        .delete("/user/Cee", delete_user);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

async fn hello(_req: Request) -> Response {
    Response::text("HELLO!")
}

// 201, empty body.
async fn register(_req: Request) -> Response {
    Response::status(StatusCode::CREATED)
}

async fn update_user(_req: Request) -> Response {
    Response::status(StatusCode::OK)
}

async fn patch_user(_req: Request) -> Response {
    Response::status(StatusCode::OK)
}

async fn delete_user(_req: Request) -> Response {
    Response::status(StatusCode::OK)
}
