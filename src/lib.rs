//! # welcome
//!
//! A small HTTP service that validates query, path and body parameters
//! against declarative constraints and echoes the result as JSON.
//!
//! The crate has two halves:
//!
//! - a minimal hyper-based HTTP layer: radix-tree [`Router`], sealed
//!   [`Handler`] trait, [`Response`] builder, and a [`Server`] with graceful
//!   shutdown;
//! - the [`validate`] module, where every parameter is a
//!   [`FieldConstraint`](validate::FieldConstraint) evaluated by one routine,
//!   and the [`api`] module that declares the service's endpoints with it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use welcome::{Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), welcome::Error> {
//!     Server::bind("127.0.0.1:8000".parse().unwrap())
//!         .serve(api::routes())
//!         .await
//! }
//! ```
//!
//! Invalid input is answered with `422 Unprocessable Content`:
//!
//! ```text
//! $ curl 'localhost:8000/?name=ab'
//! {"detail":[{"type":"string_too_short","loc":["query","name"],
//!   "msg":"String should have at least 3 characters","input":"ab",
//!   "ctx":{"min_length":3}}]}
//! ```

mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod validate;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, serve_on};
pub use status::Status;
