//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every routed request. The server runs
//! each request through [`trace`] before it reaches the router.

mod trace;

pub use trace::trace;
