//! Handler trait and type erasure.
//!
//! Routes store handlers of many different concrete types in one tree, so
//! each handler is wrapped once at registration time and stored as
//! `Arc<dyn ErasedHandler>`:
//!
//! ```text
//! async fn greet(req: Request) -> Result<Json<Greeting>, ValidationError>
//!        ↓ Router::get("/", greet)
//! greet.into_boxed_handler()                       ← blanket Handler impl
//!        ↓
//! Arc::new(FnHandler(greet))                       ← stored as BoxedHandler
//!        ↓ per request
//! handler.call(req)                                ← one virtual call
//!        ↓
//! Box::pin(async { greet(req).await.into_response() })
//! ```
//!
//! The validating endpoints return `Result<Json<T>, ValidationError>`. Both
//! sides implement `IntoResponse`, and so does `Result` itself, which is what
//! lets `?` on a failed field check short-circuit straight to a `422`. The
//! blanket impls below accept that return type like any other.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A boxed future resolving to a [`Response`]. `Send + 'static` so tokio can
/// move it between worker threads.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Object-safe dispatch interface behind every route.
///
/// `#[doc(hidden)] pub` only because it appears in the signature of
/// [`Handler::into_boxed_handler`].
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// Sealed; the blanket impl below is the only implementation.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
