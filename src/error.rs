//! Unified error type.

/// The error type returned by the service's fallible startup and serving
/// operations.
///
/// Request-level failures (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: installing logging, binding to a port, or
/// accepting a connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("logging already initialised: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
