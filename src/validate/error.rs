//! Validation failures and their wire shape.
//!
//! A failed check produces a [`FieldError`]; one or more of them make up a
//! [`ValidationError`], which renders as `422 Unprocessable Content`:
//!
//! ```json
//! {
//!   "detail": [
//!     {
//!       "type": "string_too_short",
//!       "loc": ["query", "name"],
//!       "msg": "String should have at least 3 characters",
//!       "input": "ab",
//!       "ctx": {"min_length": 3}
//!     }
//!   ]
//! }
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Machine-readable reason a field was rejected. Serialised as the `type` key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Missing,
    StringType,
    IntType,
    IntParsing,
    IntFromFloat,
    StringTooShort,
    StringTooLong,
    GreaterThanEqual,
    LessThanEqual,
    ValueError,
    JsonInvalid,
    ModelType,
}

/// One violated constraint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    /// Where the value came from: `["query", "name"]`, `["body", "age"]`, or
    /// just `["body"]` when the payload as a whole is unusable.
    pub loc: Vec<String>,
    pub msg: String,
    pub input: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl FieldError {
    pub fn new(kind: ErrorKind, loc: Vec<String>, msg: impl Into<String>, input: JsonValue) -> Self {
        Self { kind, loc, msg: msg.into(), input, ctx: None, description: None }
    }

    pub fn with_ctx(mut self, ctx: JsonValue) -> Self {
        self.ctx = Some(ctx);
        self
    }

    pub fn with_description(mut self, description: Option<&'static str>) -> Self {
        self.description = description;
        self
    }

    /// The offending field's name, or `None` for whole-payload failures.
    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

/// One or more constraint violations for a single request.
///
/// Never empty: it is built either from a single [`FieldError`] or by
/// [`Collector::finish`](super::Collector::finish) after at least one check
/// failed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationError {
    detail: Vec<FieldError>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s), first at {}", self.detail.len(), first_loc(&self.detail))
    }
}

impl std::error::Error for ValidationError {}

fn first_loc(detail: &[FieldError]) -> String {
    detail.first().map(|e| e.loc.join(".")).unwrap_or_default()
}

impl ValidationError {
    pub(crate) fn new(detail: Vec<FieldError>) -> Self {
        Self { detail }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.detail
    }

    /// Names of the offending fields, in the order they were checked.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.detail.iter().filter_map(FieldError::field)
    }
}

impl From<FieldError> for ValidationError {
    fn from(e: FieldError) -> Self {
        Self { detail: vec![e] }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        debug!(violations = self.detail.len(), first = %first_loc(&self.detail), "request rejected");
        match serde_json::to_vec(&self) {
            Ok(body) => Response::builder()
                .status(Status::UnprocessableContent)
                .json(body),
            Err(e) => {
                tracing::error!("failed to serialise validation error: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}
