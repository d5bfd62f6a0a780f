//! Declarative request validation.
//!
//! Every parameter a handler accepts is described by a [`FieldConstraint`]:
//! where it comes from, what type it must be, its bounds, and whether it may
//! be left out. One routine, [`FieldConstraint::check`], evaluates any of
//! them.
//!
//! Handlers choose how failures are reported:
//!
//! - **fail fast** — call [`FieldConstraint::extract`] with `?`; the first
//!   violation becomes the [`ValidationError`].
//! - **collect all** — run every field through a [`Collector`], then
//!   [`Collector::finish`]; every violation is reported, in check order.
//!
//! ```
//! use welcome::validate::{Collector, FieldConstraint, Kind, Location, RawValue};
//!
//! let username = FieldConstraint::new("username", Location::Body, Kind::String).min_length(3);
//! let phone = FieldConstraint::new("phone", Location::Body, Kind::String);
//!
//! let mut fields = Collector::default();
//! let _: String = fields.field(&username, Some(RawValue::Text("ab")));
//! let _: String = fields.field(&phone, None);
//!
//! let err = fields.finish().unwrap_err();
//! assert_eq!(err.fields().collect::<Vec<_>>(), ["username", "phone"]);
//! ```

mod constraint;
mod error;

use serde_json::{Map, Value as JsonValue, json};

pub use constraint::{FieldConstraint, FromValue, Kind, Location, RawValue, Value};
pub use error::{ErrorKind, FieldError, ValidationError};

/// Accumulates field failures so all of them can be reported at once.
#[derive(Debug, Default)]
pub struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    /// Checks one field. On failure the error is recorded and `T::default()`
    /// is returned as a placeholder; [`finish`](Self::finish) will then fail,
    /// so placeholders never escape.
    pub fn field<T: FromValue + Default>(
        &mut self,
        constraint: &FieldConstraint,
        raw: Option<RawValue<'_>>,
    ) -> T {
        constraint.extract(raw).unwrap_or_else(|e| {
            self.errors.push(e);
            T::default()
        })
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// Parses a request body as JSON.
///
/// An empty body is a missing payload; anything that is not valid JSON is
/// `json_invalid`.
pub fn parse_json_body(body: &[u8]) -> Result<JsonValue, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(body_error(ErrorKind::Missing, "Field required", JsonValue::Null).into());
    }
    serde_json::from_slice(body).map_err(|e| {
        ValidationError::from(body_error(
            ErrorKind::JsonInvalid,
            "JSON decode error",
            JsonValue::String(String::from_utf8_lossy(body).into_owned()),
        )
        .with_ctx(json!({ "error": e.to_string() })))
    })
}

/// Borrows the fields of a JSON object payload.
pub fn as_object(payload: &JsonValue) -> Result<&Map<String, JsonValue>, ValidationError> {
    payload.as_object().ok_or_else(|| {
        ValidationError::from(body_error(
            ErrorKind::ModelType,
            "Input should be a valid dictionary or object to extract fields from",
            payload.clone(),
        ))
    })
}

fn body_error(kind: ErrorKind, msg: &str, input: JsonValue) -> FieldError {
    FieldError::new(kind, vec![Location::Body.as_str().to_owned()], msg, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_passes_when_every_field_is_valid() {
        let name = FieldConstraint::new("name", Location::Body, Kind::String);
        let mut fields = Collector::default();
        let value: String = fields.field(&name, Some(RawValue::Text("vijay")));
        assert_eq!(value, "vijay");
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn empty_body_is_missing() {
        let err = parse_json_body(b"  \n").unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::Missing);
        assert_eq!(err.errors()[0].loc, ["body"]);
    }

    #[test]
    fn malformed_json_is_invalid() {
        let err = parse_json_body(b"{\"username\":").unwrap_err();
        let e = &err.errors()[0];
        assert_eq!(e.kind, ErrorKind::JsonInvalid);
        assert!(e.ctx.is_some());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let payload = parse_json_body(b"[1,2,3]").unwrap();
        let err = as_object(&payload).unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::ModelType);
        assert_eq!(err.fields().count(), 0);
    }
}
