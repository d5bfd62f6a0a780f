//! Declarative field constraints and the routine that evaluates them.

use serde_json::{Value as JsonValue, json};

use validator::ValidateEmail;

use super::error::{ErrorKind, FieldError};

const EMAIL_REASON: &str = "The email address is not valid.";

/// Which part of the request a field is read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Location {
    Query,
    Path,
    Body,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path  => "path",
            Self::Body  => "body",
        }
    }
}

/// The semantic type a field's raw input must satisfy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    String,
    Integer,
    /// A string that must also look like `local@domain.tld`.
    Email,
    /// Anything at all; JSON input is kept as-is.
    Any,
}

/// A validated field value.
///
/// `Absent` is what an optional field without input resolves to. It is
/// distinct from every valid value, including `""` and `0`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Json(JsonValue),
    Absent,
}

/// Raw input for one field, before validation.
///
/// Query and path values are always text; body values are JSON.
#[derive(Clone, Copy, Debug)]
pub enum RawValue<'a> {
    Text(&'a str),
    Json(&'a JsonValue),
}

impl RawValue<'_> {
    fn to_input(self) -> JsonValue {
        match self {
            Self::Text(s) => JsonValue::String(s.to_owned()),
            Self::Json(v) => v.clone(),
        }
    }
}

/// Conversion from a validated [`Value`] into a concrete Rust type.
///
/// `Option<T>` maps [`Value::Absent`] to `None`.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Option<Self> { Some(value) }
}

impl FromValue for String {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Absent => Some(None),
            v => T::from_value(v).map(Some),
        }
    }
}

/// Describes one request parameter and the rules its input must obey.
///
/// A constraint starts out required. Calling [`optional`](Self::optional) or
/// [`default`](Self::default) makes it optional; there is no way to have both
/// a default and the required flag.
///
/// ```
/// use welcome::validate::{FieldConstraint, Kind, Location, RawValue, Value};
///
/// let age = FieldConstraint::new("age", Location::Query, Kind::Integer)
///     .default(Value::Int(10))
///     .ge(1)
///     .le(100);
///
/// assert_eq!(age.check(None).unwrap(), Value::Int(10));
/// assert!(age.check(Some(RawValue::Text("101"))).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct FieldConstraint {
    name: &'static str,
    location: Location,
    kind: Kind,
    required: bool,
    default: Value,
    ge: Option<i64>,
    le: Option<i64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    description: Option<&'static str>,
}

impl FieldConstraint {
    pub fn new(name: &'static str, location: Location, kind: Kind) -> Self {
        Self {
            name,
            location,
            kind,
            required: true,
            default: Value::Absent,
            ge: None,
            le: None,
            min_length: None,
            max_length: None,
            description: None,
        }
    }

    /// Optional, resolving to [`Value::Absent`] (or `null`) when not supplied.
    pub fn optional(self) -> Self {
        self.default(Value::Absent)
    }

    pub fn default(mut self, value: Value) -> Self {
        self.required = false;
        self.default = value;
        self
    }

    pub fn ge(mut self, min: i64) -> Self {
        self.ge = Some(min);
        self
    }

    pub fn le(mut self, max: i64) -> Self {
        self.le = Some(max);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn description(mut self, text: &'static str) -> Self {
        self.description = Some(text);
        self
    }

    pub fn name(&self) -> &'static str { self.name }

    /// Validates one field's raw input.
    ///
    /// Checks run in a fixed order: presence, type, length or numeric bounds,
    /// then format. The first failing check is reported.
    pub fn check(&self, raw: Option<RawValue<'_>>) -> Result<Value, FieldError> {
        let raw = match raw {
            None | Some(RawValue::Json(JsonValue::Null)) if !self.required => {
                return Ok(self.default.clone());
            }
            None => return Err(self.fail(ErrorKind::Missing, "Field required", JsonValue::Null)),
            Some(raw) => raw,
        };

        match self.kind {
            Kind::String | Kind::Email => {
                let s = self.expect_str(raw)?;
                self.check_length(s, raw)?;
                if self.kind == Kind::Email && !s.validate_email() {
                    return Err(self
                        .fail(
                            ErrorKind::ValueError,
                            format!("value is not a valid email address: {EMAIL_REASON}"),
                            raw.to_input(),
                        )
                        .with_ctx(json!({ "reason": EMAIL_REASON })));
                }
                Ok(Value::Str(s.to_owned()))
            }
            Kind::Integer => {
                let n = self.expect_int(raw)?;
                self.check_bounds(n, raw)?;
                Ok(Value::Int(n))
            }
            Kind::Any => Ok(match raw {
                RawValue::Text(s) => Value::Str(s.to_owned()),
                RawValue::Json(v) => Value::Json(v.clone()),
            }),
        }
    }

    /// [`check`](Self::check), then convert into `T`.
    pub fn extract<T: FromValue>(&self, raw: Option<RawValue<'_>>) -> Result<T, FieldError> {
        let input = raw.map_or(JsonValue::Null, RawValue::to_input);
        let value = self.check(raw)?;
        T::from_value(value).ok_or_else(|| self.type_error(input))
    }

    fn expect_str<'a>(&self, raw: RawValue<'a>) -> Result<&'a str, FieldError> {
        match raw {
            RawValue::Text(s) => Ok(s),
            RawValue::Json(JsonValue::String(s)) => Ok(s.as_str()),
            RawValue::Json(other) => Err(self.fail(
                ErrorKind::StringType,
                "Input should be a valid string",
                other.clone(),
            )),
        }
    }

    fn expect_int(&self, raw: RawValue<'_>) -> Result<i64, FieldError> {
        let unparsable = || {
            self.fail(
                ErrorKind::IntParsing,
                "Input should be a valid integer, unable to parse string as an integer",
                raw.to_input(),
            )
        };
        match raw {
            RawValue::Text(s) => s.trim().parse().map_err(|_| unparsable()),
            RawValue::Json(JsonValue::String(s)) => s.trim().parse().map_err(|_| unparsable()),
            RawValue::Json(JsonValue::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(i);
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                    Some(f) if f.fract() != 0.0 => Err(self.fail(
                        ErrorKind::IntFromFloat,
                        "Input should be a valid integer, got a number with a fractional part",
                        raw.to_input(),
                    )),
                    _ => Err(self.type_error(raw.to_input())),
                }
            }
            RawValue::Json(_) => Err(self.type_error(raw.to_input())),
        }
    }

    fn check_length(&self, s: &str, raw: RawValue<'_>) -> Result<(), FieldError> {
        let len = s.chars().count();
        if let Some(min) = self.min_length.filter(|&min| len < min) {
            return Err(self
                .fail(
                    ErrorKind::StringTooShort,
                    format!("String should have at least {min} character{}", plural(min)),
                    raw.to_input(),
                )
                .with_ctx(json!({ "min_length": min })));
        }
        if let Some(max) = self.max_length.filter(|&max| len > max) {
            return Err(self
                .fail(
                    ErrorKind::StringTooLong,
                    format!("String should have at most {max} character{}", plural(max)),
                    raw.to_input(),
                )
                .with_ctx(json!({ "max_length": max })));
        }
        Ok(())
    }

    fn check_bounds(&self, n: i64, raw: RawValue<'_>) -> Result<(), FieldError> {
        if let Some(ge) = self.ge.filter(|&ge| n < ge) {
            return Err(self
                .fail(
                    ErrorKind::GreaterThanEqual,
                    format!("Input should be greater than or equal to {ge}"),
                    raw.to_input(),
                )
                .with_ctx(json!({ "ge": ge })));
        }
        if let Some(le) = self.le.filter(|&le| n > le) {
            return Err(self
                .fail(
                    ErrorKind::LessThanEqual,
                    format!("Input should be less than or equal to {le}"),
                    raw.to_input(),
                )
                .with_ctx(json!({ "le": le })));
        }
        Ok(())
    }

    fn type_error(&self, input: JsonValue) -> FieldError {
        match self.kind {
            Kind::Integer => self.fail(ErrorKind::IntType, "Input should be a valid integer", input),
            _ => self.fail(ErrorKind::StringType, "Input should be a valid string", input),
        }
    }

    fn fail(&self, kind: ErrorKind, msg: impl Into<String>, input: JsonValue) -> FieldError {
        let loc = vec![self.location.as_str().to_owned(), self.name.to_owned()];
        FieldError::new(kind, loc, msg, input).with_description(self.description)
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> FieldConstraint {
        FieldConstraint::new("name", Location::Query, Kind::String)
            .min_length(3)
            .max_length(5)
    }

    fn age() -> FieldConstraint {
        FieldConstraint::new("age", Location::Body, Kind::Integer)
            .optional()
            .ge(13)
            .le(120)
            .description("Age must be between 13 and 120")
    }

    #[test]
    fn required_field_reports_missing() {
        let err = name().check(None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Missing);
        assert_eq!(err.loc, ["query", "name"]);
        assert_eq!(err.input, JsonValue::Null);
    }

    #[test]
    fn default_replaces_absent_input() {
        let sku = FieldConstraint::new("product_sku", Location::Path, Kind::String)
            .default(Value::Str(String::new()));
        assert_eq!(sku.check(None).unwrap(), Value::Str(String::new()));
        assert_eq!(age().check(None).unwrap(), Value::Absent);
        assert_eq!(age().check(Some(RawValue::Json(&JsonValue::Null))).unwrap(), Value::Absent);
    }

    #[test]
    fn length_is_counted_in_characters() {
        assert_eq!(name().check(Some(RawValue::Text("żółw"))).unwrap(), Value::Str("żółw".into()));

        let short = name().check(Some(RawValue::Text("ab"))).unwrap_err();
        assert_eq!(short.kind, ErrorKind::StringTooShort);
        assert_eq!(short.ctx, Some(json!({ "min_length": 3 })));

        let long = name().check(Some(RawValue::Text("abcdef"))).unwrap_err();
        assert_eq!(long.kind, ErrorKind::StringTooLong);
        assert_eq!(long.msg, "String should have at most 5 characters");
    }

    #[test]
    fn bounds_are_inclusive() {
        let field = age();
        for ok in [13, 120] {
            assert_eq!(field.check(Some(RawValue::Json(&json!(ok)))).unwrap(), Value::Int(ok));
        }
        let low = field.check(Some(RawValue::Json(&json!(12)))).unwrap_err();
        assert_eq!(low.kind, ErrorKind::GreaterThanEqual);
        let high = field.check(Some(RawValue::Json(&json!(200)))).unwrap_err();
        assert_eq!(high.kind, ErrorKind::LessThanEqual);
        assert_eq!(high.input, json!(200));
        assert_eq!(high.description, Some("Age must be between 13 and 120"));
    }

    #[test]
    fn integer_parsing_failures() {
        let q = FieldConstraint::new("age", Location::Query, Kind::Integer);
        assert_eq!(q.check(Some(RawValue::Text("abc"))).unwrap_err().kind, ErrorKind::IntParsing);
        assert_eq!(age().check(Some(RawValue::Json(&json!(true)))).unwrap_err().kind, ErrorKind::IntType);
        assert_eq!(age().check(Some(RawValue::Json(&json!(25.5)))).unwrap_err().kind, ErrorKind::IntFromFloat);
        assert_eq!(age().check(Some(RawValue::Json(&json!(25.0)))).unwrap(), Value::Int(25));
    }

    #[test]
    fn strings_do_not_accept_other_json_types() {
        let username = FieldConstraint::new("username", Location::Body, Kind::String);
        let err = username.check(Some(RawValue::Json(&json!(42)))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::StringType);
        assert_eq!(err.input, json!(42));

        // null on a required field is a type error, not a missing field
        let err = username.check(Some(RawValue::Json(&JsonValue::Null))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::StringType);
    }

    #[test]
    fn email_format_is_checked_after_type() {
        let email = FieldConstraint::new("email", Location::Body, Kind::Email).optional();
        assert_eq!(
            email.check(Some(RawValue::Json(&json!("dev@example.com")))).unwrap(),
            Value::Str("dev@example.com".into())
        );
        let err = email.check(Some(RawValue::Json(&json!("nope")))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValueError);
        assert!(err.msg.starts_with("value is not a valid email address"));
        assert_eq!(err.ctx, Some(json!({ "reason": EMAIL_REASON })));
    }

    #[test]
    fn email_domain_labels_are_limited_to_63_characters() {
        let email = FieldConstraint::new("email", Location::Body, Kind::Email);
        let at_limit = format!("vijay@{}.com", "x".repeat(63));
        assert!(email.check(Some(RawValue::Text(&at_limit))).is_ok());

        let too_long = format!("vijay@{}.com", "x".repeat(64));
        let err = email.check(Some(RawValue::Text(&too_long))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValueError);
        assert_eq!(err.input, json!(too_long));
    }

    #[test]
    fn any_keeps_json_input() {
        let extra = FieldConstraint::new("extra", Location::Body, Kind::Any).optional();
        assert_eq!(extra.check(Some(RawValue::Json(&json!([1, 2])))).unwrap(), Value::Json(json!([1, 2])));
        assert_eq!(extra.check(Some(RawValue::Text("x"))).unwrap(), Value::Str("x".into()));
    }

    #[test]
    fn extract_converts_to_rust_types() {
        let n: Option<i64> = age().extract(None).unwrap();
        assert_eq!(n, None);
        let n: Option<i64> = age().extract(Some(RawValue::Json(&json!(25)))).unwrap();
        assert_eq!(n, Some(25));
        let s: String = name().extract(Some(RawValue::Text("vijay"))).unwrap();
        assert_eq!(s, "vijay");
    }
}
