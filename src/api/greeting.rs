//! `GET /?name=..&age=..`

use std::sync::LazyLock;

use serde::Serialize;

use crate::validate::{FieldConstraint, Kind, Location, RawValue, ValidationError, Value};

pub const WELCOME_MESSAGE: &str = "Welcome to FAST API";

static NAME: LazyLock<FieldConstraint> = LazyLock::new(|| {
    FieldConstraint::new("name", Location::Query, Kind::String)
        .min_length(3)
        .max_length(5)
});

static AGE: LazyLock<FieldConstraint> = LazyLock::new(|| {
    FieldConstraint::new("age", Location::Query, Kind::Integer)
        .default(Value::Int(10))
        .ge(1)
        .le(100)
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub message: &'static str,
    pub name: String,
    pub age: i64,
}

/// Validates the greeting's query parameters and echoes them back.
///
/// `name` is required, 3–5 characters; `age` defaults to 10 and must be in
/// 1–100. Fails on the first violation, checking `name` before `age`.
pub fn handle_query_greeting(name: Option<&str>, age: Option<&str>) -> Result<Greeting, ValidationError> {
    let name: String = NAME.extract(name.map(RawValue::Text))?;
    let age: i64 = AGE.extract(age.map(RawValue::Text))?;
    Ok(Greeting { message: WELCOME_MESSAGE, name, age })
}
