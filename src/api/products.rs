//! `GET /products/{product_sku}` and `POST /`.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::validate::{self, Collector, FieldConstraint, Kind, Location, RawValue, ValidationError, Value};

pub const PRODUCT_PAGE_MESSAGE: &str = "Welcome to Product Page";

static PRODUCT_SKU: LazyLock<FieldConstraint> = LazyLock::new(|| {
    FieldConstraint::new("product_sku", Location::Path, Kind::String)
        .default(Value::Str(String::new()))
});

// Declaration order is check order and error order.
static USERNAME: LazyLock<FieldConstraint> = LazyLock::new(|| {
    FieldConstraint::new("username", Location::Body, Kind::String)
        .min_length(3)
        .max_length(30)
});

static EMAIL: LazyLock<FieldConstraint> = LazyLock::new(|| {
    FieldConstraint::new("email", Location::Body, Kind::Email).optional()
});

static PHONE: LazyLock<FieldConstraint> = LazyLock::new(|| {
    FieldConstraint::new("phone", Location::Body, Kind::String).min_length(1)
});

static AGE: LazyLock<FieldConstraint> = LazyLock::new(|| {
    FieldConstraint::new("age", Location::Body, Kind::Integer)
        .optional()
        .ge(13)
        .le(120)
        .description("Age must be between 13 and 120")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPage {
    pub message: &'static str,
    pub product_sku: String,
}

/// A submitted product record. Absent optionals serialise as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub username: String,
    pub email: Option<String>,
    pub phone: String,
    pub age: Option<i64>,
}

/// Echoes the SKU from the path. Any string is accepted; absent means `""`.
pub fn handle_product_lookup(product_sku: Option<&str>) -> ProductPage {
    let product_sku = PRODUCT_SKU
        .extract::<String>(product_sku.map(RawValue::Text))
        .unwrap_or_default();
    ProductPage { message: PRODUCT_PAGE_MESSAGE, product_sku }
}

/// Validates a product payload and returns it unchanged.
///
/// Every field is checked, in declaration order, and every violation is
/// reported. Unknown keys are ignored.
pub fn handle_product_submission(payload: &JsonValue) -> Result<Product, ValidationError> {
    let object = validate::as_object(payload)?;
    let raw = |name: &str| object.get(name).map(RawValue::Json);

    let mut fields = Collector::default();
    let username = fields.field(&USERNAME, raw(USERNAME.name()));
    let email = fields.field(&EMAIL, raw(EMAIL.name()));
    let phone = fields.field(&PHONE, raw(PHONE.name()));
    let age = fields.field(&AGE, raw(AGE.name()));
    fields.finish()?;

    Ok(Product { username, email, phone, age })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ErrorKind;
    use serde_json::json;

    #[test]
    fn lookup_echoes_any_sku() {
        assert_eq!(handle_product_lookup(Some("SKU-42 ä")).product_sku, "SKU-42 ä");
        assert_eq!(handle_product_lookup(None).product_sku, "");
        assert_eq!(handle_product_lookup(None).message, PRODUCT_PAGE_MESSAGE);
    }

    #[test]
    fn minimal_product_is_echoed() {
        let product = handle_product_submission(&json!({"username": "vijay_dev", "phone": "123"})).unwrap();
        assert_eq!(
            product,
            Product { username: "vijay_dev".into(), email: None, phone: "123".into(), age: None }
        );
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"username": "vijay_dev", "email": null, "phone": "123", "age": null})
        );
    }

    #[test]
    fn full_product_is_echoed() {
        let payload = json!({
            "username": "vijay_dev",
            "email": "vijay@example.com",
            "phone": "+91 98765 43210",
            "age": 25,
        });
        let product = handle_product_submission(&payload).unwrap();
        assert_eq!(serde_json::to_value(&product).unwrap(), payload);
    }

    #[test]
    fn null_optionals_are_absent() {
        let product = handle_product_submission(
            &json!({"username": "vijay_dev", "phone": "1", "email": null, "age": null}),
        )
        .unwrap();
        assert_eq!((product.email, product.age), (None, None));
    }

    #[test]
    fn short_username_fails() {
        let err = handle_product_submission(&json!({"username": "ab", "phone": "123"})).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), ["username"]);
        assert_eq!(err.errors()[0].kind, ErrorKind::StringTooShort);
    }

    #[test]
    fn age_out_of_range_fails() {
        let err = handle_product_submission(
            &json!({"username": "vijay_dev", "phone": "123", "age": 200}),
        )
        .unwrap_err();
        let e = &err.errors()[0];
        assert_eq!(e.field(), Some("age"));
        assert_eq!(e.kind, ErrorKind::LessThanEqual);
        assert_eq!(e.input, json!(200));
        assert_eq!(e.description, Some("Age must be between 13 and 120"));
    }

    #[test]
    fn every_violation_is_reported_in_order() {
        let err = handle_product_submission(
            &json!({"username": "ab", "email": "not-an-email", "age": 5}),
        )
        .unwrap_err();
        let got: Vec<_> = err.errors().iter().map(|e| (e.field(), e.kind)).collect();
        assert_eq!(
            got,
            [
                (Some("username"), ErrorKind::StringTooShort),
                (Some("email"), ErrorKind::ValueError),
                (Some("phone"), ErrorKind::Missing),
                (Some("age"), ErrorKind::GreaterThanEqual),
            ]
        );
    }

    #[test]
    fn empty_phone_is_rejected() {
        let err = handle_product_submission(&json!({"username": "vijay_dev", "phone": ""})).unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::StringTooShort);
        assert_eq!(err.errors()[0].field(), Some("phone"));
    }

    #[test]
    fn non_object_payload_fails_as_a_whole() {
        let err = handle_product_submission(&json!(["vijay_dev"])).unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::ModelType);
        assert_eq!(err.errors()[0].loc, ["body"]);
    }
}
