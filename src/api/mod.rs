//! The welcome service: three endpoints, one per kind of request input.
//!
//! | Method | Path | Input |
//! |---|---|---|
//! | GET | `/` | query `name`, `age` |
//! | GET | `/products/{product_sku}` | path `product_sku` |
//! | POST | `/` | JSON body [`Product`] |
//!
//! Each endpoint is a plain validating function (`handle_*`) plus a thin
//! async adapter that pulls raw values out of the [`Request`].

mod greeting;
mod products;

pub use greeting::{Greeting, WELCOME_MESSAGE, handle_query_greeting};
pub use products::{
    PRODUCT_PAGE_MESSAGE, Product, ProductPage, handle_product_lookup, handle_product_submission,
};

use crate::health;
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;
use crate::validate::{self, ValidationError};

/// The service's full route table, health probes included.
pub fn routes() -> Router {
    Router::new()
        .get("/", greet)
        .get("/products/{product_sku}", product_page)
        .post("/", submit_product)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

async fn greet(req: Request) -> Result<Json<Greeting>, ValidationError> {
    let name = req.query_value("name");
    let age = req.query_value("age");
    handle_query_greeting(name.as_deref(), age.as_deref()).map(Json)
}

async fn product_page(req: Request) -> Json<ProductPage> {
    Json(handle_product_lookup(req.param("product_sku")))
}

async fn submit_product(req: Request) -> Result<Json<Product>, ValidationError> {
    let payload = validate::parse_json_body(req.body())?;
    handle_product_submission(&payload).map(Json)
}
