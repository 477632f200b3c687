use axum::{routing::get, Router};

use crate::api::rest::expenses::router as expenses_router;

pub mod expenses;
pub mod health;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health::healthcheck))
        .nest("/expenses", expenses_router())
}
