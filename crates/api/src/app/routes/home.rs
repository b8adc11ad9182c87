use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto, errors, services::AppServices};

/// Public marketplace landing: welcome copy plus the catalog.
pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let products = match services.products.list_all().await {
        Ok(products) => products,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Welcome to Growstack Marketplace",
            "tagline": "Discover, promote, and earn from digital products like courses and ebooks.",
            "products": products.iter().map(dto::product_to_json).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}
