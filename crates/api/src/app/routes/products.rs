//! Product CRUD for authenticated creators.
//!
//! These are API endpoints, not navigations: a missing session is a 401, and
//! mutating someone else's product is a 403. Ownership is enforced by the
//! domain's `ensure_owned_by`, never by trusting the request body.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use growstack_core::ProductId;
use growstack_products::Product;

use crate::app::{dto, errors, services::AppServices};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
}

fn require_session(
    session: Option<Extension<SessionContext>>,
) -> Result<SessionContext, axum::response::Response> {
    match session {
        Some(Extension(ctx)) => Ok(ctx),
        None => Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "authentication required",
        )),
    }
}

fn parse_product_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let ctx = match require_session(session) {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };

    let product = match Product::create(
        ProductId::new(),
        ctx.principal_id(),
        body.into(),
        Utc::now(),
    ) {
        Ok(product) => product,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.products.insert(product.clone()).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
) -> axum::response::Response {
    let ctx = match require_session(session) {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };

    match services.products.list_by_creator(&ctx.principal_id()).await {
        Ok(products) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "items": products.iter().map(dto::product_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require_session(session) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.products.get(&id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let ctx = match require_session(session) {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut product = match services.products.get(&id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = product.ensure_owned_by(&ctx.principal_id()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = product.apply(body.into()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.products.update(&product).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(dto::product_to_json(&product))).into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let ctx = match require_session(session) {
        Ok(ctx) => ctx,
        Err(resp) => return resp,
    };
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let product = match services.products.get(&id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = product.ensure_owned_by(&ctx.principal_id()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.products.delete(&id).await {
        return errors::store_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}
