//! Role-routed dashboard areas.
//!
//! Every handler re-runs the access gate on entry; the decision is never
//! cached across navigations because the role can change between visits.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use growstack_auth::Area;
use growstack_sales::summarize;

use crate::app::{dto, errors, services::AppServices};
use crate::authz;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/admin", get(admin))
        .route("/creator", get(creator))
        .route("/affiliate", get(affiliate))
        .route("/customer", get(customer))
}

/// Admin overview. Only `role == admin` passes the gate; everyone else is
/// redirected to the customer area (or to login without a session).
pub async fn admin(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
) -> axum::response::Response {
    let ctx = session.map(|Extension(ctx)| ctx);
    let session = match authz::enter_area(
        &services.gate,
        ctx.as_ref().map(|c| c.session()),
        Area::Admin,
    )
    .await
    {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let catalog = match services.products.list_all().await {
        Ok(products) => products,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "area": "admin",
            "principal": {
                "id": session.principal.id,
                "email": session.principal.email,
            },
            "catalog_size": catalog.len(),
        })),
    )
        .into_response()
}

/// Creator dashboard: own products, purchases, and the sales summary.
pub async fn creator(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
) -> axum::response::Response {
    let ctx = session.map(|Extension(ctx)| ctx);
    let session = match authz::enter_area(
        &services.gate,
        ctx.as_ref().map(|c| c.session()),
        Area::Creator,
    )
    .await
    {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let creator_id = session.principal.id;
    let products = match services.products.list_by_creator(&creator_id).await {
        Ok(products) => products,
        Err(e) => return errors::store_error_to_response(e),
    };
    let purchases = match services.purchases.list_by_creator(&creator_id).await {
        Ok(purchases) => purchases,
        Err(e) => return errors::store_error_to_response(e),
    };
    let summary = summarize(&purchases);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "area": "creator",
            "products": products.iter().map(dto::product_to_json).collect::<Vec<_>>(),
            "purchases": purchases.iter().map(dto::purchase_to_json).collect::<Vec<_>>(),
            "summary": dto::summary_to_json(&summary),
        })),
    )
        .into_response()
}

pub async fn affiliate(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
) -> axum::response::Response {
    let ctx = session.map(|Extension(ctx)| ctx);
    let session = match authz::enter_area(
        &services.gate,
        ctx.as_ref().map(|c| c.session()),
        Area::Affiliate,
    )
    .await
    {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "area": "affiliate",
            "principal": {
                "id": session.principal.id,
                "email": session.principal.email,
            },
        })),
    )
        .into_response()
}

/// Customer dashboard: the principal's own purchase history.
pub async fn customer(
    Extension(services): Extension<Arc<AppServices>>,
    session: Option<Extension<SessionContext>>,
) -> axum::response::Response {
    let ctx = session.map(|Extension(ctx)| ctx);
    let session = match authz::enter_area(
        &services.gate,
        ctx.as_ref().map(|c| c.session()),
        Area::Customer,
    )
    .await
    {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let purchases = match services.purchases.list_by_buyer(&session.principal.id).await {
        Ok(purchases) => purchases,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "area": "customer",
            "purchases": purchases.iter().map(dto::purchase_to_json).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}
