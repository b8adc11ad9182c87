use serde::Deserialize;
use serde_json::{json, Value};

use growstack_auth::Login;
use growstack_products::{NewProduct, Product, ProductPatch};
use growstack_sales::{Purchase, SalesSummary};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(body: CreateProductRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            price: body.price,
            image_url: body.image_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(body: UpdateProductRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            price: body.price,
            image_url: body.image_url,
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn login_to_json(login: &Login) -> Value {
    json!({
        "access_token": login.session.access_token.as_str(),
        "token_type": "bearer",
        "expires_at": login.session.expires_at,
        "principal": {
            "id": login.session.principal.id,
            "email": login.session.principal.email,
        },
        "role": login.assignment.effective(),
        "redirect_to": login.destination.path(),
    })
}

pub fn product_to_json(product: &Product) -> Value {
    json!({
        "id": product.id,
        "creator_id": product.creator_id,
        "title": product.title,
        "description": product.description,
        "price": product.price,
        "image_url": product.image_url,
        "created_at": product.created_at,
    })
}

pub fn purchase_to_json(purchase: &Purchase) -> Value {
    json!({
        "id": purchase.id,
        "product_id": purchase.product_id,
        "creator_id": purchase.creator_id,
        "buyer_id": purchase.buyer_id,
        "amount": purchase.amount,
        "occurred_at": purchase.occurred_at,
    })
}

pub fn summary_to_json(summary: &SalesSummary) -> Value {
    json!({
        "total_sales": summary.total_sales,
        "total_revenue": summary.total_revenue,
    })
}
