//! REST adapter for the hosted backend.
//!
//! The backend exposes identity endpoints under `/auth/v1/` (password-grant
//! sign-in, token introspection) and table endpoints under `/rest/v1/` with
//! `column=eq.value` filters. Single-row reads ask for
//! `application/vnd.pgrst.object+json`, which turns "no matching row" into a
//! `406` — that is how "record not found" reaches us.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use growstack_auth::{
    AccessToken, AuthError, IdentityProvider, Principal, ProfileError, ProfileStore,
    RoleAssignment, Session,
};
use growstack_core::{PrincipalId, ProductId, PurchaseId};
use growstack_products::Product;
use growstack_sales::Purchase;

use crate::config::BackendConfig;
use crate::stores::{ProductStore, PurchaseStore, StoreError};

const OBJECT_JSON: &str = "application/vnd.pgrst.object+json";

/// Client for the hosted backend, implementing all four ports.
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    pub fn new(config: BackendConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("HTTP client could not be constructed: {e}"))?;
        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Table requests authenticate with the service key on both headers the
    /// backend accepts.
    fn table_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire payloads
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: PrincipalId,
    email: String,
}

/// The backend spreads error text across several fields depending on the
/// endpoint; take whichever is present.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorPayload {
    fn into_text(self, status: StatusCode) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .unwrap_or_else(|| format!("unexpected status {status}"))
    }
}

async fn error_text(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorPayload>().await {
        Ok(payload) => payload.into_text(status),
        Err(_) => format!("unexpected status {status}"),
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductRow {
    id: ProductId,
    creator_id: PrincipalId,
    title: String,
    description: String,
    price: u64,
    #[serde(default)]
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            creator_id: product.creator_id,
            title: product.title,
            description: product.description,
            price: product.price,
            image: product.image_url,
            created_at: product.created_at,
        }
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            creator_id: row.creator_id,
            title: row.title,
            description: row.description,
            price: row.price,
            image_url: row.image,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PurchaseRow {
    id: PurchaseId,
    product_id: ProductId,
    creator_id: PrincipalId,
    #[serde(default)]
    buyer_id: Option<PrincipalId>,
    amount: u64,
    created_at: DateTime<Utc>,
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            creator_id: row.creator_id,
            buyer_id: row.buyer_id,
            amount: row.amount,
            occurred_at: row.created_at,
        }
    }
}

fn session_from_token_response(token: TokenResponse) -> Session {
    let expires_at = token
        .expires_in
        .map(|seconds| Utc::now() + TimeDelta::seconds(seconds));
    Session::new(
        Principal::new(token.user.id, token.user.email),
        AccessToken::new(token.access_token),
        expires_at,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity provider
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl IdentityProvider for RestBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let token: TokenResponse = response
                .json()
                .await
                .map_err(|e| AuthError::Provider(format!("malformed token response: {e}")))?;
            return Ok(session_from_token_response(token));
        }

        let text = error_text(response).await;
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AuthError::InvalidCredentials(text))
            }
            _ => Err(AuthError::Provider(text)),
        }
    }

    async fn session_from_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let response = self
            .http
            .get(self.auth_url("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let user: UserPayload = response
                .json()
                .await
                .map_err(|e| AuthError::Provider(format!("malformed user response: {e}")))?;
            return Ok(Some(Session::new(
                Principal::new(user.id, user.email),
                AccessToken::new(token),
                None,
            )));
        }

        match status {
            // The provider no longer recognizes the token.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(AuthError::Provider(error_text(response).await)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile store
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ProfileStore for RestBackend {
    async fn role_assignment(
        &self,
        principal: &PrincipalId,
    ) -> Result<RoleAssignment, ProfileError> {
        let response = self
            .table_request(self.http.get(self.table_url("profiles")))
            .query(&[
                ("id", format!("eq.{principal}")),
                ("select", "role".to_string()),
            ])
            .header(header::ACCEPT, OBJECT_JSON)
            .send()
            .await
            .map_err(|e| ProfileError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let row: ProfileRow = response
                .json()
                .await
                .map_err(|e| ProfileError::Unavailable(format!("malformed profile row: {e}")))?;
            return Ok(RoleAssignment::from_label(row.role.as_deref()));
        }

        match status {
            StatusCode::NOT_ACCEPTABLE | StatusCode::NOT_FOUND => Err(ProfileError::NotFound),
            _ => Err(ProfileError::Unavailable(error_text(response).await)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Product / purchase tables
// ─────────────────────────────────────────────────────────────────────────────

impl RestBackend {
    async fn list_products(&self, filter: Option<(&str, String)>) -> Result<Vec<Product>, StoreError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        if let Some((column, value)) = filter {
            query.push((column, value));
        }

        let response = self
            .table_request(self.http.get(self.table_url("products")))
            .query(&query)
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Backend(error_text(response).await));
        }
        let rows: Vec<ProductRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("malformed product rows: {e}")))?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_purchases(&self, column: &str, value: String) -> Result<Vec<Purchase>, StoreError> {
        let response = self
            .table_request(self.http.get(self.table_url("purchases")))
            .query(&[("select", "*".to_string()), (column, value)])
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Backend(error_text(response).await));
        }
        let rows: Vec<PurchaseRow> = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("malformed purchase rows: {e}")))?;
        Ok(rows.into_iter().map(Purchase::from).collect())
    }
}

#[async_trait]
impl ProductStore for RestBackend {
    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        let response = self
            .table_request(self.http.post(self.table_url("products")))
            .header("Prefer", "return=minimal")
            .json(&ProductRow::from(product))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Backend(error_text(response).await))
        }
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let response = self
            .table_request(self.http.patch(self.table_url("products")))
            .query(&[("id", format!("eq.{}", product.id))])
            .header("Prefer", "return=minimal")
            .json(&ProductRow::from(product.clone()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Backend(error_text(response).await))
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), StoreError> {
        let response = self
            .table_request(self.http.delete(self.table_url("products")))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Backend(error_text(response).await))
        }
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let response = self
            .table_request(self.http.get(self.table_url("products")))
            .query(&[("id", format!("eq.{id}")), ("select", "*".to_string())])
            .header(header::ACCEPT, OBJECT_JSON)
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let row: ProductRow = response
                .json()
                .await
                .map_err(|e| StoreError::Backend(format!("malformed product row: {e}")))?;
            return Ok(Some(row.into()));
        }
        match status {
            StatusCode::NOT_ACCEPTABLE | StatusCode::NOT_FOUND => Ok(None),
            _ => Err(StoreError::Backend(error_text(response).await)),
        }
    }

    async fn list_by_creator(&self, creator: &PrincipalId) -> Result<Vec<Product>, StoreError> {
        self.list_products(Some(("creator_id", format!("eq.{creator}"))))
            .await
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        self.list_products(None).await
    }
}

#[async_trait]
impl PurchaseStore for RestBackend {
    async fn list_by_creator(&self, creator: &PrincipalId) -> Result<Vec<Purchase>, StoreError> {
        self.list_purchases("creator_id", format!("eq.{creator}")).await
    }

    async fn list_by_buyer(&self, buyer: &PrincipalId) -> Result<Vec<Purchase>, StoreError> {
        self.list_purchases("buyer_id", format!("eq.{buyer}")).await
    }
}
