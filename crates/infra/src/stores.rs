//! Port traits for the hosted data tables.

use async_trait::async_trait;
use thiserror::Error;

use growstack_core::{PrincipalId, ProductId};
use growstack_products::Product;
use growstack_sales::Purchase;

/// Data-service failure. The backend's message is preserved so the UI layer
/// can surface it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("data service error: {0}")]
    Backend(String),
}

/// The `products` table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: Product) -> Result<(), StoreError>;

    /// Replace the stored row for `product.id`.
    async fn update(&self, product: &Product) -> Result<(), StoreError>;

    async fn delete(&self, id: &ProductId) -> Result<(), StoreError>;

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    async fn list_by_creator(&self, creator: &PrincipalId) -> Result<Vec<Product>, StoreError>;

    /// Public catalog listing.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;
}

/// The `purchases` table (read-only here: checkout writes it).
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    async fn list_by_creator(&self, creator: &PrincipalId) -> Result<Vec<Purchase>, StoreError>;

    async fn list_by_buyer(&self, buyer: &PrincipalId) -> Result<Vec<Purchase>, StoreError>;
}
