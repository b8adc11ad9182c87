//! In-memory implementations of the backend ports.
//!
//! Used by tests and by the api binary's dev mode when no hosted backend is
//! configured. Interior mutability via `Mutex` keeps the trait surface
//! `&self`, matching the REST adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use growstack_auth::{
    AccessToken, AuthError, IdentityProvider, Principal, ProfileError, ProfileStore,
    RoleAssignment, Session,
};
use growstack_core::{PrincipalId, ProductId};
use growstack_products::Product;
use growstack_sales::Purchase;

use crate::stores::{ProductStore, PurchaseStore, StoreError};

/// The message the hosted provider answers with on bad credentials; kept
/// identical so dev mode and production surface the same text.
const INVALID_LOGIN: &str = "Invalid login credentials";

#[derive(Debug, Default)]
pub struct MemoryIdentityProvider {
    // email -> (password, principal)
    accounts: Mutex<HashMap<String, (String, Principal)>>,
    // token -> session
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account and return its principal.
    pub fn register(&self, email: &str, password: &str) -> Principal {
        let principal = Principal::new(PrincipalId::new(), email);
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            (password.to_string(), principal.clone()),
        );
        principal
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let principal = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some((stored, principal)) if stored == password => principal.clone(),
                _ => return Err(AuthError::InvalidCredentials(INVALID_LOGIN.to_string())),
            }
        };

        let token = Uuid::now_v7().simple().to_string();
        let session = Session::new(principal, AccessToken::new(token.clone()), None);
        self.sessions.lock().unwrap().insert(token, session.clone());
        Ok(session)
    }

    async fn session_from_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let session = self.sessions.lock().unwrap().get(token).cloned();
        Ok(session.filter(|s| !s.is_expired(Utc::now())))
    }
}

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    roles: Mutex<HashMap<PrincipalId, RoleAssignment>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the profile record for a principal.
    pub fn assign(&self, principal: PrincipalId, assignment: RoleAssignment) {
        self.roles.lock().unwrap().insert(principal, assignment);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn role_assignment(
        &self,
        principal: &PrincipalId,
    ) -> Result<RoleAssignment, ProfileError> {
        self.roles
            .lock()
            .unwrap()
            .get(principal)
            .copied()
            .ok_or(ProfileError::NotFound)
    }
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: Mutex<HashMap<ProductId, Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by_key(|p| (p.created_at, *p.id.as_uuid()));
    products
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        self.products.lock().unwrap().insert(product.id, product);
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let mut products = self.products.lock().unwrap();
        if !products.contains_key(&product.id) {
            return Err(StoreError::NotFound);
        }
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), StoreError> {
        match self.products.lock().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.lock().unwrap().get(id).cloned())
    }

    async fn list_by_creator(&self, creator: &PrincipalId) -> Result<Vec<Product>, StoreError> {
        let products = self.products.lock().unwrap();
        Ok(sorted(
            products
                .values()
                .filter(|p| p.creator_id == *creator)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(sorted(self.products.lock().unwrap().values().cloned().collect()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryPurchaseStore {
    purchases: Mutex<Vec<Purchase>>,
}

impl MemoryPurchaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a purchase record (checkout stand-in for tests/dev).
    pub fn record(&self, purchase: Purchase) {
        self.purchases.lock().unwrap().push(purchase);
    }
}

#[async_trait]
impl PurchaseStore for MemoryPurchaseStore {
    async fn list_by_creator(&self, creator: &PrincipalId) -> Result<Vec<Purchase>, StoreError> {
        Ok(self
            .purchases
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.creator_id == *creator)
            .cloned()
            .collect())
    }

    async fn list_by_buyer(&self, buyer: &PrincipalId) -> Result<Vec<Purchase>, StoreError> {
        Ok(self
            .purchases
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.buyer_id == Some(*buyer))
            .cloned()
            .collect())
    }
}
