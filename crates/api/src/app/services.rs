//! Backend service wiring.

use std::sync::Arc;

use growstack_auth::{AccessGate, IdentityProvider, ProfileStore, Role, RoleAssignment};
use growstack_infra::{
    BackendConfig, MemoryIdentityProvider, MemoryProductStore, MemoryProfileStore,
    MemoryPurchaseStore, ProductStore, PurchaseStore, RestBackend,
};

/// Shared services for the HTTP layer: the access gate plus the data stores.
pub struct AppServices {
    pub gate: AccessGate,
    pub identity: Arc<dyn IdentityProvider>,
    pub products: Arc<dyn ProductStore>,
    pub purchases: Arc<dyn PurchaseStore>,
}

impl AppServices {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        products: Arc<dyn ProductStore>,
        purchases: Arc<dyn PurchaseStore>,
    ) -> Self {
        Self {
            gate: AccessGate::new(identity.clone(), profiles),
            identity,
            products,
            purchases,
        }
    }
}

/// Build services from the environment: the hosted backend when configured,
/// otherwise an in-memory backend for development.
pub async fn build_services() -> anyhow::Result<AppServices> {
    match BackendConfig::from_env() {
        Ok(config) => {
            let backend = Arc::new(RestBackend::new(config)?);
            Ok(AppServices::new(
                backend.clone(),
                backend.clone(),
                backend.clone(),
                backend,
            ))
        }
        Err(e) => {
            tracing::warn!(error = %e, "hosted backend not configured; using in-memory backend");
            Ok(dev_services())
        }
    }
}

/// In-memory backend with a seeded demo admin account. Development only.
fn dev_services() -> AppServices {
    let identity = Arc::new(MemoryIdentityProvider::new());
    let profiles = Arc::new(MemoryProfileStore::new());

    let admin = identity.register("admin@growstack.dev", "growstack");
    profiles.assign(admin.id, RoleAssignment::of(Role::Admin));
    tracing::warn!("insecure demo account admin@growstack.dev is active");

    AppServices::new(
        identity,
        profiles,
        Arc::new(MemoryProductStore::new()),
        Arc::new(MemoryPurchaseStore::new()),
    )
}
