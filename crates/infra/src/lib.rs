//! Infrastructure layer: adapters for the hosted backend plus in-memory
//! implementations for tests and development.
//!
//! The hosted backend owns persistence and credential verification; this
//! crate only implements the ports defined by the domain crates
//! (`growstack-auth` for identity/profiles, [`stores`] for catalog data).

pub mod config;
pub mod memory;
pub mod rest;
pub mod stores;

pub use config::BackendConfig;
pub use memory::{
    MemoryIdentityProvider, MemoryProductStore, MemoryProfileStore, MemoryPurchaseStore,
};
pub use rest::RestBackend;
pub use stores::{ProductStore, PurchaseStore, StoreError};
