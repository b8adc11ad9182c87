//! Products domain module.
//!
//! This crate contains business rules for the digital-goods catalog,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). Persistence is owned by the hosted backend; adapters live in
//! `growstack-infra`.

pub mod product;

pub use product::{NewProduct, Product, ProductPatch};
