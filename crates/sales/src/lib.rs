//! Sales domain module.
//!
//! Purchase records and the creator sales summary, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). Purchases are
//! written by the hosted backend's checkout; this service only reads them.

pub mod purchase;

pub use purchase::{summarize, Purchase, SalesSummary};
