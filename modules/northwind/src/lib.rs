//! Northwind module
//!
//! CRUD over employees, products and regions, backed by `SeaORM`.
//! Products are delete-guarded: a product still referenced by order line items stays put.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod module;
pub use module::NorthwindModule;

// === INTERNAL MODULES ===
// Exposed for integration tests; not a stable API.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
