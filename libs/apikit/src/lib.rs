//! Shared HTTP plumbing for the Northwind API modules.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod contracts;
pub mod extract;
pub mod openapi;
pub mod operation;
pub mod problem;
pub mod response;
pub mod trace_layer;

pub use contracts::{DbModule, RestfulModule};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use openapi::{OpenApiInfo, OpenApiRegistry, OpenApiRegistryImpl, ensure_schema};
pub use operation::OperationBuilder;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem};
pub use response::{ApiResult, JsonBody, created_json, no_content};
pub use trace_layer::WithRequestContext;
