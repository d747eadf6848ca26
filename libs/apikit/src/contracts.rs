//! Capabilities a feature module exposes to the host.

use async_trait::async_trait;
use axum::Router;

use crate::openapi::OpenApiRegistry;

/// Schema management; runs before any route is mounted.
#[async_trait]
pub trait DbModule: Send + Sync {
    async fn migrate(&self) -> anyhow::Result<()>;
}

/// Pure wiring; must be sync. Runs after migrations.
pub trait RestfulModule: Send + Sync {
    /// Name used in startup logs.
    fn name(&self) -> &'static str;

    fn register_rest(&self, router: Router, openapi: &dyn OpenApiRegistry)
    -> anyhow::Result<Router>;
}
