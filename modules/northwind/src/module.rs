use std::sync::Arc;

use apikit::{DbModule, OpenApiRegistry, RestfulModule};
use async_trait::async_trait;
use axum::Router;
use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::routes::register_resource;
use crate::domain::model::{Employee, Product, Region};
use crate::domain::service::ResourceService;
use crate::infra::storage::{OrderDetailsOfProduct, SeaGateway, StoredRecord, migrations::Migrator};

fn sea_service<R>(gateway: SeaGateway<R>) -> Arc<ResourceService<R>>
where
    R: StoredRecord,
    <R::Entity as EntityTrait>::Model: IntoActiveModel<R::ActiveModel>,
{
    Arc::new(ResourceService::new(Arc::new(gateway)))
}

/// Northwind CRUD module: employees, products and regions.
#[derive(Clone)]
pub struct NorthwindModule {
    db: DatabaseConnection,
}

impl NorthwindModule {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn seed_sample_data(&self) -> anyhow::Result<()> {
        crate::infra::storage::seed_sample_data(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl DbModule for NorthwindModule {
    async fn migrate(&self) -> anyhow::Result<()> {
        info!("Running northwind database migrations");
        Migrator::up(&self.db, None).await?;
        info!("Northwind database migrations completed successfully");
        Ok(())
    }
}

impl RestfulModule for NorthwindModule {
    fn name(&self) -> &'static str {
        "northwind"
    }

    fn register_rest(
        &self,
        router: Router,
        openapi: &dyn OpenApiRegistry,
    ) -> anyhow::Result<Router> {
        info!("Northwind REST routes registering");

        let employees = sea_service(SeaGateway::<Employee>::new(self.db.clone()));
        let products = sea_service(
            SeaGateway::<Product>::new(self.db.clone())
                .with_dependents(Arc::new(OrderDetailsOfProduct)),
        );
        let regions = sea_service(SeaGateway::<Region>::new(self.db.clone()));

        let router = register_resource(router, openapi, employees);
        let router = register_resource(router, openapi, products);
        let router = register_resource(router, openapi, regions);

        info!("Northwind REST routes registered successfully");
        Ok(router)
    }
}
