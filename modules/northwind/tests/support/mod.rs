#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use apikit::{DbModule, OpenApiRegistryImpl, RestfulModule};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use northwind::NorthwindModule;
use northwind::domain::model::OrderDetail;
use northwind::infra::storage::entity::order_detail;
use sea_orm::{Database, DatabaseConnection, EntityTrait};
use serde_json::Value;
use tower::ServiceExt;

pub async fn inmem_db() -> DatabaseConnection {
    Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database")
}

/// Migrated in-memory database plus the full northwind router on top of it.
pub async fn test_app() -> (Router, DatabaseConnection) {
    let db = inmem_db().await;
    let module = NorthwindModule::new(db.clone());
    module.migrate().await.unwrap();

    let registry = OpenApiRegistryImpl::new();
    let router = module.register_rest(Router::new(), &registry).unwrap();
    (router, db)
}

pub async fn add_order_line(db: &DatabaseConnection, order_id: i32, product_id: i32) {
    let line = OrderDetail {
        order_id,
        product_id,
        unit_price: 14.0,
        quantity: 12,
        discount: 0.0,
    };
    order_detail::Entity::insert(order_detail::ActiveModel::from(&line))
        .exec_without_returning(db)
        .await
        .unwrap();
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

/// Send `body` verbatim as a JSON-typed request body.
pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &'static str) -> Response<Body> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub fn content_type(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

pub async fn json_body(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
