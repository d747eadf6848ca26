//! Small fixture dataset loaded in mock mode.

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, TransactionTrait, TryInsertResult};
use tracing::info;

use super::entity::{employee, order_detail, product, region};
use super::sea_gateway::{StoredRecord, sync_id_sequence};
use crate::domain::model::{Employee, OrderDetail, Product, Region};

fn regions() -> Vec<Region> {
    ["Eastern", "Western", "Northern", "Southern"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Region {
            region_id: id,
            region_description: name.to_owned(),
        })
        .collect()
}

fn products() -> Vec<Product> {
    let product = |id: i32, name: &str, qty: &str, price: f64, stock: i32| Product {
        product_id: id,
        product_name: name.to_owned(),
        supplier_id: Some(1),
        category_id: Some(1),
        quantity_per_unit: Some(qty.to_owned()),
        unit_price: Some(price),
        units_in_stock: Some(stock),
        units_on_order: Some(0),
        reorder_level: Some(10),
        discontinued: false,
    };
    vec![
        product(1, "Chai", "10 boxes x 20 bags", 18.0, 39),
        product(2, "Chang", "24 - 12 oz bottles", 19.0, 17),
        product(3, "Aniseed Syrup", "12 - 550 ml bottles", 10.0, 13),
    ]
}

fn employees() -> Vec<Employee> {
    vec![
        Employee {
            employee_id: 1,
            last_name: "Davolio".to_owned(),
            first_name: "Nancy".to_owned(),
            title: Some("Sales Representative".to_owned()),
            title_of_courtesy: Some("Ms.".to_owned()),
            birth_date: NaiveDate::from_ymd_opt(1968, 12, 8),
            hire_date: NaiveDate::from_ymd_opt(1992, 5, 1),
            city: Some("Seattle".to_owned()),
            region: Some("WA".to_owned()),
            country: Some("USA".to_owned()),
            reports_to: Some(2),
            ..Employee::default()
        },
        Employee {
            employee_id: 2,
            last_name: "Fuller".to_owned(),
            first_name: "Andrew".to_owned(),
            title: Some("Vice President, Sales".to_owned()),
            title_of_courtesy: Some("Dr.".to_owned()),
            birth_date: NaiveDate::from_ymd_opt(1952, 2, 19),
            hire_date: NaiveDate::from_ymd_opt(1992, 8, 14),
            city: Some("Tacoma".to_owned()),
            region: Some("WA".to_owned()),
            country: Some("USA".to_owned()),
            ..Employee::default()
        },
    ]
}

/// Only Chai (product 1) has order lines, so it is the one delete-guarded product.
fn order_details() -> Vec<OrderDetail> {
    vec![
        OrderDetail {
            order_id: 10248,
            product_id: 1,
            unit_price: 14.0,
            quantity: 12,
            discount: 0.0,
        },
        OrderDetail {
            order_id: 10249,
            product_id: 1,
            unit_price: 14.0,
            quantity: 9,
            discount: 0.05,
        },
    ]
}

fn inserted(res: TryInsertResult<u64>) -> u64 {
    match res {
        TryInsertResult::Inserted(rows) => rows,
        TryInsertResult::Empty | TryInsertResult::Conflicted => 0,
    }
}

/// Load the fixture rows in a single transaction.
///
/// Rows whose key is already taken are left alone, so seeding a database that
/// was seeded before changes nothing.
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    let mut rows = 0;
    rows += inserted(
        region::Entity::insert_many(regions().iter().map(Region::to_active_model))
            .on_conflict_do_nothing()
            .exec_without_returning(&txn)
            .await?,
    );
    rows += inserted(
        product::Entity::insert_many(products().iter().map(Product::to_active_model))
            .on_conflict_do_nothing()
            .exec_without_returning(&txn)
            .await?,
    );
    rows += inserted(
        employee::Entity::insert_many(employees().iter().map(Employee::to_active_model))
            .on_conflict_do_nothing()
            .exec_without_returning(&txn)
            .await?,
    );
    let lines = order_details();
    rows += inserted(
        order_detail::Entity::insert_many(lines.iter().map(order_detail::ActiveModel::from))
            .on_conflict_do_nothing()
            .exec_without_returning(&txn)
            .await?,
    );

    sync_id_sequence::<Region, _>(&txn).await?;
    sync_id_sequence::<Product, _>(&txn).await?;
    sync_id_sequence::<Employee, _>(&txn).await?;

    txn.commit().await?;
    if rows == 0 {
        info!("Sample Northwind data already present");
    } else {
        info!(rows, "Loaded sample Northwind data");
    }
    Ok(())
}
