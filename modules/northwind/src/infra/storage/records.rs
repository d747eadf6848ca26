//! Domain record <-> entity mapping.

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

use super::entity::{employee, order_detail, product, region};
use super::sea_gateway::{DependentsProbe, StoredRecord};
use crate::domain::model::{Employee, OrderDetail, Product, Region};

fn key(id: i32) -> ActiveValue<i32> {
    if id == 0 { NotSet } else { Set(id) }
}

impl StoredRecord for Employee {
    type Entity = employee::Entity;
    type ActiveModel = employee::ActiveModel;

    fn id_column() -> employee::Column {
        employee::Column::EmployeeId
    }

    fn from_model(m: employee::Model) -> Self {
        Self {
            employee_id: m.employee_id,
            last_name: m.last_name,
            first_name: m.first_name,
            title: m.title,
            title_of_courtesy: m.title_of_courtesy,
            birth_date: m.birth_date,
            hire_date: m.hire_date,
            address: m.address,
            city: m.city,
            region: m.region,
            postal_code: m.postal_code,
            country: m.country,
            home_phone: m.home_phone,
            extension: m.extension,
            notes: m.notes,
            reports_to: m.reports_to,
        }
    }

    fn to_active_model(&self) -> employee::ActiveModel {
        employee::ActiveModel {
            employee_id: key(self.employee_id),
            last_name: Set(self.last_name.clone()),
            first_name: Set(self.first_name.clone()),
            title: Set(self.title.clone()),
            title_of_courtesy: Set(self.title_of_courtesy.clone()),
            birth_date: Set(self.birth_date),
            hire_date: Set(self.hire_date),
            address: Set(self.address.clone()),
            city: Set(self.city.clone()),
            region: Set(self.region.clone()),
            postal_code: Set(self.postal_code.clone()),
            country: Set(self.country.clone()),
            home_phone: Set(self.home_phone.clone()),
            extension: Set(self.extension.clone()),
            notes: Set(self.notes.clone()),
            reports_to: Set(self.reports_to),
        }
    }
}

impl StoredRecord for Product {
    type Entity = product::Entity;
    type ActiveModel = product::ActiveModel;

    fn id_column() -> product::Column {
        product::Column::ProductId
    }

    fn from_model(m: product::Model) -> Self {
        Self {
            product_id: m.product_id,
            product_name: m.product_name,
            supplier_id: m.supplier_id,
            category_id: m.category_id,
            quantity_per_unit: m.quantity_per_unit,
            unit_price: m.unit_price,
            units_in_stock: m.units_in_stock,
            units_on_order: m.units_on_order,
            reorder_level: m.reorder_level,
            discontinued: m.discontinued,
        }
    }

    fn to_active_model(&self) -> product::ActiveModel {
        product::ActiveModel {
            product_id: key(self.product_id),
            product_name: Set(self.product_name.clone()),
            supplier_id: Set(self.supplier_id),
            category_id: Set(self.category_id),
            quantity_per_unit: Set(self.quantity_per_unit.clone()),
            unit_price: Set(self.unit_price),
            units_in_stock: Set(self.units_in_stock),
            units_on_order: Set(self.units_on_order),
            reorder_level: Set(self.reorder_level),
            discontinued: Set(self.discontinued),
        }
    }
}

impl StoredRecord for Region {
    type Entity = region::Entity;
    type ActiveModel = region::ActiveModel;

    fn id_column() -> region::Column {
        region::Column::RegionId
    }

    fn from_model(m: region::Model) -> Self {
        Self {
            region_id: m.region_id,
            region_description: m.region_description,
        }
    }

    fn to_active_model(&self) -> region::ActiveModel {
        region::ActiveModel {
            region_id: key(self.region_id),
            region_description: Set(self.region_description.clone()),
        }
    }
}

impl From<&OrderDetail> for order_detail::ActiveModel {
    fn from(d: &OrderDetail) -> Self {
        Self {
            order_id: Set(d.order_id),
            product_id: Set(d.product_id),
            unit_price: Set(d.unit_price),
            quantity: Set(d.quantity),
            discount: Set(d.discount),
        }
    }
}

/// Order line items referencing a product.
pub struct OrderDetailsOfProduct;

#[async_trait]
impl DependentsProbe for OrderDetailsOfProduct {
    fn name(&self) -> &'static str {
        "order_details"
    }

    async fn count(&self, txn: &DatabaseTransaction, product_id: i32) -> Result<u64, DbErr> {
        order_detail::Entity::find()
            .filter(order_detail::Column::ProductId.eq(product_id))
            .count(txn)
            .await
    }
}
