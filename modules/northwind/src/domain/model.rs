//! Northwind records as the domain sees them. Only the id is ever inspected.

use chrono::NaiveDate;

use crate::domain::record::Record;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Employee {
    pub employee_id: i32,
    pub last_name: String,
    pub first_name: String,
    pub title: Option<String>,
    pub title_of_courtesy: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub home_phone: Option<String>,
    pub extension: Option<String>,
    pub notes: Option<String>,
    pub reports_to: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Product {
    pub product_id: i32,
    pub product_name: String,
    pub supplier_id: Option<i32>,
    pub category_id: Option<i32>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<f64>,
    pub units_in_stock: Option<i32>,
    pub units_on_order: Option<i32>,
    pub reorder_level: Option<i32>,
    pub discontinued: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    pub region_id: i32,
    pub region_description: String,
}

/// Order line item. Only referenced by the product delete guard.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order_id: i32,
    pub product_id: i32,
    pub unit_price: f64,
    pub quantity: i32,
    pub discount: f64,
}

impl Record for Employee {
    const KIND: &'static str = "Employee";

    fn id(&self) -> i32 {
        self.employee_id
    }

    fn with_id(mut self, id: i32) -> Self {
        self.employee_id = id;
        self
    }
}

impl Record for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> i32 {
        self.product_id
    }

    fn with_id(mut self, id: i32) -> Self {
        self.product_id = id;
        self
    }
}

impl Record for Region {
    const KIND: &'static str = "Region";

    fn id(&self) -> i32 {
        self.region_id
    }

    fn with_id(mut self, id: i32) -> Self {
        self.region_id = id;
        self
    }
}
