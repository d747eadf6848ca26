use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

use crate::domain::model::{Employee, Product, Region};
use crate::domain::record::Record;

/// A record kind exposed under `/api/{collection}`.
pub trait RestResource: Record {
    type Dto: Serialize
        + DeserializeOwned
        + ToSchema
        + From<Self>
        + Into<Self>
        + std::fmt::Debug
        + Send
        + 'static;

    /// Last path segment, e.g. `products`.
    const COLLECTION: &'static str;

    fn base_path() -> String {
        format!("/api/{}", Self::COLLECTION)
    }
}

/// REST DTO for an employee. A missing or zero `employeeId` on create lets the store assign one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    #[serde(default)]
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
    /// Id of the employee's manager
    pub reports_to: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub product_id: i32,
    pub product_name: String,
    pub supplier_id: Option<i32>,
    pub category_id: Option<i32>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<f64>,
    pub units_in_stock: Option<i32>,
    pub units_on_order: Option<i32>,
    pub reorder_level: Option<i32>,
    #[serde(default)]
    pub discontinued: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionDto {
    #[serde(default)]
    pub region_id: i32,
    pub region_description: String,
}

impl RestResource for Employee {
    type Dto = EmployeeDto;
    const COLLECTION: &'static str = "employees";
}

impl RestResource for Product {
    type Dto = ProductDto;
    const COLLECTION: &'static str = "products";
}

impl RestResource for Region {
    type Dto = RegionDto;
    const COLLECTION: &'static str = "regions";
}

// Conversion implementations between REST DTOs and domain records
impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            employee_id: e.employee_id,
            last_name: e.last_name,
            first_name: e.first_name,
            title: e.title,
            title_of_courtesy: e.title_of_courtesy,
            birth_date: e.birth_date,
            hire_date: e.hire_date,
            address: e.address,
            city: e.city,
            region: e.region,
            postal_code: e.postal_code,
            country: e.country,
            home_phone: e.home_phone,
            extension: e.extension,
            notes: e.notes,
            reports_to: e.reports_to,
        }
    }
}

impl From<EmployeeDto> for Employee {
    fn from(d: EmployeeDto) -> Self {
        Self {
            employee_id: d.employee_id,
            last_name: d.last_name,
            first_name: d.first_name,
            title: d.title,
            title_of_courtesy: d.title_of_courtesy,
            birth_date: d.birth_date,
            hire_date: d.hire_date,
            address: d.address,
            city: d.city,
            region: d.region,
            postal_code: d.postal_code,
            country: d.country,
            home_phone: d.home_phone,
            extension: d.extension,
            notes: d.notes,
            reports_to: d.reports_to,
        }
    }
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            product_name: p.product_name,
            supplier_id: p.supplier_id,
            category_id: p.category_id,
            quantity_per_unit: p.quantity_per_unit,
            unit_price: p.unit_price,
            units_in_stock: p.units_in_stock,
            units_on_order: p.units_on_order,
            reorder_level: p.reorder_level,
            discontinued: p.discontinued,
        }
    }
}

impl From<ProductDto> for Product {
    fn from(d: ProductDto) -> Self {
        Self {
            product_id: d.product_id,
            product_name: d.product_name,
            supplier_id: d.supplier_id,
            category_id: d.category_id,
            quantity_per_unit: d.quantity_per_unit,
            unit_price: d.unit_price,
            units_in_stock: d.units_in_stock,
            units_on_order: d.units_on_order,
            reorder_level: d.reorder_level,
            discontinued: d.discontinued,
        }
    }
}

impl From<Region> for RegionDto {
    fn from(r: Region) -> Self {
        Self {
            region_id: r.region_id,
            region_description: r.region_description,
        }
    }
}

impl From<RegionDto> for Region {
    fn from(d: RegionDto) -> Self {
        Self {
            region_id: d.region_id,
            region_description: d.region_description,
        }
    }
}
