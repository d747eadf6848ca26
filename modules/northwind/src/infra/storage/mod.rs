pub mod entity;
pub mod migrations;
pub mod records;
pub mod sea_gateway;
pub mod seed;

pub use records::OrderDetailsOfProduct;
pub use sea_gateway::{DependentsProbe, SeaGateway, StoredRecord};
pub use seed::seed_sample_data;
