pub mod employee;
pub mod order_detail;
pub mod product;
pub mod region;
