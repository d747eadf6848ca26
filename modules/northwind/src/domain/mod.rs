pub mod error;
pub mod model;
pub mod record;
pub mod repo;
pub mod service;
