//! Weather passthrough module
//!
//! Forwards a city name to the CWA open-data datastore and relays the decoded forecast.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub use config::WeatherConfig;

pub mod module;
pub use module::WeatherModule;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
