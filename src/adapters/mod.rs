//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod drawing_store;
pub mod file_config_adapter;
pub mod html_chart;
