//! Port traits at the I/O seams: sources, chart output, drawing store, config.

pub mod chart_port;
pub mod config_port;
pub mod data_port;
pub mod drawing_port;
