//! Concrete adapter implementations for ports and output formats.

pub mod csv_export;
pub mod file_config_adapter;
pub mod format;
pub mod svg_chart;
pub mod terminal;
#[cfg(feature = "web")]
pub mod web;
