//! Terminal front end: command parsing, text rendering and the tour loop.

pub mod ascii_chart;
pub mod command;
pub mod console;
pub mod render;
pub mod tour;

pub use console::StdConsole;
pub use tour::run_tour;
