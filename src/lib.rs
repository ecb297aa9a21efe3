//! swingacademy: an interactive swing-trading course.
//!
//! Hexagonal architecture: course content and session logic in [`domain`],
//! port traits in [`ports`], terminal/web/export implementations in
//! [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
