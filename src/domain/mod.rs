//! Course content, calculators, and session logic.

pub mod section;
pub mod stepper;
pub mod chart;
pub mod intro;
pub mod pattern;
pub mod risk;
pub mod timeframe;
pub mod strategy;
pub mod quiz;
pub mod course;
pub mod session;
pub mod config_validation;
pub mod error;
