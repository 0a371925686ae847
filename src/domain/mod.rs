//! Core domain types and logic.

pub mod price_series;
pub mod returns;
pub mod decompose;
pub mod moving_average;
pub mod crossover;
pub mod strategy;
pub mod evaluation;
pub mod economic;
pub mod universe;
pub mod config_validation;
pub mod analysis;
pub mod error;
