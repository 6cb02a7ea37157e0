//! Utilities shared across the Sajiki packages.

pub mod logger;
pub mod time;
