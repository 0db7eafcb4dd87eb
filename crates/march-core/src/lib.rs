//! Core types and definitions for march planning.
//!
//! This crate defines the vocabulary shared across all other crates:
//! route and column data, schedule output, plan configuration, error
//! kinds, and the terrain factor tables. It has no dependency on any
//! async runtime or geodata provider.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod schedule;
pub mod types;

pub use error::{DataQualityWarning, MarchError, Result};

#[cfg(test)]
mod tests;
