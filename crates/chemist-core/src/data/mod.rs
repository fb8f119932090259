//! # Data Module
//!
//! Reference data the models are built from.
//!
//! ## Key Components
//!
//! - [`periodic_table`] - Element symbols, atomic numbers and masses, built in for
//!   hydrogen through argon and extendable from TOML files

pub mod periodic_table;

pub use periodic_table::{ElementData, PeriodicTable, PeriodicTableError};
