//! Project loading for vitals.
//!
//! This crate provides a trait-based source interface with a JSON file
//! reference implementation. Parsing validates every field at the
//! boundary so downstream crates only ever see well-formed records.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_source;

pub use trait_::{DataFormatError, ProjectSource, Result, StorageError};
pub use json_source::{parse_project, JsonFileSource};
