//! # telelog - Tabular Telemetry Log Tool
//!
//! Reads whitespace-delimited telemetry records and answers simple questions
//! about them: sort by a column, find rows with an exact token in a column,
//! or keep rows matching a predicate. A small alert register groups messages
//! by priority for emission after the report.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`file_handler`] - Source access, validation and transparent decompression
//! - [`table`] - Row and table model
//! - [`parser`] - Text to table
//! - [`query`] - Sort, search and filter
//! - [`alert`] - Priority-grouped alert messages
//! - [`machinery`] - Machinery operating modes
//! - [`config`] - Run configuration
//! - [`app`] - Report orchestration

// Core modules
pub mod error;
pub mod file_handler;
pub mod table;

// Operations over the model
pub mod parser;
pub mod query;

pub mod alert;
pub mod machinery;

pub mod app;
pub mod config;

// Re-export commonly used types for convenience
pub use error::{Result, TelelogError};

pub use alert::AlertRegister;
pub use app::{Application, RunSummary};
pub use config::{AlertSeed, RunConfig};
pub use machinery::MachineryState;
pub use parser::{load_or_empty, load_table, parse_bytes, parse_str, LoadReport};
pub use query::{filter, search, sort_by_column, try_filter, try_sort_by_column, Threshold};
pub use table::{Row, Table};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
