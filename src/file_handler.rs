//! Telemetry source access with validation and compression support.
//!
//! This module opens the text source the parser reads from: plain or compressed
//! files on disk, standard input, or an in-memory buffer.

pub mod compression;
pub mod source;
pub mod validation;

pub use compression::{detect_compression, CompressionType};
pub use source::{
    ByteSource, FileSource, MemorySource, SourceSpec, StdinSource, TelemetrySource, STDIN_MARKER,
};
pub use validation::validate_file_path;
