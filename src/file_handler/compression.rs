//! Compression format detection and transparent decompression of telemetry files.
//!
//! Rotated telemetry logs are often archived compressed. Detection uses magic
//! numbers first and falls back to the file extension.

use crate::error::{Result, TelelogError};
use async_compression::tokio::bufread::{BzDecoder, GzipDecoder, XzDecoder, ZstdDecoder};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, BufReader};

/// Supported compression formats for transparent file access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// No compression - plain text file
    None,
    /// Gzip compression (.gz files)
    Gzip,
    /// Bzip2 compression (.bz2 files)
    Bzip2,
    /// XZ compression (.xz files)
    Xz,
    /// Zstandard compression (.zst, .zstd files)
    Zstd,
}

impl CompressionType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    pub fn is_compressed(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Detect compression type from file path and magic numbers
///
/// # Magic Numbers Used
/// - Gzip: `1f 8b` (RFC 1952)
/// - Bzip2: `42 5a 68` ("BZh" with block size)
/// - XZ: `fd 37 7a 58 5a 00` (XZ format specification)
/// - Zstd: `28 b5 2f fd` (Zstandard frame format)
pub async fn detect_compression(path: &Path) -> Result<CompressionType> {
    let mut file = File::open(path)
        .await
        .map_err(|e| TelelogError::unavailable(path, e))?;

    let mut buffer = [0u8; 8];
    let bytes_read = file.read(&mut buffer).await.map_err(|e| {
        TelelogError::file_error(
            format!("Failed to read header of {}", path.display()),
            e,
        )
    })?;

    if let Some(format) = detect_by_magic(&buffer[..bytes_read]) {
        return Ok(format);
    }

    // An empty or short file can still be named .gz; only trust the
    // extension when there is content to decode.
    if bytes_read > 0 {
        if let Some(format) = detect_by_extension(path) {
            return Ok(format);
        }
    }

    Ok(CompressionType::None)
}

/// Detect compression format from magic bytes
pub(crate) fn detect_by_magic(magic: &[u8]) -> Option<CompressionType> {
    if magic.starts_with(&[0x1f, 0x8b]) {
        Some(CompressionType::Gzip)
    } else if magic.starts_with(&[0x42, 0x5a, 0x68]) {
        Some(CompressionType::Bzip2)
    } else if magic.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
        Some(CompressionType::Zstd)
    } else if magic.starts_with(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00]) {
        Some(CompressionType::Xz)
    } else {
        None
    }
}

/// Detect compression format from file extension
fn detect_by_extension(path: &Path) -> Option<CompressionType> {
    let ext = path.extension()?.to_str()?;
    match ext.to_lowercase().as_str() {
        "gz" => Some(CompressionType::Gzip),
        "bz2" => Some(CompressionType::Bzip2),
        "xz" => Some(CompressionType::Xz),
        "zst" | "zstd" => Some(CompressionType::Zstd),
        _ => None,
    }
}

/// Decompress a file entirely into memory
pub async fn decompress_to_memory(path: &Path, compression: CompressionType) -> Result<Vec<u8>> {
    let file = File::open(path)
        .await
        .map_err(|e| TelelogError::unavailable(path, e))?;
    let file = BufReader::new(file);

    let mut decoder: Box<dyn AsyncRead + Unpin + Send> = match compression {
        CompressionType::Gzip => Box::new(GzipDecoder::new(file)),
        CompressionType::Bzip2 => Box::new(BzDecoder::new(file)),
        CompressionType::Xz => Box::new(XzDecoder::new(file)),
        CompressionType::Zstd => Box::new(ZstdDecoder::new(file)),
        CompressionType::None => Box::new(file),
    };

    let mut data = Vec::new();
    decoder.read_to_end(&mut data).await.map_err(|e| {
        TelelogError::file_error(
            format!("Failed to decompress {} file {}", compression.name(), path.display()),
            e,
        )
    })?;

    log::debug!(
        "decompressed {} ({}) to {} bytes",
        path.display(),
        compression.name(),
        data.len()
    );

    Ok(data)
}
