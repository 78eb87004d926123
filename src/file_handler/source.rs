//! Telemetry sources: where the parser gets its bytes from.
//!
//! A source is opened once and read fully. Files are loaded into memory or
//! memory-mapped depending on size, and compressed files are decompressed
//! transparently.

use crate::error::{Result, TelelogError};
use crate::file_handler::compression::{decompress_to_memory, detect_compression};
use crate::file_handler::validation::validate_file_path;
use async_trait::async_trait;
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Argument value that selects standard input instead of a file
pub const STDIN_MARKER: &str = "-";

/// Bytes read from a source, either owned or memory-mapped.
#[derive(Debug)]
pub enum ByteSource {
    /// Content loaded entirely into memory
    InMemory(Vec<u8>),
    /// Content accessed via memory mapping (large plain files)
    MemoryMapped(Mmap),
}

impl ByteSource {
    /// Get the underlying bytes as a slice regardless of storage strategy
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ByteSource::InMemory(vec) => vec.as_slice(),
            ByteSource::MemoryMapped(mmap) => &mmap[..],
        }
    }
}

/// Something the tabular parser can read telemetry from.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Open the source and read its full content
    async fn read_bytes(&self) -> Result<ByteSource>;

    /// Human-readable name used in diagnostics
    fn name(&self) -> String;
}

/// A telemetry file on disk, possibly compressed.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Files at or above this size are memory-mapped instead of read into memory
    pub const MEMORY_THRESHOLD: u64 = 50 * 1024 * 1024; // 50MB

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_plain(&self) -> Result<ByteSource> {
        let path = self.path.as_path();
        let mut file = File::open(path).map_err(|e| TelelogError::unavailable(path, e))?;
        let file_size = file
            .metadata()
            .map_err(|e| TelelogError::file_error("Failed to get file metadata", e))?
            .len();

        if file_size >= Self::MEMORY_THRESHOLD {
            let mmap = unsafe {
                Mmap::map(&file).map_err(|e| {
                    TelelogError::file_error(
                        format!("Failed to memory map file: {}", path.display()),
                        e,
                    )
                })?
            };
            return Ok(ByteSource::MemoryMapped(mmap));
        }

        let mut content = Vec::with_capacity(file_size as usize);
        file.read_to_end(&mut content)
            .map_err(|e| TelelogError::file_error("Failed to read file", e))?;
        Ok(ByteSource::InMemory(content))
    }
}

#[async_trait]
impl TelemetrySource for FileSource {
    async fn read_bytes(&self) -> Result<ByteSource> {
        validate_file_path(&self.path)?;

        let compression = detect_compression(&self.path).await?;
        if compression.is_compressed() {
            let data = decompress_to_memory(&self.path, compression).await?;
            return Ok(ByteSource::InMemory(data));
        }

        self.read_plain()
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Telemetry piped through standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

#[async_trait]
impl TelemetrySource for StdinSource {
    async fn read_bytes(&self) -> Result<ByteSource> {
        let mut data = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut data)
            .await
            .map_err(|e| TelelogError::unavailable(STDIN_MARKER, e))?;
        Ok(ByteSource::InMemory(data))
    }

    fn name(&self) -> String {
        "<stdin>".to_string()
    }
}

/// Telemetry already held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

#[async_trait]
impl TelemetrySource for MemorySource {
    async fn read_bytes(&self) -> Result<ByteSource> {
        Ok(ByteSource::InMemory(self.data.clone()))
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Source selection as given on the command line or in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    File(PathBuf),
    Stdin,
}

impl SourceSpec {
    /// `-` selects standard input, anything else is a file path
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == STDIN_MARKER {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    pub fn open(&self) -> Box<dyn TelemetrySource> {
        match self {
            Self::File(path) => Box::new(FileSource::new(path.clone())),
            Self::Stdin => Box::new(StdinSource),
        }
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("<stdin>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_source_reads_plain_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"1 x ERROR 50\n").unwrap();
        file.flush().unwrap();

        let source = FileSource::new(file.path());
        let bytes = source.read_bytes().await.unwrap();
        assert!(matches!(bytes, ByteSource::InMemory(_)));
        assert_eq!(bytes.as_bytes(), b"1 x ERROR 50\n");
        assert_eq!(source.name(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_file_source_decompresses_gzip() {
        let file = NamedTempFile::new().unwrap();
        {
            let handle = std::fs::File::create(file.path()).unwrap();
            let mut encoder = GzEncoder::new(handle, Compression::default());
            encoder.write_all(b"2 y OK 150\n").unwrap();
            encoder.finish().unwrap();
        }

        let bytes = FileSource::new(file.path()).read_bytes().await.unwrap();
        assert_eq!(bytes.as_bytes(), b"2 y OK 150\n");
    }

    #[tokio::test]
    async fn test_file_source_missing_path() {
        let source = FileSource::new("/definitely/not/here/telemetry.txt");
        match source.read_bytes().await {
            Err(TelelogError::IoUnavailable { path, .. }) => {
                assert_eq!(path, Path::new("/definitely/not/here/telemetry.txt"));
            }
            other => panic!("Expected IoUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemorySource::new("fixture", "A B C\n");
        assert_eq!(source.read_bytes().await.unwrap().as_bytes(), b"A B C\n");
        assert_eq!(source.name(), "fixture");
    }

    #[test]
    fn test_source_spec_from_path() {
        assert_eq!(SourceSpec::from_path(Path::new("-")), SourceSpec::Stdin);
        assert_eq!(
            SourceSpec::from_path(Path::new("telemetry.txt")),
            SourceSpec::File(PathBuf::from("telemetry.txt"))
        );
        assert_eq!(SourceSpec::Stdin.to_string(), "<stdin>");
        assert_eq!(
            SourceSpec::File(PathBuf::from("logs/t.txt")).open().name(),
            "logs/t.txt"
        );
    }
}
