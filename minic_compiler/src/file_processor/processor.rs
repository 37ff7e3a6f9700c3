//! File processor implementation with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    fn from_io(error: &io::Error, path: &Path) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path.display(), error),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Path as given by the caller
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// File extension (if any)
    pub extension: Option<String>,
    /// Number of lines in file
    pub line_count: usize,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// File contents together with their metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// File contents as UTF-8 string
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: std::time::Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// Reads source files under the compile-time size limit
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    /// Whether to emit a success event with size and line metrics
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
        }
    }

    /// Get the compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Process a file and return contents with metadata
    pub fn process_file(
        &self,
        file_path: &Path,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();
        log_debug!("Starting file processing", "file" => file_path.display());

        self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(file_path)?;
        self.validate_size(&metadata)?;
        let source = self.read_file(file_path)?;

        metadata.line_count = source.lines().count();

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path.display(),
                "size" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0)
            );
        }

        Ok(result)
    }

    fn validate_path(&self, path: &Path) -> Result<(), FileProcessorError> {
        if path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: String::new(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => path.display());
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: path.display().to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => path.display());
            return Err(error);
        }

        Ok(())
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e);
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            line_count: 0,
        })
    }

    /// Check file size against the compile-time limit
    fn validate_size(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => metadata.path.display(),
                "size_bytes" => metadata.size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FileProcessorError> {
        fs::read_to_string(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path);
            log_error!(error.error_code(), "Failed to read file",
                "file" => path.display(),
                "io_error" => e);
            error
        })
    }
}

/// Process a file with default settings
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_source(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_source_and_metadata() {
        let file = temp_source(b"main() {\n  int x;\n}\n");
        let result = process_file(file.path()).unwrap();
        assert_eq!(result.source, "main() {\n  int x;\n}\n");
        assert_eq!(result.metadata.size, 20);
        assert_eq!(result.metadata.line_count, 3);
        assert_eq!(result.metadata.path, file.path());
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let file = temp_source(b"");
        let result = process_file(file.path()).unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.metadata.line_count, 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.c");
        assert_matches!(
            process_file(&missing),
            Err(FileProcessorError::FileNotFound { .. })
        );
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempfile::tempdir().unwrap();
        let error = process_file(dir.path()).unwrap_err();
        assert_matches!(error, FileProcessorError::InvalidPath { .. });
        assert_eq!(error.error_code(), codes::file_processing::INVALID_PATH);
    }

    #[test]
    fn test_empty_path() {
        assert_matches!(
            process_file(Path::new("")),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let file = temp_source(&[0x6d, 0xff, 0xfe, 0x00]);
        let error = process_file(file.path()).unwrap_err();
        assert_matches!(error, FileProcessorError::InvalidEncoding { .. });
        assert_eq!(error.category(), "FileProcessing");
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("a.c"),
            size: 2048,
            extension: Some("c".to_string()),
            line_count: 1,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
    }
}
