use crate::config::runtime::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code, Diagnostic};

/// A finished compilation that recorded at least one diagnostic
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Compilation failed with {} error(s)", .diagnostics.len())]
pub struct CompileError {
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn error_code(&self) -> Code {
        codes::driver::COMPILATION_FAILED
    }
}

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("Failed to write '{path}': {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn output_write(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::Configuration(_) => codes::driver::CONFIGURATION_ERROR,
            Self::Compile(error) => error.error_code(),
            Self::OutputWrite { .. } => codes::driver::OUTPUT_WRITE_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_counts_diagnostics() {
        let error = CompileError::new(vec![
            Diagnostic::new(codes::syntax::UNEXPECTED_TOKEN, "a", 0, None),
            Diagnostic::new(codes::syntax::MISSING_TERMINATOR, "b", 3, None),
        ]);
        assert_eq!(error.error_count(), 2);
        assert_eq!(error.to_string(), "Compilation failed with 2 error(s)");
    }

    #[test]
    fn test_pipeline_error_codes() {
        let missing = PipelineError::from(FileProcessorError::FileNotFound {
            path: "a.c".to_string(),
        });
        assert_eq!(missing.error_code(), codes::file_processing::FILE_NOT_FOUND);

        let compile = PipelineError::from(CompileError::new(Vec::new()));
        assert_eq!(compile.error_code(), codes::driver::COMPILATION_FAILED);

        let write = PipelineError::output_write(
            std::path::Path::new("out.py"),
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        assert_eq!(write.error_code(), codes::driver::OUTPUT_WRITE_FAILURE);
        assert!(write.to_string().contains("out.py"));
    }
}
