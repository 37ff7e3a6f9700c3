use super::error::CompileError;
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::logging::Diagnostic;
use crate::symbols::SymbolTable;
use std::path::PathBuf;
use std::time::Duration;

/// Everything one compilation produced
///
/// The trace is always present. Output is present only when no diagnostic
/// was recorded.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub(crate) output: Option<String>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) trace: String,
    pub(crate) symbols: SymbolTable,
    pub(crate) lexical_metrics: LexicalMetrics,
}

impl Compilation {
    /// Generated Python, or `None` when the compilation failed
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Diagnostics in the order they were found
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn lexical_metrics(&self) -> &LexicalMetrics {
        &self.lexical_metrics
    }

    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Diagnostics as pretty-printed JSON
    pub fn diagnostics_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.diagnostics)
    }

    pub fn into_result(self) -> Result<String, CompileError> {
        match self.output {
            Some(output) if self.diagnostics.is_empty() => Ok(output),
            _ => Err(CompileError::new(self.diagnostics)),
        }
    }
}

/// Result of compiling one file from disk
#[derive(Debug)]
pub struct FileCompilation {
    pub compilation: Compilation,
    /// Text that was compiled, for rendering diagnostics against
    pub source: String,
    pub file_metadata: FileMetadata,
    /// Where the generated code was written, on success
    pub output_path: Option<PathBuf>,
    /// Where the trace was written, when enabled
    pub trace_path: Option<PathBuf>,
    pub processing_duration: Duration,
}

impl FileCompilation {
    pub fn is_success(&self) -> bool {
        self.compilation.is_success()
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::TRANSLATION_COMPLETE,
            "File translated successfully",
            "file" => self.file_metadata.path.display(),
            "tokens" => self.compilation.lexical_metrics.total_tokens,
            "symbols" => self.compilation.symbols.len(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
