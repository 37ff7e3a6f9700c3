//! Compilation pipeline: source text -> tokens -> translated Python
//!
//! `Compiler::compile` is pure: it owns all per-run state and writes nothing
//! outside the returned `Compilation`. `process_file` adds the file system
//! around it (reading the input, writing the `.py` and `.log` artifacts) and
//! reports progress through the global logging macros.

mod error;
pub mod output;
mod result;

pub use error::{CompileError, PipelineError};
pub use result::{Compilation, FileCompilation};

use crate::codegen::{Emitter, PythonEmitter};
use crate::config::compile_time::lexical::MAX_TOKEN_COUNT;
use crate::config::runtime::{EmitterPreferences, RuntimeConfig};
use crate::lexical::LexicalAnalyzer;
use crate::logging::{self, codes, DiagnosticCollector, TraceLog};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Translator context holding the emission preferences for every run
///
/// Defaults are the built-in ones; the environment is never consulted here.
#[derive(Debug, Clone)]
pub struct Compiler {
    preferences: EmitterPreferences,
    token_limit: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            preferences: EmitterPreferences::default(),
            token_limit: MAX_TOKEN_COUNT,
        }
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: EmitterPreferences) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }

    /// Lower the token limit for this compiler; capped at `MAX_TOKEN_COUNT`
    pub fn with_token_limit(mut self, limit: usize) -> Self {
        self.token_limit = limit.min(MAX_TOKEN_COUNT);
        self
    }

    pub fn preferences(&self) -> &EmitterPreferences {
        &self.preferences
    }

    /// Translate one program. Never fails; problems are in the diagnostics.
    pub fn compile(&self, source: &str) -> Compilation {
        let mut trace = TraceLog::new();
        let mut diagnostics = DiagnosticCollector::new();

        let mut analyzer = LexicalAnalyzer::with_token_limit(self.token_limit);
        let tokens = analyzer.tokenize(source, &mut trace, &mut diagnostics);
        let lexical_metrics = analyzer.metrics().clone();

        let emitter = PythonEmitter::with_preferences(&self.preferences);
        let (emitter, symbols) =
            crate::syntax::translate(tokens, emitter, &mut diagnostics, &mut trace);

        let output = if diagnostics.has_errors() {
            trace.log(format!(
                "Compilation failed with {} error(s):",
                diagnostics.len()
            ));
            for diagnostic in diagnostics.diagnostics() {
                trace.log(format!("  {}", diagnostic));
            }
            None
        } else {
            trace.log("Compilation succeeded");
            Some(emitter.into_output())
        };

        Compilation {
            output,
            diagnostics: diagnostics.into_diagnostics(),
            trace: trace.into_string(),
            symbols,
            lexical_metrics,
        }
    }
}

/// Compile source text with default preferences
pub fn compile(source: &str) -> Compilation {
    Compiler::new().compile(source)
}

/// Where `process_file` writes its artifacts
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    /// Generated code; defaults to the input with a `.py` extension
    pub output: Option<PathBuf>,
    /// Trace log; defaults to the input with a `.log` extension
    pub trace: Option<PathBuf>,
}

/// Read, compile and write one file
///
/// The trace is written whether or not the compile succeeded (unless
/// disabled in the driver preferences). Generated code is written only on
/// success. A failed compile still returns `Ok`; callers check
/// `FileCompilation::is_success`.
pub fn process_file(
    input: &Path,
    targets: &OutputTargets,
    config: &RuntimeConfig,
) -> Result<FileCompilation, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(input.to_path_buf(), || {
        crate::log_info!("Starting compilation", "file" => input.display());

        let file_result = crate::file_processor::process_file(input)?;

        let compiler = Compiler::with_preferences(config.emitter.clone());
        let compilation = compiler.compile(&file_result.source);

        crate::log_debug!("Translation finished",
            "tokens" => compilation.lexical_metrics.total_tokens,
            "diagnostics" => compilation.error_count());

        let trace_path = if config.driver.write_trace_file {
            let path = targets
                .trace
                .clone()
                .unwrap_or_else(|| output::default_trace_path(input));
            let text = output::render_trace(input, compilation.trace(), chrono::Utc::now());
            output::write_artifact(&path, &text)?;
            Some(path)
        } else {
            None
        };

        let output_path = match compilation.output() {
            Some(code) => {
                let path = targets
                    .output
                    .clone()
                    .unwrap_or_else(|| output::default_output_path(input));
                output::write_artifact(&path, code)?;
                Some(path)
            }
            None => {
                for diagnostic in compilation.diagnostics() {
                    crate::log_error!(diagnostic.code, &diagnostic.message,
                        "position" => diagnostic.position);
                }
                crate::log_error!(codes::driver::COMPILATION_FAILED, "Compilation failed",
                    "errors" => compilation.error_count());
                None
            }
        };

        let result = FileCompilation {
            compilation,
            source: file_result.source,
            file_metadata: file_result.metadata,
            output_path,
            trace_path,
            processing_duration: start_time.elapsed(),
        };

        if result.is_success() {
            result.log_success();
        }

        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;

    fn write_source(dir: &Path, name: &str, source: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, source).unwrap();
        path
    }

    fn config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.emitter = EmitterPreferences {
            indent_width: 4,
            pad_empty_body: false,
        };
        config.driver.write_trace_file = true;
        config
    }

    #[test]
    fn test_compile_success_has_output_and_trace() {
        let compilation = compile("main() { int x = 5; print(x); }");
        assert!(compilation.is_success());
        assert!(compilation.output().unwrap().contains("print(str(x))"));
        assert!(compilation.trace().ends_with("Compilation succeeded\n"));
        assert_eq!(compilation.symbols().len(), 1);
    }

    #[test]
    fn test_compile_failure_withholds_output() {
        let compilation = compile("main() { print(y); }");
        assert!(!compilation.is_success());
        assert_eq!(compilation.output(), None);
        assert!(compilation
            .trace()
            .contains("Compilation failed with 1 error(s):"));

        let error = compilation.into_result().unwrap_err();
        assert_eq!(error.error_count(), 1);
    }

    #[test]
    fn test_indent_preference() {
        let compiler = Compiler::with_preferences(EmitterPreferences {
            indent_width: 2,
            pad_empty_body: true,
        });
        let output = compiler.compile("main() { }").into_result().unwrap();
        assert!(output.contains("def main():\n  pass\n"));
        assert!(output.ends_with("if __name__ == \"__main__\":\n  main()\n"));
    }

    #[test]
    fn test_default_compiler_ignores_environment() {
        use crate::config::compile_time::emission::DEFAULT_INDENT_WIDTH;
        use crate::config::runtime::env_vars;

        std::env::set_var(env_vars::EMIT_INDENT_WIDTH, "0");
        let compilation = compile("main() { int x; }");
        std::env::remove_var(env_vars::EMIT_INDENT_WIDTH);

        assert_eq!(Compiler::new().preferences().indent_width, DEFAULT_INDENT_WIDTH);
        let expected = format!("\n{}x = 0\n", " ".repeat(DEFAULT_INDENT_WIDTH));
        assert!(compilation.into_result().unwrap().contains(&expected));
    }

    #[test]
    fn test_token_limit_fails_compilation() {
        let compilation = Compiler::new()
            .with_token_limit(4)
            .compile("main() { int x; }");
        assert_eq!(compilation.output(), None);
        assert_eq!(compilation.lexical_metrics().total_tokens, 4);

        let lexical: Vec<_> = compilation
            .diagnostics()
            .iter()
            .filter(|d| d.code == codes::lexical::TOO_MANY_TOKENS)
            .collect();
        assert_eq!(lexical.len(), 1);
        assert!(compilation.trace().contains("Lexing stopped"));
        assert!(compilation.trace().contains("Compilation failed"));
    }

    #[test]
    fn test_diagnostics_json() {
        let compilation = compile("main() { z = 3; }");
        let json = compilation.diagnostics_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["code"], "E052");
        assert_eq!(value[0]["category"], "Semantic");
    }

    #[test]
    fn test_process_file_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(dir.path(), "prog.c", "main() { bool b; print(b); }");

        let result = process_file(&input, &OutputTargets::default(), &config()).unwrap();
        assert!(result.is_success());
        assert_eq!(result.source, "main() { bool b; print(b); }");

        let output_path = result.output_path.unwrap();
        assert_eq!(output_path, dir.path().join("prog.py"));
        let python = fs::read_to_string(&output_path).unwrap();
        assert!(python.contains("    b = False\n"));

        let trace = fs::read_to_string(result.trace_path.unwrap()).unwrap();
        assert!(trace.starts_with("# minic trace for "));
        assert!(trace.contains("Compilation succeeded"));
    }

    #[test]
    fn test_process_file_failure_writes_only_trace() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(dir.path(), "bad.c", "main() { z = 3; }");
        let targets = OutputTargets {
            output: Some(dir.path().join("custom.py")),
            trace: Some(dir.path().join("custom.log")),
        };

        let result = process_file(&input, &targets, &config()).unwrap();
        assert!(!result.is_success());
        assert_eq!(result.output_path, None);
        assert!(!dir.path().join("custom.py").exists());
        assert!(dir.path().join("custom.log").exists());
    }

    #[test]
    fn test_process_file_without_trace() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(dir.path(), "p.c", "main() { }");
        let mut config = config();
        config.driver.write_trace_file = false;

        let result = process_file(&input, &OutputTargets::default(), &config).unwrap();
        assert_eq!(result.trace_path, None);
        assert!(!dir.path().join("p.log").exists());
    }

    #[test]
    fn test_process_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = process_file(
            &dir.path().join("absent.c"),
            &OutputTargets::default(),
            &config(),
        );
        assert_matches!(result, Err(PipelineError::FileProcessing(_)));
    }
}
