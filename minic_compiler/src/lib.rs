//! minic: translates a small C subset into Python
//!
//! The core (`lexical`, `syntax`, `codegen`, `symbols`) is pure and
//! synchronous; each compilation owns its own diagnostics and trace.
//! `pipeline` and `file_processor` wrap it for on-disk use.

// Internal modules
pub mod codegen;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod symbols;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use logging::Diagnostic;
pub use pipeline::{compile, CompileError, Compilation, Compiler, PipelineError};
