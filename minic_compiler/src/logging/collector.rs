//! Per-compilation diagnostics sink
//!
//! Every error found while translating one program lands here, in the order
//! it was found. Records are never merged, rewritten or dropped; a compile
//! with at least one record is a failed compile.

use super::codes::{self, Code};
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// An error kind that can be recorded as a diagnostic
pub trait DiagnosticSource: fmt::Display {
    fn error_code(&self) -> Code;
}

/// One recorded error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub code: Code,
    pub category: &'static str,
    pub message: String,
    /// Token cursor position when the error was recorded
    pub position: usize,
    /// Source span of the offending token, when one exists
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(code: Code, message: impl Into<String>, position: usize, span: Option<Span>) -> Self {
        Self {
            code,
            category: codes::get_category(code.as_str()),
            message: message.into(),
            position,
            span,
        }
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {} (token {}", self.code, self.message, self.position)?;
        if let Some(span) = &self.span {
            write!(f, ", line {}", span.start)?;
        }
        write!(f, ")")
    }
}

/// Ordered accumulator of diagnostics for one compilation
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error at the given cursor position
    pub fn add_error<E: DiagnosticSource>(&mut self, error: &E, position: usize, span: Option<Span>) {
        self.diagnostics.push(Diagnostic::new(
            error.error_code(),
            error.to_string(),
            position,
            span,
        ));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn count_with_code(&self, code: Code) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }
}
