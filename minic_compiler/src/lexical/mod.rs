//! Lexical analysis module
//!
//! Turns source text into a fully materialized `TokenStream` before parsing
//! starts. Narration goes to the compilation's `TraceLog`; the only error
//! (token limit) goes to its `DiagnosticCollector`.

pub mod analyzer;

use crate::logging::{DiagnosticCollector, TraceLog};
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

/// Tokenize source text with a fresh analyzer
pub fn tokenize(
    source: &str,
    trace: &mut TraceLog,
    diagnostics: &mut DiagnosticCollector,
) -> TokenStream {
    LexicalAnalyzer::new().tokenize(source, trace, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_is_deterministic() {
        let source = "main() { string s = \"a b\"; print(s); }";
        let mut first_trace = TraceLog::new();
        let mut second_trace = TraceLog::new();
        let mut diagnostics = DiagnosticCollector::new();

        let first = tokenize(source, &mut first_trace, &mut diagnostics);
        let second = tokenize(source, &mut second_trace, &mut diagnostics);

        assert_eq!(first.tokens(), second.tokens());
        assert_eq!(first_trace.as_str(), second_trace.as_str());
        assert!(diagnostics.is_empty());
    }
}
