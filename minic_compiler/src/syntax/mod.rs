//! Syntax analysis and translation
//!
//! Recognizes the C subset one statement at a time and drives an `Emitter`
//! for each statement it understands. All problems go to the compilation's
//! `DiagnosticCollector`; nothing here aborts.

mod error;
mod parser;

pub use error::SyntaxError;
pub use parser::Parser;

use crate::codegen::Emitter;
use crate::logging::{DiagnosticCollector, TraceLog};
use crate::symbols::SymbolTable;
use crate::tokens::TokenStream;

/// Parse a whole token stream into `emitter`, returning it with the symbols
pub fn translate<E: Emitter>(
    tokens: TokenStream,
    emitter: E,
    diagnostics: &mut DiagnosticCollector,
    trace: &mut TraceLog,
) -> (E, SymbolTable) {
    let mut parser = Parser::new(tokens, emitter, diagnostics, trace);
    parser.parse_program();
    parser.finish()
}
