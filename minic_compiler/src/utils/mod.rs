//! Shared primitive types used by the lexer, parser and driver.

pub mod span;

pub use span::{Position, SourceMap, Span};
