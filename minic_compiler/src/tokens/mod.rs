//! Token system for minic lexical analysis
//!
//! The lexer produces a flat `Vec<Token>`; each token keeps its lexeme, its
//! index in the sequence, its source span and its `TokenClass`. The parser
//! walks the sequence through a forward-only `TokenStream`.
//!
//! ## Token Classes
//!
//! - **Keyword**: `main`, `int`, `float`, `bool`, `string`, `print`, `return`
//! - **StringLiteral**: `"..."` with its quotes, no escape handling
//! - **Word**: identifiers and numbers alike
//! - **Punctuation**: `{ } ( ) ; =`
//! - **Symbol**: any other single character

pub mod token;
pub mod token_stream;

pub use token::{is_word_char, Punctuation, Token, TokenClass};
pub use token_stream::TokenStream;

pub use crate::utils::{Position, Span};
