//! Forward-only cursor over a materialized token sequence

use crate::tokens::token::Token;
use crate::utils::Span;

/// Ordered, finite, zero-indexed token sequence with a cursor.
/// The cursor only moves forward; end of stream is a normal outcome.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Look at the token under the cursor without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Look `n` tokens past the cursor without consuming anything
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Consume and return the token under the cursor
    pub fn next_token(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Cursor position: the index of the next token to be consumed
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Span of the token under the cursor, or of the last token at end of input
    pub fn current_span(&self) -> Option<Span> {
        self.peek().or_else(|| self.tokens.last()).map(|t| t.span)
    }

    /// Lexemes in order, for trace output
    pub fn lexemes(&self) -> Vec<&str> {
        self.tokens.iter().map(Token::as_str).collect()
    }
}
