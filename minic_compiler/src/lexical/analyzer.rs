//! Core lexical analyzer
//!
//! Splits raw text into lexemes. Rules, first match wins at each position:
//! whitespace is skipped; `"` followed somewhere by another `"` forms one
//! string literal token with both quotes; a run of word characters is one
//! token; every other character is a token of its own. An unmatched `"` is
//! therefore a one-character token.

use crate::config::compile_time::lexical::MAX_TOKEN_COUNT;
use crate::logging::{codes, Code, DiagnosticCollector, DiagnosticSource, TraceLog};
use crate::tokens::{is_word_char, Token, TokenClass, TokenStream};
use crate::utils::{Position, Span};
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Too many tokens: limit of {limit} reached")]
    TooManyTokens { limit: usize },
}

impl LexerError {
    pub fn error_code(&self) -> Code {
        match self {
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }
}

impl DiagnosticSource for LexerError {
    fn error_code(&self) -> Code {
        LexerError::error_code(self)
    }
}

/// Token counts per class for one tokenization
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub word_tokens: usize,
    pub string_literals: usize,
    pub punctuation_tokens: usize,
    pub symbol_tokens: usize,
    pub unmatched_quotes: usize,
    pub max_string_length: usize,
    pub line_count: u32,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;

        match token.class {
            TokenClass::Keyword(_) => self.keyword_tokens += 1,
            TokenClass::Word => self.word_tokens += 1,
            TokenClass::StringLiteral => {
                self.string_literals += 1;
                self.max_string_length = self.max_string_length.max(token.lexeme.len());
            }
            TokenClass::Punctuation(_) => self.punctuation_tokens += 1,
            TokenClass::Symbol => {
                self.symbol_tokens += 1;
                if token.is("\"") {
                    self.unmatched_quotes += 1;
                }
            }
        }
    }

    /// One-line summary for the trace
    pub fn summary(&self) -> String {
        format!(
            "Lexical metrics: {} keywords, {} words, {} string literals, {} punctuation, {} symbols ({} unmatched quotes), {} lines",
            self.keyword_tokens,
            self.word_tokens,
            self.string_literals,
            self.punctuation_tokens,
            self.symbol_tokens,
            self.unmatched_quotes,
            self.line_count
        )
    }
}

/// Core lexical analyzer
#[derive(Debug)]
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    token_limit: usize,
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            token_limit: MAX_TOKEN_COUNT,
        }
    }
}

type Chars<'a> = Peekable<CharIndices<'a>>;

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer that stops after `limit` tokens; never above `MAX_TOKEN_COUNT`
    pub fn with_token_limit(limit: usize) -> Self {
        Self {
            token_limit: limit.min(MAX_TOKEN_COUNT),
            ..Self::default()
        }
    }

    pub fn token_limit(&self) -> usize {
        self.token_limit
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Tokenize the full source, narrating to `trace`.
    /// Exceeding the token limit records one diagnostic and stops scanning.
    pub fn tokenize(
        &mut self,
        source: &str,
        trace: &mut TraceLog,
        diagnostics: &mut DiagnosticCollector,
    ) -> TokenStream {
        self.metrics = LexicalMetrics::default();

        let mut tokens: Vec<Token> = Vec::new();
        let mut chars = source.char_indices().peekable();
        let mut pos = Position::start();

        while let Some(&(offset, ch)) = chars.peek() {
            if ch.is_whitespace() {
                chars.next();
                pos = pos.advance(ch);
                continue;
            }

            if tokens.len() >= self.token_limit {
                let error = LexerError::TooManyTokens {
                    limit: self.token_limit,
                };
                let span = Span::new(pos, pos.advance(ch));
                diagnostics.add_error(&error, tokens.len(), Some(span));
                trace.log(format!("Lexing stopped: {}", error));
                break;
            }

            let start = pos;
            let end_offset = if ch == '"' {
                Self::scan_string(source, offset)
            } else if is_word_char(ch) {
                Self::scan_word(&mut chars)
            } else {
                offset + ch.len_utf8()
            };

            let lexeme = &source[offset..end_offset];
            pos = pos.advance_str(lexeme);
            Self::skip_to(&mut chars, end_offset);

            let token = Token::new(lexeme, tokens.len(), Span::new(start, pos));
            self.metrics.record_token(&token);
            tokens.push(token);
        }

        self.metrics.line_count = pos.line;

        let stream = TokenStream::new(tokens);
        trace.log(format!(
            "Tokenized {} tokens: {:?}",
            stream.len(),
            stream.lexemes()
        ));
        trace.log(self.metrics.summary());
        stream
    }

    /// End offset of a string literal starting at `start`, or of the lone quote
    fn scan_string(source: &str, start: usize) -> usize {
        match source[start + 1..].find('"') {
            Some(rel) => start + 1 + rel + 1,
            None => start + 1,
        }
    }

    /// End offset of the word run under the cursor; leaves the cursor in place
    fn scan_word(chars: &mut Chars<'_>) -> usize {
        let mut lookahead = chars.clone();
        let mut end = 0;
        while let Some(&(offset, ch)) = lookahead.peek() {
            if !is_word_char(ch) {
                break;
            }
            end = offset + ch.len_utf8();
            lookahead.next();
        }
        end
    }

    fn skip_to(chars: &mut Chars<'_>, end_offset: usize) {
        while chars.next_if(|&(offset, _)| offset < end_offset).is_some() {}
    }
}
