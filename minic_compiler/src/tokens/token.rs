//! Lexemes with a one-time classification
//!
//! The scanner only decides where a lexeme starts and ends. Right after
//! scanning each lexeme is classified once, so the parser can dispatch on
//! `TokenClass` instead of repeating text comparisons.
use crate::grammar::keywords::Keyword;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-character structural tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Punctuation {
    LeftBrace,  // {
    RightBrace, // }
    LeftParen,  // (
    RightParen, // )
    Semicolon,  // ;
    Assign,     // =
}

impl Punctuation {
    pub const fn as_char(self) -> char {
        match self {
            Self::LeftBrace => '{',
            Self::RightBrace => '}',
            Self::LeftParen => '(',
            Self::RightParen => ')',
            Self::Semicolon => ';',
            Self::Assign => '=',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '{' => Some(Self::LeftBrace),
            '}' => Some(Self::RightBrace),
            '(' => Some(Self::LeftParen),
            ')' => Some(Self::RightParen),
            ';' => Some(Self::Semicolon),
            '=' => Some(Self::Assign),
            _ => None,
        }
    }
}

/// Classification of a lexeme, computed once after scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenClass {
    /// Reserved word
    Keyword(Keyword),
    /// Complete double-quoted literal, quotes included
    StringLiteral,
    /// Run of letters, digits and underscores that is not a keyword
    Word,
    /// One of `{ } ( ) ; =`
    Punctuation(Punctuation),
    /// Any other single character, including an unmatched `"`
    Symbol,
}

impl TokenClass {
    /// Classify a scanned lexeme
    pub fn classify(lexeme: &str) -> Self {
        if let Some(keyword) = Keyword::from_lexeme(lexeme) {
            return Self::Keyword(keyword);
        }

        if lexeme.len() >= 2 && lexeme.starts_with('"') && lexeme.ends_with('"') {
            return Self::StringLiteral;
        }

        let mut chars = lexeme.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(punct) = Punctuation::from_char(ch) {
                return Self::Punctuation(punct);
            }
        }

        if !lexeme.is_empty() && lexeme.chars().all(is_word_char) {
            Self::Word
        } else {
            Self::Symbol
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword(_) => "keyword",
            Self::StringLiteral => "string literal",
            Self::Word => "word",
            Self::Punctuation(_) => "punctuation",
            Self::Symbol => "symbol",
        }
    }
}

/// Characters that make up words: letters, digits, underscore
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// One immutable lexeme in the token sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub lexeme: String,
    /// Zero-based index in the token sequence
    pub index: usize,
    pub span: Span,
    pub class: TokenClass,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, index: usize, span: Span) -> Self {
        let lexeme = lexeme.into();
        let class = TokenClass::classify(&lexeme);
        Self {
            lexeme,
            index,
            span,
            class,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.lexeme
    }

    /// Exact lexeme comparison
    pub fn is(&self, lexeme: &str) -> bool {
        self.lexeme == lexeme
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.class == TokenClass::Keyword(keyword)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.class {
            TokenClass::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// Keywords of the four primitive types
    pub fn is_type_keyword(&self) -> bool {
        self.keyword().is_some_and(Keyword::is_type)
    }

    pub fn is_string_literal(&self) -> bool {
        self.class == TokenClass::StringLiteral
    }

    /// Whether the lexeme is made only of word characters (keywords included)
    pub fn is_wordlike(&self) -> bool {
        matches!(self.class, TokenClass::Word | TokenClass::Keyword(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
