//! Reserved words of the C subset

use serde::{Deserialize, Serialize};

/// Words with fixed meaning to the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    // === ENTRY POINT ===
    Main,

    // === PRIMITIVE TYPES ===
    Int,
    Float,
    Bool,
    String,

    // === STATEMENTS ===
    Print,
    Return,
}

impl Keyword {
    /// Get the exact string representation as it appears in source
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Print => "print",
            Self::Return => "return",
        }
    }

    /// Parse keyword from string with exact case matching
    pub fn from_lexeme(s: &str) -> Option<Self> {
        match s {
            "main" => Some(Self::Main),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "print" => Some(Self::Print),
            "return" => Some(Self::Return),
            _ => None,
        }
    }

    /// Whether this keyword names a primitive type that starts a declaration
    pub const fn is_type(self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Bool | Self::String)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The complete list of reserved words
pub fn reserved_keywords() -> &'static [&'static str] {
    &["main", "int", "float", "bool", "string", "print", "return"]
}
