//! Flat symbol table: variable name to declared primitive type

use crate::grammar::keywords::Keyword;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The four declarable primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int,
    Float,
    Bool,
    String,
}

impl DataType {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Int => Some(Self::Int),
            Keyword::Float => Some(Self::Float),
            Keyword::Bool => Some(Self::Bool),
            Keyword::String => Some(Self::String),
            _ => None,
        }
    }

    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        Keyword::from_lexeme(lexeme).and_then(Self::from_keyword)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSymbol {
    pub identifier: String,
    pub data_type: DataType,
    #[serde(skip)]
    pub declaration_span: Span,
}

impl VariableSymbol {
    pub fn new(identifier: String, data_type: DataType, declaration_span: Span) -> Self {
        Self {
            identifier,
            data_type,
            declaration_span,
        }
    }
}

/// Single flat scope. Entries are never removed; a re-declaration replaces
/// the earlier entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    variables: HashMap<String, VariableSymbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the entry that was replaced, if any
    pub fn declare(
        &mut self,
        identifier: &str,
        data_type: DataType,
        span: Span,
    ) -> Option<VariableSymbol> {
        self.variables.insert(
            identifier.to_string(),
            VariableSymbol::new(identifier.to_string(), data_type, span),
        )
    }

    pub fn lookup(&self, identifier: &str) -> Option<DataType> {
        self.variables.get(identifier).map(|v| v.data_type)
    }

    pub fn get(&self, identifier: &str) -> Option<&VariableSymbol> {
        self.variables.get(identifier)
    }

    pub fn has_symbol(&self, identifier: &str) -> bool {
        self.variables.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Declared names in sorted order
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
