//! Symbol table for declared variables

pub mod table;

pub use table::{DataType, SymbolTable, VariableSymbol};
