//! Target code emission
//!
//! The parser recognizes a statement and hands its parts to an `Emitter`;
//! the emitter decides how that statement reads in the target language.
//! There is no syntax tree in between.

pub mod python;

pub use python::PythonEmitter;

use crate::symbols::DataType;

/// Right-hand side of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationValue<'a> {
    /// `= value` was present; copied through verbatim
    Initializer(&'a str),
    /// No initializer; the type's default is used
    Default(DataType),
    /// No initializer and the type was not recognized
    Unknown,
}

/// Argument of a print statement, already checked against the symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintArgument<'a> {
    /// Double-quoted literal, quotes included
    Literal(&'a str),
    /// Declared variable and its type
    Variable { name: &'a str, data_type: DataType },
    /// Anything else; passed through unchanged
    Raw(&'a str),
}

/// One method per statement kind the translator produces
pub trait Emitter {
    /// Leading comment of the generated file
    fn header(&mut self);

    /// Opening of one entry-point function
    fn begin_main(&mut self);

    /// `type name [= value];`
    fn declaration(&mut self, name: &str, value: DeclarationValue<'_>);

    /// `name = rest;` for a declared name
    fn assignment(&mut self, name: &str, value: &str);

    /// `print(argument);`
    fn print(&mut self, argument: PrintArgument<'_>);

    /// Close the function opened by `begin_main` and write the entry trailer
    fn end_main(&mut self);

    /// Text generated so far
    fn output(&self) -> &str;

    fn into_output(self) -> String
    where
        Self: Sized;
}
