//! Python emitter

use super::{DeclarationValue, Emitter, PrintArgument};
use crate::config::runtime::EmitterPreferences;
use crate::symbols::DataType;

pub const HEADER_COMMENT: &str = "# Generated by minic: C subset translated to Python";

/// Python literal for a declaration without initializer
pub fn default_literal(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Int => "0",
        DataType::Float => "0.0",
        DataType::Bool => "False",
        DataType::String => "\"\"",
    }
}

/// Python expression that prints a value of the given type
pub fn format_print_argument(argument: PrintArgument<'_>) -> String {
    match argument {
        PrintArgument::Literal(text) | PrintArgument::Raw(text) => text.to_string(),
        PrintArgument::Variable { name, data_type } => match data_type {
            DataType::Bool => format!("\"True\" if {} else \"False\"", name),
            DataType::Int | DataType::Float | DataType::String => format!("str({})", name),
        },
    }
}

/// Appends Python source to an owned buffer. Statements inside `main` sit at
/// indent depth 1.
#[derive(Debug, Clone)]
pub struct PythonEmitter {
    buffer: String,
    indent: String,
    pad_empty_body: bool,
    body_statements: usize,
}

impl PythonEmitter {
    pub fn new() -> Self {
        Self::with_preferences(&EmitterPreferences::default())
    }

    pub fn with_preferences(preferences: &EmitterPreferences) -> Self {
        Self {
            buffer: String::new(),
            indent: " ".repeat(preferences.indent_width),
            pad_empty_body: preferences.pad_empty_body,
            body_statements: 0,
        }
    }

    fn line(&mut self, text: &str) {
        self.buffer.push_str(&self.indent);
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn statement(&mut self, text: &str) {
        self.line(text);
        self.body_statements += 1;
    }
}

impl Default for PythonEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for PythonEmitter {
    fn header(&mut self) {
        self.buffer.push_str(HEADER_COMMENT);
        self.buffer.push('\n');
    }

    fn begin_main(&mut self) {
        self.buffer.push_str("\ndef main():\n");
        self.body_statements = 0;
    }

    fn declaration(&mut self, name: &str, value: DeclarationValue<'_>) {
        let rendered = match value {
            DeclarationValue::Initializer(text) => text,
            DeclarationValue::Default(data_type) => default_literal(data_type),
            DeclarationValue::Unknown => "None",
        };
        self.statement(&format!("{} = {}", name, rendered));
    }

    fn assignment(&mut self, name: &str, value: &str) {
        self.statement(&format!("{} = {}", name, value));
    }

    fn print(&mut self, argument: PrintArgument<'_>) {
        self.statement(&format!("print({})", format_print_argument(argument)));
    }

    fn end_main(&mut self) {
        if self.body_statements == 0 && self.pad_empty_body {
            self.line("pass");
        }
        self.buffer.push_str("\nif __name__ == \"__main__\":\n");
        self.line("main()");
    }

    fn output(&self) -> &str {
        &self.buffer
    }

    fn into_output(self) -> String {
        self.buffer
    }
}
