//! Error kinds found while recognizing and translating a program
//!
//! None of these stop the parser. Each is recorded in the compilation's
//! diagnostics at the cursor position where it was found.

use crate::logging::{codes, Code, DiagnosticSource};
use crate::utils::Span;

/// Translation errors with error code mapping
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("expected '{expected}', found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of input: expected '{expected}'")]
    UnexpectedEndOfInput { expected: String },

    #[error("unexpected token '{lexeme}' outside of main function")]
    TokenOutsideMain { lexeme: String, span: Span },

    #[error("assignment to undeclared variable '{identifier}'")]
    UndeclaredAssignment { identifier: String, span: Span },

    #[error("unknown type '{type_name}'")]
    UnknownType { type_name: String, span: Span },

    #[error("unrecognized statement '{statement}'")]
    UnrecognizedStatement { statement: String, span: Span },

    #[error("invalid print argument '{argument}'")]
    InvalidPrintArgument { argument: String, span: Span },

    #[error("missing ';'{}", found_suffix(.found))]
    MissingTerminator {
        found: Option<String>,
        span: Option<Span>,
    },
}

fn found_suffix(found: &Option<String>) -> String {
    match found {
        Some(lexeme) => format!(", found '{}'", lexeme),
        None => " before end of input".to_string(),
    }
}

impl SyntaxError {
    /// Create unexpected token error
    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    /// Create unexpected end of input error
    pub fn unexpected_end_of_input(expected: &str) -> Self {
        Self::UnexpectedEndOfInput {
            expected: expected.to_string(),
        }
    }

    pub fn token_outside_main(lexeme: &str, span: Span) -> Self {
        Self::TokenOutsideMain {
            lexeme: lexeme.to_string(),
            span,
        }
    }

    pub fn undeclared_assignment(identifier: &str, span: Span) -> Self {
        Self::UndeclaredAssignment {
            identifier: identifier.to_string(),
            span,
        }
    }

    pub fn unknown_type(type_name: &str, span: Span) -> Self {
        Self::UnknownType {
            type_name: type_name.to_string(),
            span,
        }
    }

    pub fn unrecognized_statement(statement: &str, span: Span) -> Self {
        Self::UnrecognizedStatement {
            statement: statement.to_string(),
            span,
        }
    }

    pub fn invalid_print_argument(argument: &str, span: Span) -> Self {
        Self::InvalidPrintArgument {
            argument: argument.to_string(),
            span,
        }
    }

    /// Missing `;`: `found` is the token seen instead, `None` at end of input
    pub fn missing_terminator(found: Option<&str>, span: Option<Span>) -> Self {
        Self::MissingTerminator {
            found: found.map(str::to_string),
            span,
        }
    }

    /// Get error code for the logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::TokenOutsideMain { .. } => codes::syntax::TOKEN_OUTSIDE_MAIN,
            Self::UndeclaredAssignment { .. } => codes::syntax::UNDECLARED_ASSIGNMENT,
            Self::UnknownType { .. } => codes::syntax::UNKNOWN_TYPE,
            Self::UnrecognizedStatement { .. } => codes::syntax::UNRECOGNIZED_STATEMENT,
            Self::InvalidPrintArgument { .. } => codes::syntax::INVALID_PRINT_ARGUMENT,
            Self::MissingTerminator { .. } => codes::syntax::MISSING_TERMINATOR,
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::TokenOutsideMain { span, .. }
            | Self::UndeclaredAssignment { span, .. }
            | Self::UnknownType { span, .. }
            | Self::UnrecognizedStatement { span, .. }
            | Self::InvalidPrintArgument { span, .. } => Some(*span),
            Self::MissingTerminator { span, .. } => *span,
            Self::UnexpectedEndOfInput { .. } => None,
        }
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    /// Get recommended action
    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

impl DiagnosticSource for SyntaxError {
    fn error_code(&self) -> Code {
        SyntaxError::error_code(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let span = Span::default();
        assert_eq!(
            SyntaxError::undeclared_assignment("z", span).to_string(),
            "assignment to undeclared variable 'z'"
        );
        assert_eq!(
            SyntaxError::invalid_print_argument("y", span).to_string(),
            "invalid print argument 'y'"
        );
        assert_eq!(
            SyntaxError::token_outside_main("int", span).to_string(),
            "unexpected token 'int' outside of main function"
        );
    }

    #[test]
    fn test_missing_terminator_messages() {
        assert_eq!(
            SyntaxError::missing_terminator(None, None).to_string(),
            "missing ';' before end of input"
        );
        assert_eq!(
            SyntaxError::missing_terminator(Some("}"), Some(Span::default())).to_string(),
            "missing ';', found '}'"
        );
    }

    #[test]
    fn test_error_codes() {
        let span = Span::default();
        assert_eq!(
            SyntaxError::unexpected_token(")", "x", span).error_code(),
            codes::syntax::UNEXPECTED_TOKEN
        );
        assert_eq!(
            SyntaxError::unexpected_end_of_input("}").error_code(),
            codes::syntax::UNEXPECTED_END_OF_INPUT
        );
        assert_eq!(
            SyntaxError::unknown_type("char", span).error_code().as_str(),
            "E053"
        );
        assert_eq!(
            SyntaxError::missing_terminator(None, None).error_code().as_str(),
            "E057"
        );
    }

    #[test]
    fn test_span_and_category() {
        let span = Span::default();
        assert_eq!(
            SyntaxError::unrecognized_statement("x", span).span(),
            Some(span)
        );
        assert_eq!(SyntaxError::unexpected_end_of_input("(").span(), None);
        assert_eq!(
            SyntaxError::undeclared_assignment("z", span).category(),
            "Semantic"
        );
    }
}
