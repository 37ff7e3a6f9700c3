//! Error and success codes with their classification metadata
//!
//! Single source of truth for every code the compiler reports. Diagnostics
//! carry a `Code`; the registry maps it to category, severity and a short
//! description for detailed and JSON output.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Code {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax and translation error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E040");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const TOKEN_OUTSIDE_MAIN: Code = Code::new("E051");
    pub const UNDECLARED_ASSIGNMENT: Code = Code::new("E052");
    pub const UNKNOWN_TYPE: Code = Code::new("E053");
    pub const UNRECOGNIZED_STATEMENT: Code = Code::new("E054");
    pub const INVALID_PRINT_ARGUMENT: Code = Code::new("E055");
    pub const MISSING_TERMINATOR: Code = Code::new("E057");
}

/// Driver error codes
pub mod driver {
    use super::Code;

    pub const USAGE_ERROR: Code = Code::new("E070");
    pub const CONFIGURATION_ERROR: Code = Code::new("E071");
    pub const OUTPUT_WRITE_FAILURE: Code = Code::new("E072");
    pub const COMPILATION_FAILED: Code = Code::new("E073");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const TRANSLATION_COMPLETE: Code = Code::new("I040");
    pub const OUTPUT_WRITTEN: Code = Code::new("I041");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        "Critical internal compiler error",
        "File a bug report with the input that triggered it",
    ),
    // File processing
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::High,
        "Input file not found",
        "Check the file path and make sure the file exists",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::High,
        "Input file exceeds the maximum allowed size",
        "Split the program or raise max_file_size in the build profile",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::Medium,
        "Permission denied accessing file",
        "Check file permissions and user access rights",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::Medium,
        "Invalid UTF-8 encoding in file",
        "Convert the file to UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::Medium,
        "I/O error during file operation",
        "Check disk space, permissions, and file system integrity",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        "Invalid file path provided",
        "Provide a path to a regular file",
    ),
    // Lexical
    ErrorMetadata::new(
        "E027",
        "Lexical",
        Severity::High,
        "Token count exceeds the maximum allowed",
        "Reduce program size or raise max_token_count in the build profile",
    ),
    // Syntax
    ErrorMetadata::new(
        "E040",
        "Syntax",
        Severity::Medium,
        "Input ended while a token was still expected",
        "Complete the unfinished construct",
    ),
    ErrorMetadata::new(
        "E050",
        "Syntax",
        Severity::Medium,
        "Token does not match the grammar at this point",
        "Replace the token with the one the grammar expects",
    ),
    ErrorMetadata::new(
        "E051",
        "Syntax",
        Severity::Medium,
        "Token found outside of a main function",
        "Move statements inside main() { ... }",
    ),
    ErrorMetadata::new(
        "E052",
        "Semantic",
        Severity::Medium,
        "Assignment to a variable that was never declared",
        "Declare the variable with int, float, bool or string first",
    ),
    ErrorMetadata::new(
        "E053",
        "Semantic",
        Severity::Medium,
        "Declared type is not one of int, float, bool, string",
        "Use one of the supported primitive types",
    ),
    ErrorMetadata::new(
        "E054",
        "Syntax",
        Severity::Medium,
        "Statement is not a declaration, print, return or assignment",
        "Rewrite the statement using the supported subset",
    ),
    ErrorMetadata::new(
        "E055",
        "Semantic",
        Severity::Medium,
        "Print argument is neither a string literal nor a declared variable",
        "Quote the text or declare the variable before printing it",
    ),
    ErrorMetadata::new(
        "E057",
        "Syntax",
        Severity::Low,
        "Statement is missing its ';' terminator",
        "Add ';' at the end of the statement",
    ),
    // Driver
    ErrorMetadata::new(
        "E070",
        "Driver",
        Severity::High,
        "Invalid command line usage",
        "Run minic --help for usage",
    ),
    ErrorMetadata::new(
        "E071",
        "Driver",
        Severity::High,
        "Runtime configuration could not be loaded",
        "Fix the TOML file passed with --config",
    ),
    ErrorMetadata::new(
        "E072",
        "Driver",
        Severity::High,
        "Output or trace file could not be written",
        "Check that the output directory exists and is writable",
    ),
    ErrorMetadata::new(
        "E073",
        "Driver",
        Severity::Medium,
        "Compilation produced diagnostics and no output was written",
        "Fix the reported errors and compile again",
    ),
    // Success
    ErrorMetadata::new(
        "I004",
        "System",
        Severity::Low,
        "System initialization completed successfully",
        "Continue normal operation",
    ),
    ErrorMetadata::new(
        "I006",
        "FileProcessing",
        Severity::Low,
        "File processing completed successfully",
        "Continue to next processing stage",
    ),
    ErrorMetadata::new(
        "I020",
        "Lexical",
        Severity::Low,
        "Tokenization completed",
        "Continue to translation",
    ),
    ErrorMetadata::new(
        "I040",
        "Syntax",
        Severity::Low,
        "Translation completed without diagnostics",
        "Continue normal operation",
    ),
    ErrorMetadata::new(
        "I041",
        "Driver",
        Severity::Low,
        "Generated output written",
        "Continue normal operation",
    ),
];

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_syntax_code_is_registered() {
        for code in [
            syntax::UNEXPECTED_END_OF_INPUT,
            syntax::UNEXPECTED_TOKEN,
            syntax::TOKEN_OUTSIDE_MAIN,
            syntax::UNDECLARED_ASSIGNMENT,
            syntax::UNKNOWN_TYPE,
            syntax::UNRECOGNIZED_STATEMENT,
            syntax::INVALID_PRINT_ARGUMENT,
            syntax::MISSING_TERMINATOR,
            lexical::TOO_MANY_TOKENS,
        ] {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_registry_keys_are_unique() {
        assert_eq!(get_error_registry().len(), REGISTRY_ENTRIES.len());
    }

    #[test]
    fn test_classification_lookups() {
        assert_eq!(get_category("E052"), "Semantic");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert_eq!(get_severity("E027"), Severity::High);
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_action("Z999"), "No specific action available");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_severity("Z999"), Severity::Medium);
    }

    #[test]
    fn test_code_serializes_as_string() {
        let json = serde_json::to_string(&syntax::UNKNOWN_TYPE).unwrap();
        assert_eq!(json, "\"E053\"");
    }
}
