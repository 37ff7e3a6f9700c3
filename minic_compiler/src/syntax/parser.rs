//! Single-pass recognizer that emits target code as it goes
//!
//! The parser walks the token stream once, top to bottom. Each production is
//! handed to the `Emitter` as soon as it is recognized. Errors are recorded
//! in the diagnostics and parsing continues with the next token.

use crate::codegen::{DeclarationValue, Emitter, PrintArgument};
use crate::grammar::keywords::Keyword;
use crate::logging::{DiagnosticCollector, TraceLog};
use crate::symbols::{DataType, SymbolTable};
use crate::syntax::error::SyntaxError;
use crate::tokens::{Token, TokenStream};

/// Recursive-descent parser fused with emission
pub struct Parser<'a, E: Emitter> {
    tokens: TokenStream,
    symbols: SymbolTable,
    emitter: E,
    diagnostics: &'a mut DiagnosticCollector,
    trace: &'a mut TraceLog,
}

impl<'a, E: Emitter> Parser<'a, E> {
    pub fn new(
        tokens: TokenStream,
        emitter: E,
        diagnostics: &'a mut DiagnosticCollector,
        trace: &'a mut TraceLog,
    ) -> Self {
        Self {
            tokens,
            symbols: SymbolTable::new(),
            emitter,
            diagnostics,
            trace,
        }
    }

    /// Hand back the emitter and the symbol table built during parsing
    pub fn finish(self) -> (E, SymbolTable) {
        (self.emitter, self.symbols)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    // === CURSOR PRIMITIVES ===

    /// Look at the next token without consuming it
    fn peek(&mut self) -> Option<Token> {
        let token = self.tokens.peek().cloned();
        match &token {
            Some(t) => self.trace.log(format!("peek: '{}' (token {})", t, t.index)),
            None => self.trace.log("peek: None"),
        }
        token
    }

    /// Look `n` tokens past the cursor without consuming anything
    fn peek_ahead(&mut self, n: usize) -> Option<Token> {
        let token = self.tokens.peek_ahead(n).cloned();
        match &token {
            Some(t) => self
                .trace
                .log(format!("peek+{}: '{}' (token {})", n, t, t.index)),
            None => self.trace.log(format!("peek+{}: None", n)),
        }
        token
    }

    /// Consume the next token
    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.next_token().cloned();
        match &token {
            Some(t) => self.trace.log(format!("next: '{}' (token {})", t, t.index)),
            None => self.trace.log("next: None"),
        }
        token
    }

    /// Consume the next token and record a diagnostic if it is not `expected`.
    /// The consumed token is discarded either way.
    fn expect(&mut self, expected: &str) {
        let found = self.next();
        if found.as_ref().is_some_and(|t| t.is(expected)) {
            return;
        }

        let error = match (expected, found) {
            (";", found) => SyntaxError::missing_terminator(
                found.as_ref().map(Token::as_str),
                found.as_ref().map(|t| t.span),
            ),
            (_, Some(token)) => SyntaxError::unexpected_token(expected, &token.lexeme, token.span),
            (_, None) => SyntaxError::unexpected_end_of_input(expected),
        };
        self.report(error);
    }

    /// Record an error at the current cursor position
    fn report(&mut self, error: SyntaxError) {
        let position = self.tokens.position();
        let span = error.span().or_else(|| self.tokens.current_span());
        self.trace
            .log(format!("error at token {}: {}", position, error));
        self.diagnostics.add_error(&error, position, span);
    }

    // === GRAMMAR ===

    /// Program := (MainFunction | UnexpectedToken)*
    pub fn parse_program(&mut self) {
        self.emitter.header();

        while let Some(token) = self.peek() {
            if token.is_keyword(Keyword::Main) {
                self.parse_main();
            } else {
                self.report(SyntaxError::token_outside_main(&token.lexeme, token.span));
                self.next();
            }
        }

        self.trace.log(format!(
            "Parsing finished: {} symbols declared",
            self.symbols.len()
        ));
    }

    /// MainFunction := 'main' '(' ')' '{' Statement* '}'
    fn parse_main(&mut self) {
        self.expect("main");
        self.expect("(");
        self.expect(")");
        self.expect("{");
        self.trace.log("Entering main function");
        self.emitter.begin_main();

        loop {
            match self.peek() {
                None => break,
                Some(token) if token.is("}") => break,
                Some(token) => self.parse_statement(&token),
            }
        }

        self.expect("}");
        self.emitter.end_main();
        self.trace.log("Leaving main function");
    }

    /// Statement := VarDecl | PrintStmt | ReturnZeroSkip | OtherStatement
    fn parse_statement(&mut self, token: &Token) {
        if token.is_type_keyword() {
            self.parse_declaration();
        } else if token.is_keyword(Keyword::Print) {
            self.parse_print();
        } else if token.is_keyword(Keyword::Return)
            && self.peek_ahead(1).is_some_and(|t| t.is("0"))
        {
            self.parse_return_zero();
        } else {
            self.parse_other_statement();
        }
    }

    /// VarDecl := Type Identifier ( '=' Value )? ';'
    fn parse_declaration(&mut self) {
        let Some(type_token) = self.next() else {
            return;
        };
        let Some(name_token) = self.next() else {
            self.report(SyntaxError::unexpected_end_of_input("identifier"));
            return;
        };
        let name = name_token.lexeme.as_str();

        let data_type = DataType::from_lexeme(&type_token.lexeme);
        if let Some(data_type) = data_type {
            self.symbols.declare(name, data_type, name_token.span);
        }

        if self.peek().is_some_and(|t| t.is("=")) {
            self.next();
            let Some(value_token) = self.next() else {
                self.report(SyntaxError::unexpected_end_of_input("value"));
                return;
            };
            self.expect(";");
            self.trace.log(format!(
                "Recognized declaration: {} {} = {}",
                type_token, name, value_token
            ));
            self.emitter
                .declaration(name, DeclarationValue::Initializer(&value_token.lexeme));
            return;
        }

        self.expect(";");
        self.trace
            .log(format!("Recognized declaration: {} {}", type_token, name));
        let value = match data_type {
            Some(data_type) => DeclarationValue::Default(data_type),
            None => {
                self.report(SyntaxError::unknown_type(&type_token.lexeme, type_token.span));
                DeclarationValue::Unknown
            }
        };
        self.emitter.declaration(name, value);
    }

    /// PrintStmt := 'print' '(' Argument ')' ';'
    fn parse_print(&mut self) {
        self.next();
        self.expect("(");
        let Some(argument) = self.next() else {
            self.report(SyntaxError::unexpected_end_of_input("print argument"));
            return;
        };

        // The argument is a single token; anything before `)` or `;` makes it invalid
        let mut tokens = vec![argument];
        while let Some(token) = self.peek() {
            if token.is(")") || token.is(";") {
                break;
            }
            self.next();
            tokens.push(token);
        }
        let text = join_lexemes(&tokens);
        let first = &tokens[0];
        let span = tokens[tokens.len() - 1].span.merge(first.span);

        let formatted = if tokens.len() > 1 {
            self.report(SyntaxError::invalid_print_argument(&text, span));
            PrintArgument::Raw(&text)
        } else if first.is_string_literal() {
            PrintArgument::Literal(&text)
        } else if let Some(data_type) = self.symbols.lookup(&text) {
            PrintArgument::Variable {
                name: &text,
                data_type,
            }
        } else {
            self.report(SyntaxError::invalid_print_argument(&text, span));
            PrintArgument::Raw(&text)
        };

        self.expect(")");
        self.expect(";");
        self.trace.log(format!("Recognized print: {}", text));
        self.emitter.print(formatted);
    }

    /// ReturnZeroSkip := 'return' '0' ';'
    fn parse_return_zero(&mut self) {
        self.expect("return");
        self.expect("0");
        self.expect(";");
        self.trace.log("Skipped return 0");
    }

    /// OtherStatement := (AnyTokenExceptSemicolon)* ';'
    fn parse_other_statement(&mut self) {
        let mut parts: Vec<Token> = Vec::new();
        let mut terminated = false;

        loop {
            match self.peek() {
                None => break,
                Some(token) if token.is(";") => {
                    self.next();
                    terminated = true;
                    break;
                }
                Some(_) => {
                    if let Some(token) = self.next() {
                        parts.push(token);
                    }
                }
            }
        }

        if let Some(first) = parts.first() {
            let text = join_lexemes(&parts);
            let is_assignment =
                parts.len() > 2 && first.is_wordlike() && parts[1].is("=");

            if is_assignment {
                let name = first.lexeme.as_str();
                if self.symbols.has_symbol(name) {
                    let rest = join_lexemes(&parts[2..]);
                    self.trace
                        .log(format!("Recognized assignment: {} = {}", name, rest));
                    self.emitter.assignment(name, &rest);
                } else {
                    self.report(SyntaxError::undeclared_assignment(name, first.span));
                }
            } else {
                self.report(SyntaxError::unrecognized_statement(&text, first.span));
            }
        }

        if !terminated {
            self.report(SyntaxError::missing_terminator(None, None));
        }
    }
}

/// Lexemes joined by single spaces
fn join_lexemes(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::PythonEmitter;
    use crate::config::runtime::EmitterPreferences;
    use crate::lexical::LexicalAnalyzer;
    use crate::logging::codes;

    struct Run {
        output: String,
        symbols: SymbolTable,
        diagnostics: DiagnosticCollector,
        trace: TraceLog,
    }

    fn run(source: &str) -> Run {
        let mut trace = TraceLog::new();
        let mut diagnostics = DiagnosticCollector::new();
        let tokens = LexicalAnalyzer::new().tokenize(source, &mut trace, &mut diagnostics);
        let emitter = PythonEmitter::with_preferences(&EmitterPreferences {
            indent_width: 4,
            pad_empty_body: false,
        });

        let mut parser = Parser::new(tokens, emitter, &mut diagnostics, &mut trace);
        parser.parse_program();
        let (emitter, symbols) = parser.finish();

        Run {
            output: emitter.into_output(),
            symbols,
            diagnostics,
            trace,
        }
    }

    fn body(run: &Run) -> Vec<&str> {
        run.output
            .lines()
            .skip_while(|l| *l != "def main():")
            .skip(1)
            .take_while(|l| !l.is_empty())
            .collect()
    }

    #[test]
    fn test_declarations_with_defaults() {
        let run = run("main() { int x; float f; bool b; string s; }");
        assert!(run.diagnostics.is_empty());
        assert_eq!(
            body(&run),
            vec!["    x = 0", "    f = 0.0", "    b = False", "    s = \"\""]
        );
        assert_eq!(run.symbols.lookup("b"), Some(DataType::Bool));
    }

    #[test]
    fn test_initializer_is_copied_verbatim() {
        let run = run("main() { float pi = 3; string s = \"a b\"; }");
        assert!(run.diagnostics.is_empty());
        assert_eq!(body(&run), vec!["    pi = 3", "    s = \"a b\""]);
    }

    #[test]
    fn test_print_variants() {
        let run = run(
            "main() { int x = 5; bool ok; print(x); print(ok); print(\"hi there\"); }",
        );
        assert!(run.diagnostics.is_empty());
        assert_eq!(
            body(&run),
            vec![
                "    x = 5",
                "    ok = False",
                "    print(str(x))",
                "    print(\"True\" if ok else \"False\")",
                "    print(\"hi there\")",
            ]
        );
    }

    #[test]
    fn test_print_of_undeclared_name() {
        let run = run("main() { print(y); }");
        let records = run.diagnostics.diagnostics();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, codes::syntax::INVALID_PRINT_ARGUMENT);
        assert!(records[0].message.contains('y'));
        assert_eq!(body(&run), vec!["    print(y)"]);
    }

    #[test]
    fn test_print_of_expression_is_one_invalid_argument() {
        let run = run("main() { int a; print(a + 1); }");
        let records = run.diagnostics.diagnostics();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, codes::syntax::INVALID_PRINT_ARGUMENT);
        assert_eq!(records[0].message, "invalid print argument 'a + 1'");

        let span = records[0].span.expect("argument span");
        assert_eq!(span.start.column, 23);
        assert_eq!(span.end.column, 28);
        assert_eq!(body(&run), vec!["    a = 0", "    print(a + 1)"]);
    }

    #[test]
    fn test_print_with_two_arguments() {
        let run = run("main() { int a; int b; print(a, b); int c; }");
        let records = run.diagnostics.diagnostics();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, codes::syntax::INVALID_PRINT_ARGUMENT);
        assert_eq!(records[0].message, "invalid print argument 'a , b'");
        // the `;` after `)` still ends the statement
        assert!(run.symbols.lookup("c").is_some());
    }

    #[test]
    fn test_assignment_to_declared_and_undeclared() {
        let run = run("main() { int x; x = x + 1; z = 3; }");
        assert_eq!(body(&run), vec!["    x = 0", "    x = x + 1"]);

        let records = run.diagnostics.diagnostics();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, codes::syntax::UNDECLARED_ASSIGNMENT);
        assert!(records[0].message.contains("'z'"));
    }

    #[test]
    fn test_unrecognized_statement() {
        let run = run("main() { foo(1); }");
        let records = run.diagnostics.diagnostics();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, codes::syntax::UNRECOGNIZED_STATEMENT);
        assert_eq!(records[0].message, "unrecognized statement 'foo ( 1 )'");
        assert!(body(&run).is_empty());
    }

    #[test]
    fn test_empty_statement_is_ignored() {
        let run = run("main() { ; int x; }");
        assert!(run.diagnostics.is_empty());
        assert_eq!(body(&run), vec!["    x = 0"]);
    }

    #[test]
    fn test_return_zero_emits_nothing() {
        let run = run("main() { return 0; }");
        assert!(run.diagnostics.is_empty());
        assert!(body(&run).is_empty());
        assert!(run.trace.as_str().contains("Skipped return 0"));
    }

    #[test]
    fn test_return_other_value_is_unrecognized() {
        let run = run("main() { return 1; }");
        assert_eq!(
            run.diagnostics.count_with_code(codes::syntax::UNRECOGNIZED_STATEMENT),
            1
        );
    }

    #[test]
    fn test_missing_semicolon_at_end_of_input() {
        let run = run("main() { int x; x = 5");
        assert_eq!(
            run.diagnostics.count_with_code(codes::syntax::MISSING_TERMINATOR),
            1
        );
        // The unclosed main also reports the missing brace
        assert_eq!(
            run.diagnostics
                .count_with_code(codes::syntax::UNEXPECTED_END_OF_INPUT),
            1
        );
    }

    #[test]
    fn test_declaration_missing_semicolon_reports_found_token() {
        let run = run("main() { int x print(x); }");
        let records = run.diagnostics.diagnostics();
        assert_eq!(records[0].code, codes::syntax::MISSING_TERMINATOR);
        assert_eq!(records[0].message, "missing ';', found 'print'");
    }

    #[test]
    fn test_tokens_outside_main() {
        let run = run("int x; main() { }");
        assert_eq!(
            run.diagnostics.count_with_code(codes::syntax::TOKEN_OUTSIDE_MAIN),
            3
        );
        assert_eq!(run.diagnostics.diagnostics()[0].position, 0);
        assert!(run.output.contains("def main():"));
    }

    #[test]
    fn test_structural_mismatch() {
        let run = run("main( { }");
        let records = run.diagnostics.diagnostics();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].code, codes::syntax::UNEXPECTED_TOKEN);
        assert_eq!(records[0].message, "expected ')', found '{'");
        assert_eq!(records[1].code, codes::syntax::UNEXPECTED_TOKEN);
        assert_eq!(records[2].code, codes::syntax::UNEXPECTED_END_OF_INPUT);
    }

    #[test]
    fn test_unclosed_main_still_gets_trailer() {
        let run = run("main() {");
        let records = run.diagnostics.diagnostics();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, codes::syntax::UNEXPECTED_END_OF_INPUT);
        assert!(run
            .output
            .ends_with("\ndef main():\n\nif __name__ == \"__main__\":\n    main()\n"));
    }

    #[test]
    fn test_multiple_main_blocks_each_get_a_trailer() {
        let run = run("main() { int a; } main() { int b; }");
        assert!(run.diagnostics.is_empty());
        assert_eq!(run.output.matches("def main():").count(), 2);
        assert_eq!(run.output.matches("if __name__ == \"__main__\":").count(), 2);
    }

    #[test]
    fn test_redeclaration_last_wins() {
        let run = run("main() { int v; bool v; print(v); }");
        assert!(run.diagnostics.is_empty());
        assert!(run.output.contains("print(\"True\" if v else \"False\")"));
    }

    #[test]
    fn test_trace_narrates_cursor() {
        let run = run("main() { }");
        let trace = run.trace.as_str();
        assert!(trace.contains("peek: 'main' (token 0)"));
        assert!(trace.contains("next: '}' (token 4)"));
        assert!(trace.contains("peek: None"));
    }

    #[test]
    fn test_empty_input() {
        let run = run("");
        assert!(run.diagnostics.is_empty());
        assert_eq!(
            run.output,
            "# Generated by minic: C subset translated to Python\n"
        );
    }
}
