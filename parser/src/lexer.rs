//! Primary lexer for IEC 61131-3 structured text. The lexer transforms
//! text into tokens (tokens are the input to the rewrite stages).
//!
//! This lexer makes some simplifying assumptions:
//! * comments have already been removed by the preprocessor
//! * there are no pragmas
use dsl::{
    core::{FileId, SourceSpan},
    diagnostic::{Diagnostic, Label},
};
use logos::Logos;
use st2py_problems::Problem;

use crate::token::{Token, TokenType};

/// Tokenize a structured text program.
///
/// Returns a list of tokens and a list of diagnostics. This does not return
/// a result because translation continues even when there are token errors;
/// unrecognized text becomes `Unknown` tokens that pass through the rewrite
/// stages verbatim.
pub fn tokenize(source: &str, file_id: &FileId) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    let mut lexer = TokenType::lexer(source);

    let mut line: usize = 0;
    let mut col: usize = 0;

    while let Some(token) = lexer.next() {
        let token_type = token.unwrap_or(TokenType::Unknown);
        if token_type == TokenType::Unknown {
            let span = lexer.span();
            diagnostics.push(Diagnostic::problem(
                Problem::UnexpectedToken,
                Label::span(
                    SourceSpan::range(span.start, span.end).with_file_id(file_id),
                    format!(
                        "The text '{}' is not valid structured text at this location.",
                        lexer.slice()
                    ),
                ),
            ));
        }

        tokens.push(Token {
            token_type: token_type.clone(),
            span: SourceSpan::range(lexer.span().start, lexer.span().end).with_file_id(file_id),
            line,
            col,
            text: lexer.slice().into(),
        });

        match token_type {
            TokenType::Newline => {
                line += 1;
                col = 0;
            }
            _ => col += lexer.span().len(),
        }
    }

    (tokens, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use st2py_test::read_shared_resource;

    fn token_types(source: &str) -> Vec<TokenType> {
        let (tokens, _) = tokenize(source, &FileId::default());
        tokens
            .into_iter()
            .map(|t| t.token_type)
            .filter(|t| !matches!(t, TokenType::Whitespace | TokenType::Newline))
            .collect()
    }

    #[test]
    fn tokenize_when_assignment_then_single_token() {
        assert_eq!(
            vec![
                TokenType::Identifier,
                TokenType::Assignment,
                TokenType::Identifier,
                TokenType::Semicolon
            ],
            token_types("count := 1;")
        );
    }

    #[test]
    fn tokenize_when_keywords_lowercase_then_recognized() {
        assert_eq!(
            vec![TokenType::Var, TokenType::VarEnd],
            token_types("var end_var")
        );
    }

    #[test]
    fn tokenize_when_keyword_prefix_then_identifier() {
        // TOTAL starts with TO and VARIANT starts with VAR; the longest
        // match must win.
        assert_eq!(
            vec![TokenType::Identifier, TokenType::Identifier],
            token_types("TOTAL VARIANT")
        );
    }

    #[test]
    fn tokenize_when_range_label_then_dotdot() {
        assert_eq!(
            vec![
                TokenType::Identifier,
                TokenType::DotDot,
                TokenType::Identifier,
                TokenType::Colon
            ],
            token_types("1..5:")
        );
    }

    #[test]
    fn tokenize_when_string_with_semicolon_then_one_token() {
        assert_eq!(vec![TokenType::String], token_types("'a;b'"));
    }

    #[test]
    fn tokenize_when_unrecognized_then_unknown_and_diagnostic() {
        let (tokens, diagnostics) = tokenize("?", &FileId::default());
        assert_eq!(TokenType::Unknown, tokens[0].token_type);
        assert_eq!(1, diagnostics.len());
        assert_eq!("P0003", diagnostics[0].code);
    }

    #[test]
    fn tokenize_when_multiple_lines_then_line_numbers_advance() {
        let (tokens, _) = tokenize("a\nb", &FileId::default());
        let b = tokens.last().unwrap();
        assert_eq!(1, b.line);
        assert_eq!(0, b.col);
    }

    #[test]
    fn tokenize_when_program_resource_then_no_diagnostics() {
        let source = read_shared_resource("program.st");
        let (_, diagnostics) = tokenize(&source, &FileId::default());
        assert!(diagnostics.is_empty());
    }
}
