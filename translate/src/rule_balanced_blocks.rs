use dsl::diagnostic::{Diagnostic, Label};
use st2py_parser::token::{Token, TokenType};
use st2py_problems::Problem;

use crate::scan;

/// Reports block keywords that are opened but never closed.
///
/// The rewrite stages leave unmatched constructs in the output untouched,
/// so the driver reports these as warnings by default and as errors in
/// strict mode.
pub fn apply(tokens: &[Token]) -> Result<(), Vec<Diagnostic>> {
    let pairs = [
        (TokenType::Var, TokenType::VarEnd, Problem::UnclosedVarBlock, "END_VAR"),
        (TokenType::If, TokenType::IfEnd, Problem::UnclosedIf, "END_IF"),
        (TokenType::For, TokenType::ForEnd, Problem::UnclosedFor, "END_FOR"),
        (TokenType::While, TokenType::WhileEnd, Problem::UnclosedWhile, "END_WHILE"),
        (TokenType::Repeat, TokenType::RepeatEnd, Problem::UnclosedRepeat, "END_REPEAT"),
        (TokenType::Case, TokenType::CaseEnd, Problem::UnclosedCase, "END_CASE"),
    ];

    let mut errors = Vec::new();
    for (open, close, problem, expected) in pairs {
        // One report per keyword kind is enough to act on.
        let unclosed = tokens.iter().enumerate().find(|(i, tok)| {
            tok.token_type == open && scan::find_matching(tokens, *i, &open, &close).is_none()
        });
        if let Some((_, tok)) = unclosed {
            errors.push(Diagnostic::problem(
                problem,
                Label::span(
                    tok.span.clone(),
                    format!("Expected '{}' to close this block", expected),
                ),
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsl::core::FileId;
    use st2py_parser::tokenize;

    fn check(source: &str) -> Result<(), Vec<Diagnostic>> {
        let (tokens, _) = tokenize(source, &FileId::default());
        apply(&tokens)
    }

    #[test]
    fn apply_when_balanced_then_ok() {
        assert!(check("IF a THEN x := 1; END_IF").is_ok());
    }

    #[test]
    fn apply_when_unclosed_for_then_error() {
        let errors = check("FOR i := 1 TO 5 DO").unwrap_err();
        assert_eq!(1, errors.len());
        assert_eq!("P0006", errors[0].code);
    }

    #[test]
    fn apply_when_nested_for_balanced_then_ok() {
        assert!(check("FOR i := 1 TO 2 DO FOR j := 1 TO 2 DO END_FOR END_FOR").is_ok());
    }

    #[test]
    fn apply_when_two_problems_then_both_reported() {
        let errors = check("VAR\nFOR i := 1 TO 5 DO").unwrap_err();
        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(vec!["P0004", "P0006"], codes);
    }
}
