//! Conditional rewriting stage.
//!
//! Maps `IF`/`ELSIF`/`ELSE`/`END_IF` onto Python conditional syntax. The
//! condition text is copied verbatim. Headers must fit on one line;
//! multi-line headers are left untouched.

use dsl::core::FileId;
use st2py_parser::token::{Token, TokenType};
use st2py_parser::tokenize;

use crate::edit::{self, Edit};

pub fn apply(source: &str) -> String {
    let (tokens, _) = tokenize(source, &FileId::default());
    let mut edits = Vec::new();

    // The innermost open construct decides whether an ELSE belongs to an
    // IF or is a CASE default arm. Default arms are the case stage's to
    // rewrite, so they must be left alone here.
    let mut open: Vec<TokenType> = Vec::new();

    // Bytes already claimed by a header rewrite; tokens inside it are
    // replaced text and must not produce overlapping edits.
    let mut consumed = 0usize;

    for (i, tok) in tokens.iter().enumerate() {
        if tok.span.start < consumed {
            continue;
        }
        match tok.token_type {
            TokenType::If => {
                open.push(TokenType::If);
                if let Some((condition, then_idx)) = condition_on_line(source, &tokens, i) {
                    edits.push(Edit::replace(
                        tok.span.start..tokens[then_idx].span.end,
                        format!("if {}:", condition),
                    ));
                    consumed = tokens[then_idx].span.end;
                }
            }
            TokenType::Elsif => {
                if let Some((condition, then_idx)) = condition_on_line(source, &tokens, i) {
                    edits.push(Edit::replace(
                        tok.span.start..tokens[then_idx].span.end,
                        format!("elif {}:", condition),
                    ));
                    consumed = tokens[then_idx].span.end;
                }
            }
            TokenType::Else => {
                if open.last() != Some(&TokenType::Case) {
                    edits.push(Edit::replace(tok.span.start..tok.span.end, "else:"));
                }
            }
            TokenType::IfEnd => {
                if open.last() == Some(&TokenType::If) {
                    open.pop();
                }
                edits.push(Edit::delete(tok.span.start..tok.span.end));
            }
            TokenType::Case => open.push(TokenType::Case),
            TokenType::CaseEnd => {
                if open.last() == Some(&TokenType::Case) {
                    open.pop();
                }
            }
            _ => {}
        }
    }

    edit::apply(source, &edits)
}

/// The condition text between the keyword at `keyword_idx` and a `THEN` on
/// the same line.
fn condition_on_line(
    source: &str,
    tokens: &[Token],
    keyword_idx: usize,
) -> Option<(String, usize)> {
    let line = tokens[keyword_idx].line;
    let mut i = keyword_idx + 1;
    while i < tokens.len() && tokens[i].line == line {
        if tokens[i].token_type == TokenType::Then {
            let condition = source[tokens[keyword_idx].span.end..tokens[i].span.start].trim();
            return Some((condition.to_string(), i));
        }
        i += 1;
    }
    None
}
