//! Loop rewriting stage.
//!
//! Maps `FOR`, `WHILE` and `REPEAT` loops onto Python loop syntax. Loop
//! bodies are captured up to the matching end keyword by depth counting, so
//! nested loops of the same kind balance, and each captured body is run
//! through this stage again before it is re-indented.

use dsl::core::FileId;
use st2py_parser::token::{Token, TokenType};
use st2py_parser::tokenize;

use crate::scan;

pub fn apply(source: &str) -> String {
    let (tokens, _) = tokenize(source, &FileId::default());

    for (i, tok) in tokens.iter().enumerate() {
        let rewritten = match tok.token_type {
            TokenType::For => rewrite_for(source, &tokens, i),
            TokenType::While => rewrite_while(source, &tokens, i),
            TokenType::Repeat => rewrite_repeat(source, &tokens, i),
            // END_WHILE has no Python counterpart; the body already sits
            // under the rewritten header.
            TokenType::WhileEnd => Some((String::new(), tok.span.end)),
            _ => None,
        };
        if let Some((replacement, resume)) = rewritten {
            let rest = apply(&source[resume..]);
            return format!("{}{}{}", &source[..tok.span.start], replacement, rest);
        }
    }

    source.to_string()
}

/// Rewrites `FOR v := a TO b DO body END_FOR` as a counting loop over the
/// inclusive range.
fn rewrite_for(source: &str, tokens: &[Token], for_idx: usize) -> Option<(String, usize)> {
    let assign = scan::position_from(tokens, for_idx + 1, TokenType::Assignment)?;
    let to = scan::position_from(tokens, assign + 1, TokenType::To)?;
    let do_ = scan::position_from(tokens, to + 1, TokenType::Do)?;
    let end = scan::find_matching(tokens, for_idx, &TokenType::For, &TokenType::ForEnd)?;
    if do_ >= end {
        return None;
    }

    let var = source[tokens[for_idx].span.end..tokens[assign].span.start].trim();
    let start = source[tokens[assign].span.end..tokens[to].span.start].trim();
    let stop = source[tokens[to].span.end..tokens[do_].span.start].trim();
    let body = apply(&source[tokens[do_].span.end..tokens[end].span.start]);

    let indent = scan::line_indent(source, tokens[for_idx].span.start);
    let mut replacement = format!("for {} in range({}, {} + 1):\n", var, start, stop);
    replacement.push_str(&scan::reindent(&body, &format!("{}{}", indent, scan::INDENT)));

    Some((replacement, tokens[end].span.end))
}

/// Rewrites a `WHILE c DO` header. The body is left in place.
fn rewrite_while(source: &str, tokens: &[Token], while_idx: usize) -> Option<(String, usize)> {
    let line = tokens[while_idx].line;
    let mut i = while_idx + 1;
    while i < tokens.len() && tokens[i].line == line {
        if tokens[i].token_type == TokenType::Do {
            let condition = source[tokens[while_idx].span.end..tokens[i].span.start].trim();
            return Some((format!("while {}:", condition), tokens[i].span.end));
        }
        i += 1;
    }
    None
}

/// Rewrites `REPEAT body UNTIL c END_REPEAT` with the exit test after the
/// body, so the body runs at least once.
fn rewrite_repeat(source: &str, tokens: &[Token], repeat_idx: usize) -> Option<(String, usize)> {
    let end = scan::find_matching(tokens, repeat_idx, &TokenType::Repeat, &TokenType::RepeatEnd)?;

    // The UNTIL belonging to this REPEAT is the one at depth one; an inner
    // REPEAT owns any deeper ones.
    let mut depth = 1usize;
    let mut until = None;
    for (i, tok) in tokens.iter().enumerate().take(end).skip(repeat_idx + 1) {
        match tok.token_type {
            TokenType::Repeat => depth += 1,
            TokenType::RepeatEnd => depth -= 1,
            TokenType::Until if depth == 1 => {
                until = Some(i);
                break;
            }
            _ => {}
        }
    }
    let until = until?;

    let body = apply(&source[tokens[repeat_idx].span.end..tokens[until].span.start]);
    let condition = source[tokens[until].span.end..tokens[end].span.start]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let indent = scan::line_indent(source, tokens[repeat_idx].span.start);
    let body_indent = format!("{}{}", indent, scan::INDENT);
    let mut replacement = String::from("while True:\n");
    replacement.push_str(&scan::reindent(&body, &body_indent));
    replacement.push_str(&format!("{}if {}:\n", body_indent, condition));
    replacement.push_str(&format!("{}{}break\n", body_indent, scan::INDENT));

    Some((replacement, tokens[end].span.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_when_for_then_counting_loop() {
        let source = "FOR i := 1 TO 5 DO\n    s := s + i;\nEND_FOR\n";
        assert_eq!("for i in range(1, 5 + 1):\n    s := s + i;\n\n", apply(source));
    }

    #[test]
    fn apply_when_nested_for_then_balanced() {
        let source = "FOR i := 1 TO 3 DO\n    FOR j := 1 TO 2 DO\n        s := s + j;\n    END_FOR\nEND_FOR\n";
        assert_eq!(
            "for i in range(1, 3 + 1):\n    for j in range(1, 2 + 1):\n        s := s + j;\n\n",
            apply(source)
        );
    }

    #[test]
    fn apply_when_while_then_header_only() {
        let source = "WHILE a < b DO\n    a := a + 1;\nEND_WHILE\n";
        assert_eq!("while a < b:\n    a := a + 1;\n\n", apply(source));
    }

    #[test]
    fn apply_when_repeat_then_body_runs_before_test() {
        let source = "REPEAT\n    x := x + 1;\nUNTIL x > 3 END_REPEAT\n";
        assert_eq!(
            "while True:\n    x := x + 1;\n    if x > 3:\n        break\n\n",
            apply(source)
        );
    }

    #[test]
    fn apply_when_unclosed_for_then_unchanged() {
        let source = "FOR i := 1 TO 5 DO\n    s := s + i;\n";
        assert_eq!(source, apply(source));
    }

    #[test]
    fn apply_when_for_lacks_do_then_unchanged() {
        let source = "FOR i := 1 TO 5\n    s := s + i;\nEND_FOR\n";
        assert_eq!(source, apply(source));
    }
}
