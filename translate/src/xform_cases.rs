//! Case rewriting stage.
//!
//! Maps `CASE selector OF ... END_CASE` blocks onto Python match
//! statements. This is the most involved stage: the block body must be
//! split into arms without mistaking an embedded `:=` for an arm
//! terminator. The lexer keeps `:=` as a single token, so a label is
//! simply a statement-initial run of value tokens ending in a `:` token.

use dsl::common::{CaseArm, CaseLabel};
use dsl::core::FileId;
use st2py_parser::token::{Token, TokenType};
use st2py_parser::tokenize;

use crate::scan;

pub fn apply(source: &str) -> String {
    let (tokens, _) = tokenize(source, &FileId::default());

    for (i, tok) in tokens.iter().enumerate() {
        if tok.token_type != TokenType::Case {
            continue;
        }
        if let Some((replacement, resume)) = rewrite_case(source, &tokens, i) {
            let rest = apply(&source[resume..]);
            return format!("{}{}{}", &source[..tok.span.start], replacement, rest);
        }
    }

    source.to_string()
}

fn rewrite_case(source: &str, tokens: &[Token], case_idx: usize) -> Option<(String, usize)> {
    let of = scan::position_from(tokens, case_idx + 1, TokenType::Of)?;
    let end = scan::find_matching(tokens, case_idx, &TokenType::Case, &TokenType::CaseEnd)?;
    if of >= end {
        return None;
    }

    let selector = source[tokens[case_idx].span.end..tokens[of].span.start].trim();
    let body = &source[tokens[of].span.end..tokens[end].span.start];
    let (prefix, arms) = parse_arms(body);
    if arms.is_empty() {
        return None;
    }

    let indent = scan::line_indent(source, tokens[case_idx].span.start);
    let arm_indent = format!("{}{}", indent, scan::INDENT);
    let body_indent = format!("{}{}", arm_indent, scan::INDENT);

    let mut replacement = format!("match {}:\n", selector);
    if !prefix.trim().is_empty() {
        // Statements ahead of the first label are malformed; keep them
        // rather than dropping user code.
        replacement.push_str(&scan::reindent(&prefix, &arm_indent));
    }
    for arm in arms {
        match &arm.label {
            CaseLabel::Values(values) => {
                replacement.push_str(&format!("{}case {}:\n", arm_indent, values));
            }
            CaseLabel::Default => {
                replacement.push_str(&format!("{}case _:\n", arm_indent));
            }
        }
        replacement.push_str(&scan::reindent(&apply(&arm.body), &body_indent));
    }

    // An immediately following statement terminator belongs to the block.
    let mut resume = tokens[end].span.end;
    if let Some(next) = scan::next_on_line(tokens, end + 1) {
        if tokens[next].token_type == TokenType::Semicolon {
            resume = tokens[next].span.end;
        }
    }

    Some((replacement, resume))
}

/// Splits a CASE body into arms.
///
/// An arm starts with a label (a statement-initial run of value tokens
/// terminated by `:`) or with a bare `ELSE`. A lowered `else:` from an IF
/// inside an arm still has its colon and is therefore ordinary body text,
/// while the ST default arm never has one. Labels inside a nested CASE
/// belong to that block and are skipped by depth tracking.
///
/// Returns the text ahead of the first arm and the arms in order.
fn parse_arms(body: &str) -> (String, Vec<CaseArm>) {
    let (tokens, _) = tokenize(body, &FileId::default());

    let mut arms: Vec<CaseArm> = Vec::new();
    let mut current: Option<(CaseLabel, usize)> = None;
    let mut prefix_end = 0usize;
    let mut depth = 0usize;
    let mut stmt_start = true;

    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        match tok.token_type {
            TokenType::Whitespace => {
                i += 1;
                continue;
            }
            TokenType::Newline | TokenType::Semicolon => {
                stmt_start = true;
                i += 1;
                continue;
            }
            TokenType::Case => {
                depth += 1;
                stmt_start = false;
                i += 1;
                continue;
            }
            TokenType::CaseEnd => {
                depth = depth.saturating_sub(1);
                stmt_start = false;
                i += 1;
                continue;
            }
            _ => {}
        }

        if depth == 0 && stmt_start {
            if tok.token_type == TokenType::Else {
                let next = scan::next_code(&tokens, i + 1);
                let is_default_arm =
                    next.map_or(true, |n| tokens[n].token_type != TokenType::Colon);
                if is_default_arm {
                    match current.take() {
                        Some((label, start)) => arms.push(CaseArm {
                            label,
                            body: body[start..tok.span.start].to_string(),
                        }),
                        None => prefix_end = tok.span.start,
                    }
                    current = Some((CaseLabel::Default, tok.span.end));
                    i += 1;
                    continue;
                }
            } else if let Some((values, colon_idx)) = label_run(body, &tokens, i) {
                match current.take() {
                    Some((label, start)) => arms.push(CaseArm {
                        label,
                        body: body[start..tok.span.start].to_string(),
                    }),
                    None => prefix_end = tok.span.start,
                }
                current = Some((CaseLabel::Values(values), tokens[colon_idx].span.end));
                i = colon_idx + 1;
                continue;
            }
        }

        stmt_start = false;
        i += 1;
    }

    if let Some((label, start)) = current {
        arms.push(CaseArm {
            label,
            body: body[start..].to_string(),
        });
    }

    let prefix = if arms.is_empty() {
        String::new()
    } else {
        body[..prefix_end].to_string()
    };
    (prefix, arms)
}

/// Recognizes a label at `start`: a run of value tokens (values, comma
/// lists, ranges) on one line, terminated by a `:` token. The `:=` token
/// never terminates a label.
fn label_run(body: &str, tokens: &[Token], start: usize) -> Option<(String, usize)> {
    let mut last = None;
    let mut i = start;
    while i < tokens.len() {
        match tokens[i].token_type {
            TokenType::Whitespace => {}
            TokenType::Colon => {
                return last.map(|l: usize| {
                    let text = body[tokens[start].span.start..tokens[l].span.end]
                        .trim()
                        .to_string();
                    (text, i)
                });
            }
            TokenType::Identifier
            | TokenType::String
            | TokenType::Comma
            | TokenType::DotDot
            | TokenType::Minus
            | TokenType::Plus
            | TokenType::Period
            | TokenType::Hash
            | TokenType::LeftParen
            | TokenType::RightParen => last = Some(i),
            _ => return None,
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_when_simple_case_then_match() {
        let source = "CASE x OF\n1: a := 1;\n2: a := 2;\nELSE a := 0;\nEND_CASE;\n";
        assert_eq!(
            "match x:\n    case 1:\n        a := 1;\n    case 2:\n        a := 2;\n    case _:\n        a := 0;\n\n",
            apply(source)
        );
    }

    #[test]
    fn apply_when_comma_and_range_labels_then_kept() {
        let source = "CASE m OF\n1, 2: a := 1;\n3..5: a := 2;\nEND_CASE;\n";
        let output = apply(source);
        assert!(output.contains("    case 1, 2:\n"));
        assert!(output.contains("    case 3..5:\n"));
    }

    #[test]
    fn apply_when_assignment_in_arm_then_not_split() {
        // The := in the arm body must not be mistaken for a label
        // terminator.
        let source = "CASE x OF\n1: a := 1;\nEND_CASE;\n";
        let output = apply(source);
        assert!(output.contains("        a := 1;\n"));
        assert_eq!(1, output.matches("case ").count());
    }

    #[test]
    fn apply_when_lowered_else_in_arm_then_not_default() {
        // A Python else: produced by the conditional stage keeps its colon
        // and therefore is not an arm boundary.
        let source = "CASE x OF\n1:\n    if a:\n        b := 1;\n    else:\n        b := 2;\nELSE b := 3;\nEND_CASE;\n";
        let output = apply(source);
        assert!(output.contains("        if a:\n"));
        assert!(output.contains("            b := 2;\n"));
        assert!(output.contains("    case _:\n        b := 3;\n"));
    }

    #[test]
    fn apply_when_nested_case_then_inner_rewritten_under_arm() {
        let source =
            "CASE x OF\n1:\n    CASE y OF\n    2: a := 2;\n    END_CASE;\nELSE a := 0;\nEND_CASE;\n";
        let output = apply(source);
        assert!(output.contains("    case 1:\n        match y:\n"));
        assert!(output.contains("            case 2:\n                a := 2;\n"));
    }

    #[test]
    fn apply_when_unclosed_then_unchanged() {
        let source = "CASE x OF\n1: a := 1;\n";
        assert_eq!(source, apply(source));
    }

    #[test]
    fn apply_when_no_labels_then_unchanged() {
        let source = "CASE x OF\na := 1;\nEND_CASE;\n";
        assert_eq!(source, apply(source));
    }
}
