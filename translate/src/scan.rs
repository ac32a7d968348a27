//! Helpers for scanning the token stream and rebuilding indented text.

use st2py_parser::token::{Token, TokenType};

/// One level of indentation in the generated Python.
pub(crate) const INDENT: &str = "    ";

/// Index of the token that closes the block opened at `open_idx`, tracking
/// nesting of the same open/close pair. Returns `None` when the block is
/// never closed.
pub(crate) fn find_matching(
    tokens: &[Token],
    open_idx: usize,
    open: &TokenType,
    close: &TokenType,
) -> Option<usize> {
    let mut depth = 0usize;
    for (i, tok) in tokens.iter().enumerate().skip(open_idx) {
        if tok.token_type == *open {
            depth += 1;
        } else if tok.token_type == *close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Index of the next token with the given type at or after `from`.
pub(crate) fn position_from(tokens: &[Token], from: usize, token_type: TokenType) -> Option<usize> {
    tokens
        .iter()
        .skip(from)
        .position(|t| t.token_type == token_type)
        .map(|i| from + i)
}

/// Index of the next token that is not whitespace or a line break.
pub(crate) fn next_code(tokens: &[Token], from: usize) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, t)| !matches!(t.token_type, TokenType::Whitespace | TokenType::Newline))
        .map(|(i, _)| i)
}

/// Index of the next non-whitespace token on the same line.
pub(crate) fn next_on_line(tokens: &[Token], from: usize) -> Option<usize> {
    for (i, tok) in tokens.iter().enumerate().skip(from) {
        match tok.token_type {
            TokenType::Whitespace => continue,
            TokenType::Newline => return None,
            _ => return Some(i),
        }
    }
    None
}

/// The leading whitespace of the line containing the position, when the
/// position is the first non-whitespace on its line; empty otherwise.
pub(crate) fn line_indent(source: &str, position: usize) -> String {
    let line_start = source[..position].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &source[line_start..position];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix.to_string()
    } else {
        String::new()
    }
}

/// Re-indents a block of text under a header line.
///
/// The common leading whitespace of the block is removed and `indent` is
/// prepended to every remaining line, so relative indentation inside the
/// block (a nested loop that was already rewritten, say) survives.
/// Leading and trailing blank lines are dropped; every emitted line ends
/// with a newline.
pub(crate) fn reindent(body: &str, indent: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .expect("a non-blank line exists");
    let lines = &lines[first..=last];

    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut output = String::new();
    for line in lines {
        if line.trim().is_empty() {
            output.push('\n');
            continue;
        }
        output.push_str(indent);
        let mut chars = line.chars();
        for _ in 0..common {
            chars.next();
        }
        output.push_str(chars.as_str());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsl::core::FileId;
    use st2py_parser::tokenize;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source, &FileId::default()).0
    }

    #[test]
    fn find_matching_when_nested_then_balances() {
        let tokens = tokens("FOR FOR END_FOR END_FOR");
        let close = find_matching(&tokens, 0, &TokenType::For, &TokenType::ForEnd).unwrap();
        assert_eq!("END_FOR", tokens[close].text);
        assert_eq!(6, close);
    }

    #[test]
    fn find_matching_when_unclosed_then_none() {
        let tokens = tokens("FOR FOR END_FOR");
        assert_eq!(
            None,
            find_matching(&tokens, 0, &TokenType::For, &TokenType::ForEnd)
        );
    }

    #[test]
    fn reindent_when_uniform_then_one_level() {
        assert_eq!(
            "    a\n    b\n",
            reindent("\n        a\n        b\n    ", INDENT)
        );
    }

    #[test]
    fn reindent_when_relative_then_preserved() {
        assert_eq!(
            "    a\n        b\n",
            reindent("    a\n        b", INDENT)
        );
    }

    #[test]
    fn line_indent_when_keyword_first_on_line_then_leading_whitespace() {
        let source = "x\n    FOR";
        assert_eq!("    ", line_indent(source, source.len() - 3));
    }

    #[test]
    fn line_indent_when_keyword_mid_line_then_empty() {
        let source = "x := 1; FOR";
        assert_eq!("", line_indent(source, source.len() - 3));
    }
}
