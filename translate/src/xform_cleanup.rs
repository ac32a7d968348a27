//! Lexical cleanup stage.
//!
//! The final pass: keyword substitution, assignment and terminator
//! rewriting, then whitespace normalization. Running this stage on its own
//! output yields the same text.

use dsl::core::FileId;
use phf::phf_map;
use st2py_parser::token::TokenType;
use st2py_parser::tokenize;

use crate::edit::{self, Edit};

/// Keyword replacements. Structured text keywords match in any case; the
/// boolean literals are exact lowercase matches only, mirroring the
/// translator's historical behavior.
static KEYWORDS: phf::Map<&'static str, &'static str> = phf_map! {
    "RETURN" => "return",
    "EXIT" => "break",
    "ELSIF" => "elif",
    "ELSEIF" => "elif",
    "false" => "False",
    "true" => "True",
};

pub fn apply(source: &str) -> String {
    let (tokens, _) = tokenize(source, &FileId::default());
    let mut edits = Vec::new();

    for tok in &tokens {
        let replacement = match tok.token_type {
            TokenType::Return | TokenType::Exit | TokenType::Elsif => {
                KEYWORDS.get(tok.text.to_uppercase().as_str()).copied()
            }
            TokenType::Identifier => KEYWORDS.get(tok.text.as_str()).copied(),
            TokenType::Assignment => Some("="),
            TokenType::Semicolon => Some(""),
            _ => None,
        };
        if let Some(replacement) = replacement {
            if replacement != tok.text {
                edits.push(Edit::replace(tok.span.start..tok.span.end, replacement));
            }
        }
    }

    normalize(&edit::apply(source, &edits))
}

/// Trims the text, collapses runs of blank lines to a single blank line
/// and guarantees exactly one trailing newline.
fn normalize(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;
    for line in text.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }
    let mut output = lines.join("\n");
    output.push('\n');
    output
}
