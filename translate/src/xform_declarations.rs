//! Declaration extraction stage.
//!
//! Replaces the first `VAR ... END_VAR` block with one assignment statement
//! per initialized binding, in declaration order. Declarations without an
//! initializer are recorded but emit nothing.

use dsl::common::Bindings;
use dsl::core::FileId;
use st2py_parser::token::TokenType;
use st2py_parser::tokenize;

use crate::edit::{self, Edit};
use crate::scan;

pub fn apply(source: &str) -> String {
    let (tokens, _) = tokenize(source, &FileId::default());

    let Some(open) = tokens.iter().position(|t| t.token_type == TokenType::Var) else {
        return source.to_string();
    };
    let Some(close) = scan::find_matching(&tokens, open, &TokenType::Var, &TokenType::VarEnd)
    else {
        // An unclosed block passes through; the balanced-blocks rule has
        // already reported it.
        return source.to_string();
    };

    let body = &source[tokens[open].span.end..tokens[close].span.start];
    let bindings = collect_bindings(body);

    let mut assignments = String::new();
    for binding in bindings.iter() {
        if let Some(value) = &binding.initializer {
            assignments.push_str(&format!("{} = {}\n", binding.name, value));
        }
    }

    let edits = vec![Edit::replace(
        tokens[open].span.start..tokens[close].span.end,
        assignments,
    )];
    edit::apply(source, &edits)
}

/// Builds the name to initializer mapping from the block body.
///
/// Each non-blank line is split on the first `:=`; the name is the text
/// before the first `:` of the declaration part.
fn collect_bindings(body: &str) -> Bindings {
    let mut bindings = Bindings::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(":=") {
            Some((declaration, value)) => {
                let name = declaration.split(':').next().unwrap_or(declaration).trim();
                bindings.insert(name, Some(value.trim().to_string()));
            }
            None => {
                let name = line.split(':').next().unwrap_or(line).trim();
                bindings.insert(name, None);
            }
        }
    }
    bindings
}
