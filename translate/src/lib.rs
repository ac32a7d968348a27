//! Generates Python source from IEC 61131-3 structured text.
//!
//! The translation is syntactic, not semantic: a fixed sequence of rewrite
//! stages that each consume the full text produced by the previous stage
//! and produce new full text. A stage that does not find its construct is
//! a no-op, so partial or malformed input still produces best-effort
//! output rather than an error.

// Allow large errors because diagnostics carry their labels with them.
#![allow(clippy::result_large_err)]

extern crate st2py_dsl as dsl;

mod edit;
pub mod options;
mod rule_balanced_blocks;
mod scan;
mod xform_cases;
mod xform_cleanup;
mod xform_conditionals;
mod xform_declarations;
mod xform_loops;

#[cfg(test)]
mod proptests;

use dsl::core::FileId;
use dsl::diagnostic::{Diagnostic, Label};
use st2py_parser::{preprocess, tokenize};
use st2py_problems::Problem;

use crate::options::TranslateOptions;

/// The result of a successful translation: the Python text plus any
/// warnings gathered along the way.
#[derive(Debug)]
pub struct Translation {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Translates a structured text program into Python.
///
/// Only empty input is fatal by default; with `strict` enabled, unmatched
/// block keywords and unterminated comments are also fatal. Everything
/// else passes through the stages best-effort, and anything suspicious is
/// reported in the returned diagnostics.
pub fn translate(
    source: &str,
    file_id: &FileId,
    options: &TranslateOptions,
) -> Result<Translation, Diagnostic> {
    if source.trim().is_empty() {
        return Err(Diagnostic::problem(
            Problem::EmptyInput,
            Label::file(file_id.clone(), "Nothing to translate"),
        ));
    }

    let mut diagnostics = Vec::new();

    let source = match preprocess(source, file_id) {
        Ok(preprocessed) => preprocessed,
        Err(diagnostic) => {
            if options.strict {
                return Err(diagnostic);
            }
            // Keep going with the comment in place; the stages treat the
            // text as opaque.
            diagnostics.push(diagnostic);
            source.to_string()
        }
    };

    let (tokens, mut lex_diagnostics) = tokenize(&source, file_id);
    diagnostics.append(&mut lex_diagnostics);

    if let Err(mut unbalanced) = rule_balanced_blocks::apply(&tokens) {
        if options.strict {
            return Err(unbalanced.remove(0));
        }
        diagnostics.append(&mut unbalanced);
    }

    log::debug!("extracting declarations");
    let text = xform_declarations::apply(&source);
    log::debug!("rewriting conditionals");
    let text = xform_conditionals::apply(&text);
    log::debug!("rewriting loops");
    let text = xform_loops::apply(&text);
    log::debug!("rewriting case blocks");
    let text = xform_cases::apply(&text);
    log::debug!("cleaning up keywords and terminators");
    let text = xform_cleanup::apply(&text);

    Ok(Translation { text, diagnostics })
}
