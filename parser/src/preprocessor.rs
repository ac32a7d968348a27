//! Preprocessor for structured text. The preprocessor transforms the input
//! text into a form that can be easily tokenized.
//!
//! The preprocessor:
//! * removes comments
//!
//! Comments are replaced by whitespace so that language elements retain
//! their original position (this means that source locations remain correct
//! even after comments are removed).

use dsl::core::FileId;
use dsl::diagnostic::{Diagnostic, Label};
use st2py_problems::Problem;

pub fn preprocess(source: &str, file_id: &FileId) -> Result<String, Diagnostic> {
    // True when currently in a comment block, otherwise false.
    let mut in_comment = false;
    // True when the prior character is a candidate for starting or ending a
    // comment block otherwise, false.
    let mut last_is_comment_candidate = false;

    let mut output = String::with_capacity(source.len());

    for char in source.chars() {
        if in_comment {
            if last_is_comment_candidate && char == ')' {
                // This is the end of a comment, update our simple state
                in_comment = false;
                last_is_comment_candidate = false;
            } else {
                last_is_comment_candidate = char == '*';
            }

            // We want to retain new line characters so that
            // line numbers remain the same.
            if char == '\n' {
                output.push('\n');
            } else {
                output.push(' ');
            }
        } else if last_is_comment_candidate && char == '*' {
            // We have started a comment - there is a character written
            // that was actually the start of a comment so replace it
            output.pop();
            output.push(' ');
            // Set our state as being in a comment
            in_comment = true;
            last_is_comment_candidate = false;
            output.push(' ');
        } else {
            // Just write the character
            last_is_comment_candidate = char == '(';
            output.push(char)
        }
    }

    // By the very end, we should no longer be in a comment. If we are, that's
    // an error
    if in_comment {
        return Err(Diagnostic::problem(
            Problem::OpenComment,
            Label::offset(
                file_id.clone(),
                source.len()..source.len(),
                "Expected '*)' - end of comment",
            ),
        ));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_when_no_comment_then_ok() {
        let program = "
        VAR
            count : INT := 0;
        END_VAR";

        let output = preprocess(program, &FileId::default()).unwrap();
        assert_eq!(program, output.as_str());
    }

    #[test]
    fn preprocess_when_one_comment_then_replaces_with_spaces() {
        let program = "
        VAR
        (* A comment *)
            count : INT := 0;
        END_VAR";

        // Comments are replaced character for character so that positions
        // do not shift.
        let expected = program.replace("(* A comment *)", &" ".repeat(15));

        let output = preprocess(program, &FileId::default()).unwrap();
        assert_eq!(expected, output);
        assert_eq!(program.len(), output.len());
    }

    #[test]
    fn preprocess_when_back_to_back_then_replaces_with_spaces() {
        let program = "
        VAR
        (* A comment *)(* A comment *)
        END_VAR";

        let output = preprocess(program, &FileId::default()).unwrap();
        assert!(!output.contains('*'));
        assert_eq!(program.len(), output.len());
    }

    #[test]
    fn preprocess_when_not_closed_then_error() {
        let program = "
        VAR
        (* A comment
            count : INT := 0;
        END_VAR";

        let result = preprocess(program, &FileId::default());
        assert_eq!("P0002", result.unwrap_err().code);
    }
}
