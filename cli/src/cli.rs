//! Implements the command line behavior.

use codespan_reporting::{
    diagnostic::{Diagnostic, Label, LabelStyle, Severity},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use std::{
    fs::File,
    io::{self, Read, Write},
    ops::Range,
    path::Path,
};

use st2py_dsl::core::FileId;
use st2py_translate::options::TranslateOptions;
use st2py_translate::translate;

/// Translates one input to one output.
///
/// Reads the file (or standard input when the path is absent or '-'),
/// translates it, and writes the result to the output path or standard
/// output. Diagnostics render to standard error.
pub fn run(input: Option<&Path>, output: Option<&Path>, strict: bool) -> Result<(), String> {
    let (file_id, contents) = read_input(input)?;

    let options = TranslateOptions { strict };
    match translate(&contents, &file_id, &options) {
        Ok(translation) => {
            for warning in &translation.diagnostics {
                emit(&file_id, &contents, warning, Severity::Warning)?;
            }
            write_output(output, &translation.text)
        }
        Err(diagnostic) => {
            emit(&file_id, &contents, &diagnostic, Severity::Error)?;
            Err(String::from("Error"))
        }
    }
}

fn read_input(input: Option<&Path>) -> Result<(FileId, String), String> {
    match input {
        Some(path) if path != Path::new("-") => {
            let mut file = File::open(path)
                .map_err(|e| format!("Failed opening file {}. {}", path.display(), e))?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| format!("Failed to read file {}. {}", path.display(), e))?;
            Ok((FileId::from_path(path), contents))
        }
        _ => {
            let mut contents = String::new();
            io::stdin()
                .read_to_string(&mut contents)
                .map_err(|e| format!("Failed to read standard input. {}", e))?;
            Ok((FileId::from_string("<stdin>"), contents))
        }
    }
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), String> {
    match output {
        Some(path) => {
            let mut file = File::create(path)
                .map_err(|e| format!("Failed creating file {}. {}", path.display(), e))?;
            file.write_all(text.as_bytes())
                .map_err(|e| format!("Failed to write file {}. {}", path.display(), e))
        }
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

fn emit(
    file_id: &FileId,
    contents: &str,
    diagnostic: &st2py_dsl::diagnostic::Diagnostic,
    severity: Severity,
) -> Result<(), String> {
    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = codespan_reporting::term::Config::default();

    let mut files = SimpleFiles::new();
    files.add(file_id.to_string(), contents);

    let diagnostic = map_diagnostic(diagnostic, severity);
    let mut lock = writer.lock();
    term::emit(&mut lock, &config, &files, &diagnostic)
        .map_err(|_| String::from("Failed writing to terminal"))
}

fn map_label(label: &st2py_dsl::diagnostic::Label, style: LabelStyle) -> Label<usize> {
    let range = match &label.location {
        st2py_dsl::diagnostic::Location::QualifiedPosition(pos) => Range {
            start: pos.offset,
            end: pos.offset,
        },
        st2py_dsl::diagnostic::Location::OffsetRange(offset) => Range {
            start: offset.start,
            end: offset.end,
        },
    };
    Label::new(style, 0, range).with_message(&label.message)
}

fn map_diagnostic(
    diagnostic: &st2py_dsl::diagnostic::Diagnostic,
    severity: Severity,
) -> Diagnostic<usize> {
    // Set the primary label
    let mut labels = vec![map_label(&diagnostic.primary, LabelStyle::Primary)];

    // Add any secondary labels
    labels.extend(
        diagnostic
            .secondary
            .iter()
            .map(|lbl| map_label(lbl, LabelStyle::Secondary)),
    );

    Diagnostic::new(severity)
        .with_code(&diagnostic.code)
        .with_message(diagnostic.description())
        .with_labels(labels)
}
