//! Defines the options for controlling translation behavior.

/// The options for translation.
#[derive(Clone, Debug, Default)]
pub struct TranslateOptions {
    /// When true, block keywords that are opened but never closed are
    /// errors. The default is to leave unmatched constructs in the output
    /// untouched and report them as warnings.
    pub strict: bool,
}
