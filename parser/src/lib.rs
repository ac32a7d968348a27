//! Lexical analysis for IEC 61131-3 structured text. This component
//! converts a string into tokens. Tokens are the input to the rewrite
//! stages: the stages locate constructs by scanning the token stream and
//! splice replacement text using the token spans.

extern crate st2py_dsl as dsl;

mod lexer;
mod preprocessor;
pub mod token;

pub use lexer::tokenize;
pub use preprocessor::preprocess;
