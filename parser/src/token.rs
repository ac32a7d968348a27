//! Provides definitions of tokens from IEC 61131-3 structured text.
use logos::Logos;

use dsl::core::SourceSpan;

/// The type of a lexical element.
///
/// Keywords are matched without regard to case, the same as the language.
/// Whitespace and line breaks are real tokens because the rewrite stages
/// need to reason about line boundaries and statement starts.
#[derive(Logos, Clone, Debug, PartialEq, Eq)]
pub enum TokenType {
    #[regex(r"[\n\r\f]")]
    Newline,

    #[regex(r"[ \t]+")]
    Whitespace,

    // Grouping and other markers
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("..")]
    DotDot,
    #[token(".")]
    Period,
    #[token("#")]
    Hash,
    #[token("%")]
    Percent,

    #[regex(r"'[^']*'")]
    #[regex("\"[^\"]*\"")]
    String,

    // B.1.1 Letters, digits and identifier
    #[regex(r"[A-Za-z0-9_]+")]
    Identifier,

    // B.1.4.3 Declarations and initialization
    #[token("VAR", ignore(case))]
    Var,
    #[token("END_VAR", ignore(case))]
    VarEnd,

    // Expressions
    #[token("&")]
    And,
    #[token("=")]
    Equal,
    #[token("<>")]
    NotEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("/")]
    Div,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("**")]
    Power,

    #[token(":=")]
    Assignment,

    // B.3.2.3 Selection statements
    #[token("IF", ignore(case))]
    If,
    #[token("THEN", ignore(case))]
    Then,
    #[token("ELSIF", ignore(case))]
    #[token("ELSEIF", ignore(case))]
    Elsif,
    #[token("ELSE", ignore(case))]
    Else,
    #[token("END_IF", ignore(case))]
    IfEnd,

    #[token("CASE", ignore(case))]
    Case,
    #[token("OF", ignore(case))]
    Of,
    #[token("END_CASE", ignore(case))]
    CaseEnd,

    // B.3.2.4 Iteration statements
    #[token("FOR", ignore(case))]
    For,
    #[token("TO", ignore(case))]
    To,
    #[token("DO", ignore(case))]
    Do,
    #[token("END_FOR", ignore(case))]
    ForEnd,

    #[token("WHILE", ignore(case))]
    While,
    #[token("END_WHILE", ignore(case))]
    WhileEnd,

    #[token("REPEAT", ignore(case))]
    Repeat,
    #[token("UNTIL", ignore(case))]
    Until,
    #[token("END_REPEAT", ignore(case))]
    RepeatEnd,

    #[token("EXIT", ignore(case))]
    Exit,
    #[token("RETURN", ignore(case))]
    Return,

    // Anything the other patterns do not recognize. One character at a
    // time so that the surrounding text still tokenizes.
    #[regex(r".", priority = 0)]
    Unknown,
}

/// A token and its location in the source text.
#[derive(Clone, Debug)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
    /// The line number (0-indexed)
    pub line: usize,
    /// The column number (0-indexed)
    pub col: usize,
    pub text: String,
}
