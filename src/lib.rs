//! Scanner for a small Lox-style scripting language.
//!
//! [`scan`] turns source text into tokens in one error-tolerant pass: every
//! lexical problem is reported and skipped, and the token list always ends
//! with a single `EOF` token.

pub mod cli;
mod report;
mod scan;
mod span;

pub use report::{
    render, Diagnostic, DiagnosticStyle, Diagnostics, Reporter, ScanError, ScanErrorKind,
};
pub use scan::{Keywords, Literal, Scanner, Token, TokenKind};
pub use span::Span;

/// Result of scanning one source text.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub tokens: Vec<Token>,
    pub diagnostics: Diagnostics,
}

impl ScanOutcome {
    pub fn had_error(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

pub fn scan(source: &str) -> ScanOutcome {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source, Keywords::global()).scan(&mut diagnostics);
    ScanOutcome {
        tokens,
        diagnostics,
    }
}
