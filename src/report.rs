use std::fmt;
use std::io::{self, Write};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use clap::ValueEnum;

use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub span: Span,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ScanErrorKind::UnexpectedCharacter(c) => write!(f, "Unexpected character '{c}'"),
            ScanErrorKind::UnterminatedString => f.write_str("Unexpected end of string."),
        }
    }
}

impl std::error::Error for ScanError {}

/// Sink for lexical diagnostics. Every call is non-fatal: the scanner keeps
/// going after reporting, and deciding what to do about errors is left to
/// whoever owns the reporter.
pub trait Reporter {
    fn report(&mut self, line: usize, message: &str);

    fn report_error(&mut self, error: &ScanError) {
        self.report(error.span.line, &error.to_string());
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, line: usize, message: &str) {
        (**self).report(line, message)
    }

    fn report_error(&mut self, error: &ScanError) {
        (**self).report_error(error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Option<Span>,
    pub line: usize,
    /// Extra location context, e.g. ` at 'foo'`. Always empty for lexical errors.
    pub location: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {}] Error{}: {}",
            self.line, self.location, self.message
        )
    }
}

/// Caller-owned collector. A fresh one per scan keeps independent scans from
/// seeing each other's errors.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, line: usize, message: &str) {
        self.items.push(Diagnostic {
            span: None,
            line,
            location: String::new(),
            message: message.into(),
        });
    }

    fn report_error(&mut self, error: &ScanError) {
        self.items.push(Diagnostic {
            span: Some(error.span.clone()),
            line: error.span.line,
            location: String::new(),
            message: error.to_string(),
        });
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiagnosticStyle {
    /// `[line N] Error: message`
    #[default]
    Plain,
    /// Annotated source snippets
    Pretty,
}

/// Writes every diagnostic to `out` in the requested style. Spans are byte
/// offsets into `source`.
pub fn render<W: Write>(
    mut out: W,
    style: DiagnosticStyle,
    color: bool,
    path: &str,
    source: &str,
    diagnostics: &Diagnostics,
) -> io::Result<()> {
    let config = Config::default()
        .with_index_type(IndexType::Byte)
        .with_color(color);

    for diag in diagnostics {
        match (style, &diag.span) {
            (DiagnosticStyle::Pretty, Some(span)) => {
                Report::build(ReportKind::Error, (path, span.range.clone()))
                    .with_config(config)
                    .with_message(format!("[line {}] Error{}", diag.line, diag.location))
                    .with_label(
                        Label::new((path, span.range.clone()))
                            .with_message(&diag.message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((path, Source::from(source)), &mut out)?;
            }
            _ => writeln!(out, "{diag}")?,
        }
    }
    Ok(())
}
