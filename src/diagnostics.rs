//! Pretty error reporting for Kannada
//! Shows the offending source line with the error span underlined

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use crate::error::KannadaError;
use crate::span::Span;

/// Diagnostic renderer for pretty error messages
pub struct Diagnostics<'a> {
    source: &'a str,
    filename: &'a str,
    color: bool,
}

impl<'a> Diagnostics<'a> {
    pub fn new(source: &'a str, filename: &'a str) -> Self {
        Self { source, filename, color: true }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Format an error with source context
    pub fn format_error(&self, error: &KannadaError) -> String {
        match error {
            KannadaError::Lexer { message, span } => self.format_with_context("Lexer Error", message, *span),
            KannadaError::Parser { message, span } => self.format_with_context("Parse Error", message, *span),
            other => format!("error: {}\n", other),
        }
    }

    fn format_with_context(&self, error_type: &str, message: &str, span: Span) -> String {
        let (start, end) = self.char_range(span);
        let report = Report::build(ReportKind::Error, self.filename, start)
            .with_config(Config::default().with_color(self.color))
            .with_message(format!("{}: {}", error_type, message))
            .with_label(
                Label::new((self.filename, start..end))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish();

        let mut out = Vec::new();
        match report.write((self.filename, Source::from(self.source)), &mut out) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => format!("error[{}]: {} ({}:{}..{})\n", error_type, message, self.filename, span.start, span.end),
        }
    }

    /// Convert a byte span into the character range ariadne expects, never empty.
    fn char_range(&self, span: Span) -> (usize, usize) {
        let clamp = |i: usize| {
            let mut i = i.min(self.source.len());
            while !self.source.is_char_boundary(i) {
                i -= 1;
            }
            self.source[..i].chars().count()
        };
        let total = self.source.chars().count();
        let start = clamp(span.start);
        let end = clamp(span.end).max(start);
        if end > start {
            (start, end)
        } else if start < total {
            (start, start + 1)
        } else {
            (start.saturating_sub(1), start)
        }
    }
}
