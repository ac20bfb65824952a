use crate::source_map::{Range, SourceMap};
use crate::span::Span;

pub const W_NOTE_UNCLOSED: &str = "W_NOTE_UNCLOSED";
pub const W_WARN_UNCLOSED: &str = "W_WARN_UNCLOSED";
pub const W_TABLE_UNCLOSED: &str = "W_TABLE_UNCLOSED";
pub const W_QUESTION_INCOMPLETE: &str = "W_QUESTION_INCOMPLETE";
pub const W_MATH_UNCLOSED: &str = "W_MATH_UNCLOSED";

pub const N_TABLE_RAGGED: &str = "N_TABLE_RAGGED";

/// An advisory finding about authored content. Rendering never fails; these
/// only explain why some text was passed through unconverted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub span: Span,
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        source_map: &SourceMap,
        span: Span,
        severity: DiagnosticSeverity,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            span,
            range: source_map.range(span),
            severity,
            code,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiagnosticSeverity {
    Warning,
    Note,
}
