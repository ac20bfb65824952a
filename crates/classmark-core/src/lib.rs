//! Renders authored class notes into an HTML fragment.
//!
//! Notes are written in a rich-text editor and stored as loosely structured
//! text: `[NOTE]`/`[WARN]` boxes, `[TABLE]` blocks with `|` separated cells,
//! multiple-choice questions (`Q: .. A. .. B. .. C. .. D. .. Ans: .. Exp: ..`),
//! `$$..$$` math with fractions and exponents, and `#`/`##` headings.
//! Rendering is a fixed sequence of [`Stage`]s; malformed content is never an
//! error and simply stays visible as written.
//!
//! The output does not escape author text. Use [`render_sanitized`] when the
//! source is untrusted.

mod blocks;
mod check;
mod decode;
mod diagnostic;
mod heading;
mod math;
mod normalize;
mod options;
mod pipeline;
mod preview;
mod question;
mod sanitize;
mod source_map;
mod span;

pub use blocks::{BlockKind, TableBlock, extract_blocks};
pub use decode::decode;
pub use diagnostic::{
    Diagnostic, DiagnosticSeverity, N_TABLE_RAGGED, W_MATH_UNCLOSED, W_NOTE_UNCLOSED,
    W_QUESTION_INCOMPLETE, W_TABLE_UNCLOSED, W_WARN_UNCLOSED,
};
pub use heading::format_headings;
pub use math::{MathExpression, format_math};
pub use normalize::normalize;
pub use options::{Decoder, HeadingLevels, Labels, MathMode, RenderOptions};
pub use pipeline::{RenderResult, Stage, render, render_document, render_with_options};
pub use preview::format_editor_preview;
pub use question::{QuestionBlock, collect_questions, extract_questions};
pub use sanitize::{render_sanitized, sanitize_html};
pub use source_map::{Position, Range, SourceMap};
pub use span::Span;
