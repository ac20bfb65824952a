use tracing::{debug, debug_span};

use crate::blocks::extract_blocks;
use crate::check::check;
use crate::decode::decode;
use crate::diagnostic::Diagnostic;
use crate::heading::format_headings;
use crate::math::format_math;
use crate::normalize::normalize;
use crate::options::RenderOptions;
use crate::question::extract_questions;

/// The transformation stages, in the order they run. The order is part of
/// the output contract: blocks must be lifted out before questions look for
/// their boundaries, math must see question fields, and headings and line
/// breaks need every earlier stage to have finished splitting on `\n`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Normalize,
    Decode,
    ExtractBlocks,
    ExtractQuestions,
    FormatMath,
    FormatHeadings,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Normalize,
        Stage::Decode,
        Stage::ExtractBlocks,
        Stage::ExtractQuestions,
        Stage::FormatMath,
        Stage::FormatHeadings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Normalize => "normalize",
            Stage::Decode => "decode",
            Stage::ExtractBlocks => "extract-blocks",
            Stage::ExtractQuestions => "extract-questions",
            Stage::FormatMath => "format-math",
            Stage::FormatHeadings => "format-headings",
        }
    }

    /// Runs this stage over the whole document.
    pub fn apply(self, text: &str, options: &RenderOptions) -> String {
        match self {
            Stage::Normalize => normalize(text),
            Stage::Decode => decode(text, options.decoder),
            Stage::ExtractBlocks => extract_blocks(text),
            Stage::ExtractQuestions => extract_questions(text, &options.labels),
            Stage::FormatMath => format_math(text, options.math_mode),
            Stage::FormatHeadings => format_headings(text, options.headings),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderResult {
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders authored text to an HTML fragment with the default options.
pub fn render(source: &str) -> String {
    render_with_options(source, &RenderOptions::default())
}

pub fn render_with_options(source: &str, options: &RenderOptions) -> String {
    if source.is_empty() {
        return String::new();
    }
    run_stages(source, options, &Stage::ALL)
}

/// Like [`render_with_options`], also reporting tokens that were left
/// unconverted. Diagnostic positions refer to the decoded text.
pub fn render_document(source: &str, options: &RenderOptions) -> RenderResult {
    if source.is_empty() {
        return RenderResult::default();
    }
    let stages: &[Stage] = &Stage::ALL;
    let (decoding, formatting) = stages.split_at(2);
    let decoded = run_stages(source, options, decoding);
    let diagnostics = check(&decoded, options);
    debug!(count = diagnostics.len(), "diagnostics collected");
    RenderResult {
        html: run_stages(&decoded, options, formatting),
        diagnostics,
    }
}

fn run_stages(source: &str, options: &RenderOptions, stages: &[Stage]) -> String {
    let _span = debug_span!("render", input_len = source.len()).entered();
    let mut text = source.to_string();
    for stage in stages {
        text = stage.apply(&text, options);
        debug!(stage = stage.name(), output_len = text.len(), "stage finished");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{Stage, render, render_document};
    use crate::options::RenderOptions;

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render(""), "");
        let result = render_document("", &RenderOptions::default());
        assert!(result.html.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn plain_text_only_gains_line_breaks() {
        assert_eq!(render("first line\nsecond, line!"), "first line<br />second, line!");
    }

    #[test]
    fn stages_run_in_declared_order() {
        let names: Vec<_> = Stage::ALL.iter().map(|stage| stage.name()).collect();
        assert_eq!(
            names,
            [
                "normalize",
                "decode",
                "extract-blocks",
                "extract-questions",
                "format-math",
                "format-headings"
            ]
        );
    }

    #[test]
    fn encoded_heading_marker_is_recognized() {
        assert_eq!(
            render("&#35; Title<p>more</p>"),
            "<h1>Title</h1><br />more<br />"
        );
    }

    #[test]
    fn document_and_plain_render_agree() {
        let source = "<p>[NOTE]x[/NOTE]</p><p>Q: q A. 1 B. 2 C. 3 D. 4 Ans: A</p><p>$$1/2</p>";
        let options = RenderOptions::default();
        let result = render_document(source, &options);
        assert_eq!(result.html, super::render_with_options(source, &options));
        assert_eq!(result.diagnostics.len(), 1);
    }
}
