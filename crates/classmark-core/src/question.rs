use std::ops::Range;

use tracing::trace;

use crate::blocks::starts_block_fragment;
use crate::options::Labels;

const QUESTION_MARKER: &str = "Q:";
const OPTION_MARKERS: [&str; 4] = ["A.", "B.", "C.", "D."];
const ANSWER_MARKER: &str = "Ans:";
const EXPLANATION_MARKER: &str = "Exp:";
/// Required markers in grammar order: the four options, then the answer.
const REQUIRED_MARKERS: [&str; 5] = [
    OPTION_MARKERS[0],
    OPTION_MARKERS[1],
    OPTION_MARKERS[2],
    OPTION_MARKERS[3],
    ANSWER_MARKER,
];
const ANSWER_SLOT: usize = 4;

/// One multiple-choice question lifted out of the text, numbered in document
/// order starting at 1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionBlock {
    pub sequence_number: usize,
    pub question: String,
    pub options: [String; 4],
    pub answer: String,
    pub explanation: Option<String>,
}

impl QuestionBlock {
    pub fn to_html(&self, labels: &Labels) -> String {
        let mut out = String::from("<div class=\"mcq-card\"><div class=\"mcq-badge\">");
        out.push_str(&labels.question);
        out.push(' ');
        out.push_str(&self.sequence_number.to_string());
        out.push_str("</div><p class=\"mcq-question\">");
        out.push_str(&self.question);
        out.push_str("</p><div class=\"mcq-options\">");
        for (letter, option) in OPTION_MARKERS.iter().zip(&self.options) {
            out.push_str("<div class=\"mcq-option\"><span>");
            out.push_str(letter);
            out.push_str("</span> ");
            out.push_str(option);
            out.push_str("</div>");
        }
        out.push_str("</div><div class=\"mcq-answer-box\"><strong>");
        out.push_str(&labels.answer);
        out.push(' ');
        out.push_str(&self.answer);
        out.push_str("</strong>");
        if let Some(explanation) = &self.explanation {
            out.push_str("<br /><small><b>");
            out.push_str(&labels.explanation);
            out.push_str("</b> ");
            out.push_str(explanation);
            out.push_str("</small>");
        }
        out.push_str("</div></div>");
        out
    }
}

/// Byte ranges of a fully matched question block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct QuestionMatch {
    pub span: Range<usize>,
    pub question: Range<usize>,
    pub options: [Range<usize>; 4],
    pub answer: Range<usize>,
    pub explanation: Option<Range<usize>>,
}

impl QuestionMatch {
    fn to_block(&self, text: &str, sequence_number: usize) -> QuestionBlock {
        let field = |range: &Range<usize>| text[range.clone()].trim().to_string();
        QuestionBlock {
            sequence_number,
            question: field(&self.question),
            options: [
                field(&self.options[0]),
                field(&self.options[1]),
                field(&self.options[2]),
                field(&self.options[3]),
            ],
            answer: field(&self.answer),
            explanation: self
                .explanation
                .as_ref()
                .map(field)
                .filter(|text| !text.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum QuestionScan {
    Matched(QuestionMatch),
    /// A `Q:` whose block lacks `missing` before its extent ends.
    Incomplete { marker: usize, missing: &'static str },
}

/// Walks every `Q:` marker in document order.
pub(crate) fn scan_questions(text: &str) -> Vec<QuestionScan> {
    let mut found = Vec::new();
    let mut extent: Option<Extent> = None;
    let mut pos = 0;
    while let Some(offset) = text[pos..].find(QUESTION_MARKER) {
        let start = pos + offset;
        // Every `Q:` before the boundary newline shares one extent.
        let current = match extent.take() {
            Some(current) if start < current.end => current,
            _ => Extent::new(text, start + QUESTION_MARKER.len()),
        };
        match match_question(text, start, &current) {
            Ok(matched) => {
                pos = matched.span.end;
                found.push(QuestionScan::Matched(matched));
            }
            Err(missing) => {
                pos = start + QUESTION_MARKER.len();
                found.push(QuestionScan::Incomplete {
                    marker: start,
                    missing,
                });
            }
        }
        extent = Some(current);
    }
    found
}

/// The stretch of text a question may use, with the offsets of every
/// required marker inside it.
struct Extent {
    end: usize,
    occurrences: [Vec<usize>; 5],
}

impl Extent {
    fn new(text: &str, from: usize) -> Self {
        let end = extent_end(text, from);
        let region = &text[from..end];
        let occurrences = REQUIRED_MARKERS.map(|marker| {
            region
                .match_indices(marker)
                .map(|(offset, _)| from + offset)
                .collect()
        });
        Self { end, occurrences }
    }

    /// First occurrence of marker `slot` at or after `from`.
    fn find(&self, slot: usize, from: usize) -> Result<usize, &'static str> {
        let offsets = &self.occurrences[slot];
        offsets
            .get(offsets.partition_point(|&offset| offset < from))
            .copied()
            .ok_or(REQUIRED_MARKERS[slot])
    }
}

/// A question runs until a newline that opens another question, a bracketed
/// token, a heading or a generated block; otherwise to the end of the text.
fn extent_end(text: &str, from: usize) -> usize {
    let mut pos = from;
    while let Some(offset) = text[pos..].find('\n') {
        let newline = pos + offset;
        let next = text[newline + 1..].trim_start();
        if next.starts_with(QUESTION_MARKER)
            || next.starts_with('[')
            || next.starts_with('#')
            || starts_block_fragment(next)
        {
            return newline;
        }
        // Newlines inside the skipped whitespace see the same `next`.
        pos = text.len() - next.len();
    }
    text.len()
}

fn skip_whitespace(text: &str, from: usize, end: usize) -> usize {
    let rest = &text[from..end];
    from + rest.len() - rest.trim_start().len()
}

/// Matches the positional grammar `Q: .. A. .. B. .. C. .. D. .. Ans: .. [Exp: ..]`
/// inside the extent. All markers are required; the error names the first
/// one that could not be found.
fn match_question(
    text: &str,
    start: usize,
    extent: &Extent,
) -> Result<QuestionMatch, &'static str> {
    let end = extent.end;
    let question_start = start + QUESTION_MARKER.len();
    let mut markers = [0usize; 5];
    let mut cursor = question_start;
    for (slot, marker) in REQUIRED_MARKERS.iter().enumerate() {
        markers[slot] = extent.find(slot, cursor)?;
        cursor = markers[slot] + marker.len();
    }
    let options =
        [0, 1, 2, 3].map(|idx| markers[idx] + OPTION_MARKERS[idx].len()..markers[idx + 1]);

    let answer_start = skip_whitespace(text, markers[ANSWER_SLOT] + ANSWER_MARKER.len(), end);
    let line_end = text[answer_start..end]
        .find('\n')
        .map_or(end, |offset| answer_start + offset);
    let inline_exp = text[answer_start..line_end]
        .find(EXPLANATION_MARKER)
        .map(|offset| answer_start + offset);

    let (answer_end, explanation) = match inline_exp {
        Some(exp) => (exp, Some(exp + EXPLANATION_MARKER.len()..end)),
        None => {
            let exp = skip_whitespace(text, line_end, end);
            if text[exp..end].starts_with(EXPLANATION_MARKER) {
                (line_end, Some(exp + EXPLANATION_MARKER.len()..end))
            } else {
                (line_end, None)
            }
        }
    };

    let span_end = if explanation.is_some() { end } else { answer_end };
    Ok(QuestionMatch {
        span: start..span_end,
        question: question_start..markers[0],
        options,
        answer: answer_start..answer_end,
        explanation,
    })
}

/// Replaces every complete question block with a numbered card. The counter
/// lives in this call, so every document starts again at 1.
pub fn extract_questions(text: &str, labels: &Labels) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut counter = 0;
    for scan in scan_questions(text) {
        let QuestionScan::Matched(matched) = scan else {
            continue;
        };
        counter += 1;
        let block = matched.to_block(text, counter);
        trace!(number = counter, start = matched.span.start, "question card");
        out.push_str(&text[last..matched.span.start]);
        out.push_str(&block.to_html(labels));
        last = matched.span.end;
    }
    out.push_str(&text[last..]);
    out
}

/// The question blocks of `text`, in order, without rendering them.
pub fn collect_questions(text: &str) -> Vec<QuestionBlock> {
    scan_questions(text)
        .into_iter()
        .filter_map(|scan| match scan {
            QuestionScan::Matched(matched) => Some(matched),
            QuestionScan::Incomplete { .. } => None,
        })
        .enumerate()
        .map(|(idx, matched)| matched.to_block(text, idx + 1))
        .collect()
}
