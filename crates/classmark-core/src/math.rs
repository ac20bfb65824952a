use std::ops::Range;

use tracing::trace;

use crate::options::MathMode;

const DELIMITER: &str = "$$";

/// The raw text between a pair of `$$` delimiters. Formatting is purely
/// visual: nothing is evaluated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MathExpression {
    pub raw: String,
}

impl MathExpression {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Fractions are rewritten before exponents so `a/b` is never read as
    /// an exponent base across the slash.
    pub fn to_html(&self) -> String {
        let fractions = format_fractions(self.raw.trim());
        let exponents = format_exponents(&fractions);
        format!("<span class=\"math-block\">{}</span>", exponents)
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MathScan {
    /// Full spans, delimiters included.
    pub matches: Vec<Range<usize>>,
    /// Delimiters that found no partner.
    pub unclosed: Vec<usize>,
}

pub(crate) fn scan_math(text: &str, mode: MathMode) -> MathScan {
    let mut scan = MathScan::default();
    let mut pos = 0;
    // First line break after an earlier span start. Still the right limit
    // for any later span that starts before it.
    let mut line_end = 0;
    while let Some(offset) = text[pos..].find(DELIMITER) {
        let open = pos + offset;
        let content_start = open + DELIMITER.len();
        let limit = match mode {
            MathMode::SingleLine => {
                if content_start > line_end {
                    line_end = text[content_start..]
                        .find(['\n', '\r'])
                        .map_or(text.len(), |offset| content_start + offset);
                }
                line_end
            }
            MathMode::MultiLine => text.len(),
        };
        match text[content_start..limit].find(DELIMITER) {
            Some(offset) => {
                let end = content_start + offset + DELIMITER.len();
                scan.matches.push(open..end);
                pos = end;
            }
            None => {
                scan.unclosed.push(open);
                // `$` is one byte; the next byte may still open a span.
                pos = open + 1;
            }
        }
    }
    scan
}

/// Rewrites every `$$...$$` span into fraction and superscript markup.
/// Unpaired delimiters stay literal.
pub fn format_math(text: &str, mode: MathMode) -> String {
    let scan = scan_math(text, mode);
    if scan.matches.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in &scan.matches {
        out.push_str(&text[last..span.start]);
        let inner = &text[span.start + DELIMITER.len()..span.end - DELIMITER.len()];
        trace!(start = span.start, raw = inner, "math span");
        out.push_str(&MathExpression::new(inner).to_html());
        last = span.end;
    }
    out.push_str(&text[last..]);
    out
}

fn is_word(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn word_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && is_word(bytes[end]) {
        end += 1;
    }
    end
}

/// `word/word` becomes a stacked fraction. A run that is not followed by
/// `/word` is copied whole; the scan never restarts inside a run.
fn format_fractions(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !is_word(bytes[i]) {
            i += 1;
            continue;
        }
        let numerator_end = word_end(bytes, i);
        let has_denominator = numerator_end + 1 < bytes.len()
            && bytes[numerator_end] == b'/'
            && is_word(bytes[numerator_end + 1]);
        if !has_denominator {
            i = numerator_end;
            continue;
        }
        let denominator_end = word_end(bytes, numerator_end + 1);
        out.push_str(&text[copied..i]);
        out.push_str("<span class=\"fraction\"><span class=\"numerator\">");
        out.push_str(&text[i..numerator_end]);
        out.push_str("</span><span class=\"denominator\">");
        out.push_str(&text[numerator_end + 1..denominator_end]);
        out.push_str("</span></span>");
        copied = denominator_end;
        i = denominator_end;
    }
    out.push_str(&text[copied..]);
    out
}

/// `^word` and `^{...}` become superscripts; the base is left alone. Brace
/// content is kept verbatim, without the braces.
fn format_exponents(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'^' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let exponent = if start < bytes.len() && is_word(bytes[start]) {
            let end = word_end(bytes, start);
            Some((start..end, end))
        } else if start < bytes.len() && bytes[start] == b'{' {
            text[start + 1..]
                .find('}')
                .map(|offset| (start + 1..start + 1 + offset, start + 2 + offset))
        } else {
            None
        };
        match exponent {
            Some((content, next)) => {
                out.push_str(&text[copied..i]);
                out.push_str("<sup>");
                out.push_str(&text[content]);
                out.push_str("</sup>");
                copied = next;
                i = next;
            }
            None => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}
