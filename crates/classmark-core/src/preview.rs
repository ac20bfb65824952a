//! Formatting applied to raw editor HTML for the authoring preview window.
//!
//! Unlike the note pipeline this works on LaTeX-flavoured input
//! (`\frac{a}{b}`, `\sqrt{x}`) and leaves the editor markup in place.

const FRAC: &str = "\\frac{";
const SQRT: &str = "\\sqrt{";
const MATH_DELIMITER: &str = "$$";

/// Rewrites fractions, exponents, roots and `$$` boxes, in that order.
pub fn format_editor_preview(html: &str) -> String {
    let out = replace_fracs(html);
    let out = replace_exponents(&out, Exponent::Braced);
    let out = replace_exponents(&out, Exponent::Digits);
    let out = replace_sqrts(&out);
    replace_math_boxes(&out)
}

/// Offsets of every `}` in a text, for finding the end of a brace group
/// without rescanning.
struct Closers(Vec<usize>);

impl Closers {
    fn new(text: &str) -> Self {
        Self(text.match_indices('}').map(|(offset, _)| offset).collect())
    }

    /// Byte index of the closing brace of a non-empty `{...}` group starting
    /// at `open` (the index of `{`), plus the index just past it.
    fn group(&self, text: &str, open: usize) -> Option<(usize, usize)> {
        if !text[open..].starts_with('{') {
            return None;
        }
        let close = *self.0.get(self.0.partition_point(|&offset| offset <= open))?;
        if close == open + 1 {
            return None;
        }
        Some((close, close + 1))
    }
}

fn replace_fracs(text: &str) -> String {
    let closers = Closers::new(text);
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;
    while let Some(offset) = text[pos..].find(FRAC) {
        let start = pos + offset;
        let open = start + FRAC.len() - 1;
        let parsed = closers.group(text, open).and_then(|(num_close, next)| {
            closers
                .group(text, next)
                .map(|(den_close, end)| (num_close, next, den_close, end))
        });
        match parsed {
            Some((num_close, den_open, den_close, end)) => {
                out.push_str(&text[copied..start]);
                out.push_str("<div class=\"fraction\"><span class=\"numerator\">");
                out.push_str(&text[open + 1..num_close]);
                out.push_str("</span><span class=\"denominator\">");
                out.push_str(&text[den_open + 1..den_close]);
                out.push_str("</span></div>");
                copied = end;
                pos = end;
            }
            None => pos = start + 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

#[derive(Clone, Copy)]
enum Exponent {
    /// `word^{...}`
    Braced,
    /// `word^123`
    Digits,
}

fn is_word(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Only a `^` that directly follows a word character written outside an
/// earlier replacement has a base.
fn replace_exponents(text: &str, kind: Exponent) -> String {
    let closers = Closers::new(text);
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        let has_base = bytes[i] == b'^' && i > copied && is_word(bytes[i - 1]);
        if !has_base {
            i += 1;
            continue;
        }
        let exponent = match kind {
            Exponent::Braced => closers.group(text, i + 1).map(|(close, end)| (i + 2..close, end)),
            Exponent::Digits => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                (end > start).then_some((start..end, end))
            }
        };
        match exponent {
            Some((content, end)) => {
                out.push_str(&text[copied..i]);
                out.push_str("<sup>");
                out.push_str(&text[content]);
                out.push_str("</sup>");
                copied = end;
                i = end;
            }
            None => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

fn replace_sqrts(text: &str) -> String {
    let closers = Closers::new(text);
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;
    while let Some(offset) = text[pos..].find(SQRT) {
        let start = pos + offset;
        let open = start + SQRT.len() - 1;
        match closers.group(text, open) {
            Some((close, end)) => {
                out.push_str(&text[copied..start]);
                out.push('√');
                out.push_str(&text[open + 1..close]);
                copied = end;
                pos = end;
            }
            None => pos = start + 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// `$$...$$` with no `$` inside becomes a math box; the body may span lines.
fn replace_math_boxes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;
    while let Some(offset) = text[pos..].find(MATH_DELIMITER) {
        let open = pos + offset;
        let body_start = open + MATH_DELIMITER.len();
        let body_end = text[body_start..].find('$').map(|offset| body_start + offset);
        match body_end {
            Some(body_end)
                if body_end > body_start && text[body_end..].starts_with(MATH_DELIMITER) =>
            {
                out.push_str(&text[copied..open]);
                out.push_str("<div class=\"math-box\">");
                out.push_str(&text[body_start..body_end]);
                out.push_str("</div>");
                copied = body_end + MATH_DELIMITER.len();
                pos = copied;
            }
            _ => pos = open + 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}
