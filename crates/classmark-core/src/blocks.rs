use std::ops::Range;

use tracing::trace;

/// Openers of every fragment this module generates. The question scanner
/// treats a line starting with one of them as a block boundary.
const FRAGMENT_OPENERS: [&str; 2] = ["<div class=\"note-box ", "<div class=\"table-wrapper\">"];

pub(crate) fn starts_block_fragment(text: &str) -> bool {
    FRAGMENT_OPENERS
        .iter()
        .any(|opener| text.starts_with(opener))
}

/// Bracketed block tokens, in the order their passes run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlockKind {
    Note,
    Warn,
    Table,
}

impl BlockKind {
    pub const PASS_ORDER: [BlockKind; 3] = [BlockKind::Note, BlockKind::Warn, BlockKind::Table];

    pub fn open_tag(self) -> &'static str {
        match self {
            BlockKind::Note => "[NOTE]",
            BlockKind::Warn => "[WARN]",
            BlockKind::Table => "[TABLE]",
        }
    }

    pub fn close_tag(self) -> &'static str {
        match self {
            BlockKind::Note => "[/NOTE]",
            BlockKind::Warn => "[/WARN]",
            BlockKind::Table => "[/TABLE]",
        }
    }
}

/// One open/close pair found by [`scan_blocks`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BlockMatch {
    /// The whole token, open tag through close tag.
    pub span: Range<usize>,
    pub body: Range<usize>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct BlockScan {
    pub matches: Vec<BlockMatch>,
    /// Offsets of open tags that have no close tag after them.
    pub unclosed: Vec<usize>,
}

/// Pairs every open tag with the nearest following close tag. Once an open
/// tag has no partner, no later one of the same kind can have one either.
pub(crate) fn scan_blocks(text: &str, kind: BlockKind) -> BlockScan {
    let open = kind.open_tag();
    let close = kind.close_tag();
    let mut scan = BlockScan::default();
    let mut pos = 0;
    while let Some(found) = text[pos..].find(open) {
        let start = pos + found;
        let body_start = start + open.len();
        match text[body_start..].find(close) {
            Some(found_close) => {
                let body_end = body_start + found_close;
                let end = body_end + close.len();
                scan.matches.push(BlockMatch {
                    span: start..end,
                    body: body_start..body_end,
                });
                pos = end;
            }
            None => {
                scan.unclosed.push(start);
                scan.unclosed.extend(
                    text[body_start..]
                        .match_indices(open)
                        .map(|(offset, _)| body_start + offset),
                );
                break;
            }
        }
    }
    scan
}

/// Replaces NOTE boxes, then WARN boxes, then TABLE blocks with their HTML
/// fragments. Unterminated tokens are left as written.
pub fn extract_blocks(text: &str) -> String {
    let mut out = text.to_string();
    for kind in BlockKind::PASS_ORDER {
        out = replace_blocks(&out, kind);
    }
    out
}

fn replace_blocks(text: &str, kind: BlockKind) -> String {
    let scan = scan_blocks(text, kind);
    if scan.matches.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in &scan.matches {
        out.push_str(&text[last..found.span.start]);
        let body = &text[found.body.clone()];
        trace!(?kind, start = found.span.start, "block token");
        match kind {
            BlockKind::Note => push_box(&mut out, "info", "fa-info-circle", body),
            BlockKind::Warn => push_box(&mut out, "warning", "fa-exclamation-triangle", body),
            BlockKind::Table => out.push_str(&TableBlock::parse(body).to_html()),
        }
        last = found.span.end;
    }
    out.push_str(&text[last..]);
    out
}

fn push_box(out: &mut String, variant: &str, icon: &str, body: &str) {
    out.push_str("<div class=\"note-box ");
    out.push_str(variant);
    out.push_str("\"><div class=\"box-icon\"><i class=\"fas ");
    out.push_str(icon);
    out.push_str("\"></i></div><div>");
    out.push_str(body);
    out.push_str("</div></div>");
}

/// A `[TABLE]` body split into cells. Rows keep whatever cell count they were
/// written with; nothing is padded or truncated to the header width.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TableBlock {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    pub fn parse(body: &str) -> Self {
        let mut lines = body
            .trim()
            .split('\n')
            .filter(|line| !line.trim().is_empty());
        let header = lines.next().map(split_cells).unwrap_or_default();
        let rows = lines.map(split_cells).collect();
        Self { header, rows }
    }

    /// Indices of body rows whose cell count differs from the header.
    pub fn ragged_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != self.header.len())
            .map(|(idx, _)| idx)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from(
            "<div class=\"table-wrapper\"><table class=\"styled-table\"><thead><tr>",
        );
        for cell in &self.header {
            out.push_str("<th>");
            out.push_str(cell);
            out.push_str("</th>");
        }
        out.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str("<td>");
                out.push_str(cell);
                out.push_str("</td>");
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table></div>");
        out
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}
