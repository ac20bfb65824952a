use crate::blocks::{BlockKind, TableBlock, scan_blocks};
use crate::diagnostic::{
    Diagnostic, DiagnosticSeverity, N_TABLE_RAGGED, W_MATH_UNCLOSED, W_NOTE_UNCLOSED,
    W_QUESTION_INCOMPLETE, W_TABLE_UNCLOSED, W_WARN_UNCLOSED,
};
use crate::math::scan_math;
use crate::options::RenderOptions;
use crate::question::{QuestionScan, scan_questions};
use crate::source_map::SourceMap;
use crate::span::Span;

/// Explains which tokens of the decoded text will be passed through
/// unconverted. Never influences the rendered output.
pub(crate) fn check(decoded: &str, options: &RenderOptions) -> Vec<Diagnostic> {
    let source_map = SourceMap::new(decoded);
    let mut diagnostics = Vec::new();

    for kind in BlockKind::PASS_ORDER {
        let scan = scan_blocks(decoded, kind);
        for open in scan.unclosed {
            diagnostics.push(Diagnostic::new(
                &source_map,
                Span::at(open, kind.open_tag().len()),
                DiagnosticSeverity::Warning,
                unclosed_code(kind),
                format!(
                    "`{}` has no matching `{}` and is left as text",
                    kind.open_tag(),
                    kind.close_tag()
                ),
            ));
        }
        if kind != BlockKind::Table {
            continue;
        }
        for found in scan.matches {
            let table = TableBlock::parse(&decoded[found.body.clone()]);
            for row in table.ragged_rows() {
                diagnostics.push(Diagnostic::new(
                    &source_map,
                    Span::from(found.span.clone()),
                    DiagnosticSeverity::Note,
                    N_TABLE_RAGGED,
                    format!(
                        "table row {} has {} cells but the header has {}",
                        row + 1,
                        table.rows[row].len(),
                        table.header.len()
                    ),
                ));
            }
        }
    }

    for scan in scan_questions(decoded) {
        let QuestionScan::Incomplete { marker, missing } = scan else {
            continue;
        };
        // `Q:` in running text ("FAQ: ...") is not meant as a question.
        if !starts_line(decoded, marker) {
            continue;
        }
        diagnostics.push(Diagnostic::new(
            &source_map,
            Span::at(marker, 2),
            DiagnosticSeverity::Warning,
            W_QUESTION_INCOMPLETE,
            format!("question block is missing `{}` and is left as text", missing),
        ));
    }

    for open in scan_math(decoded, options.math_mode).unclosed {
        diagnostics.push(Diagnostic::new(
            &source_map,
            Span::at(open, 2),
            DiagnosticSeverity::Warning,
            W_MATH_UNCLOSED,
            "`$$` has no closing `$$` and is left as text",
        ));
    }

    diagnostics.sort_by_key(|diagnostic| diagnostic.span.start);
    diagnostics
}

fn unclosed_code(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Note => W_NOTE_UNCLOSED,
        BlockKind::Warn => W_WARN_UNCLOSED,
        BlockKind::Table => W_TABLE_UNCLOSED,
    }
}

fn starts_line(text: &str, offset: usize) -> bool {
    let before = text[..offset].trim_end_matches(|ch: char| ch.is_whitespace() && ch != '\n');
    before.is_empty() || before.ends_with('\n')
}

#[cfg(test)]
mod tests {
    use super::check;
    use crate::diagnostic::{
        DiagnosticSeverity, N_TABLE_RAGGED, W_MATH_UNCLOSED, W_NOTE_UNCLOSED,
        W_QUESTION_INCOMPLETE,
    };
    use crate::options::RenderOptions;
    use crate::source_map::Position;

    fn codes(source: &str) -> Vec<&'static str> {
        check(source, &RenderOptions::default())
            .into_iter()
            .map(|diagnostic| diagnostic.code)
            .collect()
    }

    #[test]
    fn clean_document_has_no_diagnostics() {
        let source = "# T\n[NOTE]n[/NOTE]\n$$a/b$$\nQ: q\nA. a\nB. b\nC. c\nD. d\nAns: A";
        assert!(codes(source).is_empty());
    }

    #[test]
    fn unclosed_note_is_reported_with_position() {
        let diagnostics = check("intro\n  [NOTE] body", &RenderOptions::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, W_NOTE_UNCLOSED);
        assert_eq!(
            diagnostics[0].range.start,
            Position {
                line: 1,
                character: 2
            }
        );
    }

    #[test]
    fn ragged_table_is_a_note() {
        let diagnostics = check("[TABLE]A|B\n1\n[/TABLE]", &RenderOptions::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, N_TABLE_RAGGED);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Note);
        assert!(diagnostics[0].message.contains("row 1 has 1 cells"));
    }

    #[test]
    fn incomplete_question_only_at_line_start() {
        assert_eq!(
            codes("Q: q\nA. a\nB. b\nC. c\nD. d"),
            vec![W_QUESTION_INCOMPLETE]
        );
        assert!(codes("See the FAQ: it helps").is_empty());
    }

    #[test]
    fn diagnostics_are_ordered_by_offset() {
        assert_eq!(
            codes("$$x\n[NOTE]"),
            vec![W_MATH_UNCLOSED, W_NOTE_UNCLOSED]
        );
    }
}
