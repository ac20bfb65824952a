/// Paragraph boundaries go first: stripping `<p>`/`</p>` on their own would
/// turn `</p><p>` into two newlines instead of one.
const PARAGRAPH_BOUNDARY: &str = "</p><p>";
const BREAK_TOKENS: [&str; 3] = ["<p>", "</p>", "<br>"];
const NBSP_ENTITY: &str = "&nbsp;";

/// Collapses editor paragraph and break markup into `\n` and `&nbsp;` into a
/// plain space. No other character is touched.
pub fn normalize(source: &str) -> String {
    let mut out = source.replace(PARAGRAPH_BOUNDARY, "\n");
    for token in BREAK_TOKENS {
        if out.contains(token) {
            out = out.replace(token, "\n");
        }
    }
    out.replace(NBSP_ENTITY, " ")
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn adjacent_paragraphs_are_one_newline_apart() {
        assert_eq!(normalize("<p>one</p><p>two</p>"), "\none\ntwo\n");
    }

    #[test]
    fn breaks_and_nbsp_are_collapsed() {
        assert_eq!(normalize("a<br>b&nbsp;c"), "a\nb c");
    }

    #[test]
    fn other_markup_is_untouched() {
        let source = "<strong>x</strong> &amp; <br/> <P>";
        assert_eq!(normalize(source), source);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let inputs = [
            "<p>a</p><p>b</p><br>&nbsp;",
            "<<p>p>",
            "&nb&nbsp;sp;",
            "</p</p>><p>",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }
}
