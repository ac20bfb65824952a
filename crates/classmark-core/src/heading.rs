use crate::options::HeadingLevels;

const SUB_HEADING: &str = "## ";
const TOP_HEADING: &str = "# ";
const LINE_BREAK: &str = "<br />";

/// Turns `## ` and `# ` lines into headings, then every remaining newline
/// into a line break. Runs last: the earlier stages split on `\n`.
pub fn format_headings(text: &str, levels: HeadingLevels) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            out.push_str(LINE_BREAK);
        }
        // `## ` first, or the one-hash rule would claim it.
        if let Some(title) = line.strip_prefix(SUB_HEADING) {
            push_heading(&mut out, levels.sub, title);
        } else if let Some(title) = line.strip_prefix(TOP_HEADING) {
            push_heading(&mut out, levels.top, title);
        } else {
            out.push_str(line);
        }
    }
    out
}

fn push_heading(out: &mut String, level: u8, title: &str) {
    let level = level.clamp(1, 6);
    out.push_str(&format!("<h{}>{}</h{}>", level, title, level));
}
