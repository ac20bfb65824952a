use std::collections::HashSet;

use ammonia::Builder;

use crate::options::RenderOptions;
use crate::pipeline::render_with_options;

/// Exactly the element vocabulary the pipeline emits.
const ALLOWED_TAGS: [&str; 21] = [
    "b", "br", "div", "h1", "h2", "h3", "h4", "h5", "h6", "i", "p", "small", "span", "strong",
    "sup", "table", "tbody", "td", "th", "thead", "tr",
];

/// Renders `source` and strips anything outside the renderer's own element
/// vocabulary. Use this when authored text is not trusted.
pub fn render_sanitized(source: &str, options: &RenderOptions) -> String {
    sanitize_html(&render_with_options(source, options))
}

pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = ALLOWED_TAGS.into_iter().collect();
    let generic_attributes: HashSet<&str> = HashSet::from(["class"]);
    let clean_content_tags: HashSet<&str> = HashSet::from(["script", "style"]);

    Builder::empty()
        .tags(tags)
        .generic_attributes(generic_attributes)
        .clean_content_tags(clean_content_tags)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{render_sanitized, sanitize_html};
    use crate::options::RenderOptions;

    #[test]
    fn generated_markup_survives() {
        let html = render_sanitized(
            "[NOTE]$$1/2$$[/NOTE]\n[TABLE]A|B\n1|2[/TABLE]",
            &RenderOptions::default(),
        );
        assert!(html.contains("<div class=\"note-box info\">"));
        assert!(html.contains("<i class=\"fas fa-info-circle\"></i>"));
        assert!(html.contains("<span class=\"numerator\">1</span>"));
        assert!(html.contains("<table class=\"styled-table\">"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn decoded_author_markup_is_removed() {
        let html = render_sanitized(
            "hello &lt;script&gt;alert(1)&lt;/script&gt; &lt;img src=x onerror=y&gt;",
            &RenderOptions::default(),
        );
        assert!(html.starts_with("hello"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert(1)"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("onerror"));
    }

    #[test]
    fn disallowed_attributes_are_dropped() {
        let html = sanitize_html("<div class=\"note-box\" style=\"color:red\" onclick=\"x()\">a</div>");
        assert_eq!(html, "<div class=\"note-box\">a</div>");
    }
}
