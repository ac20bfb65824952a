//! Standalone preview pages for rendered class notes.

use std::fs;
use std::io;
use std::path::Path;

const BASE_CSS: &str = include_str!("../assets/classmark.css");
const STYLESHEET_FILE: &str = "classmark.css";
const ICON_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    title: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn stylesheet(&self) -> String {
        BASE_CSS.to_string()
    }

    /// Wraps a rendered fragment into a full HTML document. Without inline
    /// CSS the page links `classmark.css` next to it instead.
    pub fn embed_html(&self, html: &str, with_inline_css: bool) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"bn\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"utf-8\" />\n");
        out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
        if let Some(title) = &self.title {
            out.push_str("  <title>");
            out.push_str(&escape_html(title));
            out.push_str("</title>\n");
        }
        out.push_str("  <link rel=\"stylesheet\" href=\"");
        out.push_str(ICON_CSS);
        out.push_str("\" />\n");
        if with_inline_css {
            out.push_str("  <style>\n");
            out.push_str(&self.stylesheet());
            out.push_str("\n  </style>\n");
        } else {
            out.push_str("  <link rel=\"stylesheet\" href=\"");
            out.push_str(STYLESHEET_FILE);
            out.push_str("\" />\n");
        }
        out.push_str("</head>\n");
        out.push_str("<body>\n");
        out.push_str("<main class=\"classmark\">\n");
        out.push_str(html);
        if !html.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("</main>\n");
        out.push_str("</body>\n");
        out.push_str("</html>\n");
        out
    }

    pub fn generate_files(&self, out_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(out_dir)?;
        fs::write(out_dir.join(STYLESHEET_FILE), self.stylesheet())?;
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::Renderer;

    #[test]
    fn page_inlines_stylesheet() {
        let page = Renderer::new().embed_html("<h1>x</h1>", true);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<style>"));
        assert!(page.contains(".mcq-card"));
        assert!(page.contains("<main class=\"classmark\">\n<h1>x</h1>\n</main>"));
    }

    #[test]
    fn page_links_stylesheet_when_not_inlined() {
        let page = Renderer::new()
            .with_title("Ratio & <proportion>")
            .embed_html("", false);
        assert!(!page.contains("<style>"));
        assert!(page.contains("href=\"classmark.css\""));
        assert!(page.contains("<title>Ratio &amp; &lt;proportion&gt;</title>"));
    }

    #[test]
    fn generate_files_writes_stylesheet() -> std::io::Result<()> {
        let dir = std::env::temp_dir().join(format!("classmark_css_{}", std::process::id()));
        Renderer::new().generate_files(&dir)?;
        let css = std::fs::read_to_string(dir.join("classmark.css"))?;
        assert!(css.contains(".fraction"));
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
