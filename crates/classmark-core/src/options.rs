/// How character references and leftover tags are handled by the decode stage.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Decoder {
    /// Parse as an HTML fragment and keep only the text content.
    #[default]
    TextContent,
    /// Decode a minimal entity table; tags are left untouched.
    EntityTable,
}

/// Whether a `$$...$$` span may cross a line break.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MathMode {
    #[default]
    SingleLine,
    MultiLine,
}

/// Heading levels outside `1..=6` are clamped when rendered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HeadingLevels {
    /// Level used for `# ` lines.
    pub top: u8,
    /// Level used for `## ` lines.
    pub sub: u8,
}

impl Default for HeadingLevels {
    fn default() -> Self {
        Self { top: 1, sub: 2 }
    }
}

/// Visible text inserted into question cards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Labels {
    pub question: String,
    pub answer: String,
    pub explanation: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            question: "Question".to_string(),
            answer: "Correct answer:".to_string(),
            explanation: "Explanation:".to_string(),
        }
    }
}

impl Labels {
    pub fn bengali() -> Self {
        Self {
            question: "প্রশ্ন".to_string(),
            answer: "সঠিক উত্তর:".to_string(),
            explanation: "ব্যাখ্যা:".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderOptions {
    pub decoder: Decoder,
    pub math_mode: MathMode,
    pub headings: HeadingLevels,
    pub labels: Labels,
}
