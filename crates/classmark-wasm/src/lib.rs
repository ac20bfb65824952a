use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use classmark_core::{Decoder, HeadingLevels, Labels, MathMode, RenderOptions};

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsRenderOptions {
    sanitized: Option<bool>,
    decoder: Option<String>,
    multi_line_math: Option<bool>,
    top_heading: Option<u8>,
    sub_heading: Option<u8>,
    labels: Option<String>,
    question_label: Option<String>,
    answer_label: Option<String>,
    explanation_label: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderResult {
    html: String,
    diagnostics: Vec<JsDiagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDiagnostic {
    code: String,
    message: String,
    severity: String,
    range: JsRange,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRange {
    start_line: usize,
    start_col: usize,
    end_line: usize,
    end_col: usize,
}

/// Drop-in for the page script: `undefined`/`null` content renders as `""`.
#[wasm_bindgen(js_name = masterParser)]
pub fn master_parser(content: Option<String>) -> String {
    content
        .map(|content| classmark_core::render(&content))
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn render_html(source: Option<String>) -> Result<JsValue, JsValue> {
    render_html_with_options(source, JsValue::UNDEFINED)
}

#[wasm_bindgen]
pub fn render_html_with_options(
    source: Option<String>,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let source = source.unwrap_or_default();
    let js_options = options_from_js(options)?;
    let render_options = render_options(&js_options)?;

    let rendered = classmark_core::render_document(&source, &render_options);
    let html = if js_options.sanitized.unwrap_or(false) {
        classmark_core::sanitize_html(&rendered.html)
    } else {
        rendered.html
    };

    let diagnostics = rendered
        .diagnostics
        .into_iter()
        .map(|diag| JsDiagnostic {
            code: diag.code.to_string(),
            message: diag.message,
            severity: match diag.severity {
                classmark_core::DiagnosticSeverity::Warning => "warning".to_string(),
                classmark_core::DiagnosticSeverity::Note => "note".to_string(),
            },
            range: JsRange {
                start_line: diag.range.start.line,
                start_col: diag.range.start.character,
                end_line: diag.range.end.line,
                end_col: diag.range.end.character,
            },
        })
        .collect();

    let result = RenderResult { html, diagnostics };
    serde_wasm_bindgen::to_value(&result).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Formatter used by the admin editor's preview window.
#[wasm_bindgen(js_name = formatMath)]
pub fn format_math(html: &str) -> String {
    classmark_core::format_editor_preview(html)
}

fn options_from_js(value: JsValue) -> Result<JsRenderOptions, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(JsRenderOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn render_options(parsed: &JsRenderOptions) -> Result<RenderOptions, JsValue> {
    let mut out = RenderOptions::default();
    match parsed.decoder.as_deref() {
        None | Some("textContent") => {}
        Some("entityTable") => out.decoder = Decoder::EntityTable,
        Some(other) => {
            return Err(JsValue::from_str(&format!(
                "unknown decoder `{}`, expected textContent | entityTable",
                other
            )));
        }
    }
    if parsed.multi_line_math.unwrap_or(false) {
        out.math_mode = MathMode::MultiLine;
    }
    let defaults = HeadingLevels::default();
    out.headings = HeadingLevels {
        top: parsed.top_heading.unwrap_or(defaults.top),
        sub: parsed.sub_heading.unwrap_or(defaults.sub),
    };
    let mut labels = match parsed.labels.as_deref() {
        None | Some("en") => Labels::default(),
        Some("bn") => Labels::bengali(),
        Some(other) => {
            return Err(JsValue::from_str(&format!(
                "unknown labels `{}`, expected en | bn",
                other
            )));
        }
    };
    if let Some(question) = &parsed.question_label {
        labels.question = question.clone();
    }
    if let Some(answer) = &parsed.answer_label {
        labels.answer = answer.clone();
    }
    if let Some(explanation) = &parsed.explanation_label {
        labels.explanation = explanation.clone();
    }
    out.labels = labels;
    Ok(out)
}
