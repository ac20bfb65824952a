use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    if let Some(path) = env::var_os("CARGO_BIN_EXE_classmark-cli") {
        return PathBuf::from(path);
    }
    if let Some(path) = env::var_os("CARGO_BIN_EXE_classmark_cli") {
        return PathBuf::from(path);
    }
    let exe = env::current_exe().expect("current exe");
    let mut debug_dir = exe.as_path();
    while let Some(parent) = debug_dir.parent() {
        if parent.file_name().and_then(|name| name.to_str()) == Some("debug") {
            let candidate = parent.join("classmark-cli");
            if candidate.exists() {
                return candidate;
            }
        }
        debug_dir = parent;
    }
    panic!("binary path missing");
}

fn unique_name(name: &str) -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).expect("time");
    format!(
        "classmark_cli_{}_{}_{}",
        name,
        now.as_secs(),
        now.subsec_nanos()
    )
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{}.txt", unique_name(name)));
    fs::write(&path, contents).expect("write temp file");
    path
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin_path()).args(args).output().expect("run")
}

#[test]
fn render_wraps_html_with_stylesheet() {
    let input = temp_file("render", "Paragraph.\n");
    let output = run(&[input.to_str().expect("path")]);

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<!DOCTYPE html>"), "expected HTML wrapper");
    assert!(stdout.contains("<style>"), "expected inline CSS");
    assert!(stdout.contains("Paragraph.<br />"));
}

#[test]
fn raw_outputs_fragment_html() {
    let input = temp_file("raw", "# Ratio\nParagraph.");
    let output = run(&["--raw", input.to_str().expect("path")]);

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "<h1>Ratio</h1><br />Paragraph.");
}

#[test]
fn css_out_writes_stylesheet_and_links_it() {
    let input = temp_file("css_out", "Paragraph.");
    let dir = env::temp_dir().join(unique_name("css_dir"));
    let output = run(&[
        "--css-out",
        dir.to_str().expect("path"),
        input.to_str().expect("path"),
    ]);

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("href=\"classmark.css\""));
    assert!(!stdout.contains("<style>"));
    assert!(dir.join("classmark.css").exists(), "expected stylesheet file");
    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn diagnostics_pretty_reports_warning_without_failing() {
    let input = temp_file("warn_unclosed", "[WARN] careful\n");
    let output = run(&[
        "--diagnostics",
        "pretty",
        "--raw",
        input.to_str().expect("path"),
    ]);

    assert!(output.status.success(), "diagnostics must not fail the run");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("1:1 warning W_WARN_UNCLOSED"),
        "expected W_WARN_UNCLOSED in stderr, got {stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "[WARN] careful<br />");
}

#[test]
fn diagnostics_json_reports_code_and_range() {
    let input = temp_file("math_unclosed", "x = $$a/b\n");
    let output = run(&[
        "--diagnostics",
        "json",
        "--raw",
        input.to_str().expect("path"),
    ]);

    assert!(output.status.success(), "expected success exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("\"code\": \"W_MATH_UNCLOSED\""),
        "expected W_MATH_UNCLOSED in stderr, got {stderr}"
    );
    assert!(stderr.contains("\"character\": 4"));
}

#[test]
fn diagnostics_json_prints_empty_list_for_clean_input() {
    let input = temp_file("clean", "Plain text.");
    let output = run(&["--diagnostics", "json", input.to_str().expect("path")]);

    assert!(output.status.success(), "expected success exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.trim(), "[]");
}

#[test]
fn bengali_labels_are_used_for_question_cards() {
    let input = temp_file(
        "labels",
        "Q: 2+2?\nA. 3\nB. 4\nC. 5\nD. 6\nAns: B\n",
    );
    let output = run(&["--raw", "--labels", "bn", input.to_str().expect("path")]);

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<div class=\"mcq-badge\">প্রশ্ন 1</div>"));
    assert!(stdout.contains("<strong>সঠিক উত্তর: B</strong>"));
}

#[test]
fn editor_preview_formats_exponents() {
    let input = temp_file("preview", "x^2 + \\sqrt{y}");
    let output = run(&["--raw", "--editor-preview", input.to_str().expect("path")]);

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "x<sup>2</sup> + √y");
}

#[test]
fn missing_input_file_exits_with_error() {
    let missing = env::temp_dir().join(unique_name("missing"));
    let output = run(&[missing.to_str().expect("path")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn unknown_label_set_is_a_usage_error() {
    let input = temp_file("usage", "Paragraph.");
    let output = run(&["--labels", "fr", input.to_str().expect("path")]);

    assert_eq!(output.status.code(), Some(2));
}
