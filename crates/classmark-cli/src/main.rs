//! Command line front end for the class note renderer.

mod error;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use classmark_core::{
    Decoder, Diagnostic, DiagnosticSeverity, Labels, MathMode, RenderOptions,
    format_editor_preview, render_document, sanitize_html,
};
use classmark_renderer::Renderer;

use error::CliError;

/// Render authored class notes to HTML.
#[derive(Parser, Debug)]
#[command(name = "classmark-cli", version, about)]
struct Cli {
    /// Print the bare fragment instead of a full preview page.
    #[arg(long)]
    raw: bool,

    /// Pass the output through the allow-list sanitizer.
    #[arg(long)]
    sanitized: bool,

    /// Run the editor preview formatter on raw editor HTML instead of the
    /// note pipeline.
    #[arg(long)]
    editor_preview: bool,

    /// Labels used in question cards.
    #[arg(long, value_enum, default_value_t = LabelSet::En)]
    labels: LabelSet,

    /// Whether a `$$` span may cross a line break.
    #[arg(long, value_enum, default_value_t = MathArg::Single)]
    math: MathArg,

    /// How markup and entities are decoded.
    #[arg(long, value_enum, default_value_t = DecoderArg::Text)]
    decoder: DecoderArg,

    /// Report diagnostics on stderr.
    #[arg(long, value_enum)]
    diagnostics: Option<DiagnosticsMode>,

    /// Write classmark.css into this directory and link it from the page.
    #[arg(long, value_name = "DIR")]
    css_out: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Input file; stdin when omitted.
    input: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LabelSet {
    En,
    Bn,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MathArg {
    Single,
    Multi,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecoderArg {
    Text,
    Entities,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DiagnosticsMode {
    Json,
    Pretty,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let source = read_source(cli.input.as_ref())?;
    tracing::debug!(bytes = source.len(), "read input");

    let html = if cli.editor_preview {
        format_editor_preview(&source)
    } else {
        let result = render_document(&source, &render_options(cli));
        if let Some(mode) = cli.diagnostics {
            emit_diagnostics(&result.diagnostics, mode)?;
        }
        result.html
    };
    let html = if cli.sanitized {
        sanitize_html(&html)
    } else {
        html
    };

    if cli.raw {
        return Ok(html);
    }

    let renderer = Renderer::new();
    let inline_css = match &cli.css_out {
        Some(dir) => {
            renderer
                .generate_files(dir)
                .map_err(|source| CliError::WriteCss {
                    path: dir.clone(),
                    source,
                })?;
            false
        }
        None => true,
    };
    Ok(renderer.embed_html(&html, inline_css))
}

fn read_source(input: Option<&PathBuf>) -> Result<String, CliError> {
    match input {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::ReadInput {
            path: path.clone(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::ReadStdin)?;
            Ok(buffer)
        }
    }
}

fn render_options(cli: &Cli) -> RenderOptions {
    RenderOptions {
        decoder: match cli.decoder {
            DecoderArg::Text => Decoder::TextContent,
            DecoderArg::Entities => Decoder::EntityTable,
        },
        math_mode: match cli.math {
            MathArg::Single => MathMode::SingleLine,
            MathArg::Multi => MathMode::MultiLine,
        },
        labels: match cli.labels {
            LabelSet::En => Labels::default(),
            LabelSet::Bn => Labels::bengali(),
        },
        ..RenderOptions::default()
    }
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    code: &'a str,
    severity: &'static str,
    message: &'a str,
    range: JsonRange,
}

#[derive(Serialize)]
struct JsonRange {
    start: JsonPosition,
    end: JsonPosition,
}

#[derive(Serialize)]
struct JsonPosition {
    line: usize,
    character: usize,
}

fn emit_diagnostics(diagnostics: &[Diagnostic], mode: DiagnosticsMode) -> Result<(), CliError> {
    match mode {
        DiagnosticsMode::Json => {
            let entries: Vec<JsonDiagnostic<'_>> =
                diagnostics.iter().map(json_diagnostic).collect();
            eprintln!("{}", serde_json::to_string_pretty(&entries)?);
        }
        DiagnosticsMode::Pretty => {
            for diagnostic in diagnostics {
                eprintln!("{}", diagnostic_to_pretty(diagnostic));
            }
        }
    }
    Ok(())
}

fn json_diagnostic(diagnostic: &Diagnostic) -> JsonDiagnostic<'_> {
    let range = diagnostic.range;
    JsonDiagnostic {
        code: diagnostic.code,
        severity: severity_label(diagnostic.severity),
        message: &diagnostic.message,
        range: JsonRange {
            start: JsonPosition {
                line: range.start.line,
                character: range.start.character,
            },
            end: JsonPosition {
                line: range.end.line,
                character: range.end.character,
            },
        },
    }
}

fn diagnostic_to_pretty(diagnostic: &Diagnostic) -> String {
    let start_line = diagnostic.range.start.line + 1;
    let start_col = diagnostic.range.start.character + 1;
    format!(
        "{}:{}:{} {} {}",
        start_line,
        start_col,
        severity_label(diagnostic.severity),
        diagnostic.code,
        diagnostic.message
    )
}

fn severity_label(severity: DiagnosticSeverity) -> &'static str {
    match severity {
        DiagnosticSeverity::Warning => "warning",
        DiagnosticSeverity::Note => "note",
    }
}
