//! Processing API: analyze an expression and render one stage of the result
//!
//! A processing spec names a stage and a format, e.g. `token-json` or
//! `ast-treeviz`:
//!
//! | stage    | formats                                   |
//! |----------|-------------------------------------------|
//! | `token`  | `simple`, `json`                          |
//! | `steps`  | `simple`, `json`                          |
//! | `ast`    | `treeviz`, `tag`, `sexpr`, `json`, `dot`  |
//! | `report` | `simple`, `json`, `yaml`                  |

use crate::expr::analysis::{analyze, Analysis};
use crate::expr::config::ExparseConfig;
use crate::expr::error::AnalysisError;
use crate::expr::formats::{serialize_ast_tag, to_dot, to_treeviz_str_with_width};
use crate::expr::lexer::Token;
use crate::expr::parser::Production;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Which part of the analysis to output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Steps,
    Ast,
    Report,
}

/// How to render it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Treeviz,
    Tag,
    Sexpr,
    Dot,
}

/// A complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ProcessingStage {
    fn name(self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Steps => "steps",
            ProcessingStage::Ast => "ast",
            ProcessingStage::Report => "report",
        }
    }

    fn formats(self) -> &'static [OutputFormat] {
        match self {
            ProcessingStage::Token | ProcessingStage::Steps => {
                &[OutputFormat::Simple, OutputFormat::Json]
            }
            ProcessingStage::Ast => &[
                OutputFormat::Treeviz,
                OutputFormat::Tag,
                OutputFormat::Sexpr,
                OutputFormat::Json,
                OutputFormat::Dot,
            ],
            ProcessingStage::Report => {
                &[OutputFormat::Simple, OutputFormat::Json, OutputFormat::Yaml]
            }
        }
    }
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Tag => "tag",
            OutputFormat::Sexpr => "sexpr",
            OutputFormat::Dot => "dot",
        }
    }
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "steps" => ProcessingStage::Steps,
            "ast" => ProcessingStage::Ast,
            "report" => ProcessingStage::Report,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "treeviz" => OutputFormat::Treeviz,
            "tag" => OutputFormat::Tag,
            "sexpr" => OutputFormat::Sexpr,
            "dot" => OutputFormat::Dot,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        if !stage.formats().contains(&format) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "Format '{}' not supported for {} stage",
                format.name(),
                stage.name()
            )));
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [
            ProcessingStage::Token,
            ProcessingStage::Steps,
            ProcessingStage::Ast,
            ProcessingStage::Report,
        ]
        .into_iter()
        .flat_map(|stage| {
            stage
                .formats()
                .iter()
                .map(move |&format| ProcessingSpec { stage, format })
        })
        .collect()
    }

    pub fn name(&self) -> String {
        format!("{}-{}", self.stage.name(), self.format.name())
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

/// Analyze `source` and render it according to `spec`
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    config: &ExparseConfig,
) -> Result<String, ProcessingError> {
    let analysis = analyze(source, config)?;
    render(&analysis, spec, config)
}

/// Process an expression stored in a file; surrounding line breaks are dropped
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &ExparseConfig,
) -> Result<String, ProcessingError> {
    let content = fs::read_to_string(file_path.as_ref())?;
    let source = content.trim_end_matches(['\n', '\r']);
    process_source(source, spec, config)
}

/// Render an existing analysis
pub fn render(
    analysis: &Analysis,
    spec: &ProcessingSpec,
    config: &ExparseConfig,
) -> Result<String, ProcessingError> {
    let width = config.output.truncate_labels;
    match (spec.stage, spec.format) {
        (ProcessingStage::Token, OutputFormat::Simple) => Ok(format_tokens(&analysis.tokens)),
        (ProcessingStage::Token, _) => to_json(&analysis.tokens),
        (ProcessingStage::Steps, OutputFormat::Simple) => Ok(format_steps(&analysis.steps)),
        (ProcessingStage::Steps, _) => to_json(&analysis.steps),
        (ProcessingStage::Ast, OutputFormat::Tag) => Ok(serialize_ast_tag(&analysis.tree)),
        (ProcessingStage::Ast, OutputFormat::Sexpr) => Ok(format!("{}\n", analysis.tree)),
        (ProcessingStage::Ast, OutputFormat::Json) => to_json(&analysis.tree),
        (ProcessingStage::Ast, OutputFormat::Dot) => Ok(to_dot(&analysis.tree)),
        (ProcessingStage::Ast, _) => Ok(to_treeviz_str_with_width(&analysis.tree, width)),
        (ProcessingStage::Report, OutputFormat::Json) => to_json(analysis),
        (ProcessingStage::Report, OutputFormat::Yaml) => serde_yaml::to_string(analysis)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        (ProcessingStage::Report, _) => Ok(format_report(analysis, width)),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ProcessingError> {
    serde_json::to_string_pretty(value).map_err(|e| ProcessingError::Serialization(e.to_string()))
}

/// `<NUMBER:2><PLUS:+><NUMBER:3><EOF>`
fn format_tokens(tokens: &[Token]) -> String {
    let mut result: String = tokens.iter().map(|t| t.to_string()).collect();
    result.push('\n');
    result
}

fn format_steps(steps: &[Production]) -> String {
    steps.iter().map(|p| format!("{}\n", p.label())).collect()
}

/// Tokens, derivation steps and tree in one plain-text listing
fn format_report(analysis: &Analysis, width: usize) -> String {
    let mut out = String::from("Tokens:\n");
    for (kind, lexeme) in analysis.token_pairs() {
        out.push_str(&format!("  ({}, {})\n", kind, lexeme));
    }

    out.push_str("\nDerivation steps:\n");
    for (i, step) in analysis.steps.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step));
    }

    out.push_str("\nAST:\n");
    out.push_str(&to_treeviz_str_with_width(&analysis.tree, width));
    out
}
