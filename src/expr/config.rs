//! Layered configuration for exparse
//!
//! The bottom layer is `defaults/exparse.default.toml`, compiled in. A [`Loader`]
//! stacks user files and single-key overrides above it and deserializes the
//! result into [`ExparseConfig`].

use crate::expr::lexer::LexOptions;
use crate::expr::parser::DerivationOrder;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/exparse.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExparseConfig {
    pub lexer: LexerConfig,
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LexerConfig {
    pub skip_whitespace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParserConfig {
    pub derivation_order: DerivationOrder,
}

/// Controls what `inspect` prints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Processing spec name, e.g. `ast-treeviz`
    pub format: String,
    /// Longest label shown by the treeviz formatter
    pub truncate_labels: usize,
}

impl ExparseConfig {
    pub fn lex_options(&self) -> LexOptions {
        LexOptions {
            skip_whitespace: self.lexer.skip_whitespace,
        }
    }
}

/// Same values as the embedded defaults file
impl Default for ExparseConfig {
    fn default() -> Self {
        ExparseConfig {
            lexer: LexerConfig {
                skip_whitespace: false,
            },
            parser: ParserConfig {
                derivation_order: DerivationOrder::Leftmost,
            },
            output: OutputConfig {
                format: "report-simple".to_string(),
                truncate_labels: 30,
            },
        }
    }
}

/// Builds an [`ExparseConfig`] from the embedded defaults plus whatever the
/// caller stacks on top; later layers win
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Stack a TOML file that must exist
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Stack a TOML file if it exists, such as `./exparse.toml`
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        log::debug!("config layer {} (required: {})", path.display(), required);
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Set one dotted key, e.g. `lexer.skip_whitespace`, above every file
    pub fn set_override<V>(mut self, key: &str, value: V) -> Result<Self, ConfigError>
    where
        V: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ExparseConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = Loader::new().build().expect("defaults to deserialize");
        assert_eq!(config, ExparseConfig::default());
        assert!(!config.lexer.skip_whitespace);
        assert_eq!(config.parser.derivation_order, DerivationOrder::Leftmost);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.derivation_order", "decision")
            .expect("override to apply")
            .set_override("lexer.skip_whitespace", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.derivation_order, DerivationOrder::Decision);
        assert!(config.lex_options().skip_whitespace);
    }

    #[test]
    fn rejects_unknown_derivation_order() {
        let result = Loader::new()
            .set_override("parser.derivation_order", "rightmost")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("does/not/exist.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "report-simple");
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("does/not/exist.toml").build().is_err());
    }

    #[test]
    fn user_file_sits_between_defaults_and_overrides() {
        let dir = std::env::temp_dir().join(format!("exparse-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("exparse.toml");
        std::fs::write(
            &path,
            "[lexer]\nskip_whitespace = true\n\n[output]\nformat = \"ast-dot\"\n",
        )
        .unwrap();

        let config = Loader::new()
            .with_file(&path)
            .set_override("output.format", "ast-tag")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.lexer.skip_whitespace);
        assert_eq!(config.output.format, "ast-tag");
        assert_eq!(config.output.truncate_labels, 30);
    }
}
