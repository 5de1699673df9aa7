//! Settings for lexing and output
//!
//! The built-in values live in `defaults/mlg.default.toml`, compiled into the crate.
//! A [`Loader`] starts from them, stacks settings files and single keys on top (later
//! layers win) and produces an [`MlgConfig`].

use crate::mlg::formats::OutputFormat;
use crate::mlg::lexing::LexOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/mlg.default.toml");

/// Every setting, after all layers are merged
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MlgConfig {
    pub lexing: LexingConfig,
    pub output: OutputConfig,
}

/// Knobs forwarded to the lexer as [`LexOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexingConfig {
    pub trailing_newlines: usize,
    pub report_trailing_whitespace: bool,
}

/// What the CLI prints when no flag says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Name of the processing configuration to run
    pub pipeline: String,
    pub format: OutputFormat,
}

impl From<&LexingConfig> for LexOptions {
    fn from(config: &LexingConfig) -> Self {
        LexOptions {
            trailing_newlines: config.trailing_newlines,
            report_trailing_whitespace: config.report_trailing_whitespace,
        }
    }
}

/// Builds an [`MlgConfig`] from the built-in values plus any number of layers
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the built-in values
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Stack a TOML settings file. `build` fails if it does not exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Stack a TOML settings file if it exists, e.g. `mlg.toml` in the working directory.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Stack settings given as TOML text
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Set one dotted key such as `output.format`, above every file layer
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and check them against [`MlgConfig`]
    pub fn build(self) -> Result<MlgConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in settings with nothing stacked on top
pub fn load_defaults() -> Result<MlgConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.lexing.trailing_newlines, 3);
        assert!(config.lexing.report_trailing_whitespace);
        assert_eq!(config.output.pipeline, "default");
        assert_eq!(config.output.format, OutputFormat::Simple);
    }

    #[test]
    fn defaults_match_lex_options() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(LexOptions::from(&config.lexing), LexOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .set_override("lexing.report_trailing_whitespace", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(!config.lexing.report_trailing_whitespace);
    }

    #[test]
    fn layers_toml_over_defaults() {
        let config = Loader::new()
            .with_toml_str("[lexing]\ntrailing_newlines = 5\n")
            .build()
            .expect("config to build");
        assert_eq!(config.lexing.trailing_newlines, 5);
        assert!(config.lexing.report_trailing_whitespace);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("does/not/exist/mlg.toml")
            .build()
            .expect("config to build");
        assert_eq!(config, load_defaults().expect("defaults to deserialize"));
    }

    #[test]
    fn required_file_must_exist() {
        let result = Loader::new().with_file("does/not/exist/mlg.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("output.format", "xml")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
