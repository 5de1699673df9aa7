//! Pipeline executor that runs processing configurations

use crate::mlg::formats::{serialize_tokens, FormatError, OutputFormat};
use crate::mlg::lexing::{lex_stage, LexOptions, LexOutput};
use crate::mlg::pipeline::config::{ConfigRegistry, ProcessingConfig};
use thiserror::Error;

/// Errors during pipeline execution
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Config '{0}' not found")]
    ConfigNotFound(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Executes processing configurations
#[derive(Debug, Clone)]
pub struct PipelineExecutor {
    registry: ConfigRegistry,
    options: LexOptions,
}

impl PipelineExecutor {
    /// Create executor with default configurations
    pub fn new() -> Self {
        Self::with_registry(ConfigRegistry::with_defaults())
    }

    /// Create executor with custom registry
    pub fn with_registry(registry: ConfigRegistry) -> Self {
        Self {
            registry,
            options: LexOptions::default(),
        }
    }

    /// Use `options` for every document this executor lexes
    pub fn with_options(mut self, options: LexOptions) -> Self {
        self.options = options;
        self
    }

    /// Execute a named configuration on `source`. `path` is only used to label diagnostics.
    pub fn execute(
        &self,
        config_name: &str,
        source: &str,
        path: &str,
    ) -> Result<LexOutput, ExecutionError> {
        let config = self
            .registry
            .get(config_name)
            .ok_or_else(|| ExecutionError::ConfigNotFound(config_name.to_string()))?;

        let output = lex_stage(source, path, config.stage, &self.options);
        tracing::debug!(
            config = config_name,
            path,
            tokens = output.tokens.len(),
            diagnostics = output.diagnostics.len(),
            "pipeline executed"
        );
        Ok(output)
    }

    /// Execute a named configuration and render its tokens. Diagnostics are returned as-is.
    pub fn execute_and_serialize(
        &self,
        config_name: &str,
        source: &str,
        path: &str,
        format: OutputFormat,
    ) -> Result<(String, LexOutput), ExecutionError> {
        let output = self.execute(config_name, source, path)?;
        let rendered = serialize_tokens(&output.tokens, format)?;
        Ok((rendered, output))
    }

    /// List all available configurations
    pub fn list_configs(&self) -> Vec<&ProcessingConfig> {
        self.registry.list_all()
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}
