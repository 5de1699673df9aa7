//! Processing configuration system for mlg pipelines
//!
//! A configuration names the [Stage] at which the pipeline stops. The standard set is:
//!
//!     tokens-phase1   raw tokens and collected arguments
//!     tokens-phase2   indentation resolved into Indent/UnIndent/LineBreak
//!     tokens-phase3   balanced Begin/End structure
//!     default         same as tokens-phase3

use crate::mlg::lexing::Stage;
use std::collections::HashMap;

/// A named configuration specifying where the pipeline stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub name: String,
    pub description: String,
    pub stage: Stage,
}

/// Registry of processing configurations
#[derive(Debug, Clone)]
pub struct ConfigRegistry {
    configs: HashMap<String, ProcessingConfig>,
}

impl ConfigRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ConfigRegistry {
            configs: HashMap::new(),
        }
    }

    /// Register a configuration, replacing any with the same name
    pub fn register(&mut self, config: ProcessingConfig) {
        self.configs.insert(config.name.clone(), config);
    }

    pub fn get(&self, name: &str) -> Option<&ProcessingConfig> {
        self.configs.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// List all configurations (sorted by name)
    pub fn list_all(&self) -> Vec<&ProcessingConfig> {
        let mut configs: Vec<_> = self.configs.values().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        configs
    }

    /// Create registry with standard configurations
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ProcessingConfig {
            name: "default".into(),
            description: "Full pipeline: balanced structural tokens".into(),
            stage: Stage::Phase3,
        });

        registry.register(ProcessingConfig {
            name: "tokens-phase1".into(),
            description: "Raw tokens with collected arguments".into(),
            stage: Stage::Phase1,
        });

        registry.register(ProcessingConfig {
            name: "tokens-phase2".into(),
            description: "Indentation resolved into Indent/UnIndent/LineBreak".into(),
            stage: Stage::Phase2,
        });

        registry.register(ProcessingConfig {
            name: "tokens-phase3".into(),
            description: "Balanced Begin/End structural tokens".into(),
            stage: Stage::Phase3,
        });

        registry
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
