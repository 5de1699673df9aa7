//! Processing pipeline
//!
//! Named processing configurations select how far the lexer pipeline runs for a given
//! document. They exist mostly for testing and debugging: the intermediate streams of
//! phase 1 and phase 2 are otherwise never exposed.
//!
//! - config.rs: [ProcessingConfig] and the [ConfigRegistry] of named configurations
//! - executor.rs: [PipelineExecutor], which runs a named configuration on a document

pub mod config;
pub mod executor;

pub use self::config::{ConfigRegistry, ProcessingConfig};
pub use executor::{ExecutionError, PipelineExecutor};
