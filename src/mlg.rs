//! Main module for mlg library functionality

pub mod config;
pub mod diagnostics;
pub mod formats;
pub mod lexing;
pub mod pipeline;
pub mod testing;
pub mod token;
pub mod validation;
