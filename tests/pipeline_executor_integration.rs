//! Integration tests for PipelineExecutor
//!
//! These tests validate that the config-based executor:
//! 1. Runs every default configuration on real sample files
//! 2. Stops each configuration at the right pass
//! 3. Serializes the resulting stream in every output format

use mlg::mlg::formats::OutputFormat;
use mlg::mlg::pipeline::{ExecutionError, PipelineExecutor};
use mlg::mlg::token::TokenKind;
use mlg::mlg::validation::check_structure;
use rstest::rstest;
use std::fs;

fn read_sample(name: &str) -> String {
    fs::read_to_string(format!("tests/samples/{}", name)).expect("Failed to read sample document")
}

#[rstest]
#[case("010-definition.mlg")]
#[case("020-theorem.mlg")]
#[case("030-nested-groups.mlg")]
fn test_all_configs_run_cleanly_on_samples(#[case] sample: &str) {
    let executor = PipelineExecutor::new();
    let source = read_sample(sample);

    for config in executor.list_configs() {
        let output = executor
            .execute(&config.name, &source, sample)
            .unwrap_or_else(|e| panic!("{} failed on {}: {}", config.name, sample, e));
        assert!(
            output.diagnostics.is_empty(),
            "{} produced {:?} on {}",
            config.name,
            output.diagnostics,
            sample
        );
        assert!(!output.tokens.is_empty());
    }
}

#[test]
fn test_configs_stop_at_their_pass() {
    let executor = PipelineExecutor::new();
    let source = read_sample("020-theorem.mlg");

    let phase1 = executor.execute("tokens-phase1", &source, "020").unwrap();
    assert!(phase1.tokens.iter().any(|t| t.is(TokenKind::Newline)));
    assert!(!phase1.tokens.iter().any(|t| t.is(TokenKind::LineBreak)));

    let phase2 = executor.execute("tokens-phase2", &source, "020").unwrap();
    assert!(phase2.tokens.iter().any(|t| t.is(TokenKind::LineBreak)));
    assert!(!phase2.tokens.iter().any(|t| t.kind.is_begin()));

    let phase3 = executor.execute("tokens-phase3", &source, "020").unwrap();
    let default = executor.execute("default", &source, "020").unwrap();
    assert_eq!(phase3, default);
    assert_eq!(check_structure(&default.tokens), Ok(()));

    let groups = default
        .tokens
        .iter()
        .filter(|t| t.is(TokenKind::BeginTopLevelGroup))
        .count();
    assert_eq!(groups, 2);
}

#[test]
fn test_nested_groups_sample() {
    let executor = PipelineExecutor::new();
    let source = read_sample("030-nested-groups.mlg");
    let output = executor.execute("default", &source, "030").unwrap();

    // elements, first, second and order each open their own argument group
    let argument_groups = output
        .tokens
        .iter()
        .filter(|t| t.is(TokenKind::BeginArgumentGroup))
        .count();
    assert_eq!(argument_groups, 4);

    let formulation = output
        .tokens
        .iter()
        .find(|t| t.is(TokenKind::Formulation) && t.text.starts_with('\\'))
        .expect("sample has a backtick formulation");
    assert_eq!(formulation.text, r"\forall y");
}

#[test]
fn test_malformed_sample_reports_and_stays_balanced() {
    let executor = PipelineExecutor::new();
    let source = read_sample("040-malformed.mlg");
    let output = executor.execute("default", &source, "040-malformed.mlg").unwrap();

    assert!(output.has_errors());
    assert_eq!(
        output.diagnostics[0].to_string(),
        "040-malformed.mlg:1:10: error[phase1]: expected a terminating \""
    );
    assert_eq!(check_structure(&output.tokens), Ok(()));
}

#[rstest]
#[case(OutputFormat::Simple)]
#[case(OutputFormat::Tree)]
#[case(OutputFormat::Json)]
#[case(OutputFormat::Yaml)]
fn test_execute_and_serialize_every_format(#[case] format: OutputFormat) {
    let executor = PipelineExecutor::new();
    let source = read_sample("010-definition.mlg");
    let (rendered, output) = executor
        .execute_and_serialize("default", &source, "010", format)
        .unwrap();

    assert!(output.diagnostics.is_empty());
    assert!(rendered.contains("Defines"));
}

#[test]
fn test_unknown_config() {
    let executor = PipelineExecutor::new();
    let result = executor.execute_and_serialize("tokens-raw", "a: x\n", "doc", OutputFormat::Json);
    assert!(matches!(result, Err(ExecutionError::ConfigNotFound(name)) if name == "tokens-raw"));
}
