//! Command-line interface for mlg
//! This binary runs the mlg lexer pipeline on a document and prints its token stream or
//! its diagnostics.
//!
//! Usage:
//!   mlg execute `<path>` [--config `<config>`] [--format `<format>`] [--settings `<file>`]
//!   mlg check `<path>` [--settings `<file>`]
//!   mlg list-configs
//!
//! Settings are read from `mlg.toml` in the working directory when present, or from the
//! file given with `--settings`. Logging goes to stderr and is controlled by `MLG_LOG`.

use clap::{Arg, ArgMatches, Command};
use mlg::mlg::config::{Loader, MlgConfig};
use mlg::mlg::formats::{format_diagnostics, OutputFormat};
use mlg::mlg::lexing::{lex_with, LexOptions};
use mlg::mlg::pipeline::PipelineExecutor;
use mlg::mlg::validation::check_structure;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SETTINGS_FILE: &str = "mlg.toml";

fn main() {
    init_tracing();

    let settings_arg = Arg::new("settings")
        .long("settings")
        .short('s')
        .help("TOML settings file layered over the built-in defaults");

    let matches = Command::new("mlg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A structural lexer for mlg documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("execute")
                .about("Execute a processing configuration and print its tokens")
                .arg(
                    Arg::new("path")
                        .help("Path to the mlg file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Processing configuration (see list-configs)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(OutputFormat::ALL.map(OutputFormat::name)),
                )
                .arg(settings_arg.clone()),
        )
        .subcommand(
            Command::new("check")
                .about("Report diagnostics and structural errors")
                .arg(
                    Arg::new("path")
                        .help("Path to the mlg file")
                        .required(true)
                        .index(1),
                )
                .arg(settings_arg),
        )
        .subcommand(Command::new("list-configs").about("List available processing configurations"))
        .get_matches();

    match matches.subcommand() {
        Some(("execute", execute_matches)) => {
            let path = execute_matches.get_one::<String>("path").unwrap();
            let config = load_settings(execute_matches);
            handle_execute_command(path, &config);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            let config = load_settings(check_matches);
            handle_check_command(path, &config);
        }
        Some(("list-configs", _)) => {
            handle_list_configs_command();
        }
        _ => unreachable!(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MLG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Layer the settings file and CLI flags over the defaults.
fn load_settings(matches: &ArgMatches) -> MlgConfig {
    let mut loader = match matches.get_one::<String>("settings") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(SETTINGS_FILE),
    };

    for (flag, setting) in [("config", "output.pipeline"), ("format", "output.format")] {
        // `check` has neither flag
        let value = matches.try_get_one::<String>(flag).ok().flatten().cloned();
        if let Some(value) = value {
            loader = loader.set_override(setting, value).unwrap_or_else(|e| {
                eprintln!("Invalid setting {}: {}", setting, e);
                std::process::exit(1);
            });
        }
    }

    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading settings: {}", e);
        std::process::exit(1);
    })
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Handle the execute command
fn handle_execute_command(path: &str, config: &MlgConfig) {
    let source = read_source(path);

    let executor = PipelineExecutor::new().with_options(LexOptions::from(&config.lexing));
    let (rendered, output) = executor
        .execute_and_serialize(&config.output.pipeline, &source, path, config.output.format)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {}", e);
            std::process::exit(1);
        });

    println!("{}", rendered.trim_end());
    if !output.diagnostics.is_empty() {
        eprintln!("{}", format_diagnostics(&output.diagnostics));
    }
}

/// Handle the check command
fn handle_check_command(path: &str, config: &MlgConfig) {
    let source = read_source(path);
    let output = lex_with(&source, path, &LexOptions::from(&config.lexing));

    let mut failed = output.has_errors();
    if !output.diagnostics.is_empty() {
        eprintln!("{}", format_diagnostics(&output.diagnostics));
    }
    if let Err(e) = check_structure(&output.tokens) {
        eprintln!("{}: structure error: {}", path, e);
        failed = true;
    }

    if failed {
        std::process::exit(1);
    }
    println!("{}: ok", path);
}

/// Handle the list-configs command
fn handle_list_configs_command() {
    let executor = PipelineExecutor::new();
    println!("Available processing configurations:\n");
    for config in executor.list_configs() {
        println!("  {}", config.name);
        println!("    {}", config.description);
    }
}
