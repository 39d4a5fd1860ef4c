//! Command-line interface for exparse
//! Analyzes an arithmetic expression and prints its tokens, derivation steps or tree.
//!
//! Usage:
//!   exparse inspect `<expr>` [--format `<format>`]   - Print one stage of the analysis
//!   exparse inspect --file `<path>`                  - Read the expression from a file
//!   exparse view [`<expr>`]                          - Open the interactive TUI viewer
//!   exparse list-formats                           - List all available formats
mod viewer;

use clap::{Arg, ArgAction, ArgMatches, Command};
use config::ConfigError;
use exparse::expr::config::{ExparseConfig, Loader};
use exparse::expr::processor::{
    available_formats, process_file, process_source, ProcessingSpec,
};

const USER_CONFIG: &str = "exparse.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .help("Configuration file layered over the defaults (default: ./exparse.toml if present)");
    let skip_whitespace_arg = Arg::new("skip-whitespace")
        .long("skip-whitespace")
        .help("Skip whitespace between tokens instead of rejecting it")
        .action(ArgAction::SetTrue);
    let order_arg = Arg::new("derivation-order")
        .long("derivation-order")
        .help("Where wrap productions go in the log")
        .value_parser(["leftmost", "decision"]);

    let matches = Command::new("exparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting how arithmetic expressions are lexed and parsed")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("inspect")
                .about("Analyze an expression and print the requested output")
                .arg(
                    Arg::new("expression")
                        .help("The expression to analyze")
                        .required_unless_present("file")
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('i')
                        .help("Read the expression from a file")
                        .conflicts_with("expression"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'report-simple', 'ast-treeviz', 'token-json')"),
                )
                .arg(config_arg.clone())
                .arg(skip_whitespace_arg.clone())
                .arg(order_arg.clone()),
        )
        .subcommand(
            Command::new("view")
                .about("Open an interactive TUI viewer")
                .arg(
                    Arg::new("expression")
                        .help("Initial expression")
                        .index(1),
                )
                .arg(config_arg)
                .arg(skip_whitespace_arg)
                .arg(order_arg),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("inspect", inspect_matches)) => handle_inspect_command(inspect_matches),
        Some(("view", view_matches)) => handle_view_command(view_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

/// Defaults, then the user file, then flags
fn load_config(matches: &ArgMatches) -> Result<ExparseConfig, ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(USER_CONFIG),
    };
    if matches.get_flag("skip-whitespace") {
        loader = loader.set_override("lexer.skip_whitespace", true)?;
    }
    if let Some(order) = matches.get_one::<String>("derivation-order") {
        loader = loader.set_override("parser.derivation_order", order.as_str())?;
    }
    loader.build()
}

fn config_or_exit(matches: &ArgMatches) -> ExparseConfig {
    load_config(matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) {
    let config = config_or_exit(matches);
    let format = matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| config.output.format.clone());

    let spec = ProcessingSpec::from_string(&format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("\nAvailable formats:");
        for name in available_formats() {
            eprintln!("  {}", name);
        }
        std::process::exit(1);
    });

    let result = match matches.get_one::<String>("file") {
        Some(path) => process_file(path, &spec, &config),
        None => {
            let expression = matches
                .get_one::<String>("expression")
                .map(String::as_str)
                .unwrap_or_default();
            process_source(expression, &spec, &config)
        }
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            log::debug!("inspect failed: {:?}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the view command
fn handle_view_command(matches: &ArgMatches) {
    let config = config_or_exit(matches);
    let initial = matches
        .get_one::<String>("expression")
        .cloned()
        .unwrap_or_default();

    if let Err(e) = viewer::viewer_main::run_viewer(initial, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for name in available_formats() {
        println!("  {}", name);
    }
}
