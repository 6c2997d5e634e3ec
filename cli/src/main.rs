use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use parse_args::{ParseConfig, parse_args};
use parse_args_core::ParseResult;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "parse-args")]
#[command(about = "Schema-driven command line argument parsing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments against the option schema in a configuration file.
    Parse(ParseArgs),
    /// Validate one or more parse configuration files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// JSON or YAML parse configuration (options, strict, allowPositionals, ...).
    #[arg(long)]
    config: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Override the configured strict mode.
    #[arg(long)]
    strict: Option<bool>,
    /// Override whether positionals are allowed.
    #[arg(long)]
    allow_positionals: Option<bool>,
    /// Include the token trace in the output.
    #[arg(long)]
    tokens: bool,
    /// Accept `--no-<name>` for declared boolean options.
    #[arg(long)]
    allow_negative: bool,
    /// Arguments to parse; when omitted, the configured `args` are used.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let mut config = ParseConfig::load(&args.config)
        .map_err(|err| format!("Failed to load '{}': {err}", args.config.display()))?;

    if !args.args.is_empty() || config.args.is_none() {
        config.args = Some(args.args);
    }
    if let Some(strict) = args.strict {
        config.strict = Some(strict);
    }
    if let Some(allow) = args.allow_positionals {
        config.allow_positionals = Some(allow);
    }
    if args.tokens {
        config.tokens = Some(true);
    }
    if args.allow_negative {
        config.allow_negative = Some(true);
    }
    debug!(config = %args.config.display(), "Loaded parse configuration");

    let result = parse_args(&config).map_err(|err| format!("{} ({})", err, err.code()))?;
    println!("{}", format_result(&result, args.format)?);
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    for path in &args.inputs {
        let config = ParseConfig::load(path)
            .map_err(|err| format!("Invalid configuration '{}': {err}", path.display()))?;
        debug!(path = %path.display(), options = config.options.len(), "Validated configuration");
    }
    println!("Validated {} configuration file(s).", args.inputs.len());
    Ok(())
}

fn format_result(result: &ParseResult, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|err| format!("Failed to serialize result: {err}")),
        CliOutputFormat::Yaml => serde_yaml::to_string(result)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|err| format!("Failed to serialize result: {err}")),
    }
}
