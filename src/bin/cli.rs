use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use confaudit::config::Config;
use confaudit::error::AuditError;
use confaudit::output::OutputFormat;
use confaudit::rules::{builtin, Dialect};
use confaudit::AuditOptions;

#[derive(Parser)]
#[command(
    name = "confaudit",
    about = "Rule-based configuration compliance scanner",
    version,
    author
)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit one configuration file against its hardening catalogue
    Audit {
        /// Path to the configuration file
        path: PathBuf,

        /// Dialect (ssh, apache, nginx, gitlab); detected from the file
        /// name when omitted
        #[arg(long, short = 'd')]
        dialect: Option<String>,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, summary)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Minimum score/total ratio to pass, overriding the config file
        #[arg(long)]
        min_ratio: Option<f64>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Sweep a directory tree for secrets, insecure commands and
    /// disabled project protections
    Sweep {
        /// Root of the tree to sweep
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, summary)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List every built-in rule across all catalogues
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .confaudit.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.debug);

    let result = match cli.command {
        Commands::Audit {
            path,
            dialect,
            config,
            format,
            min_ratio,
            output,
        } => cmd_audit(path, dialect, config, format, min_ratio, output),
        Commands::Sweep {
            path,
            config,
            format,
            output,
        } => cmd_sweep(path, config, format, output),
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

/// Initialize tracing based on CLI flags. `RUST_LOG` wins when set.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn parse_format(format_str: &str) -> OutputFormat {
    OutputFormat::from_str_lenient(format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    })
}

fn cmd_audit(
    path: PathBuf,
    dialect_str: Option<String>,
    config: Option<PathBuf>,
    format_str: String,
    min_ratio: Option<f64>,
    output_path: Option<PathBuf>,
) -> Result<i32, AuditError> {
    let format = parse_format(&format_str);

    let dialect = match dialect_str {
        Some(s) => {
            Some(Dialect::from_str_lenient(&s).ok_or_else(|| AuditError::UnknownDialect(s))?)
        }
        None => None,
    };

    let options = AuditOptions {
        dialect,
        config_path: config,
        min_ratio_override: min_ratio,
    };

    let outcome = confaudit::audit(&path, &options)?;
    let rendered = confaudit::render_outcome(&outcome, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = non-compliant
    Ok(if outcome.pass() { 0 } else { 1 })
}

fn cmd_sweep(
    path: PathBuf,
    config_path: Option<PathBuf>,
    format_str: String,
    output_path: Option<PathBuf>,
) -> Result<i32, AuditError> {
    let format = parse_format(&format_str);

    let config_path = config_path.unwrap_or_else(|| path.join(".confaudit.toml"));
    let config = Config::load(&config_path)?;

    let report = confaudit::sweep_path(&path, &config)?;
    let rendered = confaudit::output::render_sweep(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    let clean = report.files_with_secrets == 0
        && report.files_with_insecure_commands == 0
        && report.findings.is_empty();
    Ok(if clean { 0 } else { 1 })
}

fn cmd_list_rules(format_str: String) -> Result<i32, AuditError> {
    let rules = builtin::all_summaries();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<8} {:<44} CHECK", "DIALECT", "DIRECTIVE");
            println!("{}", "-".repeat(100));
            for rule in &rules {
                println!("{:<8} {:<44} {}", rule.dialect, rule.directive, rule.check);
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, AuditError> {
    let path = PathBuf::from(".confaudit.toml");

    if path.exists() && !force {
        eprintln!(".confaudit.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .confaudit.toml");

    Ok(0)
}
