use anyhow::Result;
use clap::{Parser, Subcommand};
use lockaudit::{
    audit::{match_records, VersionIndex},
    config::Config,
    input::{load_advisories, load_lockfile},
    model::AuditResult,
    output::{format_result_to_string, print_result, OutputFormat},
    AuditError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const FINDINGS: u8 = 2;
    pub const EMPTY_INDEX: u8 = 3;
}

#[derive(Parser)]
#[command(name = "lockaudit")]
#[command(
    author,
    version,
    about = "Audit npm lockfiles against known-compromised package advisories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a lockfile against an advisory list
    Audit {
        /// Path to the lockfile (package-lock.json)
        #[arg(short, long)]
        lockfile: PathBuf,

        /// Path to the compromised-package CSV
        #[arg(short, long)]
        advisories: PathBuf,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Write output to file
        #[arg(short, long)]
        output: Option<String>,

        /// Exit zero even when findings are detected
        #[arg(long)]
        no_fail: bool,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Commands::Audit {
            lockfile,
            advisories,
            format,
            output,
            no_fail,
        } => {
            let format_str = format.unwrap_or(config.default_format.clone());
            let fail_on_findings = !no_fail && config.fail_on_findings;

            run_audit(&config, lockfile, advisories, format_str, output, fail_on_findings)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn run_audit(
    config: &Config,
    lockfile_path: PathBuf,
    advisories_path: PathBuf,
    format: String,
    output_file: Option<String>,
    fail_on_findings: bool,
) -> Result<u8> {
    let format = OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))?;

    let lockfile = load_lockfile(&lockfile_path)?;
    let records = load_advisories(&advisories_path)?;

    let index = match VersionIndex::build(&lockfile) {
        Ok(index) => index,
        Err(AuditError::EmptyIndex) => {
            eprintln!(
                "Error: no dependencies discovered in {}",
                lockfile_path.display()
            );
            return Ok(exit_codes::EMPTY_INDEX);
        }
    };

    let mut result = AuditResult::new(lockfile_path.display().to_string(), index.len());
    result.records_checked = records.len();
    result.findings = match_records(&index, &records);
    result
        .findings
        .retain(|f| !config.ignore.should_ignore_package(&f.package));

    if let Some(path) = output_file {
        let content = format_result_to_string(&result, format)?;
        std::fs::write(&path, content)?;
        println!("Results written to: {}", path);
    } else {
        print_result(&result, format)?;
    }

    if fail_on_findings && !result.is_clean() {
        Ok(exit_codes::FINDINGS)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'lockaudit config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
