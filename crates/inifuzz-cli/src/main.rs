#![deny(unsafe_code)]

//! inifuzz CLI: replay saved inputs through the fuzz driver outside the fuzz
//! loop, and inspect how the parser reads a file.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inifuzz_config::{HarnessConfig, IniConfig};
use inifuzz_core::{Engine, FuzzDriver, IniParser, ReplayEngine, RunReport, logging};
use tracing::{debug, info};

/// inifuzz: fuzz harness tooling for the INI parser.
#[derive(Parser)]
#[command(name = "inifuzz", version, about, long_about = None)]
struct Cli {
    /// Path to the harness configuration file.
    #[arg(short, long, default_value = "inifuzz.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay corpus entries or crash reproducers through the fuzz driver.
    Replay {
        /// Input files or corpus directories.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Record unexpected failures and continue instead of stopping.
        #[arg(long)]
        keep_going: bool,

        /// Stop after this many trials.
        #[arg(long)]
        runs: Option<usize>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Parse an INI file and print what the parser made of it.
    Parse {
        file: PathBuf,

        /// Print the parsed document as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate and display the harness configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    logging::init(logging::verbosity_level(&config.logging.level, cli.verbose));

    match cli.command {
        Commands::Replay {
            inputs,
            keep_going,
            runs,
            json,
        } => cmd_replay(&config, inputs, keep_going, runs, json),
        Commands::Parse { file, json } => cmd_parse(&file, json),
        Commands::Config { show } => cmd_config(&cli.config, &config, show),
    }
}

fn cmd_replay(
    config: &HarnessConfig,
    inputs: Vec<PathBuf>,
    keep_going: bool,
    runs: Option<usize>,
    json: bool,
) -> Result<ExitCode> {
    let driver = FuzzDriver::from_config(IniParser, &config.candidate);
    info!(candidate = %driver.candidate_path().display(), "replaying through fuzz driver");

    let mut engine = ReplayEngine::new(inputs).with_keep_going(keep_going);
    if let Some(runs) = runs {
        engine = engine.with_max_runs(runs);
    }
    let report = engine.run_loop(&mut |data: &[u8]| driver.run_trial(data))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(if report.crashes.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_parse(file: &Path, json: bool) -> Result<ExitCode> {
    let ini = IniConfig::load(file)?;
    debug!(sections = ini.sections().len(), "parsed file");
    if json {
        println!("{}", serde_json::to_string_pretty(&ini)?);
    } else {
        print!("{}", render_ini(&ini));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_config(config_path: &Path, config: &HarnessConfig, show: bool) -> Result<ExitCode> {
    if show {
        let toml_str = toml::to_string_pretty(config).context("failed to render configuration")?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn load_config(path: &Path) -> Result<HarnessConfig> {
    if path.exists() {
        HarnessConfig::load(path)
            .with_context(|| format!("invalid configuration at '{}'", path.display()))
    } else {
        Ok(HarnessConfig::default())
    }
}

fn render_report(report: &RunReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();
    let _ = writeln!(out, "trials:       {}", stats.total);
    let _ = writeln!(out, "success:      {}", stats.success);
    let _ = writeln!(out, "syntax error: {}", stats.syntax_errors);
    let _ = writeln!(out, "decode error: {}", stats.decode_errors);
    let _ = writeln!(out, "unexpected:   {}", stats.unexpected);
    for crash in &report.crashes {
        let _ = writeln!(out, "crash: {}: {}", crash.input.display(), crash.error);
    }
    out
}

/// Render a document back to INI text, one continuation line per extra
/// value line.
fn render_ini(ini: &IniConfig) -> String {
    let mut out = String::new();
    for (i, section) in ini.sections().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{}]", section.name());
        for (name, value) in section.items() {
            let mut lines = value.split('\n');
            let first = lines.next().unwrap_or_default();
            let _ = writeln!(out, "{name} = {first}");
            for line in lines {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}
