//! MIPS-style instruction-level simulator CLI.
//!
//! This binary runs one program to completion and prints the final state. It performs:
//! 1. **Loading:** Reads the instruction file, the memory image, and an optional JSON config.
//! 2. **Execution:** Runs until HALT, fall-off, a fault, or the instruction ceiling.
//! 3. **Reporting:** Prints registers, non-zero memory, and statistics as text or JSON.
//!
//! Logging goes to stderr through `tracing-subscriber`; `RUST_LOG` overrides the level.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mipsim_core::config::Config;
use mipsim_core::sim::{Simulator, loader};

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    author,
    version,
    about = "MIPS-style instruction-level simulator with a direct-mapped write-back cache",
    long_about = "Run a program against an initial memory image and print the final state.\n\nExamples:\n  mipsim --instructions prog.txt --memory data.txt\n  mipsim -i prog.txt -m data.txt --config cache.json --json"
)]
struct Cli {
    /// Program file: one instruction per line.
    #[arg(short, long)]
    instructions: PathBuf,

    /// Memory image: `binary_address,decimal_value` per line.
    #[arg(short, long)]
    memory: Option<PathBuf>,

    /// JSON configuration file (memory size, cache geometry, run limits).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop with an error after this many instructions (overrides the config).
    #[arg(long)]
    max_instructions: Option<u64>,

    /// Start with the data cache enabled.
    #[arg(long)]
    cache_enabled: bool,

    /// Log every executed instruction.
    #[arg(short, long)]
    trace: bool,

    /// Print the final report as JSON.
    #[arg(long)]
    json: bool,

    /// Raise the default log level to `debug`.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("\n[!] FATAL: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("could not read config '{}': {e}", path.display()))?;
    Config::from_json(&text).map_err(|e| format!("config '{}': {e}", path.display()))
}

/// Loads inputs, runs the simulator, and prints the report.
///
/// Returns `ExitCode::FAILURE` when the run ended in a fault; the report is still printed.
fn run(cli: &Cli) -> Result<ExitCode, String> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.max_instructions.is_some() {
        config.general.max_instructions = cli.max_instructions;
    }
    config.general.trace_instructions |= cli.trace;
    config.cache.enabled_at_start |= cli.cache_enabled;

    let program = loader::load_program(&cli.instructions).map_err(|e| e.to_string())?;
    let image = match &cli.memory {
        Some(path) => loader::load_memory_image(path).map_err(|e| e.to_string())?,
        None => Default::default(),
    };
    info!(
        instructions = program.len(),
        memory_words = image.len(),
        "inputs loaded"
    );

    let mut sim = Simulator::new(program, &image, &config).map_err(|e| e.to_string())?;
    let outcome = sim.run();
    let report = sim.report();

    if cli.json {
        println!("{}", report.to_json().map_err(|e| e.to_string())?);
    } else {
        print!("{report}");
    }

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(fault) => {
            error!(pc = fault.pc, "run ended with a fault");
            Ok(ExitCode::FAILURE)
        }
    }
}
