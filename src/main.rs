//! mem-sim - Main Entry Point
//!
//! Usage:
//!   mem-sim [OPTIONS] paging --pages <LIST> --frames <N> [--policy fifo|lru|both]
//!   mem-sim [OPTIONS] segments --sizes <LIST> --memory <N>
//!
//! Options:
//!   -v, --verbose        Raise log verbosity (repeatable)
//!   --format text|json   Report format on stdout

use std::fmt::Write as _;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mem_sim::io::{parse_int, parse_int_list};
use mem_sim::{allocate, segments_from_sizes, simulate, Allocation, Policy, Simulation};

/// Command-line configuration
#[derive(Parser, Debug)]
#[command(name = "mem-sim")]
#[command(about = "Simulate page replacement (FIFO, LRU) and segment allocation")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Report format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a page reference string under FIFO and/or LRU
    Paging {
        /// Comma-separated page numbers, e.g. 1,2,3,1
        #[arg(short, long, allow_hyphen_values = true)]
        pages: String,

        /// Number of frames
        #[arg(short, long, allow_hyphen_values = true)]
        frames: String,

        #[arg(long, value_enum, default_value_t = PolicyChoice::Both)]
        policy: PolicyChoice,
    },
    /// Place segments contiguously in a linear memory
    Segments {
        /// Comma-separated segment sizes; ids follow list order
        #[arg(short, long, allow_hyphen_values = true)]
        sizes: String,

        /// Total memory size
        #[arg(short, long, allow_hyphen_values = true)]
        memory: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PolicyChoice {
    Fifo,
    Lru,
    Both,
}

impl PolicyChoice {
    fn policies(self) -> &'static [Policy] {
        match self {
            PolicyChoice::Fifo => &[Policy::Fifo],
            PolicyChoice::Lru => &[Policy::Lru],
            PolicyChoice::Both => &Policy::ALL,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main logic separated from main() for cleaner error handling
fn run(cli: &Cli) -> Result<()> {
    let report = build_report(&cli.command, cli.format)?;
    print!("{}", report);
    Ok(())
}

fn build_report(command: &Command, format: Format) -> Result<String> {
    match command {
        Command::Paging { pages, frames, policy } => {
            // Parse everything before simulating anything
            let references = parse_int_list(pages)?;
            let frame_count = parse_int(frames)?;
            info!(accesses = references.len(), frame_count, "running page replacement");

            let simulations: Vec<Simulation> = policy
                .policies()
                .iter()
                .map(|&p| simulate(p, &references, frame_count))
                .collect();
            paging_report(&simulations, format)
        }
        Command::Segments { sizes, memory } => {
            let memory_size = parse_int(memory)?;
            let mut segments = segments_from_sizes(&parse_int_list(sizes)?);
            info!(segments = segments.len(), memory_size, "running segment allocation");

            let allocation = allocate(&mut segments, memory_size);
            allocation_report(&allocation, format)
        }
    }
}

fn paging_report(simulations: &[Simulation], format: Format) -> Result<String> {
    let mut out = String::new();
    match format {
        Format::Text => {
            for sim in simulations {
                write!(out, "{}", sim.history.grid(sim.policy.name()))?;
                writeln!(out, "Total Page Faults ({}): {}", sim.policy, sim.faults)?;
                writeln!(out)?;
            }
        }
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(simulations)?)?,
    }
    Ok(out)
}

fn allocation_report(allocation: &Allocation, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => format!("Segment Allocation: {}\n", allocation),
        Format::Json => format!("{}\n", serde_json::to_string_pretty(allocation)?),
    })
}
