//! Combines component control narratives into a Markdown SSP.
//!
//! Reads `components/<component>/*.yaml` plus the control standard, sorts all
//! narratives into SSP order, and prints Markdown to stdout. With `--separate`
//! each control family goes to its own `<FAMILY>.md` instead; with `--records`
//! the sorted records are printed as NDJSON for other tooling.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use ssp_recombine::{
    ComponentRoster, DEFAULT_COMPONENTS_DIR, DEFAULT_STANDARD_PATH, FamilyCode, NormalizeOptions,
    assemble_ssp, ensure_components_dir, write_records_json, write_separate, write_ssp,
};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "recombine-controls",
    about = "Combine component controls into a simple SSP"
)]
struct Cli {
    /// Include control descriptions from the standard
    #[arg(short, long)]
    description: bool,

    /// Components directory
    #[arg(short, long, default_value = DEFAULT_COMPONENTS_DIR)]
    components: PathBuf,

    /// Include only controls for the given family (e.g. AC, SI)
    #[arg(short, long)]
    family: Option<String>,

    /// Output each control family to a separate file in the given directory
    #[arg(short, long, value_name = "DIR")]
    separate: Option<PathBuf>,

    /// Control standard to read descriptions from
    #[arg(long, default_value = DEFAULT_STANDARD_PATH)]
    standard: PathBuf,

    /// YAML file listing component names and display names in preferred order
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Print sorted records as NDJSON instead of Markdown
    #[arg(long, conflicts_with = "separate")]
    records: bool,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    ensure_components_dir(&cli.components)?;
    let roster = match &cli.roster {
        Some(path) => ComponentRoster::load(path)?,
        None => ComponentRoster::default(),
    };
    let options = NormalizeOptions {
        include_descriptions: cli.description,
        // `-f ""` means no filter.
        family: cli.family.filter(|code| !code.is_empty()).map(FamilyCode),
    };

    let ssp = assemble_ssp(&cli.components, &cli.standard, &roster, &options)?;

    if let Some(dir) = &cli.separate {
        write_separate(dir, &ssp)?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if cli.records {
        write_records_json(&mut out, &ssp)?;
    } else {
        write_ssp(&mut out, &ssp).context("writing SSP to stdout")?;
    }
    out.flush().context("flushing stdout")?;
    Ok(())
}
