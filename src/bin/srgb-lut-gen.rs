//! Generate sRGB ↔ linear lookup tables as Rust source.
//!
//! Run with: cargo run --release -- --output src/srgb_tables.rs

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use srgb_lut_gen::search::MIN_TOLERANCE;
use srgb_lut_gen::{SearchConfig, codegen, generate};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = 5)]
    /// Largest shift to try; the reverse table has 2^(16 - shift) entries
    max_shift: u32,

    #[arg(long, default_value_t = 256.0)]
    /// Acceptable error is 1/N of the sRGB range
    tolerance_denominator: f64,

    #[arg(short, long)]
    /// Write the tables here instead of stdout
    output: Option<PathBuf>,

    #[arg(short, long)]
    /// Log every candidate considered
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = SearchConfig {
        max_shift: args.max_shift,
        tolerance: 1.0 / args.tolerance_denominator,
    };
    let tables = generate(&config).with_context(|| {
        format!(
            "generating tables (tolerance must be at least {MIN_TOLERANCE}, i.e. N <= 510)"
        )
    })?;

    let (worst_input, worst_error) = tables.reverse.max_error();
    info!(
        shift = tables.reverse.shift(),
        addend = tables.reverse.addend(),
        len = tables.reverse.as_slice().len(),
        mse = tables.mse,
        worst_input,
        worst_error,
        "tables ready"
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            codegen::write_rust(&tables, &mut out)
                .and_then(|()| out.flush())
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote tables");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            codegen::write_rust(&tables, &mut out).context("writing to stdout")?;
        }
    }

    Ok(())
}
