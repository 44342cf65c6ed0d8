extern crate clap;

use std::fmt;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use error_stack::{Context, Result, ResultExt};
use rayon::ThreadPoolBuilder;

use polyramen::geojson_output::write_geojson;
use polyramen::poly::{read_poly, write_poly};
use polyramen::poly_simplification::{simplify_poly, write_summary_csv};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Poly,
    Geojson,
}

#[derive(Parser)]
struct Opts {
    /// Path to the .poly file
    input: PathBuf,

    /// Simplification tolerance in meters, rings are copied unchanged when omitted
    #[clap(allow_negative_numbers = true)]
    epsilon: Option<f64>,

    /// Number of CPU threads
    #[clap(short, long, default_value = "4")]
    ncpu: usize,

    /// Output format written to stdout
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Poly)]
    format: OutputFormat,

    /// Write per-ring vertex counts to this CSV file
    #[clap(short, long)]
    stats: Option<PathBuf>,
}

#[derive(Debug)]
struct SimplifyPolyError;

impl fmt::Display for SimplifyPolyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("simplify_poly failed")
    }
}

impl Context for SimplifyPolyError {}

fn main() -> Result<(), SimplifyPolyError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opts: Opts = Opts::parse();

    ThreadPoolBuilder::new()
        .num_threads(opts.ncpu)
        .build_global()
        .change_context(SimplifyPolyError)?;

    let poly = read_poly(&opts.input).change_context(SimplifyPolyError)?;
    log::info!("read {} rings from {}", poly.polygons.len(), opts.input.display());

    let simplified = simplify_poly(&poly, opts.epsilon).change_context(SimplifyPolyError)?;

    if let Some(stats) = &opts.stats {
        write_summary_csv(stats, &simplified.summaries).change_context(SimplifyPolyError)?;
    }

    let stdout = BufWriter::new(io::stdout().lock());
    let written = match opts.format {
        OutputFormat::Poly => write_poly(&simplified.poly, stdout),
        OutputFormat::Geojson => write_geojson(&simplified.poly, stdout),
    };
    written.change_context(SimplifyPolyError)
}
