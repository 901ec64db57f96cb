//! Dataset cleaning tool
//!
//! Reads a delimited dataset, runs the normalization pipeline over its `text`
//! column and writes the cleaned table as comma-separated values.
//!
//! ## Usage
//!
//! ```bash
//! # Pipe-delimited input, default configuration
//! ./target/release/clean_dataset raw.csv clean.csv
//!
//! # Comma-delimited input
//! ./target/release/clean_dataset raw.csv clean.csv ,
//!
//! # Custom configuration
//! ./target/release/clean_dataset raw.csv clean.csv '|' config.json
//! ```
//!
//! The configuration file is a JSON object with any of the `PipelineConfig`
//! fields; missing fields keep their defaults:
//!
//! ```json
//! { "digit_policy": "spell", "min_text_len": 3, "deduplicate": false }
//! ```
//!
//! Set `RUST_LOG=debug` for per-stage counts.

use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::process;
use std::time::Instant;

use temiz_core::{read_table, write_table, Pipeline, TurkishNormalizer};
use temiz_types::{PipelineConfig, TEXT_COLUMN};
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_DELIMITER: u8 = b'|';
const OUTPUT_DELIMITER: u8 = b',';

type BoxError = Box<dyn std::error::Error>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: clean_dataset <input> <output> [delimiter] [config.json]");
        process::exit(1);
    }

    if let Err(err) = run(&args[1], &args[2], args.get(3), args.get(4)) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(
    input: &str,
    output: &str,
    delimiter: Option<&String>,
    config_path: Option<&String>,
) -> Result<(), BoxError> {
    let delimiter = match delimiter.map(String::as_bytes) {
        None => DEFAULT_DELIMITER,
        Some([b]) => *b,
        Some(_) => return Err("delimiter must be a single ASCII character".into()),
    };

    let config = match config_path {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };

    println!("Input:     {}", input);
    println!("Config:    {:?}\n", config);

    let start = Instant::now();
    let table = read_table(BufReader::new(File::open(input)?), delimiter)?;
    let read_secs = start.elapsed().as_secs_f64();

    let pipeline = Pipeline::new(TurkishNormalizer::new(), config);
    let start = Instant::now();
    let out = pipeline.run(table, TEXT_COLUMN)?;
    let run_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    write_table(BufWriter::new(File::create(output)?), &out.table, OUTPUT_DELIMITER)?;
    let write_secs = start.elapsed().as_secs_f64();

    let report = &out.report;
    println!("--------------------------------");
    println!("Rows in     : {}", fmt_count(report.rows_in));
    println!("Rows out    : {}", fmt_count(report.rows_out));
    println!("Malformed   : {}", fmt_count(report.malformed.len()));
    println!("Too short   : {}", fmt_count(report.short_dropped));
    println!("Duplicates  : {}", fmt_count(report.duplicates_removed));
    println!("Reconciled  : {}", fmt_count(report.labels_reconciled));
    println!(
        "Numerals    : {} failed, {} rows dropped",
        fmt_count(report.numeral_failures.len()),
        fmt_count(report.numeral_dropped)
    );
    println!("Read        : {:.3} s", read_secs);
    println!("Pipeline    : {:.3} s", run_secs);
    if run_secs > 0.0 {
        println!(
            "Rows/sec    : {}",
            fmt_count((report.rows_in as f64 / run_secs) as usize)
        );
    }
    println!("Write       : {:.3} s", write_secs);
    println!("--------------------------------");
    println!("{report}");

    Ok(())
}

fn load_config(path: &str) -> Result<PipelineConfig, BoxError> {
    let file = File::open(path)?;
    let config = serde_json::from_reader(BufReader::new(file))?;
    Ok(config)
}

/// Groups digits in threes: `1234567` becomes `1_234_567`.
fn fmt_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out
}
