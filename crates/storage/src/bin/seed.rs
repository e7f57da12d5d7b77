//! Writes the built-in sample dataset as JSON so it can be edited and passed
//! back with `--data`.

use std::fmt;
use std::path::PathBuf;

use storage::{Dataset, DatasetRecord};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidOut { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidOut { raw } => write!(f, "invalid --out value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    out: PathBuf,
    force: bool,
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut out = std::env::var("SKILLGAP_DATA")
            .map_or_else(|_| PathBuf::from("skillgap.json"), PathBuf::from);
        let mut force = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" => {
                    let value = args.next().ok_or(ArgsError::MissingValue { flag: "--out" })?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidOut { raw: value });
                    }
                    out = PathBuf::from(value);
                }
                "--force" => force = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Self { out, force })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [--out <path>] [--force]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --out skillgap.json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SKILLGAP_DATA");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().inspect_err(|_| print_usage())?;
    if args.out.exists() && !args.force {
        return Err(format!("{} already exists (use --force)", args.out.display()).into());
    }

    let record = DatasetRecord::sample();
    // Validate before writing so the file always loads.
    Dataset::from_record(record.clone())?;

    let json = serde_json::to_string_pretty(&record)?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.out, json)?;
    eprintln!("sample dataset written to {}", args.out.display());
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
