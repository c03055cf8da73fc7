use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    process,
};

use anyhow::{Context, Result};
use clap::{App, Arg};
use tracing::info;

use caf::Builder;

fn main() {
    tracing_subscriber::fmt::init();
    let matches = App::new("caf")
        .version("0.1.0")
        .about("Packs a directory tree into a CAF archive")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("The directory to pack")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .help("The archive file to write")
                .takes_value(true)
                .required(true),
        )
        .get_matches();

    let input = Path::new(matches.value_of("input").expect("INPUT is required"));
    let output = Path::new(matches.value_of("output").expect("OUTPUT is required"));
    if let Err(err) = run(input, output) {
        eprintln!("caf: {:#}", err);
        process::exit(1);
    }
}

fn run(input: &Path, output: &Path) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .ingest_dir(input, None)
        .with_context(|| format!("reading {}", input.display()))?;
    let archive = builder.finish();
    let file =
        File::create(output).with_context(|| format!("creating {}", output.display()))?;
    let mut out = BufWriter::new(file);
    archive
        .write_to(&mut out)
        .with_context(|| format!("writing {}", output.display()))?;
    out.flush()?;
    info!(
        entries = archive.index.len(),
        files = archive.files.len(),
        "archive written"
    );
    Ok(())
}
