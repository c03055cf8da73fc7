use std::{fs, path::Path, process};

use anyhow::{bail, Context, Result};
use clap::{App, Arg};
use tracing::info;

use caf::Archive;

fn main() {
    tracing_subscriber::fmt::init();
    let matches = App::new("uncaf")
        .version("0.1.0")
        .about("Unpacks a CAF archive into a directory tree")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("The archive file to read")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("output")
                .value_name("OUTPUT")
                .help("The directory to unpack into")
                .takes_value(true)
                .required(true),
        )
        .get_matches();

    let input = Path::new(matches.value_of("input").expect("INPUT is required"));
    let output = Path::new(matches.value_of("output").expect("OUTPUT is required"));
    if let Err(err) = run(input, output) {
        eprintln!("uncaf: {:#}", err);
        process::exit(1);
    }
}

fn run(input: &Path, output: &Path) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    if !Archive::sniff(&bytes) {
        bail!("{} is not a CAF archive", input.display());
    }
    let archive =
        Archive::read_from(&bytes).with_context(|| format!("parsing {}", input.display()))?;
    fs::create_dir_all(output).with_context(|| format!("creating {}", output.display()))?;
    caf::unpack(&archive, output)
        .with_context(|| format!("unpacking into {}", output.display()))?;
    info!(
        entries = archive.index.len(),
        files = archive.files.len(),
        "archive unpacked"
    );
    Ok(())
}
