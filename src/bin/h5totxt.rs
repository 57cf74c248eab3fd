// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Dump the attributes and datasets of an HDF5 file into a text file with the
//! same name, but a ".txt" extension.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the HDF5 file.
    #[arg(value_parser = existing_path)]
    file_path: PathBuf,
}

/// Reject paths that don't exist before anything gets opened.
fn existing_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Path '{s}' does not exist"))
    }
}

fn main() {
    // Logs go to stderr; stdout only gets the name of the output file.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "h5totxt=warn".into()),
        )
        .init();

    let args = Args::parse();
    match h5totxt::convert(&args.file_path) {
        Ok(output) => println!("Output saved to {}", output.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
