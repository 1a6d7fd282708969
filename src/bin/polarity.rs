//! Polarity CLI binary.

use clap::Parser;
use polarity::cli::{args::*, commands::*};
use std::process;

fn main() {
    // Parse command line arguments using clap
    let args = PolarityArgs::parse();

    // Execute the command
    if let Err(e) = execute_command(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
