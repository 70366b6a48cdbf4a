//! # masslynx-xlsx
//!
//! Command-line tool that combines Waters MassLynx ASCII exports into one Excel
//! workbook.
//!
//! ## Usage
//!
//! ```bash
//! # Every .txt file directly inside the directory
//! masslynx-xlsx "C:/MassLynx Data/TXT files"
//!
//! # Include subdirectories, coarser grid, custom names
//! masslynx-xlsx exports/ --recursive --time-decimals 2 --sheet-prefix Day1_ -o day1.xlsx
//! ```
//!
//! Exit status is 0 on success and when no input files exist, 1 otherwise.

use clap::Parser;
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
