use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod convert;

/// Combine MassLynx ASCII exports into one Excel workbook, one sheet per channel.
#[derive(Parser, Debug)]
#[command(name = "masslynx-xlsx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    convert: ConvertArgs,
}

/// Settings of a conversion run. Unset options fall back to `--config`, then defaults.
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Directory containing the exported .txt files
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output workbook name, written inside INPUT_DIR [default: combined_by_channel_wide.xlsx]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Scan subdirectories as well
    #[arg(long)]
    pub recursive: bool,

    /// Prefix for every data sheet name
    #[arg(long, value_name = "PREFIX")]
    pub sheet_prefix: Option<String>,

    /// Decimals of the shared retention-time grid [default: 3]
    #[arg(long, value_name = "N")]
    pub time_decimals: Option<u32>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> ExitCode {
    let config = match convert::resolve_config(&cli.convert) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match convert::run(&cli.convert, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if !e.is_fatal() => {
            println!("[INFO] {}", e);
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
