use anyhow::Result;
use log::{debug, info};

use masslynx_xlsx::error::ConvertError;
use masslynx_xlsx::workbook::{ConversionConfig, WorkbookAssembler, XlsxSink};

use super::ConvertArgs;
use super::config::Config;

/// Merge command-line flags over the config file over the defaults.
pub fn resolve_config(args: &ConvertArgs) -> Result<ConversionConfig> {
    let file = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::from_file(path)?.conversion
        }
        None => Default::default(),
    };

    let mut config = ConversionConfig::default()
        .with_recursive(args.recursive || file.recursive.unwrap_or(false));
    if let Some(prefix) = args.sheet_prefix.clone().or(file.sheet_prefix) {
        config = config.with_sheet_prefix(prefix);
    }
    if let Some(decimals) = args.time_decimals.or(file.time_decimals) {
        config = config.with_time_decimals(decimals);
    }
    if let Some(output) = args.output.clone().or(file.output) {
        config = config.with_output_name(output);
    }
    if let Some(extension) = file.extension {
        config = config.with_extension(extension);
    }

    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Convert every export under the input directory into one workbook.
///
/// Progress and the per-file report go to stdout. Errors are returned to the
/// caller, which maps them to an exit code.
pub fn run(args: &ConvertArgs, config: ConversionConfig) -> Result<(), ConvertError> {
    let assembler = WorkbookAssembler::new(config);
    let scan = assembler.scan_with(&args.input_dir, |files| {
        println!("[INFO] Found {} file(s). Parsing...", files.len());
    })?;
    print!("{}", scan.report.format_colored());

    let output = assembler.config().output_path(&scan.root);
    let mut sink = XlsxSink::new(&output);
    let summary = assembler.write(scan, &mut sink)?;

    info!("{}", summary);
    println!("[SUMMARY] Wrote workbook: {}", output.display());
    Ok(())
}
