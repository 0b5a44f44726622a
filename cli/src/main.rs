//! `filament-change` command line tool.
//!
//! Reads a sliced G-code file, inserts `M600` filament changes where the
//! printer moves to a mesh of another color group and writes the result.

use filament_change::config::{FilamentChangeConfig, GCodeFlavor};
use filament_change::gcode::{FilamentChangeByMesh, GCode};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: filament-change <INPUT> [OPTIONS]

Options:
  -o, --output <FILE>   Write the result here instead of stdout
  -c, --config <FILE>   JSON settings (defaults when omitted)
      --flavor <NAME>   Machine G-code flavor, e.g. marlin or reprap
      --enable          Run the pass even if the settings disable it
  -h, --help            Show this help";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Run(#[from] filament_change::Error),
}

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Options {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    flavor: Option<GCodeFlavor>,
    enable: bool,
}

/// `Ok(None)` means help was requested.
fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Option<Options>, CliError> {
    let mut args = args.into_iter();
    let mut input = None;
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| CliError::Usage(format!("{} needs a value", name)))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-o" | "--output" => options.output = Some(PathBuf::from(value(&arg)?)),
            "-c" | "--config" => options.config = Some(PathBuf::from(value(&arg)?)),
            "--flavor" => options.flavor = Some(value(&arg)?.parse()?),
            "--enable" => options.enable = true,
            other if other.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option: {}", other)));
            }
            other => {
                if input.replace(PathBuf::from(other)).is_some() {
                    return Err(CliError::Usage("only one input file is accepted".into()));
                }
            }
        }
    }

    options.input = input.ok_or_else(|| CliError::Usage("missing input file".into()))?;
    Ok(Some(options))
}

fn load_config(options: &Options) -> Result<FilamentChangeConfig, CliError> {
    let mut config = match &options.config {
        Some(path) => FilamentChangeConfig::from_file(path)?,
        None => FilamentChangeConfig::default(),
    };
    config.initialize(&options.flavor);
    if options.enable {
        config.plugin_enabled = true;
    }
    Ok(config)
}

fn run(options: &Options) -> Result<(), CliError> {
    let config = load_config(options)?;
    info!("{}", config);

    let gcode = GCode::read_from_file(&options.input)?;
    info!(input = %options.input.display(), layers = gcode.layer_count(), "read G-code");

    let pass = FilamentChangeByMesh::new(config);
    let (layers, report) = pass.execute_with_report(gcode.layers());
    for change in &report.changes {
        info!(
            layer = change.layer_index,
            mesh = %change.mesh,
            "color {} -> {}",
            change.from_color,
            change.to_color
        );
    }

    let output = GCode::from_layers(&layers);
    match &options.output {
        Some(path) => output.write_to_file(path)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.content().as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(filament_change::Error::from)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
