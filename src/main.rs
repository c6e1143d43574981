//! screeninfo - display the screen configuration parameters of a device
//!
//! Collects display metrics from a captured device profile, a connected
//! monitor (Linux DRM) or a built-in reference device, and reports size
//! classes, densities and the computed physical size.

mod cli;
mod config;
mod error;
mod host;
mod logging;
mod metrics;
mod report;
mod screen;
mod version;

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Cli, Commands, ConfigSubcommand, SourceArgs};
use crate::config::{ReportFormat, ScreenInfoConfig};
use crate::error::{Error, Result};
use crate::logging::LogGuards;
use crate::metrics::{DisplayMetricsSnapshot, PhysicalSize, BASELINE_DENSITY_DPI};
use crate::screen::ScreenInfo;

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => {
            version::print_version();
            Ok(())
        }
        Commands::Config { subcommand } => {
            // Config commands use minimal logging
            logging::init_simple(simple_level(cli.verbose))?;
            handle_config_command(subcommand)
        }
        Commands::Size {
            width,
            height,
            xdpi,
            ydpi,
            density_dpi,
        } => {
            logging::init_simple(simple_level(cli.verbose))?;
            run_size(width, height, xdpi, ydpi, density_dpi)
        }
        Commands::Show { source, json } => {
            let (config, _log_guards) = load_config(&source, cli.verbose, cli.quiet)?;
            let info = collect(&config)?;

            let format = if json {
                ReportFormat::Json
            } else {
                config.report.report_format()?
            };
            match format {
                ReportFormat::Json => println!("{}", report::to_json(&info)?),
                ReportFormat::Text => print!("{}", report::render_screen(&info)),
            }
            Ok(())
        }
        Commands::Share {
            source,
            output,
            subject,
        } => {
            let (config, _log_guards) = load_config(&source, cli.verbose, cli.quiet)?;
            let info = collect(&config)?;

            let mut text = String::new();
            if subject {
                let build = version::build_info();
                text.push_str(&report::share_subject(build.version));
                text.push_str("\n\n");
            }
            text.push_str(&report::summary_text(&info, &config.report));

            match output {
                Some(path) => {
                    let path = PathBuf::from(path);
                    fs::write(&path, &text).map_err(|e| Error::IoWrite {
                        path: path.clone(),
                        source: e,
                    })?;
                    info!(path = %path.display(), "Summary written");
                    if !cli.quiet {
                        println!("Summary written to {}", path.display());
                    }
                }
                None => print!("{}", text),
            }
            Ok(())
        }
    }
}

fn simple_level(verbose: u8) -> tracing::Level {
    if verbose > 0 {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    }
}

/// Load configuration, apply command-line overrides and start logging.
///
/// The returned guards must be kept alive until the command finishes.
fn load_config(args: &SourceArgs, verbose: u8, quiet: bool) -> Result<(ScreenInfoConfig, LogGuards)> {
    let mut config = ScreenInfoConfig::load(args.config.as_deref())?;
    config.apply_overrides(
        args.source.as_deref(),
        args.profile.as_deref(),
        args.connector.as_deref(),
    )?;

    let guards = logging::init_logging(&config.logging, verbose, quiet)?;

    let build = version::build_info();
    debug!(
        version = %build.full_version(),
        target = %build.target,
        source = %config.display.source,
        "Starting screeninfo"
    );

    Ok((config, guards))
}

fn collect(config: &ScreenInfoConfig) -> Result<ScreenInfo> {
    host::open_host(&config.display)
        .and_then(|host| ScreenInfo::collect(host.as_ref()))
        .map_err(|e| {
            // Reaches the log file too; the terminal gets format_for_terminal
            debug!(error = %e.format_for_log(), "Screen collection failed");
            e
        })
}

/// Run the calculator on raw values
fn run_size(width: u32, height: u32, xdpi: f64, ydpi: f64, density_dpi: u32) -> Result<()> {
    let snapshot = DisplayMetricsSnapshot {
        width_px: width,
        height_px: height,
        xdpi,
        ydpi,
        density: f64::from(density_dpi) / f64::from(BASELINE_DENSITY_DPI),
        density_dpi,
    };
    snapshot.validate()?;

    let size = PhysicalSize::from_snapshot(&snapshot);
    debug!(raw_diagonal_in = size.raw_diagonal_in(), "Computed physical size");

    println!("Width:    {:.2} in", size.width_in);
    println!("Height:   {:.2} in", size.height_in);
    println!("Diagonal: {:.1} in ({} mm)", size.diagonal_in, size.diagonal_mm);
    Ok(())
}

fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = ScreenInfoConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let path = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", path.display());
        }
        ConfigSubcommand::Validate { config } => {
            ScreenInfoConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
