//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for screeninfo.

use clap::{Args, Parser, Subcommand};

/// screeninfo - Display the screen configuration parameters of a device
///
/// Reads display metrics from a captured device profile or a connected
/// monitor and reports size classes, densities and physical dimensions.
#[derive(Parser, Debug)]
#[command(name = "screeninfo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Display source options shared by `show` and `share`
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to configuration file
    #[arg(short, long, env = "SCREENINFO_CONFIG")]
    pub config: Option<String>,

    /// Display source: auto, profile, drm, mock
    #[arg(short, long)]
    pub source: Option<String>,

    /// Display profile to read (implies --source profile)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// DRM connector to use (e.g. HDMI-A-1)
    #[arg(long)]
    pub connector: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the screen configuration
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON instead of the text view
        #[arg(long)]
        json: bool,
    },

    /// Print a plain-text summary suitable for sharing
    Share {
        #[command(flatten)]
        source: SourceArgs,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Start the summary with a subject line
        #[arg(long)]
        subject: bool,
    },

    /// Compute physical size from raw display metrics
    Size {
        /// Width in pixels
        #[arg(long)]
        width: u32,

        /// Height in pixels
        #[arg(long)]
        height: u32,

        /// Horizontal dots per inch (values below 1 use the density bucket)
        #[arg(long, default_value = "0")]
        xdpi: f64,

        /// Vertical dots per inch (values below 1 use the density bucket)
        #[arg(long, default_value = "0")]
        ydpi: f64,

        /// Density bucket (120, 160, 240, ...)
        #[arg(long, default_value = "160")]
        density_dpi: u32,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_defaults() {
        let cli = Cli::parse_from(["screeninfo", "show"]);
        match cli.command {
            Commands::Show { source, json } => {
                assert!(source.config.is_none());
                assert!(source.source.is_none());
                assert!(source.profile.is_none());
                assert!(!json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_show_with_profile() {
        let cli = Cli::parse_from(["screeninfo", "show", "--profile", "pixel3.toml", "--json"]);
        match cli.command {
            Commands::Show { source, json } => {
                assert_eq!(source.profile.as_deref(), Some("pixel3.toml"));
                assert!(json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_share_with_options() {
        let cli = Cli::parse_from([
            "screeninfo",
            "share",
            "--source",
            "mock",
            "--output",
            "summary.txt",
            "--subject",
        ]);
        match cli.command {
            Commands::Share {
                source,
                output,
                subject,
            } => {
                assert_eq!(source.source.as_deref(), Some("mock"));
                assert_eq!(output.as_deref(), Some("summary.txt"));
                assert!(subject);
            }
            _ => panic!("Expected Share command"),
        }
    }

    #[test]
    fn test_size_defaults() {
        let cli = Cli::parse_from(["screeninfo", "size", "--width", "480", "--height", "800"]);
        match cli.command {
            Commands::Size {
                width,
                height,
                xdpi,
                ydpi,
                density_dpi,
            } => {
                assert_eq!((width, height), (480, 800));
                assert_eq!((xdpi, ydpi), (0.0, 0.0));
                assert_eq!(density_dpi, 160);
            }
            _ => panic!("Expected Size command"),
        }
    }

    #[test]
    fn test_size_requires_dimensions() {
        assert!(Cli::try_parse_from(["screeninfo", "size", "--width", "480"]).is_err());
    }

    #[test]
    fn test_verbose_flags() {
        let cli = Cli::parse_from(["screeninfo", "-vv", "version"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::parse_from(["screeninfo", "--quiet", "version"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_config_show() {
        let cli = Cli::parse_from(["screeninfo", "config", "show"]);
        match cli.command {
            Commands::Config {
                subcommand: ConfigSubcommand::Show { config },
            } => {
                assert!(config.is_none());
            }
            _ => panic!("Expected Config Show command"),
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["screeninfo", "config", "init", "--force"]);
        match cli.command {
            Commands::Config {
                subcommand: ConfigSubcommand::Init { path, force },
            } => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
