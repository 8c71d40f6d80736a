// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sitesync`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sitesync",
    version,
    about = "Serve a static site through Browsersync with live reload.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory that Browsersync serves and watches for changes.
    #[arg(long, value_name = "DIR", default_value = "_site")]
    pub destination: PathBuf,

    /// Use HTTPS.
    #[arg(long)]
    pub https: bool,

    /// Host to bind to.
    #[arg(short = 'H', long, value_name = "HOST")]
    pub host: Option<String>,

    /// Launch the site in a browser once the server is up.
    #[arg(short = 'o', long)]
    pub open_url: bool,

    /// Port to listen on.
    #[arg(short = 'P', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Show a directory listing instead of loading your index file.
    #[arg(long)]
    pub show_dir_listing: bool,

    /// Skip the initial site build which occurs before the server is started.
    #[arg(long)]
    pub skip_initial_build: bool,

    /// The port for the Browsersync UI to run on.
    #[arg(long, value_name = "PORT")]
    pub ui_port: Option<u16>,

    /// Path to the Browsersync binary if in a custom location.
    #[arg(long = "browser-sync", value_name = "PATH")]
    pub browsersync: Option<PathBuf>,

    /// Use a bs-config.js file instead of CLI args for browser-sync.
    ///
    /// If no PATH is given, a temporary file is generated and deleted on
    /// exit. If a PATH is given and the file does not exist, it will be
    /// generated.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub bs_config: Option<Option<PathBuf>>,

    /// URL path prefix under which the site is served.
    #[arg(long, value_name = "URL")]
    pub baseurl: Option<String>,

    /// Shell command that builds the site before serving starts.
    #[arg(long, value_name = "CMD")]
    pub build_cmd: Option<String>,

    /// Ask browser-sync for verbose (debug-level) logging.
    #[arg(long)]
    pub verbose: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITESYNC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
