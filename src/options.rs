// src/options.rs

//! Option resolution: turn the sparse, user-supplied option set into a fully
//! defaulted [`ServeOptions`] record that the rest of the run treats as
//! read-only.
//!
//! Defaults are applied exactly once, here, and only for values the user did
//! not supply.

use std::path::{Path, PathBuf};

use rand::RngCore;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{Result, ServeError};
use crate::locate;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_UI_PORT: u16 = 3001;

/// Raw options as handed over by the CLI layer.
///
/// `None` means "not given"; resolution fills in defaults without ever
/// overriding a value that was supplied explicitly.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub https: bool,
    pub host: Option<String>,
    pub open_url: bool,
    pub port: Option<u16>,
    pub show_dir_listing: bool,
    pub ui_port: Option<u16>,
    /// Override for the browser-sync binary location.
    pub browsersync: Option<PathBuf>,
    /// Outer `None`: CLI-argument mode. `Some(None)`: config-file mode with
    /// a synthesized temporary path. `Some(Some(path))`: config-file mode
    /// with a user-supplied path.
    pub bs_config: Option<Option<PathBuf>>,
    pub baseurl: Option<String>,
    pub destination: PathBuf,
    pub verbose: bool,
}

/// State of the bs-config file used in config-file mode.
#[derive(Debug, Clone)]
pub struct ConfigFilePlan {
    pub path: PathBuf,
    /// True when the path was synthesized rather than user-supplied. Such a
    /// file is owned by this run and deleted when the run is interrupted.
    pub temporary: bool,
    /// True when no file exists at `path` yet and one must be written before
    /// the server starts.
    pub needs_generation: bool,
}

/// Fully defaulted options for one serve session.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub ui_port: u16,
    pub https: bool,
    pub open_url: bool,
    pub show_dir_listing: bool,
    pub verbose: bool,
    pub baseurl: Option<String>,
    /// Directory being served and watched. Must exist by spawn time.
    pub destination: PathBuf,
    /// Resolved browser-sync executable; resolved once, never per invocation.
    pub binary: PathBuf,
    /// Present iff config-file mode is active.
    pub bs_config: Option<ConfigFilePlan>,
}

impl ServeOptions {
    /// Apply the defaulting table to `raw` with an already-resolved binary.
    ///
    /// Pure apart from the existence probe for the config file path. Binary
    /// resolution and the version check live in [`resolve`].
    pub fn from_raw(raw: RawOptions, binary: PathBuf) -> Self {
        let bs_config = raw.bs_config.map(|supplied| match supplied {
            // An empty value counts as "no path given".
            Some(path) if !path.as_os_str().is_empty() => ConfigFilePlan {
                needs_generation: !path.exists(),
                temporary: false,
                path,
            },
            _ => {
                let path = temporary_config_path();
                ConfigFilePlan {
                    needs_generation: !path.exists(),
                    temporary: true,
                    path,
                }
            }
        });

        Self {
            host: raw.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: raw.port.unwrap_or(DEFAULT_PORT),
            ui_port: raw.ui_port.unwrap_or(DEFAULT_UI_PORT),
            https: raw.https,
            open_url: raw.open_url,
            show_dir_listing: raw.show_dir_listing,
            verbose: raw.verbose,
            baseurl: raw.baseurl,
            destination: raw.destination,
            binary,
            bs_config,
        }
    }
}

/// Resolve raw options into validated [`ServeOptions`].
///
/// The returned options have passed the version probe; an error here means
/// no server process was, or ever will be, spawned for this invocation.
pub async fn resolve(raw: RawOptions) -> Result<ServeOptions> {
    let binary = match raw.browsersync.clone() {
        Some(path) => path,
        None => locate::locate()?,
    };

    probe_version(&binary).await?;

    Ok(ServeOptions::from_raw(raw, binary))
}

/// Synthesize a temporary config file path: `.bs-config.<hex>.js` with
/// 20 hex digits of randomness.
pub fn temporary_config_path() -> PathBuf {
    let mut bytes = [0u8; 10];
    rand::thread_rng().fill_bytes(&mut bytes);
    PathBuf::from(format!(".bs-config.{}.js", hex::encode(bytes)))
}

/// Run `<binary> --version` and require non-empty combined output.
///
/// A binary that cannot be executed at all is treated the same as one that
/// prints nothing.
async fn probe_version(binary: &Path) -> Result<()> {
    let combined = match Command::new(binary).arg("--version").output().await {
        Ok(out) => {
            let mut text = out.stdout;
            text.extend_from_slice(&out.stderr);
            text
        }
        Err(err) => {
            debug!(binary = ?binary, error = %err, "version probe failed to execute");
            Vec::new()
        }
    };

    if combined.is_empty() {
        return Err(ServeError::Validation(format!(
            "binary not found or not executable: {}",
            binary.display()
        )));
    }

    debug!(
        binary = ?binary,
        version = %String::from_utf8_lossy(&combined).trim(),
        "browser-sync version probe succeeded"
    );
    Ok(())
}
