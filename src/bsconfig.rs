// src/bsconfig.rs

//! Rendering [`ServeOptions`] into browser-sync's two invocation forms:
//! a generated bs-config file, or a plain CLI argument vector.
//!
//! Commands are built as structured argument vectors throughout; nothing is
//! ever joined into a shell string.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::options::ServeOptions;

/// Settings object serialized into a generated bs-config file.
///
/// Field names follow browser-sync's own config schema, hence camelCase.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BsSettings {
    pub server: BsServer,
    pub files: String,
    pub port: u16,
    pub host: String,
    pub ui: BsUi,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,
    pub open: OpenMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BsServer {
    pub base_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct BsUi {
    pub port: u16,
}

/// browser-sync's `open` option is either a mode string or literal `false`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OpenMode {
    Mode(&'static str),
    Disabled(bool),
}

impl BsSettings {
    pub fn from_options(opts: &ServeOptions) -> Self {
        let destination = opts.destination.display().to_string();

        // A base URL needs a route mapping the prefix back to the site root.
        let routes = match opts.baseurl.as_deref() {
            Some(base) if !base.trim().is_empty() => Some(BTreeMap::from([(
                base.to_string(),
                destination.clone(),
            )])),
            _ => None,
        };

        Self {
            server: BsServer {
                base_dir: destination.clone(),
                routes,
                directory: opts.show_dir_listing.then_some(true),
            },
            files: destination,
            port: opts.port,
            host: opts.host.clone(),
            ui: BsUi { port: opts.ui_port },
            https: opts.https.then_some(true),
            open: if opts.open_url {
                OpenMode::Mode("local")
            } else {
                OpenMode::Disabled(false)
            },
            log_level: opts.verbose.then(|| "debug".to_string()),
        }
    }

    /// The self-executing payload browser-sync loads via `--config`.
    pub fn to_module_js(&self) -> Result<String> {
        let json = serde_json::to_string(self).context("serializing bs-config settings")?;
        Ok(format!("module.exports = {json};"))
    }
}

/// Write the generated config file for `opts`, overwriting prior content.
pub fn generate(opts: &ServeOptions) -> Result<()> {
    let plan = opts
        .bs_config
        .as_ref()
        .context("generate called without a config file path")?;

    let settings = BsSettings::from_options(opts);
    let payload = settings.to_module_js()?;

    info!(
        "Generating browser-sync config file: {}",
        plan.path.display()
    );
    debug!(settings = ?settings, "configuration for browser-sync");

    fs::write(&plan.path, payload)
        .with_context(|| format!("writing bs-config file at {:?}", plan.path))?;

    Ok(())
}

/// Argument vector for CLI-argument mode, in fixed order.
///
/// The binary itself is the program being spawned and is not part of the
/// returned vector.
pub fn cli_args(opts: &ServeOptions) -> Vec<String> {
    let destination = opts.destination.display().to_string();

    let mut args = vec![
        "start".to_string(),
        "--server".to_string(),
        destination.clone(),
        "--files".to_string(),
        destination,
        "--port".to_string(),
        opts.port.to_string(),
        "--host".to_string(),
        opts.host.clone(),
        "--ui-port".to_string(),
        opts.ui_port.to_string(),
    ];

    if opts.https {
        args.push("--https".to_string());
    }
    if !opts.open_url {
        args.push("--no-open".to_string());
    }
    if opts.show_dir_listing {
        args.push("--directory".to_string());
    }

    args
}

/// Argument vector for config-file mode.
pub fn config_args(config_file: &Path) -> Vec<String> {
    vec![
        "start".to_string(),
        "--config".to_string(),
        config_file.display().to_string(),
    ]
}
