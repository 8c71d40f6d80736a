// src/build.rs

//! Initial site build step.
//!
//! The site generator itself is an external collaborator; sitesync only runs
//! the configured build command to completion before the server starts.

use std::process::Stdio;

use anyhow::{Context, Result, anyhow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

/// Run `build_cmd` through the platform shell and wait for it to finish.
///
/// Stdout and stderr are streamed into the log at debug level. A non-zero
/// exit aborts the run before any server process exists.
pub async fn run_initial_build(build_cmd: &str) -> Result<()> {
    info!("Running initial site build: {build_cmd}");

    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(build_cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(build_cmd);
        c
    };

    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning build command '{build_cmd}'"))?;

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("build stdout: {}", line);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("build stderr: {}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for build command '{build_cmd}'"))?;

    if !status.success() {
        return Err(anyhow!(
            "initial build failed with exit code {}",
            status.code().unwrap_or(-1)
        ));
    }

    debug!("initial site build finished");
    Ok(())
}
