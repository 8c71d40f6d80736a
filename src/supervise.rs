// src/supervise.rs

//! Spawning and supervising the browser-sync process.
//!
//! The child runs attached to a pseudo-terminal so it line-buffers its
//! output; each line is forwarded to the log until the stream closes. A
//! Ctrl-C during supervision is forwarded to the child, and a temporary
//! bs-config file is deleted at that point.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use portable_pty::{
    Child, ChildKiller, CommandBuilder, MasterPty, PtySize, PtySystem, SlavePty, native_pty_system,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::address::{self, Role};
use crate::bsconfig;
use crate::errors::ServeError;
use crate::options::ServeOptions;

/// A spawned browser-sync process attached to a pseudo-terminal.
///
/// The interrupt contract is scoped to one value: [`Supervisor::interrupt`]
/// captures nothing beyond the child handle and the pending cleanup, and it
/// stops being reachable once [`Supervisor::supervise`] returns.
pub struct Supervisor {
    child: Box<dyn Child + Send + Sync>,
    lines: mpsc::Receiver<String>,
    /// Keeps the master side of the pty alive for as long as the child runs.
    _master: Box<dyn MasterPty + Send>,
    /// Present only while a temporary config file still needs deleting.
    temp_config: Option<PathBuf>,
}

impl Supervisor {
    /// Generate the config file when required and spawn the server on a
    /// fresh pseudo-terminal.
    pub fn spawn(opts: &ServeOptions) -> Result<Self> {
        if !opts.destination.is_dir() {
            return Err(ServeError::Validation(format!(
                "destination directory does not exist: {}",
                opts.destination.display()
            ))
            .into());
        }

        let args = match opts.bs_config.as_ref() {
            Some(plan) => {
                if plan.needs_generation {
                    bsconfig::generate(opts)?;
                }
                bsconfig::config_args(&plan.path)
            }
            None => bsconfig::cli_args(opts),
        };

        debug!(binary = ?opts.binary, ?args, "spawning browser-sync");

        let pty = native_pty_system();
        let pair = pty
            .openpty(PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| ServeError::Spawn(e.to_string()))?;

        let mut cmd = CommandBuilder::new(&opts.binary);
        cmd.args(&args);

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| ServeError::Spawn(e.to_string()))?;
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| ServeError::Spawn(e.to_string()))?;

        // Channel from the blocking pty reader into the async world.
        let (line_tx, line_rx) = mpsc::channel::<String>(64);
        std::thread::spawn(move || stream_lines(reader, line_tx));

        let temp_config = opts
            .bs_config
            .as_ref()
            .filter(|plan| plan.temporary)
            .map(|plan| plan.path.clone());

        Ok(Self {
            child,
            lines: line_rx,
            _master: pair.master,
            temp_config,
        })
    }

    /// Pid of the spawned server, if the platform exposes one.
    pub fn pid(&self) -> Option<u32> {
        self.child.process_id()
    }

    /// Forward an interrupt to the child and delete the temporary config
    /// file, if one is owed. Safe to call more than once; the deletion is
    /// attempted at most once.
    pub fn interrupt(&mut self) {
        match self.pid() {
            Some(pid) => forward_sigint(pid, &mut self.child),
            None => {
                if let Err(err) = self.child.kill() {
                    debug!(error = %err, "failed to signal browser-sync");
                }
            }
        }

        if let Some(path) = self.temp_config.take() {
            info!(
                "Deleting temporary browser-sync config file: {}",
                path.display()
            );
            if let Err(err) = fs::remove_file(&path) {
                debug!(path = ?path, error = %err, "temporary config file removal failed");
            }
        }
    }

    /// Stream child output until it closes, forwarding Ctrl-C in between.
    ///
    /// Returns once the child has exited and its output stream has drained;
    /// there is no restart.
    pub async fn supervise(mut self, opts: &ServeOptions) -> Result<()> {
        info!(
            "Server address: {}",
            address::service_address(opts, Role::Primary)
        );
        info!("UI address: {}", address::service_address(opts, Role::Ui));

        loop {
            tokio::select! {
                interrupt = tokio::signal::ctrl_c() => match interrupt {
                    Ok(()) => self.interrupt(),
                    Err(err) => {
                        warn!(error = %err, "failed to listen for Ctrl+C");
                        // No interrupt delivery possible; just drain output.
                        while let Some(line) = self.lines.recv().await {
                            debug!("{}", line.trim_end());
                        }
                        break;
                    }
                },
                line = self.lines.recv() => match line {
                    Some(line) => debug!("{}", line.trim_end()),
                    None => break,
                },
            }
        }

        let mut child = self.child;
        let status = tokio::task::spawn_blocking(move || child.wait())
            .await
            .context("joining child wait task")?;

        match status {
            Ok(status) => debug!(?status, "browser-sync exited"),
            Err(err) => debug!(error = %err, "failed to reap browser-sync"),
        }

        Ok(())
    }
}

/// Run the full supervision lifecycle for `opts`.
pub async fn run(opts: &ServeOptions) -> Result<()> {
    Supervisor::spawn(opts)?.supervise(opts).await
}

/// Blocking reader loop: pty output -> line channel.
///
/// Read errors end the stream. On most platforms the master side reports an
/// I/O error once the child exits, so this path is routine and only logged
/// at debug level.
fn stream_lines(reader: Box<dyn Read + Send>, tx: mpsc::Sender<String>) {
    let reader = BufReader::new(reader);
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(err) => {
                debug!(error = %err, "pty read ended");
                break;
            }
        }
    }
}

#[cfg(unix)]
fn forward_sigint(pid: u32, _child: &mut Box<dyn Child + Send + Sync>) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid as i32), Signal::SIGINT) {
        Ok(()) => debug!(pid, "forwarded SIGINT to browser-sync"),
        Err(err) => warn!(pid, error = %err, "failed to forward SIGINT"),
    }
}

#[cfg(not(unix))]
fn forward_sigint(pid: u32, child: &mut Box<dyn Child + Send + Sync>) {
    if let Err(err) = child.kill() {
        warn!(pid, error = %err, "failed to terminate browser-sync");
    }
}
