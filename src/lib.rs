// src/lib.rs

pub mod address;
pub mod bsconfig;
pub mod build;
pub mod cli;
pub mod errors;
pub mod locate;
pub mod logging;
pub mod options;
pub mod supervise;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::options::RawOptions;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - option resolution (defaults + binary validation)
/// - the optional initial site build
/// - the browser-sync supervisor
pub async fn run(args: CliArgs) -> Result<()> {
    let build_cmd = args.build_cmd.clone();
    let skip_initial_build = args.skip_initial_build;

    let opts = options::resolve(raw_options(args)).await?;

    match build_cmd {
        Some(cmd) if !skip_initial_build => build::run_initial_build(&cmd).await?,
        _ => debug!("no initial build configured, or build skipped"),
    }

    supervise::run(&opts).await
}

/// Map CLI arguments onto the raw option record consumed by the resolver.
///
/// `build_cmd` and `skip_initial_build` belong to the build step, not to the
/// serve session, and are deliberately not part of [`RawOptions`].
fn raw_options(args: CliArgs) -> RawOptions {
    RawOptions {
        https: args.https,
        host: args.host,
        open_url: args.open_url,
        port: args.port,
        show_dir_listing: args.show_dir_listing,
        ui_port: args.ui_port,
        browsersync: args.browsersync,
        bs_config: args.bs_config,
        baseurl: args.baseurl,
        destination: args.destination,
        verbose: args.verbose,
    }
}
