#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::tempdir;
use tokio::time::timeout;

use sitesync::errors::ServeError;
use sitesync::options::{ConfigFilePlan, RawOptions, resolve};
use sitesync::supervise::{self, Supervisor};

type TestResult = Result<(), Box<dyn Error>>;

fn write_fake_binary(dir: &Path, script: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("browser-sync");
    fs::write(&path, script)?;
    let mut perms = fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms)?;
    Ok(path)
}

#[tokio::test]
async fn run_streams_until_the_child_exits() -> TestResult {
    let dir = tempdir()?;
    let site = dir.path().join("site");
    fs::create_dir(&site)?;
    let binary = write_fake_binary(
        dir.path(),
        "#!/bin/sh\necho \"fake browser-sync 0.0.1\"\necho serving\n",
    )?;

    let opts = resolve(RawOptions {
        browsersync: Some(binary),
        destination: site,
        ..Default::default()
    })
    .await?;

    timeout(Duration::from_secs(20), supervise::run(&opts)).await??;

    Ok(())
}

#[tokio::test]
async fn interrupt_kills_the_child_and_removes_the_temp_config() -> TestResult {
    let dir = tempdir()?;
    let site = dir.path().join("site");
    fs::create_dir(&site)?;
    // Prints a version for the probe, then idles until signalled.
    let binary = write_fake_binary(dir.path(), "#!/bin/sh\necho 0.0.1\nexec sleep 30\n")?;

    let mut opts = resolve(RawOptions {
        browsersync: Some(binary),
        destination: site,
        ..Default::default()
    })
    .await?;

    let config_path = dir.path().join(".bs-config.test.js");
    opts.bs_config = Some(ConfigFilePlan {
        path: config_path.clone(),
        temporary: true,
        needs_generation: true,
    });

    let mut sup = Supervisor::spawn(&opts)?;
    assert!(config_path.is_file());

    sup.interrupt();
    timeout(Duration::from_secs(20), sup.supervise(&opts)).await??;
    assert!(!config_path.exists());

    Ok(())
}

#[tokio::test]
async fn failed_probe_prevents_any_spawn() -> TestResult {
    let dir = tempdir()?;
    let binary = write_fake_binary(dir.path(), "#!/bin/sh\nexit 0\n")?;

    let err = resolve(RawOptions {
        browsersync: Some(binary),
        destination: dir.path().to_path_buf(),
        ..Default::default()
    })
    .await
    .expect_err("empty version output must fail validation");

    assert!(matches!(err, ServeError::Validation(_)));

    Ok(())
}

#[tokio::test]
async fn missing_destination_fails_before_spawn() -> TestResult {
    let dir = tempdir()?;
    let binary = write_fake_binary(dir.path(), "#!/bin/sh\necho 0.0.1\n")?;

    let opts = resolve(RawOptions {
        browsersync: Some(binary),
        destination: dir.path().join("no-such-site"),
        ..Default::default()
    })
    .await?;

    let err = supervise::run(&opts).await.expect_err("spawn must refuse");
    assert!(
        err.downcast_ref::<ServeError>()
            .is_some_and(|e| matches!(e, ServeError::Validation(_)))
    );

    Ok(())
}
