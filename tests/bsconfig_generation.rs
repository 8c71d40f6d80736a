use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::tempdir;

use sitesync::bsconfig::{self, BsSettings};
use sitesync::options::{ConfigFilePlan, RawOptions, ServeOptions};

type TestResult = Result<(), Box<dyn Error>>;

fn serve_options(destination: &str) -> ServeOptions {
    ServeOptions::from_raw(
        RawOptions {
            destination: PathBuf::from(destination),
            ..Default::default()
        },
        PathBuf::from("browser-sync"),
    )
}

#[test]
fn generated_settings_round_trip_as_json() -> TestResult {
    let dir = tempdir()?;
    let config_path = dir.path().join("bs-config.js");

    let mut opts = serve_options("_site");
    opts.baseurl = Some("/docs".to_string());
    opts.bs_config = Some(ConfigFilePlan {
        path: config_path.clone(),
        temporary: false,
        needs_generation: true,
    });

    bsconfig::generate(&opts)?;

    let payload = fs::read_to_string(&config_path)?;
    let json = payload
        .strip_prefix("module.exports = ")
        .and_then(|rest| rest.strip_suffix(';'))
        .expect("module-export payload shape");

    let value: Value = serde_json::from_str(json)?;
    assert_eq!(value["server"]["baseDir"], "_site");
    assert_eq!(value["files"], "_site");
    assert_eq!(value["port"], 4000);
    assert_eq!(value["host"], "127.0.0.1");
    assert_eq!(value["ui"]["port"], 3001);
    assert_eq!(value["server"]["routes"]["/docs"], "_site");
    assert_eq!(value["open"], false);
    assert!(value.get("https").is_none());
    assert!(value.get("logLevel").is_none());
    assert!(value["server"].get("directory").is_none());

    Ok(())
}

#[test]
fn routes_are_absent_without_a_base_url() -> TestResult {
    let opts = serve_options("_site");
    let value = serde_json::to_value(BsSettings::from_options(&opts))?;
    assert!(value["server"].get("routes").is_none());

    let mut opts = serve_options("_site");
    opts.baseurl = Some("   ".to_string());
    let value = serde_json::to_value(BsSettings::from_options(&opts))?;
    assert!(value["server"].get("routes").is_none());

    Ok(())
}

#[test]
fn flag_driven_settings_appear_when_enabled() -> TestResult {
    let mut opts = serve_options("public");
    opts.https = true;
    opts.open_url = true;
    opts.show_dir_listing = true;
    opts.verbose = true;

    let value = serde_json::to_value(BsSettings::from_options(&opts))?;
    assert_eq!(value["https"], true);
    assert_eq!(value["open"], "local");
    assert_eq!(value["server"]["directory"], true);
    assert_eq!(value["logLevel"], "debug");

    Ok(())
}

#[test]
fn generate_overwrites_prior_content() -> TestResult {
    let dir = tempdir()?;
    let config_path = dir.path().join("bs-config.js");
    fs::write(&config_path, "stale content")?;

    let mut opts = serve_options("_site");
    opts.bs_config = Some(ConfigFilePlan {
        path: config_path.clone(),
        temporary: false,
        needs_generation: true,
    });

    bsconfig::generate(&opts)?;

    let payload = fs::read_to_string(&config_path)?;
    assert!(payload.starts_with("module.exports = "));
    assert!(payload.ends_with(';'));

    Ok(())
}

#[test]
fn cli_args_follow_fixed_order() -> TestResult {
    let mut opts = serve_options("_site");
    opts.show_dir_listing = true;

    let args = bsconfig::cli_args(&opts);
    assert_eq!(
        args,
        vec![
            "start", "--server", "_site", "--files", "_site", "--port", "4000", "--host",
            "127.0.0.1", "--ui-port", "3001", "--no-open", "--directory",
        ]
    );

    Ok(())
}

#[test]
fn https_and_open_flip_the_conditional_args() -> TestResult {
    let mut opts = serve_options("_site");
    opts.https = true;
    opts.open_url = true;

    let args = bsconfig::cli_args(&opts);
    assert!(args.contains(&"--https".to_string()));
    assert!(!args.contains(&"--no-open".to_string()));
    assert!(!args.contains(&"--directory".to_string()));

    Ok(())
}

#[test]
fn config_args_reference_the_config_file() -> TestResult {
    let args = bsconfig::config_args(Path::new(".bs-config.abc.js"));
    assert_eq!(args, vec!["start", "--config", ".bs-config.abc.js"]);

    Ok(())
}
