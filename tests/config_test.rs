#![cfg(feature = "cli")]

use better_rest::utils::validation::Validate;
use better_rest::{CliConfig, FormSettings, Overrides, TomlConfig};
use chrono::NaiveTime;
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_cli_overrides_config_file() {
    let file = write_config(
        r#"
[model]
path = "custom/model.json"

[form]
sleep_hours = 9.5
wake_time = "05:30"
coffee_cups = 3
"#,
    );

    let cli = CliConfig::try_parse_from([
        "better-rest",
        "--config",
        file.path().to_str().unwrap(),
        "--wake",
        "08:15",
    ])
    .unwrap();

    let toml = cli.load_file().unwrap();
    let settings = cli.settings(&toml).unwrap();

    assert_eq!(settings.wake_time, NaiveTime::from_hms_opt(8, 15, 0).unwrap());
    assert_eq!(settings.sleep_hours, 9.5);
    assert_eq!(settings.coffee_cups, 3);
    assert_eq!(settings.model_path.as_deref(), Some("custom/model.json"));

    let form = settings.form();
    assert_eq!(form.sleep_label(), "9.5 hours");
    assert_eq!(
        settings.model_source().path().and_then(|p| p.to_str()),
        Some("custom/model.json")
    );
}

#[test]
fn test_invalid_config_file_rejected() {
    let file = write_config("[form]\ncoffee_cups = 5\n");
    let cli =
        CliConfig::try_parse_from(["better-rest", "--config", file.path().to_str().unwrap()])
            .unwrap();

    assert!(cli.load_file().is_err());
}

#[test]
fn test_missing_config_file_is_io_error() {
    let cli = CliConfig::try_parse_from(["better-rest", "--config", "/no/such/better-rest.toml"])
        .unwrap();
    let err = cli.load_file().unwrap_err();
    assert!(matches!(err, better_rest::BedtimeError::IoError(_)));
}

#[test]
fn test_sleep_hours_must_follow_stepper() {
    let overrides = Overrides {
        sleep_hours: Some(8.25),
        ..Overrides::default()
    };
    let settings = FormSettings::resolve(&TomlConfig::default(), &overrides).unwrap();
    assert!(settings.validate().is_err());
}

#[test]
fn test_sample_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/better-rest.toml");
    let config = TomlConfig::from_file(path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.form.wake_time.as_deref(), Some("07:00"));
}
