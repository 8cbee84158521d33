use super::*;
use crate::error::ErrorCode;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn write_settings(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("wordcount.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_default_settings() {
    let settings = JobSettings::default();
    assert_eq!(settings.job_name, "wordcountandreplace");
    assert!(settings.num_workers >= 1);
    assert_eq!(settings.num_reducers, 1);
    assert_eq!(settings.progress_interval, 100);
    assert_eq!(settings.lines_per_split, None);
    assert!(settings.combine);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_job_config_builder() {
    let config = JobConfig::new("in", "out").with_replacement_file("dict.txt");
    assert!(config.replaces_words());
    assert_eq!(config.replacement_files, vec![PathBuf::from("dict.txt")]);
    assert!(config.validate().is_ok());

    assert!(!JobConfig::new("in", "out").replaces_words());
}

#[test]
fn test_validate_rejects_same_input_and_output() {
    let err = JobConfig::new("data", "data").validate().unwrap_err();
    assert_eq!(err.exit_code(), 7);
    assert!(err.to_string().contains("must differ"));
}

#[test]
fn test_validate_rejects_zero_values() {
    let mut settings = JobSettings {
        num_workers: 0,
        ..JobSettings::default()
    };
    assert!(settings.validate().is_err());

    settings.num_workers = 1;
    settings.num_reducers = 0;
    assert!(settings.validate().is_err());

    settings.num_reducers = 1;
    settings.progress_interval = 0;
    assert!(settings.validate().is_err());

    settings.progress_interval = 1;
    settings.lines_per_split = Some(0);
    assert!(settings.validate().is_err());
}

#[test]
fn test_load_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"
num_workers = 3
num_reducers = 2
combine = false
"#,
    );

    let settings = SettingsLoader::new().load_file(&path).unwrap().finish();
    assert_eq!(settings.num_workers, 3);
    assert_eq!(settings.num_reducers, 2);
    assert!(!settings.combine);
    assert_eq!(settings.progress_interval, DEFAULT_PROGRESS_INTERVAL);
}

#[test]
fn test_missing_settings_file() {
    let dir = TempDir::new().unwrap();
    let err = SettingsLoader::new()
        .load_file(&dir.path().join("missing.toml"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
}

#[test]
fn test_unknown_settings_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "num_mappers = 4\n");
    let err = SettingsLoader::new().load_file(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_PARSE_ERROR);
}

#[test]
fn test_env_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "num_workers = 3\nprogress_interval = 50\n");

    let settings = SettingsLoader::new()
        .load_file(&path)
        .unwrap()
        .merge_env_from(env(&[("WCR_WORKERS", "8"), ("WCR_LINES_PER_SPLIT", "1000")]))
        .unwrap()
        .finish();

    assert_eq!(settings.num_workers, 8);
    assert_eq!(settings.progress_interval, 50);
    assert_eq!(settings.lines_per_split, Some(1000));
}

#[test]
fn test_invalid_env_value() {
    let err = SettingsLoader::new()
        .merge_env_from(env(&[("WCR_REDUCERS", "many")]))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_ENV);
    assert!(err.to_string().contains("WCR_REDUCERS"));
}

#[test]
fn test_cli_overrides_env() {
    let overrides = SettingsOverrides {
        num_workers: Some(2),
        combine: Some(false),
        ..SettingsOverrides::default()
    };

    let settings = SettingsLoader::new()
        .merge_env_from(env(&[("WCR_WORKERS", "8"), ("WCR_REDUCERS", "4")]))
        .unwrap()
        .apply_overrides(&overrides)
        .finish();

    assert_eq!(settings.num_workers, 2);
    assert_eq!(settings.num_reducers, 4);
    assert!(!settings.combine);
}
