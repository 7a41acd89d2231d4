use sonicseq::config::{
    load_settings_from, ConfigError, DEFAULT_API_BASE, DEFAULT_MAX_TRACK_COUNT, DEFAULT_MODEL,
};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn config_settings_module_missing_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");

    let loaded = load_settings_from(&path).expect("load defaults");

    assert!(!loaded.file_present);
    assert_eq!(loaded.path, path);
    assert_eq!(loaded.settings.provider.model, DEFAULT_MODEL);
    assert_eq!(loaded.settings.provider.api_base, DEFAULT_API_BASE);
    assert_eq!(loaded.settings.max_track_count, DEFAULT_MAX_TRACK_COUNT);
}

#[test]
fn config_settings_module_reads_yaml_overrides() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "provider:\n  model: gemini-2.5-flash\n  thinking_budget: 0\nmax_track_count: 12\nlog_path: /var/tmp/sonicseq.log\n",
    )
    .expect("write config");

    let loaded = load_settings_from(&path).expect("load config");

    assert!(loaded.file_present);
    assert_eq!(loaded.settings.provider.model, "gemini-2.5-flash");
    assert_eq!(loaded.settings.provider.thinking_budget, 0);
    assert_eq!(loaded.settings.max_track_count, 12);
    assert_eq!(
        loaded.settings.log_path,
        Some(PathBuf::from("/var/tmp/sonicseq.log"))
    );
}

#[test]
fn config_settings_module_reports_parse_and_validation_errors() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");

    fs::write(&path, "provider: [not, a, map]\n").expect("write config");
    let err = load_settings_from(&path).expect_err("bad yaml");
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");

    fs::write(&path, "provider:\n  model: \"  \"\n").expect("write config");
    let err = load_settings_from(&path).expect_err("blank model");
    assert!(matches!(err, ConfigError::Settings(_)), "{err}");
    assert!(err.to_string().contains("provider.model"));
}
