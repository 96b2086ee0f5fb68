use schoolfinder_api::{Overrides, Settings};
use schoolfinder_core::logging_facility::Profile;
use schoolfinder_core::ExErrorKind;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_defaults() {
    let settings = Settings::from_sources(&Overrides::default(), &HashMap::new()).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.server.bind_addr(), "0.0.0.0:3000");
    assert_eq!(settings.database.path, PathBuf::from("school_management.db"));
    assert_eq!(settings.logging.profile, Profile::Development);
}

#[test]
fn test_flat_env_vars() {
    let settings = Settings::from_sources(
        &Overrides::default(),
        &env(&[("PORT", "8080"), ("DB_PATH", "/var/lib/schools.db")]),
    )
    .unwrap();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.database.path, PathBuf::from("/var/lib/schools.db"));
}

#[test]
fn test_prefixed_env_vars() {
    let settings = Settings::from_sources(
        &Overrides::default(),
        &env(&[
            ("SCHOOLFINDER__SERVER__HOST", "127.0.0.1"),
            ("SCHOOLFINDER__LOGGING__PROFILE", "production"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.logging.profile, Profile::Production);
}

#[test]
fn test_config_file_then_cli_overrides() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[server]\nport = 4000\n\n[database]\npath = \"from-file.db\"\n"
    )
    .unwrap();

    let from_file = Settings::from_sources(
        &Overrides {
            config_file: Some(file.path().to_path_buf()),
            ..Overrides::default()
        },
        &HashMap::new(),
    )
    .unwrap();
    assert_eq!(from_file.server.port, 4000);
    assert_eq!(from_file.database.path, PathBuf::from("from-file.db"));

    let overridden = Settings::from_sources(
        &Overrides {
            config_file: Some(file.path().to_path_buf()),
            port: Some(5000),
            database: Some(PathBuf::from(":memory:")),
            log_profile: Some(Profile::Production),
        },
        &env(&[("PORT", "4500")]),
    )
    .unwrap();
    assert_eq!(overridden.server.port, 5000);
    assert_eq!(overridden.database.path, PathBuf::from(":memory:"));
    assert_eq!(overridden.logging.profile, Profile::Production);
}

#[test]
fn test_invalid_port_is_config_error() {
    let err = Settings::from_sources(&Overrides::default(), &env(&[("PORT", "not-a-port")]))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Config);
}

#[test]
fn test_missing_explicit_config_file_fails() {
    let err = Settings::from_sources(
        &Overrides {
            config_file: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Overrides::default()
        },
        &HashMap::new(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Config);
}
