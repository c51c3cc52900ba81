#![allow(clippy::unwrap_used, clippy::expect_used)]

use condor_client::config::parse_header_arg;
use condor_client::ProviderConfig;
use condor_core::errors::ConductorError;
use std::io::Write;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
endpoint = "http://conductor.internal:8080/api/"
timeout_secs = 5

[custom_headers]
X-Authorization = "secret"
"#
    )
    .unwrap();

    let config = ProviderConfig::load(file.path()).unwrap();
    assert_eq!(config.base_url(), "http://conductor.internal:8080/api");
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(
        config.custom_headers.get("X-Authorization").map(|v| v.expose().as_str()),
        Some("secret")
    );
    config.validate().unwrap();
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProviderConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConductorError::Config { .. }));
}

#[test]
fn test_cli_overrides_replace_file_values() {
    let config = ProviderConfig::from_toml_str(
        r#"
endpoint = "http://a"
[custom_headers]
X-Token = "old"
"#,
    )
    .unwrap();

    let (key, value) = parse_header_arg("X-Token=new").unwrap();
    let config = config.with_endpoint("http://b/").with_header(key, value);

    assert_eq!(config.base_url(), "http://b");
    assert_eq!(
        config.custom_headers.get("X-Token").map(|v| v.expose().as_str()),
        Some("new")
    );
}

#[test]
fn test_zero_timeout_is_rejected() {
    let config = ProviderConfig::from_toml_str("endpoint = \"http://a\"\ntimeout_secs = 0").unwrap();
    assert!(matches!(config.validate(), Err(ConductorError::Config { .. })));
}
