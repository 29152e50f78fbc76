use super::*;

#[test]
fn defaults_apply_when_unset() {
    let config = ClinicConfig::from_values(None, None, Some(PathBuf::from("/home/ana"))).unwrap();
    assert_eq!(config.api_base_url, "http://localhost:5078");
    assert_eq!(config.session_file, PathBuf::from("/home/ana/.clinic/session.json"));
}

#[test]
fn session_file_is_relative_without_home() {
    let config = ClinicConfig::from_values(None, None, None).unwrap();
    assert_eq!(config.session_file, PathBuf::from(".clinic/session.json"));
}

#[test]
fn explicit_values_win() {
    let config = ClinicConfig::from_values(
        Some("https://api.clinic.test/".into()),
        Some(PathBuf::from("/tmp/s.json")),
        Some(PathBuf::from("/home/ana")),
    )
    .unwrap();
    assert_eq!(config.api_base_url, "https://api.clinic.test");
    assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
}

#[test]
fn base_url_trims_trailing_slashes() {
    assert_eq!(normalize_base_url(" http://10.0.0.2:5078// ").unwrap(), "http://10.0.0.2:5078");
}

#[test]
fn base_url_requires_http_scheme_and_host() {
    assert_eq!(
        normalize_base_url("localhost:5078"),
        Err(ConfigError::InvalidBaseUrl("localhost:5078".into()))
    );
    assert!(normalize_base_url("ftp://files").is_err());
    assert!(normalize_base_url("https://").is_err());
}

#[test]
fn unset_environment_variable_reads_as_absent() {
    assert_eq!(env_value("CLINIC_TEST_VARIABLE_NEVER_SET"), None);
}
