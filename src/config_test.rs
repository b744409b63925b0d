use super::*;

#[test]
fn new_accepts_https_url_and_defaults_session_file() {
    let cfg = Config::new("https://script.example.test/exec", 10, None).unwrap();
    assert_eq!(cfg.api_url, "https://script.example.test/exec");
    assert_eq!(cfg.page_size.get(), 10);
    assert_eq!(cfg.session_file, default_session_file());
}

#[test]
fn new_trims_url() {
    let cfg = Config::new("  http://127.0.0.1:9000/exec \n", 5, Some(PathBuf::from("/tmp/s.json"))).unwrap();
    assert_eq!(cfg.api_url, "http://127.0.0.1:9000/exec");
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/s.json"));
}

#[test]
fn new_rejects_non_http_url() {
    let err = Config::new("ftp://example.test", 10, None).unwrap_err();
    assert_eq!(err, ConfigError::InvalidApiUrl("ftp://example.test".to_owned()));
}

#[test]
fn new_rejects_empty_url() {
    assert_eq!(Config::new("   ", 10, None).unwrap_err(), ConfigError::Missing(API_URL_VAR));
}

#[test]
fn new_rejects_zero_page_size() {
    let err = Config::new("https://x.test", 0, None).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPageSize("0".to_owned()));
}

#[test]
fn parse_page_size_accepts_positive_integers_only() {
    assert_eq!(parse_page_size(" 25 "), Ok(25));
    assert!(parse_page_size("0").is_err());
    assert!(parse_page_size("-3").is_err());
    assert!(parse_page_size("ten").is_err());
}

#[test]
fn default_session_file_lives_in_temp_dir() {
    let path = default_session_file();
    assert!(path.starts_with(std::env::temp_dir()));
    assert!(path.ends_with(SESSION_FILE_NAME));
}
