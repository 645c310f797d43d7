use pretty_assertions::assert_eq;
use rehab_cli::config::{load_config_from, resolve_backend_url, save_config_to, RehabConfig};

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = RehabConfig::new("http://clinic.local:8000");
    let path = save_config_to(dir.path(), &config).unwrap();

    assert_eq!(load_config_from(&path).unwrap(), config);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn saved_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = save_config_to(dir.path(), &RehabConfig::new("http://a")).unwrap();
    let mode = std::fs::metadata(path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn unversioned_config_is_stamped_current() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"backend_url": "http://old-host:8000", "created_at": "2025-03-01T09:30:00Z"}"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.backend_url, "http://old-host:8000");
}

#[test]
fn newer_config_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"config_version": 9, "backend_url": "http://a", "created_at": "2025-03-01T09:30:00Z"}"#,
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn backend_url_precedence() {
    let saved = RehabConfig::new("http://saved");
    assert_eq!(
        resolve_backend_url(Some("http://flag"), Some("http://env"), Some(&saved)),
        "http://flag"
    );
    assert_eq!(
        resolve_backend_url(None, Some("http://env"), Some(&saved)),
        "http://env"
    );
    assert_eq!(resolve_backend_url(None, Some(" "), Some(&saved)), "http://saved");
    assert_eq!(resolve_backend_url(None, None, None), "http://127.0.0.1:8000");
}
