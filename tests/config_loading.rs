use energy_cost::config::load_config;
use std::io::Write;

#[test]
fn test_load_config_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        r#"
[server]
host = "127.0.0.1"
port = 9100
log_format = "json"

[pricing]
base_url = "http://localhost:8999/v1/marketdata"
timeout_seconds = 3

[metrics]
enabled = false
"#
    )?;

    let config = load_config(Some(file.path()))?;

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.log_format, "json");
    assert_eq!(config.server.log_level, "info");
    assert_eq!(config.pricing.base_url, "http://localhost:8999/v1/marketdata");
    assert_eq!(config.pricing.timeout_seconds, 3);
    assert!(!config.metrics.enabled);
    Ok(())
}

#[test]
fn test_missing_default_file_falls_back_to_defaults() -> anyhow::Result<()> {
    // No config.toml in the package root
    let config = load_config(None)?;

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.pricing.base_url, "https://api.awattar.de/v1/marketdata");
    Ok(())
}

#[test]
fn test_explicit_missing_file_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("tpyo.toml");

    let result = load_config(Some(&missing));

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Configuration file not found"));
    Ok(())
}

#[test]
fn test_invalid_file_is_rejected() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        r#"
[pricing]
timeout_seconds = 0
"#
    )?;

    let result = load_config(Some(file.path()));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("timeout_seconds"));
    Ok(())
}
