// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

use super::*;

fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("upkeepd.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn minimal_config_gets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, r#"device_id = "device-1""#);

    let config = AgentConfig::load(&path).unwrap();
    assert_eq!(config.device_id, "device-1");
    assert_eq!(config.broker.host, "localhost");
    assert_eq!(config.broker.port, 1883);
    assert_eq!(config.broker.keep_alive_secs, 10);
    assert_eq!(config.jobs.poll_interval_secs, 30);
    assert_eq!(config.jobs.step_timeout_minutes, 10_000);
    assert_eq!(config.jobs.fetch_workers, 4);
    assert!(config.jobs.client_token.is_none());
    assert!(config.credentials.ca_path.is_none());
}

#[test]
fn full_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
            device_id = "device-2"

            [broker]
            host = "broker.fleet.example"
            port = 8883
            keep_alive_secs = 30
            last_will_topic = "things/device-2/offline"
            last_will_payload = "connection lost"

            [credentials]
            ca_path = "/etc/upkeep/ca.pem"
            cert_path = "/etc/upkeep/device.pem"
            key_path = "/etc/upkeep/device.key"

            [jobs]
            poll_interval_secs = 60
            client_token = "123"
            step_timeout_minutes = 15
            fetch_workers = 2
            fetch_queue_depth = 8

            [storage]
            download_dir = "/data/artifacts"
            manifest_path = "/data/apps.json"
            events_dir = "/data/events"
        "#,
    );

    let config = AgentConfig::load(&path).unwrap();
    assert_eq!(config.jobs.client_token.as_deref(), Some("123"));
    assert_eq!(config.jobs.poll_interval_secs, 60);
    assert_eq!(config.storage.download_dir, PathBuf::from("/data/artifacts"));

    let settings = config.broker_settings();
    assert_eq!(settings.host, "broker.fleet.example");
    assert_eq!(settings.port, 8883);
    assert_eq!(settings.keep_alive, Duration::from_secs(30));
    let will = settings.last_will.unwrap();
    assert_eq!(will.topic, "things/device-2/offline");
}

#[test]
fn missing_device_id_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, r#"[broker]"#);
    assert!(matches!(AgentConfig::load(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn missing_file_surfaces_the_path() {
    let err = AgentConfig::load(Path::new("/nonexistent/upkeepd.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/upkeepd.toml"));
}

#[test]
#[serial_test::serial]
fn env_vars_override_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
            device_id = "from-file"

            [broker]
            host = "file-host"
        "#,
    );

    std::env::set_var("UPKEEP_DEVICE_ID", "from-env");
    std::env::set_var("UPKEEP_BROKER_HOST", "env-host");
    std::env::set_var("UPKEEP_BROKER_PORT", "2883");
    std::env::set_var("UPKEEP_POLL_INTERVAL_SECS", "5");
    let config = AgentConfig::load(&path).unwrap();
    std::env::remove_var("UPKEEP_DEVICE_ID");
    std::env::remove_var("UPKEEP_BROKER_HOST");
    std::env::remove_var("UPKEEP_BROKER_PORT");
    std::env::remove_var("UPKEEP_POLL_INTERVAL_SECS");

    assert_eq!(config.device_id, "from-env");
    assert_eq!(config.broker.host, "env-host");
    assert_eq!(config.broker.port, 2883);
    assert_eq!(config.poll_interval(), Duration::from_secs(5));
}

#[test]
#[serial_test::serial]
fn empty_env_vars_do_not_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, r#"device_id = "from-file""#);

    std::env::set_var("UPKEEP_DEVICE_ID", "");
    let config = AgentConfig::load(&path).unwrap();
    std::env::remove_var("UPKEEP_DEVICE_ID");

    assert_eq!(config.device_id, "from-file");
}

#[test]
fn partial_last_will_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
            device_id = "d"

            [broker]
            last_will_topic = "things/d/offline"
        "#,
    );
    let config = AgentConfig::load(&path).unwrap();
    assert!(config.broker_settings().last_will.is_none());
}
