//! Integration tests for configuration loading and validation

#![allow(clippy::expect_used)]

use dht_msgformat::config::{CodecConfig, FormatConfig, LoggingConfig, COMPAT_VERSION};
use dht_msgformat::{
    decode, encode, DefaultFormat, Header, Message, MessageTranslator, ProtocolError, Value,
};
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = CodecConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
    assert_eq!(config.format.compat_version, COMPAT_VERSION);
}

#[test]
fn test_zero_compat_version() {
    let mut config = CodecConfig::default();
    config.format.compat_version = 0;
    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("format.compat_version must be at least 1")));
}

#[test]
fn test_strict_node_id_len_bounds() {
    let mut config = CodecConfig::default();
    config.format.strict_node_id_len = Some(0);
    assert!(!config.validate().is_empty());

    config.format.strict_node_id_len = Some(4096);
    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("format.strict_node_id_len") && e.contains("got 4096")));

    config.format.strict_node_id_len = Some(48);
    assert!(config.validate().is_empty());
}

#[test]
fn test_empty_app_name() {
    let mut config = CodecConfig::default();
    config.logging.app_name = String::new();
    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("logging.app_name must not be empty")));
}

#[test]
fn test_no_logging_output() {
    let config = CodecConfig {
        logging: LoggingConfig {
            log_to_console: false,
            log_to_file: false,
            ..LoggingConfig::default()
        },
        ..CodecConfig::default()
    };
    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("logging has no output")));
}

#[test]
fn test_file_logging_requires_path() {
    let mut config = CodecConfig::default();
    config.logging.log_to_file = true;
    config.logging.log_file_path = None;
    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("logging.log_file_path is required")));

    config.logging.log_file_path = Some("/nonexistent-dir/dht.log".to_string());
    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("/nonexistent-dir") && e.contains("is missing")));
}

#[test]
fn test_ensure_valid_collects_errors() {
    let mut config = CodecConfig::default();
    config.format.compat_version = 0;
    config.logging.app_name = String::new();
    match config.ensure_valid() {
        Err(ProtocolError::ConfigError(msg)) => {
            assert!(msg.contains("format.compat_version"));
            assert!(msg.contains("logging.app_name"));
        }
        other => panic!("Expected config error, got {other:?}"),
    }
}

#[test]
fn test_from_toml() {
    let config = CodecConfig::from_toml(
        r#"
        [format]
        compat_version = 2
        strict_node_id_len = 48

        [logging]
        app_name = "dht-node"
        log_level = "DEBUG"
        log_to_console = true
        log_to_file = false
        json_format = true
        "#,
    )
    .expect("Failed to parse TOML");

    assert_eq!(config.format.compat_version, 2);
    assert_eq!(config.format.strict_node_id_len, Some(48));
    assert_eq!(config.logging.log_level, Level::DEBUG);
    assert!(config.logging.json_format);
}

#[test]
fn test_from_toml_partial_tables_use_defaults() {
    let config = CodecConfig::from_toml(
        "[format]\nstrict_node_id_len = 20\n\n[logging]\nlog_level = \"warn\"\n",
    )
    .expect("parse");
    assert_eq!(config.format.compat_version, COMPAT_VERSION);
    assert_eq!(config.format.strict_node_id_len, Some(20));
    assert_eq!(config.logging.app_name, "dht-msgformat");
    assert_eq!(config.logging.log_level, Level::WARN);
    assert!(config.logging.log_to_console);
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = CodecConfig::from_toml("[logging]\nlog_level = \"loud\"\n");
    match result {
        Err(ProtocolError::ConfigError(msg)) => assert!(msg.contains("unknown log level")),
        other => panic!("Expected config error, got {other:?}"),
    }
}

#[test]
fn test_from_toml_rejects_invalid_values() {
    // Parses fine, fails validation
    let result = CodecConfig::from_toml("[format]\ncompat_version = 0\n");
    match result {
        Err(ProtocolError::ConfigError(msg)) => {
            assert!(msg.contains("format.compat_version must be at least 1"));
        }
        other => panic!("Expected config error, got {other:?}"),
    }
}

#[test]
fn test_from_file_loads_and_validates() {
    let dir = std::env::temp_dir();
    let good = dir.join(format!("dht-msgformat-good-{}.toml", std::process::id()));
    let bad = dir.join(format!("dht-msgformat-bad-{}.toml", std::process::id()));
    std::fs::write(&good, "[format]\ncompat_version = 3\n").expect("write");
    std::fs::write(&bad, "[logging]\nlog_to_console = false\n").expect("write");

    let loaded = CodecConfig::from_file(&good).expect("load");
    assert_eq!(loaded.format.compat_version, 3);
    assert!(matches!(
        CodecConfig::from_file(&bad),
        Err(ProtocolError::ConfigError(_))
    ));

    let _ = std::fs::remove_file(&good);
    let _ = std::fs::remove_file(&bad);
}

#[test]
fn test_missing_file_is_config_error() {
    match CodecConfig::from_file("/nonexistent/dht-msgformat.toml") {
        Err(ProtocolError::ConfigError(msg)) => {
            assert!(msg.contains("/nonexistent/dht-msgformat.toml"));
        }
        other => panic!("Expected config error, got {other:?}"),
    }
}

#[test]
fn test_env_overrides() {
    let env = |key: &str| match key {
        "DHT_MSGFORMAT_COMPAT_VERSION" => Some("4".to_string()),
        "DHT_MSGFORMAT_STRICT_NODE_ID_LEN" => Some(" 48 ".to_string()),
        "DHT_MSGFORMAT_LOG_LEVEL" => Some("trace".to_string()),
        _ => None,
    };
    let mut config = CodecConfig::default();
    config.apply_env(env).expect("apply");
    assert_eq!(config.format.compat_version, 4);
    assert_eq!(config.format.strict_node_id_len, Some(48));
    assert_eq!(config.logging.log_level, Level::TRACE);

    let mut untouched = CodecConfig::default();
    untouched.apply_env(|_| None).expect("apply");
    assert_eq!(untouched.format.compat_version, COMPAT_VERSION);
}

#[test]
fn test_unparseable_env_override_is_error() {
    let mut config = CodecConfig::default();
    let result = config.apply_env(|key| {
        (key == "DHT_MSGFORMAT_COMPAT_VERSION").then(|| "300".to_string())
    });
    match result {
        Err(ProtocolError::ConfigError(msg)) => {
            assert!(msg.contains("DHT_MSGFORMAT_COMPAT_VERSION"));
        }
        other => panic!("Expected config error, got {other:?}"),
    }
    assert_eq!(config.format.compat_version, COMPAT_VERSION);
}

#[test]
fn test_format_from_config_drives_translation() {
    let format = DefaultFormat::from_config(&FormatConfig {
        compat_version: 5,
        strict_node_id_len: None,
    });
    assert_eq!(format.compat_version(), 5);

    let message = Message::generic(Header::new("t", "n", "8.8.8.8", 53));
    let primitive = format.to_primitive(&message).expect("encode");
    assert!(matches!(
        decode(&primitive),
        Err(ProtocolError::ProtocolVersionMismatch {
            received: Value::Integer(5),
            ..
        })
    ));
    assert_eq!(format.from_primitive(&primitive).expect("decode"), message);
    assert!(format.from_primitive(&encode(&message).expect("encode")).is_err());
}
