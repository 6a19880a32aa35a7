//! Config file loading and wiring into the controller

use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use inquiry_engine::{
    ConfigError, InquiryConfig, Purpose, PurposeOptions, emailjs_controller, emailjs_dispatcher,
};

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn full_config_round_trips_into_controller() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[emailjs]
public_key = "uyaKio4T7vNuVoj1w"
service_id = "service_j1rjw37"
template_id = "template_s1ldd07"
request_timeout_secs = 20

[form]
purposes = ["invest", "rent", "design"]
success_hide_ms = 3000

[effects]
header_offset = 90
"#,
    );

    let config = InquiryConfig::load_from(&path).unwrap();
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(20)));
    assert_eq!(config.effects.header_offset, 90.0);
    assert_eq!(config.effects.scroll_threshold, 50.0);

    let controller = emailjs_controller(&config).unwrap();
    assert!(controller.dispatcher().config().is_configured());
    assert_eq!(controller.purposes(), &PurposeOptions::three_way());
    assert!(controller.purposes().contains(Purpose::Design));
}

#[test]
fn missing_emailjs_section_is_unconfigured() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[form]\nsuccess_hide_ms = 1000\n");

    let config = InquiryConfig::load_from(&path).unwrap();
    let dispatcher = emailjs_dispatcher(&config).unwrap();

    assert_eq!(
        dispatcher.config().unconfigured_fields(),
        vec!["public_key", "service_id", "template_id"]
    );
    assert_eq!(config.form.success_hide_after(), Duration::from_millis(1000));
}

#[test]
fn empty_purpose_list_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[form]\npurposes = []\n");

    let err = InquiryConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), &path);
}

#[test]
fn unreadable_path_reports_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = InquiryConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
