use std::time::Duration;

use docflow::presentation::config::{
    AuthSettings, Environment, Settings, StoreProvider, UploadSettings,
};

#[test]
fn given_no_sources_when_using_defaults_then_matches_documented_values() {
    let settings = Settings::default();

    assert_eq!(settings.upload.progress_tick_ms, 100);
    assert_eq!(settings.upload.chunk_size_bytes, 16 * 1024);
    assert_eq!(settings.upload.completed_grace_ms, 2000);
    assert_eq!(settings.upload.max_file_size_bytes, 10 * 1024 * 1024);
    assert_eq!(settings.store.provider, StoreProvider::Memory);
    assert!(settings.auth.user_id.is_none());
}

#[test]
fn given_upload_settings_when_building_queue_config_then_converts_units() {
    let config = UploadSettings::default().queue_config();

    assert_eq!(config.progress_tick, Duration::from_millis(100));
    assert_eq!(config.completed_grace, Some(Duration::from_secs(2)));
    assert_eq!(config.max_file_size, 10 * 1024 * 1024);
}

#[test]
fn given_zero_grace_when_building_queue_config_then_completed_tasks_are_kept() {
    let settings = UploadSettings {
        completed_grace_ms: 0,
        ..UploadSettings::default()
    };

    assert_eq!(settings.queue_config().completed_grace, None);
}

#[test]
fn given_blank_user_id_when_resolving_user_then_treated_as_signed_out() {
    let auth = AuthSettings {
        user_id: Some("   ".to_string()),
    };
    assert!(auth.user().is_none());
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values() {
    assert_eq!(Environment::try_from("PROD".to_string()), Ok(Environment::Prod));
    assert_eq!(Environment::try_from("production".to_string()), Ok(Environment::Prod));
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_test_environment_without_settings_file_when_loading_then_falls_back_to_defaults() {
    let settings = Settings::load_for(Environment::Test).unwrap();

    assert_eq!(settings.upload.chunk_size_bytes, 16 * 1024);
}
