use serial_test::serial;

use s3edit::config::{EditConfig, DEFAULT_EDITOR};

#[test]
#[serial]
fn editor_defaults_when_env_is_unset() {
    std::env::remove_var("EDITOR");

    let config = EditConfig::from_env();

    assert_eq!(config.editor, DEFAULT_EDITOR);
}

#[test]
#[serial]
fn editor_comes_from_the_environment() {
    std::env::set_var("EDITOR", "vim");

    let config = EditConfig::from_env();
    std::env::remove_var("EDITOR");

    assert_eq!(config.editor, "vim");
}

#[test]
#[serial]
fn scratch_dir_is_fixed_under_the_system_temp_dir() {
    let config = EditConfig::from_env();

    assert!(config.scratch_dir.starts_with(std::env::temp_dir()));
    assert!(config.scratch_dir.ends_with("s3edit"));
}
