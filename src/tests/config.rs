use super::Config;

#[test]
fn test_partial_config_keeps_defaults() {
    let config = Config::from_toml("file_extensions = [\"md\"]\n");

    assert_eq!(config.file_extensions, vec!["md".to_string()]);
    assert_eq!(config.content_dirs, Config::default().content_dirs);
    assert_eq!(config.state_file, ".cheatcodes-state.json");
}

#[test]
fn test_invalid_config_falls_back() {
    let config = Config::from_toml("content_dirs = 42");

    assert_eq!(config, Config::default());
}
