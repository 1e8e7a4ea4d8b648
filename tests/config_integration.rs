use std::path::PathBuf;

use lazyview::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".lazyviewrc");
    let content = r"
# comment
--watch

--debounce-ms 400
   
--log-file=lazyview.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.debounce_ms, Some(400));
    assert_eq!(flags.log_file, Some(PathBuf::from("lazyview.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".lazyviewrc");
    std::fs::write(&path, "--watch\n--debounce-ms 400\n--log-file file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = ["lazyview", "--debounce-ms", "50", "--allow-trailing-commas"]
        .map(String::from);
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.allow_trailing_commas, "cli flags should be applied");
    assert_eq!(effective.debounce_ms, Some(50), "cli should override the delay");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_global_then_local_then_cli() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".lazyviewrc");
    std::fs::write(&global, "--view\n--debounce-ms 300\n").unwrap();
    std::fs::write(&local, "# project override\n--debounce-ms 100\n").unwrap();

    let effective = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap())
        .union(&ConfigFlags::default());
    assert!(effective.view);
    assert_eq!(effective.debounce_ms, Some(100));
}

#[test]
fn test_short_watch_flag_is_saved_as_long_form() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    let cli_flags = parse_flag_tokens(&["lazyview".to_string(), "-w".to_string()]);
    lazyview::config::save_config_flags(&path, &cli_flags).unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.lines().any(|line| line == "--watch"));
    assert!(load_config_flags(&path).unwrap().watch);
}
