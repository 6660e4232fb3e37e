use std::path::PathBuf;

use roteiro::config::{
    ConfigFlags, DEFAULT_TITLE, clear_config_flags, load_config_flags, parse_flag_tokens,
    save_config_flags,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".roteirorc");
    let content = r#"
# comment
--no-mouse

--title Viagem ao Centro da Terra

--debug-log=roteiro.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_mouse);
    assert!(!flags.dump_on_exit);
    assert_eq!(flags.title.as_deref(), Some("Viagem ao Centro da Terra"));
    assert_eq!(flags.debug_log, Some(PathBuf::from("roteiro.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".roteirorc");
    let content = "--no-mouse\n--title Rascunho\n--debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "roteiro".to_string(),
        "--title".to_string(),
        "Final".to_string(),
        "--dump-on-exit".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_mouse, "file flags should remain enabled");
    assert!(effective.dump_on_exit, "cli flags should be applied");
    assert_eq!(effective.title_or_default(), "Final", "cli should override title");
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_save_then_load_keeps_title_with_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config");
    let flags = ConfigFlags {
        title: Some("Viagem à Lua, parte 2".to_string()),
        dump_on_exit: true,
        ..ConfigFlags::default()
    };
    save_config_flags(&path, &flags).unwrap();

    let loaded = load_config_flags(&path).unwrap();
    assert_eq!(loaded, flags);
}

#[test]
fn test_clear_removes_saved_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".roteirorc");
    std::fs::write(&path, "--no-mouse\n").unwrap();

    clear_config_flags(&path).unwrap();
    assert!(!path.exists());
    assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    // clearing twice is fine
    clear_config_flags(&path).unwrap();
}

#[test]
fn test_missing_title_falls_back_to_default() {
    let flags = parse_flag_tokens(&["roteiro".to_string(), "--title".to_string()]);
    assert_eq!(flags.title, None);
    assert_eq!(flags.title_or_default(), DEFAULT_TITLE);
}
