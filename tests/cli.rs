use std::process::{Command, Output};

fn run(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_onion-vanity"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_no_dictionary_prints_usage_and_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No dictionary supplied"));
    assert!(!dir.path().join("keys").exists());
}

#[test]
fn test_file_and_url_together_print_usage_and_exit_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "onion tor").unwrap();

    let output = run(
        dir.path(),
        &["--file", words.to_str().unwrap(), "--url", "http://127.0.0.1:9/words.txt"],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No dictionary supplied"));
    assert!(!dir.path().join("keys").exists());
}

#[test]
fn test_unknown_key_format_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--key", "dsa"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("keys").exists());
}
