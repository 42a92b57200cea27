use std::process::Command;

#[test]
fn test_version_flag() {
    let binary_path = env!("CARGO_BIN_EXE_cryptoquip");

    let output = Command::new(binary_path)
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(
        output.status.success(),
        "Version flag should exit with code 0"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("cryptoquip "),
        "Version output should start with 'cryptoquip '"
    );
}

#[test]
fn test_version_matches_cargo_toml() {
    let binary_path = env!("CARGO_BIN_EXE_cryptoquip");

    let output = Command::new(binary_path)
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim().strip_prefix("cryptoquip ").unwrap_or("");

    assert_eq!(
        version,
        env!("CARGO_PKG_VERSION"),
        "Binary version should match CARGO_PKG_VERSION"
    );
}

#[test]
fn test_unknown_argument_fails_before_touching_the_terminal() {
    let binary_path = env!("CARGO_BIN_EXE_cryptoquip");
    let data_dir = tempfile::TempDir::new().unwrap();

    let output = Command::new(binary_path)
        .arg("--bogus")
        .env("CRYPTOQUIP_DATA_DIR", data_dir.path())
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--bogus"), "stderr: {}", stderr);
}
