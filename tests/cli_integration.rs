use assert_cmd::Command;
use std::io::Write;

const SECRET_B64: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAI=";

fn vault() -> Command {
    let mut cmd = Command::cargo_bin("shamir-vault").unwrap();
    cmd.env_remove("SHAMIR_VAULT_CONFIG").env("RUST_LOG", "off");
    cmd
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone()).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn test_cli_split_and_combine() {
    let output = vault()
        .args(["split", "--secret", SECRET_B64, "--threshold", "3", "--shares", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let shares = stdout_lines(&output);
    assert_eq!(shares.len(), 5);

    let output = vault()
        .arg("combine")
        .args([&shares[0], &shares[2], &shares[4]])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec![SECRET_B64.to_string()]);
}

#[test]
fn test_cli_split_invalid_threshold_fails() {
    vault()
        .args(["split", "--secret", SECRET_B64, "--threshold", "1", "--shares", "5"])
        .assert()
        .failure();
}

#[test]
fn test_cli_combine_duplicate_fails() {
    let share = "2-AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAI=";
    vault().args(["combine", share, share]).assert().failure();
}

#[test]
fn test_cli_encrypt_decrypt_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.txt");
    let sealed = dir.path().join("plain.enc");
    let restored = dir.path().join("restored.txt");
    std::fs::File::create(&input).unwrap().write_all(b"top secret notes").unwrap();

    let output = vault()
        .args(["encrypt", "--password", "hunter2", "--threshold", "2", "--shares", "3"])
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&sealed)
        .output()
        .unwrap();
    assert!(output.status.success());
    let shares = stdout_lines(&output);
    assert_eq!(shares.len(), 3);

    vault()
        .arg("decrypt")
        .arg("--input")
        .arg(&sealed)
        .arg("--output")
        .arg(&restored)
        .args([&shares[2], &shares[0]])
        .assert()
        .success();
    assert_eq!(std::fs::read(&restored).unwrap(), b"top secret notes");
}

#[test]
fn test_cli_config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("vault.toml");
    std::fs::write(&config, "[sharing]\nthreshold = 2\nshares = 7\n").unwrap();

    let output = vault()
        .arg("--config")
        .arg(&config)
        .args(["split", "--secret", SECRET_B64])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 7);
}

#[test]
fn test_cli_derive_key() {
    let output = vault().args(["derive-key", "--password", "abc"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=".to_string()]
    );
}
