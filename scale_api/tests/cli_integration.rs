use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Minimal valid TOML; tests that must fail replace single lines in it.
const VALID_TOML: &str = r#"
[acquisition]
sample_size = 5
timeout_ms = 5000
error_tolerance = 0.2
data_pattern = '^(\d+\.?\d*)\s*(\w+)$'

[scales]
bench-1 = "/dev/ttyUSB0"
"#;

fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("cfg.toml");
    fs::write(&path, body).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["--definitely-not-a-flag"], 2, "unexpected argument", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, VALID_TOML);

    let mut cmd = Command::cargo_bin("scale_api").unwrap();
    cmd.arg("--config").arg(&cfg);
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn missing_config_file_is_reported() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    Command::cargo_bin("scale_api")
        .unwrap()
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("read config"));
}

#[rstest]
fn unparseable_toml_is_reported() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "[acquisition\nsample_size = 5");

    Command::cargo_bin("scale_api")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse config"));
}

#[rstest]
#[case("sample_size = 5", "sample_size = 0", "acquisition.sample_size")]
#[case("timeout_ms = 5000", "timeout_ms = 0", "acquisition.timeout_ms")]
#[case(
    r"data_pattern = '^(\d+\.?\d*)\s*(\w+)$'",
    "data_pattern = '(('",
    "acquisition.data_pattern"
)]
fn invalid_config_values_are_reported(
    #[case] from: &str,
    #[case] to: &str,
    #[case] needle: &str,
) {
    let dir = tempdir().unwrap();
    let body = VALID_TOML.replace(from, to);
    assert_ne!(body, VALID_TOML, "replacement did not apply");
    let cfg = write_config(&dir, &body);

    Command::cargo_bin("scale_api")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicate::str::contains(needle));
}

#[rstest]
fn empty_scales_table_is_rejected_at_startup() {
    let dir = tempdir().unwrap();
    let body = VALID_TOML.replace("bench-1 = \"/dev/ttyUSB0\"", "");
    let cfg = write_config(&dir, &body);

    Command::cargo_bin("scale_api")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[scales]"));
}
