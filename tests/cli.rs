#![cfg(feature = "config")]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const SAMPLE: &str = "1 x ERROR 50\n2 y OK 150\n3 z ERROR 200\n";

/// Run the binary with an empty config file so the user's own config is never read.
fn telelog(workdir: &Path, args: &[&str], stdin: Option<&str>) -> Output {
    let config_path = workdir.join("telelog.toml");
    std::fs::write(&config_path, "").expect("write empty config");

    let mut child = Command::new(env!("CARGO_BIN_EXE_telelog"))
        .args(args)
        .arg("--config")
        .arg(&config_path)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn telelog");

    {
        let mut child_stdin = child.stdin.take().expect("child stdin");
        if let Some(input) = stdin {
            child_stdin
                .write_all(input.as_bytes())
                .expect("write stdin fixture");
        }
    }

    child.wait_with_output().expect("wait for telelog")
}

#[test]
fn missing_file_prints_a_single_diagnostic() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("nonexistent.txt");
    let output = telelog(dir.path(), &[missing.to_str().unwrap()], None);

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert_eq!(
        stderr,
        format!("Error: Unable to open file {}\n", missing.display())
    );

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.ends_with("[Priority 2]: Maintenance required for sensor 5.\n"));
}

#[test]
fn dash_reads_telemetry_from_stdin() {
    let dir = TempDir::new().expect("temp dir");
    let output = telelog(dir.path(), &["-"], Some(SAMPLE));

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains(
        "Searching for logs with keyword 'ERROR' in column 2...\n1 x ERROR 50\n3 z ERROR 200\n"
    ));
    assert!(stdout.contains("Filtering logs where column 3 > 100...\n2 y OK 150\n3 z ERROR 200\n"));
}
