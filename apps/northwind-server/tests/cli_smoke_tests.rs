#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the northwind-server binary
//!
//! These run the compiled binary and check help output, configuration
//! validation and a short-lived mock run.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

fn run_northwind_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_northwind-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute northwind-server")
}

fn write_config(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write file");
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_northwind_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("northwind-server"));
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_northwind_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("northwind-server"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_northwind_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report the bad subcommand: {stderr}");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_northwind_server(&["--config", "/nonexistent/northwind.yaml", "check"]);

    assert!(
        !output.status.success(),
        "Should fail when config file doesn't exist"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "Should indicate config file not found: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "invalid.yaml", "invalid: yaml: content: [unclosed");

    let output = run_northwind_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("yaml") || stderr.contains("parse"),
        "Should mention YAML parsing issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_unknown_field() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "unknown.yaml",
        "server:\n  bind_addr: \"127.0.0.1:8087\"\n  listen_backlog: 10\n",
    );

    let output = run_northwind_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Unknown keys should be rejected");
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "valid.yaml",
        r#"
server:
  bind_addr: "127.0.0.1:18087"
database:
  dsn: "sqlite://northwind.db?mode=rwc"
  max_connections: 4
logging:
  level: "warn"
  format: "json"
weather:
  timeout_secs: 10
"#,
    );

    let output = run_northwind_server(&["--config", &config_path, "check"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Valid config should pass: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("127.0.0.1:18087"));
}

#[test]
fn test_cli_print_config_applies_overrides_and_hides_api_key() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "secret.yaml",
        "logging:\n  level: \"warn\"\nweather:\n  api_key: \"CWA-DO-NOT-PRINT\"\n",
    );

    let output = run_northwind_server(&[
        "--config",
        &config_path,
        "-p",
        "9191",
        "--mock",
        "--print-config",
    ]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "print-config should succeed: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration:"));
    assert!(stdout.contains("127.0.0.1:9191"));
    assert!(stdout.contains("sqlite::memory:"));
    assert!(!stdout.contains("CWA-DO-NOT-PRINT"));
    assert!(!stdout.contains("api_key"));
}

#[test]
fn test_cli_run_with_unreachable_database_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing_dir = temp_dir.path().join("no-such-dir").join("northwind.db");
    let config_path = write_config(
        &temp_dir,
        "bad-db.yaml",
        &format!(
            "logging:\n  level: \"error\"\ndatabase:\n  dsn: \"sqlite://{}\"\n",
            missing_dir.display()
        ),
    );

    let output = run_northwind_server(&["--config", &config_path, "run"]);

    assert!(!output.status.success(), "Run should fail without a usable database");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("database"), "Should mention the database: {stderr}");
}

#[tokio::test]
async fn test_cli_mock_run_stays_up_until_stopped() {
    let child = tokio::process::Command::new(env!("CARGO_BIN_EXE_northwind-server"))
        .args(["--mock", "--port", "0", "run"])
        .env_remove("RUST_LOG")
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn northwind-server");

    // A healthy server keeps running; an early exit means startup failed.
    let result = timeout(Duration::from_secs(3), child.wait_with_output()).await;
    match result {
        Err(_elapsed) => {}
        Ok(output) => {
            let output = output.unwrap();
            panic!(
                "server exited early with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }
    }
}

#[test]
fn test_cli_bundled_config_is_valid() {
    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/northwind.yaml");

    let output = run_northwind_server(&["--config", config_path, "check"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Bundled config should pass: {stderr}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_cli_sigterm_stops_server_gracefully() {
    use tokio::io::{AsyncBufReadExt, BufReader};

    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_northwind-server"))
        .args(["--mock", "--port", "0", "run"])
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn northwind-server");

    let mut lines = BufReader::new(child.stdout.take().unwrap()).lines();
    let listening = timeout(Duration::from_secs(15), async {
        while let Some(line) = lines.next_line().await.unwrap() {
            if line.contains("HTTP server listening") {
                return true;
            }
        }
        false
    })
    .await
    .expect("server did not start in time");
    assert!(listening, "server exited before listening");

    let pid = child.id().unwrap().to_string();
    let kill = Command::new("kill").args(["-TERM", &pid]).status().unwrap();
    assert!(kill.success());

    let mut saw_stop = false;
    let drained = timeout(Duration::from_secs(10), async {
        while let Some(line) = lines.next_line().await.unwrap() {
            saw_stop |= line.contains("SIGTERM");
        }
    })
    .await;
    assert!(drained.is_ok(), "stdout did not close after SIGTERM");

    let status = timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("server did not exit after SIGTERM")
        .unwrap();
    assert!(status.success(), "graceful stop should exit 0, got {status}");
    assert!(saw_stop, "stop reason should be logged");
}
