//! End-to-end tests of the command line tool.

use std::io::{Read, Write};
use std::os::unix::net::UnixListener;
use std::process::Command;
use std::thread;

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vsock-send"))
}

#[test]
fn test_no_tokens_is_usage_error() {
    let output = bin().output().expect("failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage:"));
}

#[test]
fn test_version() {
    let output = bin().arg("--version").output().expect("failed to run binary");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("vsock-send "));
}

#[test]
fn test_round_trip_through_config() {
    let temp_dir = TempDir::new().unwrap();
    let socket_path = temp_dir.path().join("peer.sock");
    let config_path = temp_dir.path().join("client.toml");

    std::fs::write(
        &config_path,
        format!(
            "[endpoint]\ntransport = \"unix\"\npath = \"{}\"\n\n[limits]\nio_timeout_seconds = 10\n",
            socket_path.display()
        ),
    )
    .unwrap();

    let listener = UnixListener::bind(&socket_path).unwrap();
    let peer = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut byte = [0u8; 1];
        while stream.read(&mut byte).unwrap() == 1 {
            request.push(byte[0]);
            if byte[0] == b'\n' {
                break;
            }
        }
        stream.write_all(b"42").unwrap();
        request
    });

    let output = bin()
        .arg("--config")
        .arg(&config_path)
        .args(["get", "answer"])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(output.stdout, b"Value: 42");
    assert_eq!(peer.join().unwrap(), b"get answer \n");
}

#[test]
fn test_unreachable_peer_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("client.toml");
    std::fs::write(
        &config_path,
        format!(
            "[endpoint]\ntransport = \"unix\"\npath = \"{}\"\n",
            temp_dir.path().join("nobody.sock").display()
        ),
    )
    .unwrap();

    let output = bin()
        .args(["-c"])
        .arg(&config_path)
        .arg("ping")
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to connect"));
}
