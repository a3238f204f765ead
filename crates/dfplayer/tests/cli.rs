#![cfg(all(unix, feature = "cli"))]

use std::process::Command;

fn dfplayer() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dfplayer"));
    for var in [
        "DFPLAYER_PORT",
        "DFPLAYER_BAUD",
        "DFPLAYER_VARIANT",
        "DFPLAYER_TIMEOUT",
        "DFPLAYER_ACK",
        "DFPLAYER_NO_BOOT_WAIT",
        "DFPLAYER_STRICT_CHECKSUM",
        "DFPLAYER_LOG_FORMAT",
        "DFPLAYER_LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--log-level").arg("error");
    cmd
}

#[test]
fn version_prints_package_version() {
    let output = dfplayer().arg("version").output().expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("dfplayer {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn extended_version_lists_variants() {
    let output = dfplayer()
        .arg("version")
        .arg("--extended")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: dfplayer"));
    assert!(stdout.contains("variants: mini, fn-x10p, hw247a, no-checksum"));
}

#[test]
fn command_without_port_is_usage_error() {
    let output = dfplayer().arg("next").output().expect("next should run");

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no serial port given"));
}

#[test]
fn missing_device_is_transport_error() {
    let missing = format!("/dev/dfplayer-missing-{}", std::process::id());
    let output = dfplayer()
        .arg("--port")
        .arg(&missing)
        .arg("--no-boot-wait")
        .arg("play")
        .arg("1")
        .output()
        .expect("play should run");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("open failed"));
    assert!(stderr.contains(&missing));
}

#[test]
fn invalid_timeout_is_usage_error() {
    let output = dfplayer()
        .arg("--port")
        .arg("/dev/null")
        .arg("--timeout")
        .arg("soon")
        .arg("state")
        .output()
        .expect("state should run");

    assert_eq!(output.status.code(), Some(64));
}
