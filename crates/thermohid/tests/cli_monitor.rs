#![cfg(all(unix, feature = "cli"))]

use std::os::fd::{FromRawFd, OwnedFd};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/thermohid-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

/// A regular file stands in for the hidraw node: 3-byte reads split it into reports.
fn fake_device(dir: &std::path::Path, bytes: &[u8]) -> PathBuf {
    let path = dir.join("hidraw");
    std::fs::write(&path, bytes).expect("device file should be writable");
    path
}

fn path_str(path: &std::path::Path) -> &str {
    path.to_str().expect("temp paths should be utf-8")
}

fn thermohid_command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_thermohid"));
    cmd.arg("--log-level").arg("error").args(args);
    cmd
}

fn thermohid(args: &[&str]) -> Output {
    thermohid_command(args)
        .output()
        .expect("thermohid should run")
}

/// Write end of a pipe whose read end is already closed.
fn closed_pipe() -> Stdio {
    let mut fds = [0; 2];
    // SAFETY: `fds` has room for the two descriptors pipe(2) fills in.
    let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
    assert_eq!(rc, 0, "pipe should be creatable");
    // SAFETY: pipe(2) just returned both descriptors and nothing else owns them.
    let read = unsafe { OwnedFd::from_raw_fd(fds[0]) };
    // SAFETY: as above.
    let write = unsafe { OwnedFd::from_raw_fd(fds[1]) };
    drop(read);
    Stdio::from(write)
}

#[test]
fn pair_is_displayed_and_logged() {
    let dir = unique_temp_dir("pair");
    let device = fake_device(&dir, &[0x03, 0x00, 0x0A, 0x02, 0x28]);
    let log = dir.join("readings.log");

    let output = thermohid(&["--no-describe", path_str(&device), path_str(&log)]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    assert!(stdout.contains("Temperature = 56.000°C Humidity = 20.0%\n"));
    assert!(stdout.ends_with("Exiting\n"));
    assert_eq!(
        std::fs::read_to_string(&log).expect("log should exist"),
        "56.000000 20.000000\n"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn json_format_prints_one_object_per_reading() {
    let dir = unique_temp_dir("json");
    let device = fake_device(&dir, &[0x03, 0x00, 0x0A, 0x02, 0x28]);
    let log = dir.join("readings.log");

    let output = thermohid(&[
        "--format",
        "json",
        "--no-describe",
        path_str(&device),
        path_str(&log),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "json mode prints only readings: {stdout}");

    let reading: serde_json::Value =
        serde_json::from_str(lines[0]).expect("reading should be json");
    assert_eq!(reading["sequence"], 1);
    assert_eq!(reading["temperature_celsius"], 56.0);
    assert_eq!(reading["humidity_percent"], 20.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn garbage_report_exits_with_failure() {
    let dir = unique_temp_dir("garbage");
    let device = fake_device(&dir, &[0x01, 0x00, 0x00]);
    let log = dir.join("readings.log");

    let output = thermohid(&["--no-describe", path_str(&device), path_str(&log)]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("garbage read"), "stderr: {stderr}");
    assert_eq!(std::fs::read_to_string(&log).expect("log should exist"), "");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_arguments_print_usage() {
    let output = thermohid(&["/dev/hidraw0"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn missing_device_exits_with_failure() {
    let dir = unique_temp_dir("nodevice");
    let device = dir.join("hidraw-does-not-exist");
    let log = dir.join("readings.log");

    let output = thermohid(&[path_str(&device), path_str(&log)]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("couldn't open device"), "stderr: {stderr}");
    assert!(
        !log.exists(),
        "log must not be created when the device fails"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unwritable_log_exits_with_failure() {
    let dir = unique_temp_dir("nolog");
    let device = fake_device(&dir, &[0x03, 0x00, 0x0A, 0x02, 0x28]);
    let log = dir.join("missing-dir").join("readings.log");

    let output = thermohid(&[path_str(&device), path_str(&log)]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unable to open log file"),
        "stderr: {stderr}"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn diagnostics_report_unavailable_queries_for_non_hidraw_nodes() {
    let dir = unique_temp_dir("describe");
    let device = fake_device(&dir, &[0x02, 0x28]);
    let log = dir.join("readings.log");

    let output = thermohid(&[path_str(&device), path_str(&log)]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    assert!(stdout.contains("Report Descriptor Size: unavailable"));
    assert!(stdout.contains("Raw Info: unavailable"));
    assert!(!stdout.contains("Temperature ="));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn closed_stdout_exits_with_failure() {
    let dir = unique_temp_dir("closed-stdout");
    let device = fake_device(&dir, &[0x02, 0x28]);
    let log = dir.join("readings.log");

    for args in [
        vec![path_str(&device), path_str(&log)],
        vec!["--no-describe", path_str(&device), path_str(&log)],
    ] {
        let output = thermohid_command(&args)
            .stdout(closed_pipe())
            .output()
            .expect("thermohid should run");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
        assert!(
            stderr.contains("failed to write to stdout"),
            "stderr: {stderr}"
        );
        assert!(!stderr.contains("panicked"), "stderr: {stderr}");
    }

    let _ = std::fs::remove_dir_all(&dir);
}
