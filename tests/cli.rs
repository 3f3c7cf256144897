//! End-to-end checks against the built `alarm` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn alarm() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_alarm"));
    cmd.env_remove("ALARM_SOUND_FILE").env_remove("ALARM_LOG");
    cmd
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// 0.1 s of 16-bit mono silence at 8 kHz.
fn write_silent_wav(path: &Path) {
    let samples = 800_u32;
    let data_len = samples * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16_u32.to_le_bytes());
    wav.extend_from_slice(&1_u16.to_le_bytes());
    wav.extend_from_slice(&1_u16.to_le_bytes());
    wav.extend_from_slice(&8_000_u32.to_le_bytes());
    wav.extend_from_slice(&16_000_u32.to_le_bytes());
    wav.extend_from_slice(&2_u16.to_le_bytes());
    wav.extend_from_slice(&16_u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    fs::write(path, wav).expect("writing test wav failed");
}

fn assert_failed_before_countdown(output: &Output) {
    assert_eq!(output.status.code(), Some(1));
    let stdout = text(&output.stdout);
    assert!(!stdout.contains("Setting alarm for"), "stdout: {stdout}");
    assert!(!stdout.contains("Sounding Alarm!"), "stdout: {stdout}");
}

#[test]
fn missing_sound_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mp3");
    let output = alarm()
        .args(["7:00am", "--file"])
        .arg(&missing)
        .output()
        .unwrap();

    assert_failed_before_countdown(&output);
    let stderr = text(&output.stderr);
    assert!(stderr.contains("error running alarm: file does not exist:"), "stderr: {stderr}");
    assert!(stderr.contains("missing.mp3"), "stderr: {stderr}");
}

#[test]
fn ogg_sound_file_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let ogg = dir.path().join("alarm.ogg");
    fs::write(&ogg, b"OggS").unwrap();
    let output = alarm().args(["7:00am", "-f"]).arg(&ogg).output().unwrap();

    assert_failed_before_countdown(&output);
    let stderr = text(&output.stderr);
    assert!(stderr.contains("unable to use file 'alarm.ogg'"), "stderr: {stderr}");
}

#[test]
fn undecodable_sound_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.wav");
    fs::write(&broken, b"not audio at all").unwrap();
    let output = alarm().args(["7:00am", "-f"]).arg(&broken).output().unwrap();

    assert_failed_before_countdown(&output);
    assert!(text(&output.stderr).contains("failed to decode sound file"));
}

#[test]
fn unparseable_time_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("beep.wav");
    write_silent_wav(&wav);
    let output = alarm().args(["soon", "-f"]).arg(&wav).output().unwrap();

    assert_failed_before_countdown(&output);
    assert!(text(&output.stderr).contains("failed to parse time 'soon'"));
}

#[test]
fn sound_file_can_come_from_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    let ogg = dir.path().join("env.ogg");
    fs::write(&ogg, b"OggS").unwrap();
    let output = alarm()
        .arg("7:00am")
        .env("ALARM_SOUND_FILE", &ogg)
        .output()
        .unwrap();

    assert_failed_before_countdown(&output);
    assert!(text(&output.stderr).contains("'env.ogg'"));
}

#[test]
fn missing_time_argument_is_an_error() {
    let output = alarm().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("Usage"));
}

#[test]
fn help_exits_successfully() {
    let output = alarm().arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(text(&output.stdout).contains("--file"));
}

#[cfg(unix)]
#[test]
fn interrupt_during_wait_exits_without_ringing() {
    use std::process::Stdio;
    use std::thread;
    use std::time::Duration;

    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("beep.wav");
    write_silent_wav(&wav);
    let at = (chrono::Local::now() + chrono::TimeDelta::minutes(3))
        .format("%-I:%M%P")
        .to_string();

    let child = alarm()
        .arg(&at)
        .arg("-f")
        .arg(&wav)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    thread::sleep(Duration::from_millis(1_500));
    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    let stdout = text(&output.stdout);
    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    assert!(stdout.contains("Setting alarm for"), "stdout: {stdout}");
    assert!(stdout.contains(" Alarm cancelled."), "stdout: {stdout}");
    assert!(!stdout.contains("Sounding Alarm!"), "stdout: {stdout}");
}
