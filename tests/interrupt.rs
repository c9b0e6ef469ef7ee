use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

#[cfg(target_os = "macos")]
const CLIPBOARD_GET: &[&str] = &["pbpaste"];
#[cfg(target_os = "macos")]
const CLIPBOARD_SET: &[&str] = &["pbcopy"];

#[cfg(not(target_os = "macos"))]
const CLIPBOARD_GET: &[&str] = &["xclip", "-sel", "clipboard", "-out"];
#[cfg(not(target_os = "macos"))]
const CLIPBOARD_SET: &[&str] = &["xclip", "-sel", "clipboard"];

fn get_clipboard() -> Vec<u8> {
    let output = Command::new(CLIPBOARD_GET[0])
        .args(&CLIPBOARD_GET[1..])
        .output()
        .unwrap();
    assert!(output.status.success());
    output.stdout
}

fn set_clipboard(data: &[u8]) {
    let mut child = Command::new(CLIPBOARD_SET[0])
        .args(&CLIPBOARD_SET[1..])
        .stdin(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(data).unwrap();
    assert!(child.wait().unwrap().success());
}

// Exercises the real system clipboard and signal delivery; run with
// `cargo test -- --ignored` on a machine with a clipboard tool available.
#[test]
#[ignore]
fn test_interrupt_during_countdown_restores_clipboard() {
    set_clipboard(b"previous contents");

    let mut settings = tempfile::NamedTempFile::new().unwrap();
    write!(settings, r#"{{"url": "example.com", "username": "alice"}}"#).unwrap();

    let mut key = tempfile::NamedTempFile::new().unwrap();
    key.write_all(b"interrupt test key").unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_pwclip"))
        .arg(settings.path())
        .arg("--key-file")
        .arg(key.path())
        .arg("--timeout")
        .arg("60")
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    // Give the countdown time to start; by then the password must be on the
    // clipboard in place of the saved contents.
    thread::sleep(Duration::from_secs(2));
    assert_ne!(get_clipboard(), b"previous contents");

    let delivered = Command::new("kill")
        .arg("-INT")
        .arg(child.id().to_string())
        .status()
        .unwrap();
    assert!(delivered.success());

    let status = child.wait().unwrap();
    assert!(status.success());
    assert_eq!(get_clipboard(), b"previous contents");
}
