use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, bail};

struct ClipboardTool {
    get: &'static [&'static str],
    set: &'static [&'static str],
}

#[cfg(target_os = "macos")]
fn tool() -> Result<ClipboardTool> {
    Ok(ClipboardTool {
        get: &["pbpaste"],
        set: &["pbcopy"],
    })
}

#[cfg(not(target_os = "macos"))]
fn tool() -> Result<ClipboardTool> {
    if command_exists("xclip") {
        Ok(ClipboardTool {
            get: &["xclip", "-sel", "clipboard", "-out"],
            set: &["xclip", "-sel", "clipboard"],
        })
    } else if command_exists("wl-copy") {
        Ok(ClipboardTool {
            get: &["wl-paste", "--no-newline"],
            set: &["wl-copy"],
        })
    } else {
        bail!("No clipboard tool found. Install xclip (X11) or wl-clipboard (Wayland).")
    }
}

#[cfg(not(target_os = "macos"))]
fn command_exists(command: &str) -> bool {
    Command::new("which")
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn read_clipboard(argv: &[&str]) -> Result<Vec<u8>> {
    let output = Command::new(argv[0])
        .args(&argv[1..])
        .output()
        .with_context(|| format!("Failed to run {}", argv[0]))?;

    if !output.status.success() {
        bail!("{} exited with {}", argv[0], output.status);
    }

    Ok(output.stdout)
}

fn write_clipboard(argv: &[&str], data: &[u8]) -> Result<()> {
    let mut child = Command::new(argv[0])
        .args(&argv[1..])
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run {}", argv[0]))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(data)
            .with_context(|| format!("Failed to write to {}", argv[0]))?;
    }

    let status = child
        .wait()
        .with_context(|| format!("Failed to wait for {}", argv[0]))?;
    if !status.success() {
        bail!("{} exited with {}", argv[0], status);
    }

    Ok(())
}

// Saves the current clipboard contents, places `data`, waits through the
// caller's closure, then restores what was there before. The initial read
// happens first so a missing clipboard tool never leaves the password behind,
// and an interrupt during the wait restores before exiting.
pub fn set_temporarily<F>(data: &[u8], duration: Duration, wait: F) -> Result<()>
where
    F: FnOnce(Duration),
{
    let tool = tool()?;

    let previous =
        read_clipboard(tool.get).context("Failed to read current clipboard contents")?;

    let set_argv = tool.set;
    let saved = previous.clone();
    ctrlc::set_handler(move || {
        let _ = write_clipboard(set_argv, &saved);
        std::process::exit(0);
    })
    .context("Failed to install interrupt handler")?;

    write_clipboard(tool.set, data)?;

    wait(duration);

    write_clipboard(tool.set, &previous).context("Failed to restore previous clipboard contents")
}
