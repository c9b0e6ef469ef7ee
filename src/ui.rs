use anyhow::{Context, Result};
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use rpassword::read_password;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use zeroize::Zeroizing;

use crate::profile::Profile;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stderr)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

pub fn prompt_passphrase() -> Result<Zeroizing<Vec<u8>>> {
    eprint!("Passphrase: ");
    io::stderr().flush()?;

    let passphrase = read_password().context("failed to read passphrase")?;

    if passphrase.is_empty() {
        anyhow::bail!("passphrase cannot be empty");
    }

    // The raw passphrase bytes are the key; normalizing or trimming them here
    // would change every derived password.
    Ok(Zeroizing::new(passphrase.into_bytes()))
}

pub fn echo_profile(profile: &Profile, question: Option<&str>, options: &DisplayOptions) {
    let style = if options.color_support {
        Style::new().cyan()
    } else {
        Style::new()
    };

    eprintln!("{}", style.apply_to(&profile.username));
    if let Some(text) = question {
        eprintln!("{}", style.apply_to(text));
    }
}

pub fn countdown(duration: Duration, options: &DisplayOptions) {
    let seconds = duration.as_secs();

    let term = Term::stderr();
    term.hide_cursor().ok();

    let pb = ProgressBar::new(seconds);
    let style = ProgressStyle::default_bar()
        .template("  [{bar:30}] {pos}/{len}s")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let style = if options.unicode_support {
        style.progress_chars("█▓░")
    } else {
        style.progress_chars("=> ")
    };
    pb.set_style(style);

    for _ in 0..seconds {
        thread::sleep(Duration::from_secs(1));
        pb.inc(1);
    }

    pb.finish_and_clear();
    term.show_cursor().ok();
}
