mod clipboard;
mod drbg;
mod error;
mod generator;
mod profile;
mod ui;

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;
use zeroize::Zeroizing;

use crate::ui::DisplayOptions;

#[derive(Parser)]
#[command(
    name = "pwclip",
    version,
    about = "Hash-based deterministic password generator"
)]
struct Cli {
    /// Password settings in JSON format
    #[arg(value_name = "FILE")]
    settings: PathBuf,

    /// Read the key from a file instead of prompting for a passphrase
    #[arg(short = 'k', long = "key-file", value_name = "FILE")]
    key_file: Option<PathBuf>,

    /// Read the key from the standard output of a shell command
    #[arg(
        short = 'c',
        long = "key-command",
        value_name = "CMD",
        conflicts_with = "key_file"
    )]
    key_command: Option<String>,

    /// Print the password to stdout instead of copying it to the clipboard
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// Derive the answer to secret question N instead of the primary password
    #[arg(short = 'q', long = "question", value_name = "N")]
    question: Option<u32>,

    /// Seconds the password stays on the clipboard before it is restored
    #[arg(long = "timeout", value_name = "SECONDS", default_value_t = 10)]
    timeout: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
    };

    let profile = profile::load_profile(&cli.settings)?;
    profile.validate()?;

    let context = match cli.question {
        Some(number) => Some(profile.question(number)?.to_string()),
        None => None,
    };

    let key = read_key(&cli)?;

    ui::echo_profile(&profile, context.as_deref(), &options);

    let password = generator::derive_password(&key, &profile, context.as_deref())?;

    if cli.print {
        println!("{}", &*password);
    } else {
        eprintln!("Password copied to clipboard for {} seconds.", cli.timeout);
        clipboard::set_temporarily(
            password.as_bytes(),
            Duration::from_secs(cli.timeout),
            |duration| ui::countdown(duration, &options),
        )?;

        let (ok, _) = ui::get_status_symbols(options.unicode_support);
        let style = if options.color_support {
            Style::new().green()
        } else {
            Style::new()
        };
        eprintln!("{} Clipboard restored.", style.apply_to(ok));
    }

    Ok(())
}

fn read_key(cli: &Cli) -> Result<Zeroizing<Vec<u8>>> {
    if let Some(path) = &cli.key_file {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read key file {}", path.display()))?;
        return Ok(Zeroizing::new(bytes));
    }

    if let Some(command) = &cli.key_command {
        return key_from_command(command);
    }

    ui::prompt_passphrase()
}

fn key_from_command(command: &str) -> Result<Zeroizing<Vec<u8>>> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .output()
        .with_context(|| format!("failed to run key command {command:?}"))?;

    if !output.status.success() {
        anyhow::bail!("key command {command:?} exited with {}", output.status);
    }

    Ok(Zeroizing::new(output.stdout))
}
