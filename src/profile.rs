use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

pub const CHARSET_ALPHANUMERIC: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const DEFAULT_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub url: String,
    pub username: String,
    pub length: usize,
    pub prefix: String,
    pub charset: String,
    pub questions: BTreeMap<String, String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            length: DEFAULT_LENGTH,
            prefix: String::new(),
            charset: CHARSET_ALPHANUMERIC.to_string(),
            questions: BTreeMap::new(),
        }
    }
}

impl Profile {
    pub fn validate(&self) -> Result<(), Error> {
        if self.length == 0 {
            return Err(Error::InvalidProfile(
                "length must be positive".to_string(),
            ));
        }

        let mut distinct: Vec<char> = self.charset.chars().collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(Error::InvalidProfile(
                "charset must contain at least two distinct characters".to_string(),
            ));
        }

        Ok(())
    }

    pub fn question(&self, number: u32) -> Result<&str, Error> {
        let label = format!("q{number}");
        match self.questions.get(&label) {
            Some(answer) => Ok(answer),
            None => Err(Error::UnknownQuestion(label)),
        }
    }
}

#[derive(Deserialize)]
struct ProfileFile {
    url: Option<String>,
    username: Option<String>,
    length: Option<Value>,
    prefix: Option<String>,
    charset: Option<String>,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

impl ProfileFile {
    fn into_profile(self) -> Result<Profile, Error> {
        let ProfileFile {
            url,
            username,
            length,
            prefix,
            charset,
            rest,
        } = self;

        let url = url.ok_or_else(|| Error::InvalidProfile("missing url".to_string()))?;
        let username =
            username.ok_or_else(|| Error::InvalidProfile("missing username".to_string()))?;

        let length = match length {
            Some(value) => parse_length(&value)?,
            None => DEFAULT_LENGTH,
        };

        let mut questions = BTreeMap::new();
        for (key, value) in rest {
            if !is_question_label(&key) {
                continue;
            }
            match value {
                Value::String(answer) => {
                    questions.insert(key, answer);
                }
                _ => {
                    return Err(Error::InvalidProfile(format!("{key} must be a string")));
                }
            }
        }

        Ok(Profile {
            url,
            username,
            length,
            prefix: prefix.unwrap_or_default(),
            charset: charset.unwrap_or_else(|| CHARSET_ALPHANUMERIC.to_string()),
            questions,
        })
    }
}

fn parse_length(value: &Value) -> Result<usize, Error> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(text) => text.parse::<usize>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::InvalidProfile("length must be an int".to_string()))
}

fn is_question_label(key: &str) -> bool {
    match key.strip_prefix('q') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

pub fn parse_profile(data: &str) -> Result<Profile> {
    let record: ProfileFile =
        serde_json::from_str(data).context("settings must be a JSON object")?;
    Ok(record.into_profile()?)
}

pub fn load_profile(path: &Path) -> Result<Profile> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    parse_profile(&data).with_context(|| format!("invalid settings file {}", path.display()))
}
