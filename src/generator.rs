use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use zeroize::Zeroizing;

use crate::drbg::HmacDrbg;
use crate::error::Error;
use crate::profile::Profile;

pub fn derive_password(
    key: &[u8],
    profile: &Profile,
    context: Option<&str>,
) -> Result<Zeroizing<String>, Error> {
    profile.validate()?;

    let mut drbg = HmacDrbg::new(key);
    // Reseed order is fixed: url, then username, then the optional question
    // answer. Reordering changes every derived password.
    drbg.reseed(profile.url.as_bytes());
    drbg.reseed(profile.username.as_bytes());
    if let Some(answer) = context.filter(|answer| !answer.is_empty()) {
        drbg.reseed(answer.as_bytes());
    }

    let digest = drbg.generate(profile.length);
    Ok(encode_password(
        &digest,
        &profile.charset,
        &profile.prefix,
        profile.length,
    ))
}

pub fn encode_password(
    bytes: &[u8],
    charset: &str,
    prefix: &str,
    length: usize,
) -> Zeroizing<String> {
    let encoded = base_convert(bytes, charset);
    let mut password = Zeroizing::new(String::with_capacity(prefix.len() + encoded.len()));
    for ch in prefix.chars().chain(encoded.chars()).take(length) {
        password.push(ch);
    }
    password
}

fn base_convert(bytes: &[u8], charset: &str) -> Zeroizing<String> {
    let digits: Vec<char> = charset.chars().collect();
    let base = BigUint::from(digits.len());
    let mut value = BigUint::from_bytes_le(bytes);

    if value.is_zero() {
        return Zeroizing::new(digits[0].to_string());
    }

    let mut reversed = Vec::new();
    while !value.is_zero() {
        let digit = (&value % &base)
            .to_usize()
            .expect("remainder is below the charset length");
        reversed.push(digits[digit]);
        value /= &base;
    }

    Zeroizing::new(reversed.into_iter().rev().collect())
}
