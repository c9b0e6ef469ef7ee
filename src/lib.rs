pub mod drbg;
pub mod error;
pub mod generator;
pub mod profile;

pub use drbg::HmacDrbg;
pub use error::Error;
pub use generator::{derive_password, encode_password};
pub use profile::{CHARSET_ALPHANUMERIC, DEFAULT_LENGTH, Profile, load_profile, parse_profile};
