use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

const STATE_LEN: usize = 64;

// HMAC_DRBG over SHA-512 with no entropy input: the seed alone fixes the
// entire output stream, so equal seeds and equal call sequences produce
// bit-identical bytes on every machine.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct HmacDrbg {
    key: [u8; STATE_LEN],
    val: [u8; STATE_LEN],
}

impl HmacDrbg {
    pub fn new(seed: &[u8]) -> Self {
        let mut drbg = Self {
            key: [0x00; STATE_LEN],
            val: [0x01; STATE_LEN],
        };
        drbg.reseed(seed);
        drbg
    }

    pub fn reseed(&mut self, data: &[u8]) {
        self.update(0x00, data);
        if !data.is_empty() {
            self.update(0x01, data);
        }
    }

    pub fn generate(&mut self, n: usize) -> Zeroizing<Vec<u8>> {
        let mut output = Zeroizing::new(Vec::with_capacity(n + STATE_LEN));
        while output.len() < n {
            self.val = hmac_sha512(&self.key, &[&self.val]);
            output.extend_from_slice(&self.val);
        }
        self.reseed(&[]);
        output.truncate(n);
        output
    }

    fn update(&mut self, separator: u8, data: &[u8]) {
        self.key = hmac_sha512(&self.key, &[&self.val, &[separator], data]);
        self.val = hmac_sha512(&self.key, &[&self.val]);
    }
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> [u8; STATE_LEN] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts any key length");
    for part in parts {
        mac.update(part);
    }
    let mut output = [0u8; STATE_LEN];
    output.copy_from_slice(&mac.finalize().into_bytes());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_vector_zero_seed() {
        let mut drbg = HmacDrbg::new(&[0u8; 32]);
        let out = drbg.generate(32);
        assert_eq!(
            hex::encode(&out[..]),
            "8b306db95d3265f6e6fefe3e211d4ebcd4670d2d07f2fbb1c63925265fe253f1"
        );
    }

    #[test]
    fn test_state_advances_between_generates() {
        let mut drbg = HmacDrbg::new(&[0u8; 32]);
        let first = drbg.generate(32);
        let second = drbg.generate(32);
        assert_ne!(&first[..], &second[..]);
        assert_eq!(
            hex::encode(&second[..]),
            "c951ae88debacbbae5b691a6f370aae9f94f1f8396582f00668710594fc62d80"
        );
    }

    #[test]
    fn test_generate_vector_text_seed() {
        let mut drbg = HmacDrbg::new(b"seed");
        let out = drbg.generate(16);
        assert_eq!(hex::encode(&out[..]), "076b344377e8c1df9cf357b8e0a3f680");
    }

    #[test]
    fn test_reseed_changes_stream() {
        let mut plain = HmacDrbg::new(b"seed");
        let mut reseeded = HmacDrbg::new(b"seed");
        reseeded.reseed(b"context");

        let out_plain = plain.generate(16);
        let out_reseeded = reseeded.generate(16);

        assert_ne!(&out_plain[..], &out_reseeded[..]);
        assert_eq!(
            hex::encode(&out_reseeded[..]),
            "7472eafa2ea5b8c8d9b43b1a2b82efb5"
        );
    }

    #[test]
    fn test_empty_seed() {
        let mut drbg = HmacDrbg::new(b"");
        let out = drbg.generate(8);
        assert_eq!(hex::encode(&out[..]), "d46ae8be61c823d9");
    }

    #[test]
    fn test_generate_zero_still_refreshes_state() {
        let mut drbg = HmacDrbg::new(b"abc");
        let empty = drbg.generate(0);
        assert!(empty.is_empty());

        let next = drbg.generate(4);
        assert_eq!(hex::encode(&next[..]), "47e079d9");
    }

    #[test]
    fn test_generate_spans_multiple_blocks() {
        let mut drbg = HmacDrbg::new(b"abc");
        let out = drbg.generate(100);
        assert_eq!(out.len(), 100);
        assert_eq!(
            hex::encode(&out[..]),
            "5cbe0287b6fd9565c6e3aa9e150b0ef2ba6713734059530b1e5d98451d8e4c23f9ee5246812f0cc68537aebaa82f506f06a3a8e4b82c75d9b555622f2b74ac1b5efaa09d0c436c3cfa673def833a2005cd71344969ae3e47addc63e1958f605f11560e93"
        );
    }

    #[test]
    fn test_deterministic_sequence() {
        let mut a = HmacDrbg::new(b"shared seed");
        let mut b = HmacDrbg::new(b"shared seed");

        a.reseed(b"example.com");
        b.reseed(b"example.com");

        assert_eq!(&a.generate(48)[..], &b.generate(48)[..]);
        assert_eq!(&a.generate(7)[..], &b.generate(7)[..]);
    }

    #[test]
    fn test_reseed_is_not_a_noop() {
        let mut a = HmacDrbg::new(b"seed");
        let mut b = HmacDrbg::new(b"seed");
        b.reseed(b"");

        // An empty reseed still advances state once.
        assert_ne!(&a.generate(16)[..], &b.generate(16)[..]);
    }
}
