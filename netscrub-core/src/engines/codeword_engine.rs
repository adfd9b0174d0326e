// netscrub-core/src/engines/codeword_engine.rs
//! A `PseudonymStrategy` keyed by an operator codeword.
//!
//! Every pseudonym is a pure function of the codeword and the original value,
//! so two runs with the same codeword produce the same mapping and the same
//! report. The free functions below carry the actual scheme; the struct only
//! holds the derived key.
//!
//! License: MIT OR APACHE 2.0

use sha2::{Digest, Sha256};

use crate::engine::PseudonymStrategy;
use crate::validators::{classify_private_ipv4, PrivateRange};

/// Lowercase RFC 4648 base32 alphabet.
const BASE32_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

/// Number of encoded digest characters kept after the category prefix.
pub const TOKEN_LENGTH: usize = 8;

/// Encodes `data` as unpadded base32 using [`BASE32_ALPHABET`].
pub fn encode_base32(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut buffer: u16 = 0;
    let mut bits: u8 = 0;
    for &byte in data {
        buffer = (buffer << 8) | u16::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            let idx = ((buffer >> bits) & 0x1F) as usize;
            out.push(BASE32_ALPHABET[idx] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        let idx = ((buffer << (5 - bits)) & 0x1F) as usize;
        out.push(BASE32_ALPHABET[idx] as char);
    }
    out
}

/// Derives the 32-byte key used for IP octet masking.
pub fn derive_key(codeword: &str) -> [u8; 32] {
    Sha256::digest(codeword.as_bytes()).into()
}

fn keyed_token(prefix: char, codeword: &str, value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(codeword.as_bytes());
    hasher.update(value.as_bytes());
    let encoded = encode_base32(&hasher.finalize());
    let mut token = String::with_capacity(TOKEN_LENGTH + 1);
    token.push(prefix);
    token.push_str(&encoded[..TOKEN_LENGTH]);
    token
}

/// XORs octets with fixed key bytes, keeping the private range recognizable.
///
/// For `172.16/12` the masked second octet is truncated to five bits and is
/// not shifted back into 16..=31, so the output may leave the private range.
pub fn pseudonym_ip(key: &[u8; 32], original: &str) -> Option<String> {
    let ([_, b, c, d], range) = classify_private_ipv4(original)?;
    let value = match range {
        PrivateRange::TenSlash8 => format!("10.{}.{}.{}", b ^ key[1], c ^ key[2], d ^ key[3]),
        PrivateRange::OneSevenTwoSlash12 => {
            format!("172.{}.{}.{}", (b ^ key[1]) & 0x1F, c ^ key[2], d ^ key[3])
        }
        PrivateRange::OneNineTwoSlash16 => format!("192.168.{}.{}", c ^ key[2], d ^ key[3]),
    };
    Some(value)
}

/// `"H"` followed by eight base32 characters of SHA-256(codeword ‖ hostname).
pub fn pseudonym_hostname(codeword: &str, hostname: &str) -> String {
    keyed_token('H', codeword, hostname)
}

/// `"D"` followed by eight base32 characters of SHA-256(codeword ‖ label).
pub fn pseudonym_domain_label(codeword: &str, label: &str) -> String {
    keyed_token('D', codeword, label)
}

/// Deterministic strategy state: the codeword and its derived key.
pub struct CodewordEngine {
    codeword: String,
    key: [u8; 32],
}

impl std::fmt::Debug for CodewordEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodewordEngine").field("codeword", &"[REDACTED]").finish()
    }
}

impl CodewordEngine {
    pub fn new(codeword: impl Into<String>) -> Self {
        let codeword = codeword.into();
        let key = derive_key(&codeword);
        Self { codeword, key }
    }
}

impl PseudonymStrategy for CodewordEngine {
    fn name(&self) -> &'static str {
        "codeword"
    }

    fn ip(&mut self, original: &str) -> Option<String> {
        pseudonym_ip(&self.key, original)
    }

    fn hostname(&mut self, original: &str) -> String {
        pseudonym_hostname(&self.codeword, original)
    }

    fn domain_label(&mut self, label: &str) -> Option<String> {
        Some(pseudonym_domain_label(&self.codeword, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base32_matches_rfc4648_vectors() {
        assert_eq!(encode_base32(b""), "");
        assert_eq!(encode_base32(b"f"), "my");
        assert_eq!(encode_base32(b"fo"), "mzxq");
        assert_eq!(encode_base32(b"foo"), "mzxw6");
        assert_eq!(encode_base32(b"foob"), "mzxw6yq");
        assert_eq!(encode_base32(b"fooba"), "mzxw6ytb");
        assert_eq!(encode_base32(b"foobar"), "mzxw6ytboi");
    }

    #[test]
    fn test_domain_label_reference_vectors() {
        assert_eq!(pseudonym_domain_label("1", "abc"), "Dk7fzqdsb");
        assert_eq!(pseudonym_domain_label("1", "def"), "Dqsybk4cy");
        assert_eq!(pseudonym_domain_label("1", "www"), "Ddrebczzf");
    }

    #[test]
    fn test_hostname_token_shape_and_determinism() {
        let a = pseudonym_hostname("secret", "db01");
        let b = pseudonym_hostname("secret", "db01");
        assert_eq!(a, b);
        assert_eq!(a.len(), 9);
        assert!(a.starts_with('H'));
        assert!(a[1..].chars().all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c)));
        assert_ne!(a, pseudonym_hostname("other", "db01"));
    }

    #[test]
    fn test_ip_xor_scheme() {
        let key = derive_key("1");
        let out = pseudonym_ip(&key, "10.0.0.0").unwrap();
        assert_eq!(out, format!("10.{}.{}.{}", key[1], key[2], key[3]));

        let out = pseudonym_ip(&key, "192.168.0.0").unwrap();
        assert_eq!(out, format!("192.168.{}.{}", key[2], key[3]));

        let out = pseudonym_ip(&key, "172.16.0.0").unwrap();
        assert_eq!(out, format!("172.{}.{}.{}", (16 ^ key[1]) & 0x1F, key[2], key[3]));
    }

    #[test]
    fn test_ip_passthrough_for_public_and_malformed() {
        let key = derive_key("1");
        assert_eq!(pseudonym_ip(&key, "8.8.8.8"), None);
        assert_eq!(pseudonym_ip(&key, "10.256.0.1"), None);
    }

    #[test]
    fn test_engine_is_reproducible_across_instances() {
        let mut first = CodewordEngine::new("codeword");
        let mut second = CodewordEngine::new("codeword");
        assert_eq!(first.ip("10.1.2.3"), second.ip("10.1.2.3"));
        assert_eq!(first.hostname("web"), second.hostname("web"));
        assert_eq!(first.domain_label("www"), second.domain_label("www"));
    }
}
