use std::fmt;
use std::str::FromStr;

use subtle::ConstantTimeEq;

use crate::constants::DIGEST_LEN;
use crate::error::Sha1Error;

/// The final SHA-1 hash state, five big-endian 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u32; 5]);

impl Digest {
    pub fn from_state(state: [u32; 5]) -> Self {
        Digest(state)
    }

    pub fn state(&self) -> [u32; 5] {
        self.0
    }

    /// The 20 digest bytes, each word big-endian.
    pub fn to_bytes(&self) -> [u8; DIGEST_LEN] {
        let mut bytes = [0_u8; DIGEST_LEN];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    /// 40 lowercase hex characters, 8 per word.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Compares the digest bytes without short-circuiting on the first mismatch.
    pub fn ct_eq(&self, other: &Digest) -> bool {
        self.to_bytes().ct_eq(&other.to_bytes()).unwrap_u8() == 1
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.0 {
            write!(f, "{:08x}", word)?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl FromStr for Digest {
    type Err = Sha1Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DIGEST_LEN * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Sha1Error::InvalidDigest(s.to_owned()));
        }

        let mut state = [0_u32; 5];
        for (i, word) in state.iter_mut().enumerate() {
            *word = u32::from_str_radix(&s[i * 8..i * 8 + 8], 16)
                .map_err(|_| Sha1Error::InvalidDigest(s.to_owned()))?;
        }

        Ok(Digest(state))
    }
}
