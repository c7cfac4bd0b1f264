use std::fmt::Display;

/// Errors produced by the hashing pipeline and the digest parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sha1Error {
    /// The bit length of the message does not fit in the 64-bit length field.
    MessageTooLong { len: usize },

    /// A padded message whose length is not a multiple of the block size.
    UnalignedLength { len: usize },

    /// A digest string that is not 40 hexadecimal characters.
    InvalidDigest(String),
}

impl Display for Sha1Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sha1Error::MessageTooLong { len } => {
                write!(f, "message of {len} bytes exceeds the 64-bit bit length")
            }
            Sha1Error::UnalignedLength { len } => {
                write!(f, "padded length {len} is not a multiple of 64 bytes")
            }
            Sha1Error::InvalidDigest(s) => write!(f, "invalid sha-1 digest: `{s}`"),
        }
    }
}

impl std::error::Error for Sha1Error {}
