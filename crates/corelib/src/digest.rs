//! Fixed-size digest value produced by one-shot hashing and sessions.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::oneshot::compute;
use crate::OUTPUT_SIZE;

static EMPTY: Lazy<Digest> = Lazy::new(|| compute(&[]));

/// A 32-byte hash output. Has no identity beyond its bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; OUTPUT_SIZE]);

impl Digest {
    pub const fn from_bytes(bytes: [u8; OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; OUTPUT_SIZE] {
        &self.0
    }

    /// Digest of the zero-length input.
    pub fn empty() -> Digest {
        *EMPTY
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn to_hex_upper(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl From<[u8; OUTPUT_SIZE]> for Digest {
    fn from(bytes: [u8; OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; OUTPUT_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    /// Parses exactly 64 hex characters, either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; OUTPUT_SIZE];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }
}
