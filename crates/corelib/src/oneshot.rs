//! One-shot hashing over a complete buffer.

use crate::crypto::blake3::Blake3;
use crate::crypto::hash::hash_one_shot;
use crate::digest::Digest;
use crate::errors::{check_output_len, HashError};

/// Digest of `input`. Pure and deterministic.
pub fn compute(input: &[u8]) -> Digest {
    Digest::from(hash_one_shot::<Blake3>(input))
}

/// Write the digest of `input` into `output`, which must be exactly 32 bytes.
pub fn compute_into(input: &[u8], output: &mut [u8]) -> Result<(), HashError> {
    check_output_len(output.len())?;
    output.copy_from_slice(compute(input).as_bytes());
    Ok(())
}
