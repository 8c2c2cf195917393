//! The seam between sessions and the underlying hash primitive.

use crate::OUTPUT_SIZE;

/// A streaming hash primitive with fixed-size 32-byte digests.
///
/// Implementations must be order-sensitive and satisfy
/// `update(a); update(b)` == `update(a ++ b)`. Sessions rely on that law to
/// make chunked and one-shot hashing agree.
pub trait Hash32 {
    /// Allocate fresh working state.
    fn new() -> Self
    where
        Self: Sized;
    /// Absorb bytes into the state.
    fn update(&mut self, data: &[u8]);
    /// Consume the state and produce the digest.
    fn finalize(self) -> [u8; OUTPUT_SIZE];
}

/// Compute a one-shot hash with an arbitrary primitive.
pub fn hash_one_shot<H: Hash32>(data: &[u8]) -> [u8; OUTPUT_SIZE] {
    let mut h = H::new();
    h.update(data);
    h.finalize()
}
