//! BLAKE3 implementation of Hash32.

use crate::crypto::hash::Hash32;
use crate::OUTPUT_SIZE;

pub struct Blake3 {
    inner: blake3::Hasher,
}

impl Hash32 for Blake3 {
    fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self) -> [u8; OUTPUT_SIZE] {
        *self.inner.finalize().as_bytes()
    }
}
