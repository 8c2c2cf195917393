//! Hash primitives sessions can be built over.
//! BLAKE3 is the only production implementation.

pub mod blake3;
pub mod hash;
