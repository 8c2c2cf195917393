//! Core library: one-shot BLAKE3 hashing and lifecycle-checked streaming
//! sessions, shared by the CLI and the C ABI.

pub mod config;
pub mod crypto;
pub mod digest;
pub mod errors;
pub mod oneshot;
pub mod raw;
pub mod session;

pub use digest::Digest;
pub use errors::{ErrorKind, HashError};
pub use oneshot::{compute, compute_into};
pub use session::{hash_reader, HashSession, SessionState};

/// Size in bytes of every digest.
pub const OUTPUT_SIZE: usize = 32;

/// Version helper for CLI and FFI
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
