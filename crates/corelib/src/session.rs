//! Incremental hashing sessions.
//!
//! A [`HashSession`] owns one instance of primitive state and moves through
//! `Active -> Finalized -> Disposed`. Every entry point checks the state and
//! returns [`HashError::InvalidState`] on misuse. The primitive state is
//! released exactly once, either by [`HashSession::dispose`] or when the
//! session goes out of scope.

use std::fmt;
use std::io::{self, Read, Write};
use std::mem;

use tracing::{debug, trace};

use crate::crypto::blake3::Blake3;
use crate::crypto::hash::Hash32;
use crate::digest::Digest;
use crate::errors::{check_output_len, HashError};

/// Observable lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finalized,
    Disposed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Active => "active",
            SessionState::Finalized => "finalized",
            SessionState::Disposed => "disposed",
        })
    }
}

enum Slot<H> {
    Active(H),
    Finalized,
    Disposed,
}

impl<H> Slot<H> {
    fn state(&self) -> SessionState {
        match self {
            Slot::Active(_) => SessionState::Active,
            Slot::Finalized => SessionState::Finalized,
            Slot::Disposed => SessionState::Disposed,
        }
    }
}

/// Streaming hash session. Not internally synchronized: every mutating
/// operation takes `&mut self`.
pub struct HashSession<H: Hash32 = Blake3> {
    slot: Slot<H>,
}

impl HashSession {
    /// Start a BLAKE3 session.
    pub fn create() -> Self {
        Self::default()
    }

    /// Run `f` against a fresh session and dispose it on every exit path.
    pub fn scoped<T, E, F>(f: F) -> Result<T, E>
    where
        F: FnOnce(&mut HashSession) -> Result<T, E>,
    {
        let mut session = HashSession::create();
        let out = f(&mut session);
        session.dispose();
        out
    }
}

impl<H: Hash32> Default for HashSession<H> {
    fn default() -> Self {
        trace!("session created");
        Self {
            slot: Slot::Active(H::new()),
        }
    }
}

impl<H: Hash32> HashSession<H> {
    pub fn state(&self) -> SessionState {
        self.slot.state()
    }

    pub fn is_active(&self) -> bool {
        self.state() == SessionState::Active
    }

    pub fn is_finalized(&self) -> bool {
        self.state() == SessionState::Finalized
    }

    pub fn is_disposed(&self) -> bool {
        self.state() == SessionState::Disposed
    }

    /// Fails with [`HashError::InvalidState`] naming `op` unless the session
    /// is still accepting input.
    pub fn ensure_active(&self, op: &'static str) -> Result<(), HashError> {
        match self.state() {
            SessionState::Active => Ok(()),
            state => Err(HashError::InvalidState { op, state }),
        }
    }

    /// Feed `chunk` into the session. Chunks are absorbed in call order.
    pub fn update(&mut self, chunk: &[u8]) -> Result<(), HashError> {
        match &mut self.slot {
            Slot::Active(h) => {
                trace!(len = chunk.len(), "session update");
                if !chunk.is_empty() {
                    h.update(chunk);
                }
                Ok(())
            }
            other => Err(HashError::InvalidState {
                op: "update",
                state: other.state(),
            }),
        }
    }

    /// Produce the digest of everything fed so far. Allowed once.
    pub fn finalize(&mut self) -> Result<Digest, HashError> {
        match mem::replace(&mut self.slot, Slot::Finalized) {
            Slot::Active(h) => {
                let digest = Digest::from(h.finalize());
                debug!(%digest, "session finalized");
                Ok(digest)
            }
            prior => {
                let state = prior.state();
                self.slot = prior;
                Err(HashError::InvalidState {
                    op: "finalize",
                    state,
                })
            }
        }
    }

    /// Like [`finalize`](Self::finalize) but writes into `out`, which must be
    /// exactly 32 bytes. A rejected buffer leaves the session active.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), HashError> {
        self.ensure_active("finalize")?;
        check_output_len(out.len())?;
        let digest = self.finalize()?;
        out.copy_from_slice(digest.as_bytes());
        Ok(())
    }

    /// Release the primitive state. Idempotent, and legal before finalize.
    pub fn dispose(&mut self) {
        match mem::replace(&mut self.slot, Slot::Disposed) {
            Slot::Active(h) => {
                debug!("session disposed before finalize");
                drop(h);
            }
            Slot::Finalized => trace!("session disposed"),
            Slot::Disposed => {}
        }
    }

    /// Feed `reader` to the session in `chunk_size` pieces until EOF.
    /// Returns the number of bytes consumed.
    pub fn update_reader<R: Read>(&mut self, mut reader: R, chunk_size: usize) -> io::Result<u64> {
        if chunk_size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "chunk size must be greater than zero",
            ));
        }
        self.ensure_active("update").map_err(io::Error::other)?;

        let mut buf = vec![0u8; chunk_size];
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.update(&buf[..n]).map_err(io::Error::other)?;
            total += n as u64;
        }
        Ok(total)
    }
}

impl<H: Hash32> Write for HashSession<H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<H: Hash32> fmt::Debug for HashSession<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSession")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Hash everything `reader` yields, reading `chunk_size` bytes at a time.
pub fn hash_reader<R: Read>(reader: R, chunk_size: usize) -> io::Result<Digest> {
    HashSession::scoped(|session| -> io::Result<Digest> {
        session.update_reader(reader, chunk_size)?;
        session.finalize().map_err(io::Error::other)
    })
}
