use std::ffi::c_int;

use b3session_corelib::{ErrorKind, HashError};

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    Ok = 0,
    InvalidArg = 1,
    InvalidState = 2,
}

impl ErrorCode {
    #[inline]
    pub const fn code(self) -> c_int {
        self as c_int
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument => ErrorCode::InvalidArg,
            ErrorKind::InvalidState => ErrorCode::InvalidState,
        }
    }
}

impl From<&HashError> for ErrorCode {
    fn from(err: &HashError) -> Self {
        err.kind().into()
    }
}

pub const B3_OK: c_int = ErrorCode::Ok.code();
pub const B3_ERR_INVALID_ARG: c_int = ErrorCode::InvalidArg.code();
pub const B3_ERR_INVALID_STATE: c_int = ErrorCode::InvalidState.code();

/// Collapse a library result into the status code returned across the ABI.
pub(crate) fn status(result: Result<(), HashError>) -> c_int {
    match result {
        Ok(()) => B3_OK,
        Err(err) => {
            tracing::debug!(error = %err, "rejecting FFI call");
            ErrorCode::from(&err).code()
        }
    }
}
