//! C ABI over the session library.
//!
//! Session functions keep the `*_blake3` symbol names managed bindings import,
//! and every call reports a status code. Lengths are C `int`s and may not be
//! negative.

use std::ffi::{c_char, c_int, CString};

use b3session_corelib::{raw, version, HashError, HashSession, OUTPUT_SIZE};

mod error;
mod ffi_json;

pub use error::{ErrorCode, B3_ERR_INVALID_ARG, B3_ERR_INVALID_STATE, B3_OK};
pub use ffi_json::Envelope;

use error::status;

/// Opaque session handle owned by the C caller between `create_blake3` and
/// `delete_blake3`.
pub struct Blake3Session {
    session: HashSession,
}

fn length(len: c_int, buffer: &'static str) -> Result<usize, HashError> {
    usize::try_from(len).map_err(|_| HashError::NegativeLength {
        buffer,
        len: len.into(),
    })
}

unsafe fn handle<'a>(hasher: *mut Blake3Session) -> Result<&'a mut HashSession, HashError> {
    hasher
        .as_mut()
        .map(|h| &mut h.session)
        .ok_or(HashError::Null("hasher handle"))
}

/// Hash `input` in one shot into `output`, which must be 32 bytes.
///
/// # Safety
///
/// Non-null pointers must reference buffers of at least the given lengths.
#[no_mangle]
pub unsafe extern "C" fn calculate_blake3(
    input_length: c_int,
    input: *const u8,
    output_length: c_int,
    output: *mut u8,
) -> c_int {
    status(calculate(input_length, input, output_length, output))
}

unsafe fn calculate(
    input_length: c_int,
    input: *const u8,
    output_length: c_int,
    output: *mut u8,
) -> Result<(), HashError> {
    let input_len = length(input_length, "input buffer")?;
    let output_len = length(output_length, "output buffer")?;
    raw::compute_raw(input, input_len, output, output_len)
}

/// Allocate a session. Never returns null; release with `delete_blake3`.
#[no_mangle]
pub extern "C" fn create_blake3() -> *mut Blake3Session {
    Box::into_raw(Box::new(Blake3Session {
        session: HashSession::create(),
    }))
}

/// Release a session. Null is ignored.
///
/// # Safety
///
/// `hasher` must be null or a pointer from `create_blake3` that has not been
/// passed here before.
#[no_mangle]
pub unsafe extern "C" fn delete_blake3(hasher: *mut Blake3Session) {
    if hasher.is_null() {
        return;
    }
    let mut owned = Box::from_raw(hasher);
    owned.session.dispose();
}

/// # Safety
///
/// `hasher` must be null or a live handle; non-null `input` must reference at
/// least `input_length` bytes.
#[no_mangle]
pub unsafe extern "C" fn update_blake3(
    hasher: *mut Blake3Session,
    input_length: c_int,
    input: *const u8,
) -> c_int {
    status(update(hasher, input_length, input))
}

unsafe fn update(
    hasher: *mut Blake3Session,
    input_length: c_int,
    input: *const u8,
) -> Result<(), HashError> {
    let session = handle(hasher)?;
    session.ensure_active("update")?;
    let input_len = length(input_length, "input buffer")?;
    raw::update_raw(session, input, input_len)
}

/// # Safety
///
/// `hasher` must be null or a live handle; non-null `output` must reference at
/// least `output_length` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn finalize_blake3(
    hasher: *mut Blake3Session,
    output_length: c_int,
    output: *mut u8,
) -> c_int {
    status(finalize(hasher, output_length, output))
}

unsafe fn finalize(
    hasher: *mut Blake3Session,
    output_length: c_int,
    output: *mut u8,
) -> Result<(), HashError> {
    let session = handle(hasher)?;
    session.ensure_active("finalize")?;
    let output_len = length(output_length, "output buffer")?;
    raw::finalize_raw(session, output, output_len)
}

/// # Safety
///
/// Same contract as `calculate_blake3`.
#[cfg(feature = "unsafe-bytebuffer")]
#[no_mangle]
pub unsafe extern "C" fn calculate_unsafe_blake3(
    input_length: c_int,
    input: *const u8,
    output_length: c_int,
    output: *mut u8,
) -> c_int {
    calculate_blake3(input_length, input, output_length, output)
}

/// # Safety
///
/// Same contract as `update_blake3`.
#[cfg(feature = "unsafe-bytebuffer")]
#[no_mangle]
pub unsafe extern "C" fn update_unsafe_blake3(
    hasher: *mut Blake3Session,
    input_length: c_int,
    input: *const u8,
) -> c_int {
    update_blake3(hasher, input_length, input)
}

/// # Safety
///
/// Same contract as `finalize_blake3`.
#[cfg(feature = "unsafe-bytebuffer")]
#[no_mangle]
pub unsafe extern "C" fn finalize_unsafe_blake3(
    hasher: *mut Blake3Session,
    output_length: c_int,
    output: *mut u8,
) -> c_int {
    finalize_blake3(hasher, output_length, output)
}

#[no_mangle]
pub extern "C" fn b3_output_size() -> c_int {
    OUTPUT_SIZE as c_int
}

/// Write a JSON envelope with the library version to `*out_json`. Release it
/// with `b3_free_string`.
///
/// # Safety
///
/// `out_json` must be null or valid for a pointer-sized write.
#[no_mangle]
pub unsafe extern "C" fn b3_version(out_json: *mut *mut c_char) -> c_int {
    if out_json.is_null() {
        return B3_ERR_INVALID_ARG;
    }
    let envelope = Envelope::ok()
        .with_field("version", version())
        .with_field("output_size", OUTPUT_SIZE);
    *out_json = envelope.into_cstring().into_raw();
    B3_OK
}

/// # Safety
///
/// `ptr` must be null or a string returned by this library, freed once.
#[no_mangle]
pub unsafe extern "C" fn b3_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::ffi::CStr;
    use std::ptr;

    #[test]
    fn version_envelope_reports_crate_version() {
        let mut out: *mut c_char = ptr::null_mut();
        assert_eq!(unsafe { b3_version(&mut out) }, B3_OK);
        assert!(!out.is_null());
        let json = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_owned();
        unsafe { b3_free_string(out) };
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], Value::Bool(true));
        assert_eq!(value["version"], Value::from(version()));
        assert_eq!(value["output_size"], Value::from(32));
    }

    #[test]
    fn version_rejects_null_out() {
        assert_eq!(unsafe { b3_version(ptr::null_mut()) }, B3_ERR_INVALID_ARG);
    }

    #[test]
    fn negative_lengths_are_invalid_arguments() {
        let mut out = [0u8; OUTPUT_SIZE];
        let rc = unsafe { calculate_blake3(-1, b"x".as_ptr(), 32, out.as_mut_ptr()) };
        assert_eq!(rc, B3_ERR_INVALID_ARG);
        let rc = unsafe { calculate_blake3(1, b"x".as_ptr(), -32, out.as_mut_ptr()) };
        assert_eq!(rc, B3_ERR_INVALID_ARG);
    }

    #[test]
    fn free_string_ignores_null() {
        unsafe { b3_free_string(ptr::null_mut()) };
        assert_eq!(b3_output_size(), 32);
    }
}
