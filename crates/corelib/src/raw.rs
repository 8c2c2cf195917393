//! Pointer + length variants for zero-copy interop.
//!
//! These enforce the same invariants as the slice API. Null pointers are
//! rejected even when the accompanying length is zero.

use std::slice;

use crate::crypto::hash::Hash32;
use crate::errors::{check_output_len, HashError};
use crate::oneshot::compute_into;
use crate::session::HashSession;

/// # Safety
///
/// When non-null, `input` must be valid for reads of `input_len` bytes and
/// `output` valid for writes of `output_len` bytes. The regions must not
/// overlap.
pub unsafe fn compute_raw(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> Result<(), HashError> {
    if input.is_null() {
        return Err(HashError::Null("input buffer"));
    }
    if output.is_null() {
        return Err(HashError::Null("output buffer"));
    }
    check_output_len(output_len)?;
    let input = slice::from_raw_parts(input, input_len);
    let output = slice::from_raw_parts_mut(output, output_len);
    compute_into(input, output)
}

/// # Safety
///
/// When non-null, `input` must be valid for reads of `input_len` bytes.
pub unsafe fn update_raw<H: Hash32>(
    session: &mut HashSession<H>,
    input: *const u8,
    input_len: usize,
) -> Result<(), HashError> {
    session.ensure_active("update")?;
    if input.is_null() {
        return Err(HashError::Null("input buffer"));
    }
    session.update(slice::from_raw_parts(input, input_len))
}

/// # Safety
///
/// When non-null, `output` must be valid for writes of `output_len` bytes.
pub unsafe fn finalize_raw<H: Hash32>(
    session: &mut HashSession<H>,
    output: *mut u8,
    output_len: usize,
) -> Result<(), HashError> {
    session.ensure_active("finalize")?;
    if output.is_null() {
        return Err(HashError::Null("output buffer"));
    }
    check_output_len(output_len)?;
    session.finalize_into(slice::from_raw_parts_mut(output, output_len))
}
