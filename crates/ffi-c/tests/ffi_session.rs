use std::ptr;

use b3session::{
    calculate_blake3, create_blake3, delete_blake3, finalize_blake3, update_blake3,
    B3_ERR_INVALID_ARG, B3_ERR_INVALID_STATE, B3_OK,
};
use b3session_corelib::{compute, Digest, OUTPUT_SIZE};

fn calc(input: &[u8]) -> [u8; OUTPUT_SIZE] {
    let mut out = [0u8; OUTPUT_SIZE];
    let rc = unsafe {
        calculate_blake3(
            input.len() as i32,
            input.as_ptr(),
            out.len() as i32,
            out.as_mut_ptr(),
        )
    };
    assert_eq!(rc, B3_OK);
    out
}

#[test]
fn calculate_matches_library() {
    assert_eq!(calc(&[1, 2, 3, 4, 5]), *compute(&[1, 2, 3, 4, 5]).as_bytes());
    assert_eq!(Digest::from(calc(&[])), Digest::empty());
}

#[test]
fn calculate_rejects_null_and_bad_lengths() {
    let mut out = [0u8; 64];
    let rc = unsafe { calculate_blake3(0, ptr::null(), 32, out.as_mut_ptr()) };
    assert_eq!(rc, B3_ERR_INVALID_ARG);
    let rc = unsafe { calculate_blake3(1, b"x".as_ptr(), 32, ptr::null_mut()) };
    assert_eq!(rc, B3_ERR_INVALID_ARG);
    for len in [0, 16, 33] {
        let rc = unsafe { calculate_blake3(1, b"x".as_ptr(), len, out.as_mut_ptr()) };
        assert_eq!(rc, B3_ERR_INVALID_ARG, "output length {len}");
    }
}

#[test]
fn session_streams_like_calculate() {
    let hasher = create_blake3();
    assert!(!hasher.is_null());
    unsafe {
        assert_eq!(update_blake3(hasher, 2, [1u8, 2].as_ptr()), B3_OK);
        assert_eq!(update_blake3(hasher, 1, [3u8].as_ptr()), B3_OK);
        assert_eq!(update_blake3(hasher, 2, [4u8, 5].as_ptr()), B3_OK);
        let mut out = [0u8; OUTPUT_SIZE];
        assert_eq!(finalize_blake3(hasher, 32, out.as_mut_ptr()), B3_OK);
        assert_eq!(out, calc(&[1, 2, 3, 4, 5]));
        delete_blake3(hasher);
    }
}

#[test]
fn session_rejects_use_after_finalize() {
    let hasher = create_blake3();
    let mut out = [0u8; OUTPUT_SIZE];
    unsafe {
        assert_eq!(finalize_blake3(hasher, 32, out.as_mut_ptr()), B3_OK);
        assert_eq!(
            update_blake3(hasher, 1, b"x".as_ptr()),
            B3_ERR_INVALID_STATE
        );
        assert_eq!(
            finalize_blake3(hasher, 32, out.as_mut_ptr()),
            B3_ERR_INVALID_STATE
        );
        delete_blake3(hasher);
    }
    assert_eq!(Digest::from(out), Digest::empty());
}

#[test]
fn bad_output_keeps_session_usable() {
    let hasher = create_blake3();
    let mut out = [0u8; OUTPUT_SIZE];
    unsafe {
        assert_eq!(update_blake3(hasher, 3, b"abc".as_ptr()), B3_OK);
        assert_eq!(
            finalize_blake3(hasher, 16, out.as_mut_ptr()),
            B3_ERR_INVALID_ARG
        );
        assert_eq!(finalize_blake3(hasher, 32, ptr::null_mut()), B3_ERR_INVALID_ARG);
        assert_eq!(finalize_blake3(hasher, 32, out.as_mut_ptr()), B3_OK);
        delete_blake3(hasher);
    }
    assert_eq!(out, calc(b"abc"));
}

#[test]
fn null_handles_are_invalid_arguments() {
    let mut out = [0u8; OUTPUT_SIZE];
    unsafe {
        assert_eq!(
            update_blake3(ptr::null_mut(), 1, b"x".as_ptr()),
            B3_ERR_INVALID_ARG
        );
        assert_eq!(
            finalize_blake3(ptr::null_mut(), 32, out.as_mut_ptr()),
            B3_ERR_INVALID_ARG
        );
        delete_blake3(ptr::null_mut());
    }
}

#[test]
fn abandoned_session_can_be_deleted() {
    let hasher = create_blake3();
    unsafe {
        assert_eq!(update_blake3(hasher, 4, b"drop".as_ptr()), B3_OK);
        delete_blake3(hasher);
    }
}

#[cfg(feature = "unsafe-bytebuffer")]
#[test]
fn pointer_aliases_share_contract() {
    use b3session::{calculate_unsafe_blake3, finalize_unsafe_blake3, update_unsafe_blake3};

    let mut out = [0u8; OUTPUT_SIZE];
    unsafe {
        assert_eq!(
            calculate_unsafe_blake3(3, b"abc".as_ptr(), 33, out.as_mut_ptr()),
            B3_ERR_INVALID_ARG
        );
        let hasher = create_blake3();
        assert_eq!(update_unsafe_blake3(hasher, 3, b"abc".as_ptr()), B3_OK);
        assert_eq!(finalize_unsafe_blake3(hasher, 32, out.as_mut_ptr()), B3_OK);
        assert_eq!(
            update_unsafe_blake3(hasher, 1, b"x".as_ptr()),
            B3_ERR_INVALID_STATE
        );
        delete_blake3(hasher);
    }
    assert_eq!(out, calc(b"abc"));
}
