// Derived from `pinocchio-token-interface` – commit 75116550519a9ee3fdfa6c819aca91e383fffa39, Apache-2.0.
// See: https://github.com/solana-program/token

use crate::error::ProtectorError;

/// Marker trait for a zero-copy view of bytes as `&Self` via an unchecked cast
/// (e.g., `&*(bytes.as_ptr() as *const Self)`).
///
/// # Safety
/// **Implementor guarantees:**
/// - Use a stable layout (`#[repr(C)]` or `#[repr(transparent)]`).
/// - `LEN` bytes form a valid `Self`. Prefer `[u8; N]` and/or transparent byte wrappers.
/// - `size_of::<Self> == LEN`
/// - `align_of::<Self> == 1`
///
/// **Caller guarantees:**
/// - The bytes represent a valid `Self`.
pub unsafe trait Transmutable: Sized {
    /// The cumulative size in bytes of all fields in the struct.
    const LEN: usize;

    /// Returns the raw bytes of `Self`.
    #[inline(always)]
    fn as_bytes(&self) -> &[u8] {
        // Safety: `Self` is exactly `LEN` bytes with an alignment of 1.
        unsafe { core::slice::from_raw_parts(self as *const Self as *const u8, Self::LEN) }
    }
}

/// Returns a reference to a `T: Transmutable` from the given bytes after checking the byte length.
///
/// # Safety
/// - Caller must guarantee `bytes` is a valid representation of `T`.
#[inline(always)]
pub unsafe fn load<T: Transmutable>(bytes: &[u8]) -> Result<&T, ProtectorError> {
    if bytes.len() != T::LEN {
        return Err(ProtectorError::InsufficientByteLength);
    }
    Ok(&*(bytes.as_ptr() as *const T))
}

/// Returns a mutable reference to a `T: Transmutable` from the given bytes after checking the byte
/// length.
///
/// # Safety
/// - Caller must guarantee `bytes` is a valid representation of `T`.
#[inline(always)]
pub unsafe fn load_mut<T: Transmutable>(bytes: &mut [u8]) -> Result<&mut T, ProtectorError> {
    if bytes.len() != T::LEN {
        return Err(ProtectorError::InsufficientByteLength);
    }
    Ok(&mut *(bytes.as_mut_ptr() as *mut T))
}

/// Reinterprets `bytes` as a slice of `T`, failing if the length isn't a multiple of `T::LEN`.
///
/// # Safety
/// - Caller must guarantee every `T::LEN` chunk of `bytes` is a valid representation of `T`.
#[inline(always)]
pub unsafe fn load_slice<T: Transmutable>(bytes: &[u8]) -> Result<&[T], ProtectorError> {
    if bytes.len() % T::LEN != 0 {
        return Err(ProtectorError::InsufficientByteLength);
    }
    Ok(core::slice::from_raw_parts(
        bytes.as_ptr() as *const T,
        bytes.len() / T::LEN,
    ))
}

/// The mutable version of [`load_slice`].
///
/// # Safety
/// - Caller must guarantee every `T::LEN` chunk of `bytes` is a valid representation of `T`.
#[inline(always)]
pub unsafe fn load_slice_mut<T: Transmutable>(
    bytes: &mut [u8],
) -> Result<&mut [T], ProtectorError> {
    if bytes.len() % T::LEN != 0 {
        return Err(ProtectorError::InsufficientByteLength);
    }
    Ok(core::slice::from_raw_parts_mut(
        bytes.as_mut_ptr() as *mut T,
        bytes.len() / T::LEN,
    ))
}
