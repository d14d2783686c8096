//! Utility functions
use crate::error::StringError;
use std::{
    ffi::{c_char, CStr},
    fmt,
    path::PathBuf,
};

/// Tries to convert a pointer to a C string into a Rust [`str`]
///
/// # Safety
/// `ptr` must be null or point to a NUL terminated string that outlives `'a`.
pub unsafe fn get_str_from_pointer<'a>(ptr: *const c_char) -> Result<&'a str, StringError> {
    if ptr.is_null() {
        return Err(StringError::NullPointer("string"));
    }

    let slice = CStr::from_ptr(ptr);

    std::str::from_utf8(slice.to_bytes()).map_err(Into::into)
}

/// Tries to convert a pointer to a C string into a Rust [`PathBuf`]
///
/// # Safety
/// `ptr` must be null or point to a NUL terminated string.
pub unsafe fn get_path_from_pointer(ptr: *const c_char) -> Result<PathBuf, StringError> {
    if ptr.is_null() {
        return Err(StringError::NullPointer("path"));
    }

    let slice = CStr::from_ptr(ptr);

    cfg_if::cfg_if! {
        if #[cfg(target_family = "unix")] {
            use std::os::unix::ffi::OsStrExt;
            Ok(PathBuf::from(std::ffi::OsStr::from_bytes(slice.to_bytes())))
        }
        else {
            let s = std::str::from_utf8(slice.to_bytes())?;
            Ok(PathBuf::from(s))
        }
    }
}

/// A semantic version, see [`env_version!`](crate::env_version).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl Version {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
