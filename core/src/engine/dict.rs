use std::ptr::NonNull;

use zstd_sys::{ZSTD_CDict, ZSTD_DDict};

/// Owner of a digested compression dictionary.
pub(crate) struct RawCDict(NonNull<ZSTD_CDict>);

/// Owner of a digested decompression dictionary.
pub(crate) struct RawDDict(NonNull<ZSTD_DDict>);

// SAFETY: digested dictionaries are read-only after creation and may be
// referenced from any number of contexts on any thread.
unsafe impl Send for RawCDict {}
unsafe impl Sync for RawCDict {}
unsafe impl Send for RawDDict {}
unsafe impl Sync for RawDDict {}

impl RawCDict {
    /// Digest `content` at `level`; the engine keeps its own copy of the bytes.
    pub fn create(content: &[u8], level: i32) -> Option<Self> {
        // SAFETY: `content` is live for the call and copied by the engine.
        NonNull::new(unsafe {
            zstd_sys::ZSTD_createCDict(content.as_ptr().cast(), content.len(), level)
        })
        .map(Self)
    }

    pub fn as_ptr(&self) -> *const ZSTD_CDict {
        self.0.as_ptr()
    }

    pub fn sizeof(&self) -> usize {
        // SAFETY: live dictionary.
        unsafe { zstd_sys::ZSTD_sizeof_CDict(self.as_ptr()) }
    }

    pub fn dict_id(&self) -> u32 {
        // SAFETY: live dictionary.
        unsafe { zstd_sys::ZSTD_getDictID_fromCDict(self.as_ptr()) }
    }
}

impl Drop for RawCDict {
    fn drop(&mut self) {
        // SAFETY: created by ZSTD_createCDict and freed only here.
        unsafe {
            zstd_sys::ZSTD_freeCDict(self.0.as_ptr());
        }
    }
}

impl RawDDict {
    pub fn create(content: &[u8]) -> Option<Self> {
        // SAFETY: `content` is live for the call and copied by the engine.
        NonNull::new(unsafe { zstd_sys::ZSTD_createDDict(content.as_ptr().cast(), content.len()) })
            .map(Self)
    }

    pub fn as_ptr(&self) -> *const ZSTD_DDict {
        self.0.as_ptr()
    }

    pub fn sizeof(&self) -> usize {
        // SAFETY: live dictionary.
        unsafe { zstd_sys::ZSTD_sizeof_DDict(self.as_ptr()) }
    }

    pub fn dict_id(&self) -> u32 {
        // SAFETY: live dictionary.
        unsafe { zstd_sys::ZSTD_getDictID_fromDDict(self.as_ptr()) }
    }
}

impl Drop for RawDDict {
    fn drop(&mut self) {
        // SAFETY: created by ZSTD_createDDict and freed only here.
        unsafe {
            zstd_sys::ZSTD_freeDDict(self.0.as_ptr());
        }
    }
}
