use std::ffi::c_int;
use std::ptr::{self, NonNull};

use zstd_sys::{ZSTD_DCtx, ZSTD_dParameter};

use super::{check, Bounds, EngineError, InBuf, OutBuf, RawDDict, ResetScope};

/// Exclusive owner of one `ZSTD_DCtx`.
pub(crate) struct RawDCtx(NonNull<ZSTD_DCtx>);

// SAFETY: a decompression context has no thread affinity; `&mut self` gives exclusive access.
unsafe impl Send for RawDCtx {}

impl RawDCtx {
    pub fn create() -> Option<Self> {
        // SAFETY: allocation only; null is handled by `NonNull::new`.
        NonNull::new(unsafe { zstd_sys::ZSTD_createDCtx() }).map(Self)
    }

    fn ptr(&self) -> *mut ZSTD_DCtx {
        self.0.as_ptr()
    }

    pub fn bounds(param: ZSTD_dParameter) -> Result<Bounds, EngineError> {
        // SAFETY: table lookup inside the engine.
        let b = unsafe { zstd_sys::ZSTD_dParam_getBounds(param) };
        check(b.error)?;
        Ok(Bounds { min: b.lowerBound, max: b.upperBound })
    }

    pub fn set_parameter(&mut self, param: ZSTD_dParameter, value: i32) -> Result<(), EngineError> {
        // SAFETY: live context, exclusive borrow.
        check(unsafe { zstd_sys::ZSTD_DCtx_setParameter(self.ptr(), param, value) }).map(drop)
    }

    pub fn get_parameter(&self, param: ZSTD_dParameter) -> Result<i32, EngineError> {
        let mut value: c_int = 0;
        // SAFETY: live context; the engine only reads it here. `value` outlives the call.
        check(unsafe { zstd_sys::ZSTD_DCtx_getParameter(self.ptr(), param, &mut value) })?;
        Ok(value)
    }

    pub fn reset(&mut self, scope: ResetScope) -> Result<(), EngineError> {
        // SAFETY: live context, exclusive borrow.
        check(unsafe { zstd_sys::ZSTD_DCtx_reset(self.ptr(), scope.directive()) }).map(drop)
    }

    /// # Safety
    /// `ddict` must stay alive until it is replaced or the context is dropped.
    pub unsafe fn ref_ddict(&mut self, ddict: Option<&RawDDict>) -> Result<(), EngineError> {
        let raw = ddict.map_or(ptr::null(), |d| d.as_ptr());
        check(unsafe { zstd_sys::ZSTD_DCtx_refDDict(self.ptr(), raw) }).map(drop)
    }

    /// # Safety
    /// `prefix` must stay alive until the next frame is decoded or the reference is cleared.
    pub unsafe fn ref_prefix(&mut self, prefix: &[u8]) -> Result<(), EngineError> {
        check(unsafe {
            zstd_sys::ZSTD_DCtx_refPrefix(self.ptr(), prefix.as_ptr().cast(), prefix.len())
        })
        .map(drop)
    }

    /// Decode a whole frame into `dst`; uses whatever dictionary or prefix is referenced.
    pub fn decompress(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize, EngineError> {
        // SAFETY: both slices are live for the duration of the call.
        check(unsafe {
            zstd_sys::ZSTD_decompressDCtx(
                self.ptr(),
                dst.as_mut_ptr().cast(),
                dst.len(),
                src.as_ptr().cast(),
                src.len(),
            )
        })
    }

    /// One incremental step. Returns 0 once a frame is fully decoded and flushed.
    pub fn decompress_stream(
        &mut self,
        output: &mut OutBuf<'_>,
        input: &mut InBuf<'_>,
    ) -> Result<usize, EngineError> {
        let mut raw_out = output.as_raw();
        let mut raw_in = input.as_raw();
        // SAFETY: both windows describe live slices that outlive the call.
        let code = unsafe { zstd_sys::ZSTD_decompressStream(self.ptr(), &mut raw_out, &mut raw_in) };
        output.pos = raw_out.pos;
        input.pos = raw_in.pos;
        check(code)
    }
}

impl Drop for RawDCtx {
    fn drop(&mut self) {
        // SAFETY: created by ZSTD_createDCtx and freed only here.
        unsafe {
            zstd_sys::ZSTD_freeDCtx(self.ptr());
        }
    }
}
