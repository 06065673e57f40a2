use std::ffi::c_int;
use std::ptr::{self, NonNull};

use zstd_sys::{ZSTD_CCtx, ZSTD_cParameter};

use super::{check, Bounds, EndOp, EngineError, InBuf, OutBuf, RawCDict, ResetScope, CONTENTSIZE_UNKNOWN};

/// Exclusive owner of one `ZSTD_CCtx`.
pub(crate) struct RawCCtx(NonNull<ZSTD_CCtx>);

// SAFETY: a compression context has no thread affinity; `&mut self` gives exclusive access.
unsafe impl Send for RawCCtx {}

impl RawCCtx {
    pub fn create() -> Option<Self> {
        // SAFETY: allocation only; null is handled by `NonNull::new`.
        NonNull::new(unsafe { zstd_sys::ZSTD_createCCtx() }).map(Self)
    }

    fn ptr(&self) -> *mut ZSTD_CCtx {
        self.0.as_ptr()
    }

    pub fn bounds(param: ZSTD_cParameter) -> Result<Bounds, EngineError> {
        // SAFETY: table lookup inside the engine.
        let b = unsafe { zstd_sys::ZSTD_cParam_getBounds(param) };
        check(b.error)?;
        Ok(Bounds { min: b.lowerBound, max: b.upperBound })
    }

    pub fn set_parameter(&mut self, param: ZSTD_cParameter, value: i32) -> Result<(), EngineError> {
        // SAFETY: live context, exclusive borrow.
        check(unsafe { zstd_sys::ZSTD_CCtx_setParameter(self.ptr(), param, value) }).map(drop)
    }

    pub fn get_parameter(&self, param: ZSTD_cParameter) -> Result<i32, EngineError> {
        let mut value: c_int = 0;
        // SAFETY: live context; `value` outlives the call.
        check(unsafe { zstd_sys::ZSTD_CCtx_getParameter(self.ptr(), param, &mut value) })?;
        Ok(value)
    }

    pub fn reset(&mut self, scope: ResetScope) -> Result<(), EngineError> {
        // SAFETY: live context, exclusive borrow.
        check(unsafe { zstd_sys::ZSTD_CCtx_reset(self.ptr(), scope.directive()) }).map(drop)
    }

    pub fn set_pledged_src_size(&mut self, size: Option<u64>) -> Result<(), EngineError> {
        let size = size.unwrap_or(CONTENTSIZE_UNKNOWN);
        // SAFETY: live context, exclusive borrow.
        check(unsafe { zstd_sys::ZSTD_CCtx_setPledgedSrcSize(self.ptr(), size) }).map(drop)
    }

    /// Reference `cdict` for every following frame, or return to no-dictionary mode.
    ///
    /// # Safety
    /// `cdict` must stay alive until it is replaced or the context is dropped.
    pub unsafe fn ref_cdict(&mut self, cdict: Option<&RawCDict>) -> Result<(), EngineError> {
        let raw = cdict.map_or(ptr::null(), |d| d.as_ptr());
        check(unsafe { zstd_sys::ZSTD_CCtx_refCDict(self.ptr(), raw) }).map(drop)
    }

    /// Reference `prefix` for the next frame only.
    ///
    /// # Safety
    /// `prefix` must stay alive until that frame is finished or the reference is cleared.
    pub unsafe fn ref_prefix(&mut self, prefix: &[u8]) -> Result<(), EngineError> {
        check(unsafe {
            zstd_sys::ZSTD_CCtx_refPrefix(self.ptr(), prefix.as_ptr().cast(), prefix.len())
        })
        .map(drop)
    }

    /// One incremental step. Returns the engine's "bytes left to flush" hint.
    pub fn compress_stream(
        &mut self,
        output: &mut OutBuf<'_>,
        input: &mut InBuf<'_>,
        op: EndOp,
    ) -> Result<usize, EngineError> {
        let mut raw_out = output.as_raw();
        let mut raw_in = input.as_raw();
        // SAFETY: both windows describe live slices that outlive the call.
        let code = unsafe {
            zstd_sys::ZSTD_compressStream2(self.ptr(), &mut raw_out, &mut raw_in, op.directive())
        };
        output.pos = raw_out.pos;
        input.pos = raw_in.pos;
        check(code)
    }
}

impl Drop for RawCCtx {
    fn drop(&mut self) {
        // SAFETY: created by ZSTD_createCCtx and freed only here.
        unsafe {
            zstd_sys::ZSTD_freeCCtx(self.ptr());
        }
    }
}
