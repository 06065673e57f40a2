//! src/engine/mod.rs
//!
//! Owning handles over the native zstd engine.
//!
//! Design notes:
//! - This is the only place that calls into `zstd_sys`; everything above it is safe code.
//! - Every entry point reports failure through the engine's "is error" predicate and
//!   surfaces it as `EngineError`, whose `Display` is the engine diagnostic string.
//! - Handles free their native resource exactly once, in `Drop`.
#![allow(unsafe_code)]

use std::ffi::c_void;
use std::fmt;

mod cctx;
mod dctx;
mod dict;
pub(crate) mod train;

pub(crate) use cctx::RawCCtx;
pub(crate) use dctx::RawDCtx;
pub(crate) use dict::{RawCDict, RawDDict};

/// `ZSTD_CONTENTSIZE_UNKNOWN` / `ZSTD_CONTENTSIZE_ERROR`.
const CONTENTSIZE_UNKNOWN: u64 = u64::MAX;
const CONTENTSIZE_ERROR: u64 = u64::MAX - 1;

/// Raw error code returned by an engine entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineError {
    code: usize,
}

impl EngineError {
    pub fn code(&self) -> usize {
        self.code
    }

    pub fn name(&self) -> &'static str {
        zstd_safe::get_error_name(self.code)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::error::Error for EngineError {}

/// Inclusive range reported by the engine for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl Bounds {
    pub fn contains(&self, value: i64) -> bool {
        (i64::from(self.min)..=i64::from(self.max)).contains(&value)
    }
}

pub(crate) fn check(code: usize) -> Result<usize, EngineError> {
    // SAFETY: pure function over an integer.
    if unsafe { zstd_sys::ZSTD_isError(code) } != 0 {
        Err(EngineError { code })
    } else {
        Ok(code)
    }
}

pub(crate) fn check_zdict(code: usize) -> Result<usize, EngineError> {
    // SAFETY: pure function over an integer.
    if unsafe { zstd_sys::ZDICT_isError(code) } != 0 {
        Err(EngineError { code })
    } else {
        Ok(code)
    }
}

/// Read window over caller input; `pos` is advanced by the engine.
pub(crate) struct InBuf<'a> {
    pub src: &'a [u8],
    pub pos: usize,
}

impl<'a> InBuf<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    pub fn is_consumed(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn as_raw(&self) -> zstd_sys::ZSTD_inBuffer {
        zstd_sys::ZSTD_inBuffer {
            src: self.src.as_ptr().cast::<c_void>(),
            size: self.src.len(),
            pos: self.pos,
        }
    }
}

/// Write window over caller output; bytes `[..pos]` are filled.
pub(crate) struct OutBuf<'a> {
    pub dst: &'a mut [u8],
    pub pos: usize,
}

impl<'a> OutBuf<'a> {
    pub fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, pos: 0 }
    }

    pub fn at(dst: &'a mut [u8], pos: usize) -> Self {
        Self { dst, pos }
    }

    pub fn is_full(&self) -> bool {
        self.pos >= self.dst.len()
    }

    fn as_raw(&mut self) -> zstd_sys::ZSTD_outBuffer {
        zstd_sys::ZSTD_outBuffer {
            dst: self.dst.as_mut_ptr().cast::<c_void>(),
            size: self.dst.len(),
            pos: self.pos,
        }
    }
}

/// Which part of a context `reset` clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResetScope {
    Session,
    Parameters,
    Both,
}

impl ResetScope {
    fn directive(self) -> zstd_sys::ZSTD_ResetDirective {
        use zstd_sys::ZSTD_ResetDirective::*;
        match self {
            ResetScope::Session => ZSTD_reset_session_only,
            ResetScope::Parameters => ZSTD_reset_parameters,
            ResetScope::Both => ZSTD_reset_session_and_parameters,
        }
    }
}

/// Engine-side meaning of a streaming compression step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EndOp {
    Continue,
    Flush,
    End,
}

impl EndOp {
    fn directive(self) -> zstd_sys::ZSTD_EndDirective {
        use zstd_sys::ZSTD_EndDirective::*;
        match self {
            EndOp::Continue => ZSTD_e_continue,
            EndOp::Flush => ZSTD_e_flush,
            EndOp::End => ZSTD_e_end,
        }
    }
}

/// Declared content size of the frame starting at `src`.
pub(crate) enum ContentSize {
    Known(u64),
    Unknown,
    Invalid,
}

pub(crate) fn frame_content_size(src: &[u8]) -> ContentSize {
    // SAFETY: pointer/length pair comes from a live slice.
    let size = unsafe { zstd_sys::ZSTD_getFrameContentSize(src.as_ptr().cast(), src.len()) };
    match size {
        CONTENTSIZE_UNKNOWN => ContentSize::Unknown,
        CONTENTSIZE_ERROR => ContentSize::Invalid,
        n => ContentSize::Known(n),
    }
}

pub(crate) fn dict_id_from_frame(src: &[u8]) -> u32 {
    // SAFETY: pointer/length pair comes from a live slice.
    unsafe { zstd_sys::ZSTD_getDictID_fromFrame(src.as_ptr().cast(), src.len()) }
}

pub(crate) fn dict_id_from_dict(dict: &[u8]) -> u32 {
    // SAFETY: pointer/length pair comes from a live slice.
    unsafe { zstd_sys::ZDICT_getDictID(dict.as_ptr().cast(), dict.len()) }
}

pub(crate) fn dict_header_size(dict: &[u8]) -> Result<usize, EngineError> {
    // SAFETY: pointer/length pair comes from a live slice.
    check_zdict(unsafe { zstd_sys::ZDICT_getDictHeaderSize(dict.as_ptr().cast(), dict.len()) })
}

pub(crate) fn default_level() -> i32 {
    // SAFETY: no arguments, no state.
    unsafe { zstd_sys::ZSTD_defaultCLevel() }
}

pub(crate) fn cstream_in_size() -> usize {
    // SAFETY: no arguments, no state.
    unsafe { zstd_sys::ZSTD_CStreamInSize() }
}

pub(crate) fn cstream_out_size() -> usize {
    // SAFETY: no arguments, no state.
    unsafe { zstd_sys::ZSTD_CStreamOutSize() }
}

pub(crate) fn dstream_in_size() -> usize {
    // SAFETY: no arguments, no state.
    unsafe { zstd_sys::ZSTD_DStreamInSize() }
}

pub(crate) fn dstream_out_size() -> usize {
    // SAFETY: no arguments, no state.
    unsafe { zstd_sys::ZSTD_DStreamOutSize() }
}

pub(crate) fn estimate_cctx_size(level: i32) -> usize {
    // SAFETY: pure size computation.
    unsafe { zstd_sys::ZSTD_estimateCCtxSize(level) }
}

pub(crate) fn estimate_dctx_size() -> usize {
    // SAFETY: pure size computation.
    unsafe { zstd_sys::ZSTD_estimateDCtxSize() }
}

pub(crate) fn estimate_cdict_size(dict_size: usize, level: i32) -> usize {
    // SAFETY: pure size computation.
    unsafe { zstd_sys::ZSTD_estimateCDictSize(dict_size, level) }
}

pub(crate) fn estimate_ddict_size(dict_size: usize) -> usize {
    // SAFETY: pure size computation.
    unsafe {
        zstd_sys::ZSTD_estimateDDictSize(dict_size, zstd_sys::ZSTD_dictLoadMethod_e::ZSTD_dlm_byCopy)
    }
}
