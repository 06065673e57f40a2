//! Trainer and finalizer entry points.
//!
//! All of them write into a caller-sized buffer and return the used length.

use std::ffi::c_void;

use zstd_sys::{ZDICT_cover_params_t, ZDICT_fastCover_params_t, ZDICT_params_t};

use super::{check_zdict, EngineError};

/// Knobs shared by the cover-family trainers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoverKnobs {
    pub k: u32,
    pub d: u32,
    pub f: u32,
    pub steps: u32,
    pub accel: u32,
    pub split_point: f64,
    pub shrink_dict: bool,
    pub shrink_dict_max_regression: u32,
    pub nb_threads: u32,
}

pub(crate) struct Corpus<'a> {
    pub buffer: &'a [u8],
    pub sizes: &'a [usize],
    pub count: u32,
}

fn zdict_params(level: i32, dict_id: u32) -> ZDICT_params_t {
    ZDICT_params_t { compressionLevel: level, notificationLevel: 0, dictID: dict_id }
}

pub(crate) fn train_from_buffer(dst: &mut [u8], corpus: &Corpus<'_>) -> Result<usize, EngineError> {
    // SAFETY: `dst`, the sample buffer and the size table are live slices; `count`
    // matches `sizes.len()`.
    check_zdict(unsafe {
        zstd_sys::ZDICT_trainFromBuffer(
            dst.as_mut_ptr().cast::<c_void>(),
            dst.len(),
            corpus.buffer.as_ptr().cast(),
            corpus.sizes.as_ptr(),
            corpus.count,
        )
    })
}

/// COVER. When `k` or `d` is zero the engine searches for them.
pub(crate) fn train_cover(
    dst: &mut [u8],
    corpus: &Corpus<'_>,
    knobs: &CoverKnobs,
) -> Result<usize, EngineError> {
    // SAFETY: plain C struct of integers and a double; all-zero is its documented default.
    let mut params: ZDICT_cover_params_t = unsafe { std::mem::zeroed() };
    params.k = knobs.k;
    params.d = knobs.d;
    params.steps = knobs.steps;
    params.nbThreads = knobs.nb_threads;
    params.splitPoint = knobs.split_point;
    params.shrinkDict = u32::from(knobs.shrink_dict);
    params.shrinkDictMaxRegression = knobs.shrink_dict_max_regression;
    params.zParams = zdict_params(0, 0);

    let code = if knobs.k == 0 || knobs.d == 0 {
        // SAFETY: as above; `params` outlives the call.
        unsafe {
            zstd_sys::ZDICT_optimizeTrainFromBuffer_cover(
                dst.as_mut_ptr().cast(),
                dst.len(),
                corpus.buffer.as_ptr().cast(),
                corpus.sizes.as_ptr(),
                corpus.count,
                &mut params,
            )
        }
    } else {
        // SAFETY: as above.
        unsafe {
            zstd_sys::ZDICT_trainFromBuffer_cover(
                dst.as_mut_ptr().cast(),
                dst.len(),
                corpus.buffer.as_ptr().cast(),
                corpus.sizes.as_ptr(),
                corpus.count,
                params,
            )
        }
    };
    check_zdict(code)
}

/// fastCover. When `k` or `d` is zero the engine searches for them.
pub(crate) fn train_fast_cover(
    dst: &mut [u8],
    corpus: &Corpus<'_>,
    knobs: &CoverKnobs,
) -> Result<usize, EngineError> {
    // SAFETY: plain C struct of integers and a double; all-zero is its documented default.
    let mut params: ZDICT_fastCover_params_t = unsafe { std::mem::zeroed() };
    params.k = knobs.k;
    params.d = knobs.d;
    params.f = knobs.f;
    params.steps = knobs.steps;
    params.nbThreads = knobs.nb_threads;
    params.splitPoint = knobs.split_point;
    params.accel = knobs.accel;
    params.shrinkDict = u32::from(knobs.shrink_dict);
    params.shrinkDictMaxRegression = knobs.shrink_dict_max_regression;
    params.zParams = zdict_params(0, 0);

    let code = if knobs.k == 0 || knobs.d == 0 {
        // SAFETY: as above; `params` outlives the call.
        unsafe {
            zstd_sys::ZDICT_optimizeTrainFromBuffer_fastCover(
                dst.as_mut_ptr().cast(),
                dst.len(),
                corpus.buffer.as_ptr().cast(),
                corpus.sizes.as_ptr(),
                corpus.count,
                &mut params,
            )
        }
    } else {
        // SAFETY: as above.
        unsafe {
            zstd_sys::ZDICT_trainFromBuffer_fastCover(
                dst.as_mut_ptr().cast(),
                dst.len(),
                corpus.buffer.as_ptr().cast(),
                corpus.sizes.as_ptr(),
                corpus.count,
                params,
            )
        }
    };
    check_zdict(code)
}

pub(crate) fn finalize(
    dst: &mut [u8],
    content: &[u8],
    corpus: &Corpus<'_>,
    level: i32,
    dict_id: u32,
) -> Result<usize, EngineError> {
    // SAFETY: every pointer/length pair comes from a live slice.
    check_zdict(unsafe {
        zstd_sys::ZDICT_finalizeDictionary(
            dst.as_mut_ptr().cast(),
            dst.len(),
            content.as_ptr().cast(),
            content.len(),
            corpus.buffer.as_ptr().cast(),
            corpus.sizes.as_ptr(),
            corpus.count,
            zdict_params(level, dict_id),
        )
    })
}
