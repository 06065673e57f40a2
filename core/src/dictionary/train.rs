//! Dictionary training.
//!
//! Every trainer takes the samples as a list, lays them out as one corpus with a
//! size table, and returns at most `max_dict_size` bytes.

use crate::constants::DEFAULT_MAX_DICT_SIZE;
use crate::engine::train::{self as zdict, CoverKnobs, Corpus};
use crate::engine::EngineError;
use crate::types::{CodecError, CodecResult};
use crate::utils::{nonzero_size, SampleCorpus};

/// Knobs for the COVER trainer. `k`/`d` left at 0 ask the engine to search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverParams {
    pub max_dict_size: usize,
    pub k: u32,
    pub d: u32,
    pub steps: u32,
    pub split_point: f64,
    pub shrink_dict: bool,
    pub shrink_dict_max_regression: u32,
    pub nb_threads: u32,
}

impl Default for CoverParams {
    fn default() -> Self {
        Self {
            max_dict_size: DEFAULT_MAX_DICT_SIZE,
            k: 0,
            d: 0,
            steps: 0,
            split_point: 1.0,
            shrink_dict: false,
            shrink_dict_max_regression: 0,
            nb_threads: 1,
        }
    }
}

impl CoverParams {
    pub fn with_max_dict_size(mut self, size: usize) -> Self {
        self.max_dict_size = size;
        self
    }

    pub fn with_segment(mut self, k: u32, d: u32) -> Self {
        self.k = k;
        self.d = d;
        self
    }

    pub fn with_shrink(mut self, max_regression: u32) -> Self {
        self.shrink_dict = true;
        self.shrink_dict_max_regression = max_regression;
        self
    }
}

/// Knobs for the fastCover trainer. Zero `f`/`accel` pick engine defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastCoverParams {
    pub max_dict_size: usize,
    pub k: u32,
    pub d: u32,
    pub f: u32,
    pub steps: u32,
    pub split_point: f64,
    pub accel: u32,
    pub shrink_dict: bool,
    pub shrink_dict_max_regression: u32,
    pub nb_threads: u32,
}

impl Default for FastCoverParams {
    fn default() -> Self {
        Self {
            max_dict_size: DEFAULT_MAX_DICT_SIZE,
            k: 0,
            d: 0,
            f: 0,
            steps: 0,
            split_point: 1.0,
            accel: 0,
            shrink_dict: false,
            shrink_dict_max_regression: 0,
            nb_threads: 1,
        }
    }
}

impl FastCoverParams {
    pub fn with_max_dict_size(mut self, size: usize) -> Self {
        self.max_dict_size = size;
        self
    }

    pub fn with_segment(mut self, k: u32, d: u32) -> Self {
        self.k = k;
        self.d = d;
        self
    }

    pub fn with_accel(mut self, accel: u32) -> Self {
        self.accel = accel;
        self
    }
}

/// Options for `finalize_dictionary`. Zero level/id let the engine choose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeParams {
    pub max_size: usize,
    pub compression_level: i32,
    pub dict_id: u32,
}

impl FinalizeParams {
    pub fn new(max_size: usize) -> Self {
        Self { max_size, ..Self::default() }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_dict_id(mut self, dict_id: u32) -> Self {
        self.dict_id = dict_id;
        self
    }
}

fn check_split_point(split_point: f64) -> CodecResult<()> {
    if split_point > 0.0 && split_point <= 1.0 {
        Ok(())
    } else {
        Err(CodecError::invalid(format!("split_point must be in (0, 1] (got {split_point})")))
    }
}

/// Allocate the output, run `f` against the corpus, trim to the produced length.
fn run_trainer<S, F>(
    samples: &[S],
    capacity: usize,
    stage: &'static str,
    f: F,
) -> CodecResult<Vec<u8>>
where
    S: AsRef<[u8]>,
    F: FnOnce(&mut [u8], &Corpus<'_>) -> Result<usize, EngineError>,
{
    let capacity = nonzero_size("max_dict_size", capacity)?.get();
    let corpus = SampleCorpus::concat(samples)?;
    let view = Corpus { buffer: corpus.buffer(), sizes: corpus.sizes(), count: corpus.count_u32()? };

    let mut dict = vec![0u8; capacity];
    let written = f(&mut dict, &view)
        .map_err(|e| CodecError::TrainingFailure { stage, reason: e.to_string() })?;
    dict.truncate(written);
    log::debug!(
        "{stage}: {} samples ({} bytes) -> {} byte dictionary",
        corpus.len(),
        corpus.buffer().len(),
        written
    );
    Ok(dict)
}

/// Train with the engine's default algorithm.
///
/// # Errors
/// - `EmptySampleSet` when `samples` is empty.
/// - `InvalidArgument` when `max_dict_size` is 0.
/// - `TrainingFailure` on trainer error.
pub fn train<S: AsRef<[u8]>>(samples: &[S], max_dict_size: usize) -> CodecResult<Vec<u8>> {
    run_trainer(samples, max_dict_size, "Dictionary training", zdict::train_from_buffer)
}

pub fn train_cover<S: AsRef<[u8]>>(samples: &[S], params: &CoverParams) -> CodecResult<Vec<u8>> {
    check_split_point(params.split_point)?;
    let knobs = CoverKnobs {
        k: params.k,
        d: params.d,
        f: 0,
        steps: params.steps,
        accel: 0,
        split_point: params.split_point,
        shrink_dict: params.shrink_dict,
        shrink_dict_max_regression: params.shrink_dict_max_regression,
        nb_threads: params.nb_threads,
    };
    run_trainer(samples, params.max_dict_size, "Dictionary training", |dst, corpus| {
        zdict::train_cover(dst, corpus, &knobs)
    })
}

pub fn train_fast_cover<S: AsRef<[u8]>>(
    samples: &[S],
    params: &FastCoverParams,
) -> CodecResult<Vec<u8>> {
    check_split_point(params.split_point)?;
    let knobs = CoverKnobs {
        k: params.k,
        d: params.d,
        f: params.f,
        steps: params.steps,
        accel: params.accel,
        split_point: params.split_point,
        shrink_dict: params.shrink_dict,
        shrink_dict_max_regression: params.shrink_dict_max_regression,
        nb_threads: params.nb_threads,
    };
    run_trainer(samples, params.max_dict_size, "Dictionary training", |dst, corpus| {
        zdict::train_fast_cover(dst, corpus, &knobs)
    })
}

/// Wrap existing raw `content` into a dictionary with headers and entropy tables
/// fitted to `samples`.
pub fn finalize_dictionary<S: AsRef<[u8]>>(
    content: &[u8],
    samples: &[S],
    params: &FinalizeParams,
) -> CodecResult<Vec<u8>> {
    run_trainer(samples, params.max_size, "Dictionary finalization", |dst, corpus| {
        zdict::finalize(dst, content, corpus, params.compression_level, params.dict_id)
    })
}
