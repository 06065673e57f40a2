//! src/dictionary/mod.rs
//!
//! Shared, immutable dictionaries plus training and inspection helpers.
//!
//! Design notes:
//! - A dictionary is digested once and then only read; clones share the same
//!   engine structure through an `Arc`, so it lives as long as its last user.
//! - Id and in-memory size are captured at construction and never change.

mod inspect;
mod train;

pub use inspect::{dictionary_header_size, dictionary_id, dictionary_id_from_frame};
pub use train::{
    finalize_dictionary, train, train_cover, train_fast_cover, CoverParams, FastCoverParams,
    FinalizeParams,
};

use std::fmt;
use std::sync::Arc;

use crate::engine::{self, RawCDict, RawDDict};
use crate::types::{CodecError, CodecResult};

struct CDictInner {
    raw: RawCDict,
    level: i32,
    size: usize,
    id: u32,
}

/// Precomputed compression tables for one dictionary at one level.
#[derive(Clone)]
pub struct CompressionDictionary {
    inner: Arc<CDictInner>,
}

impl CompressionDictionary {
    /// Digest `content` at `level` (engine default when `None`).
    ///
    /// # Errors
    /// - `DictionaryBuildFailure` if the engine cannot build the tables.
    pub fn new(content: &[u8], level: Option<i32>) -> CodecResult<Self> {
        let level = level.unwrap_or_else(engine::default_level);
        let raw = RawCDict::create(content, level).ok_or_else(|| CodecError::DictionaryBuildFailure {
            reason: format!("engine could not digest {} bytes at level {level}", content.len()),
        })?;
        let size = raw.sizeof();
        let id = raw.dict_id();
        log::debug!("compression dictionary: id={id} level={level} size={size}");
        Ok(Self { inner: Arc::new(CDictInner { raw, level, size, id }) })
    }

    pub fn level(&self) -> i32 {
        self.inner.level
    }

    /// Bytes the digested structure occupies in memory.
    pub fn size(&self) -> usize {
        self.inner.size
    }

    /// Embedded dictionary id; 0 for raw content.
    pub fn dict_id(&self) -> u32 {
        self.inner.id
    }

    pub fn estimate_memory(dict_size: usize, level: i32) -> usize {
        engine::estimate_cdict_size(dict_size, level)
    }

    pub(crate) fn raw(&self) -> &RawCDict {
        &self.inner.raw
    }
}

impl fmt::Debug for CompressionDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionDictionary")
            .field("id", &self.inner.id)
            .field("level", &self.inner.level)
            .field("size", &self.inner.size)
            .finish()
    }
}

struct DDictInner {
    raw: RawDDict,
    size: usize,
    id: u32,
}

/// Decompression-side dictionary; level independent.
#[derive(Clone)]
pub struct DecompressionDictionary {
    inner: Arc<DDictInner>,
}

impl DecompressionDictionary {
    pub fn new(content: &[u8]) -> CodecResult<Self> {
        let raw = RawDDict::create(content).ok_or_else(|| CodecError::DictionaryBuildFailure {
            reason: format!("engine could not digest {} bytes", content.len()),
        })?;
        let size = raw.sizeof();
        let id = raw.dict_id();
        log::debug!("decompression dictionary: id={id} size={size}");
        Ok(Self { inner: Arc::new(DDictInner { raw, size, id }) })
    }

    pub fn size(&self) -> usize {
        self.inner.size
    }

    pub fn dict_id(&self) -> u32 {
        self.inner.id
    }

    pub fn estimate_memory(dict_size: usize) -> usize {
        engine::estimate_ddict_size(dict_size)
    }

    pub(crate) fn raw(&self) -> &RawDDict {
        &self.inner.raw
    }
}

impl fmt::Debug for DecompressionDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecompressionDictionary")
            .field("id", &self.inner.id)
            .field("size", &self.inner.size)
            .finish()
    }
}
