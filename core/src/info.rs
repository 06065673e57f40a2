//! Engine introspection: version, level range, buffer hints, memory estimates.

use crate::dictionary::{CompressionDictionary, DecompressionDictionary};
use crate::engine;
use crate::session::{CompressionSession, DecompressionSession};

pub fn version_number() -> u32 {
    zstd_safe::version_number()
}

pub fn version_string() -> &'static str {
    zstd_safe::version_string()
}

pub fn min_level() -> i32 {
    zstd_safe::min_c_level()
}

pub fn max_level() -> i32 {
    zstd_safe::max_c_level()
}

pub fn default_level() -> i32 {
    engine::default_level()
}

/// Suggested input chunk for streaming compression.
pub fn compression_input_size_hint() -> usize {
    engine::cstream_in_size()
}

/// Output buffer guaranteed to hold one flushed block.
pub fn compression_output_size_hint() -> usize {
    engine::cstream_out_size()
}

pub fn decompression_input_size_hint() -> usize {
    engine::dstream_in_size()
}

pub fn decompression_output_size_hint() -> usize {
    engine::dstream_out_size()
}

/// Memory estimates, one per object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryEstimate {
    CompressionSession { level: i32 },
    DecompressionSession,
    CompressionDictionary { dict_size: usize, level: i32 },
    DecompressionDictionary { dict_size: usize },
}

impl MemoryEstimate {
    pub fn bytes(self) -> usize {
        match self {
            MemoryEstimate::CompressionSession { level } => CompressionSession::estimate_memory(level),
            MemoryEstimate::DecompressionSession => DecompressionSession::estimate_memory(),
            MemoryEstimate::CompressionDictionary { dict_size, level } => {
                CompressionDictionary::estimate_memory(dict_size, level)
            }
            MemoryEstimate::DecompressionDictionary { dict_size } => {
                DecompressionDictionary::estimate_memory(dict_size)
            }
        }
    }
}
