//! codec-core
//!
//! Session layer over the zstd engine: tunable compression/decompression
//! sessions, shared dictionaries and training, streaming writer/reader, and
//! frame utilities.
//! No Python, no async runtime.

#![deny(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Native engine (all FFI lives here)
mod engine;

pub mod dictionary;
pub mod frames;
pub mod info;
pub mod params;
pub mod session;
pub mod stream;

pub use engine::EngineError;
pub use types::{CodecError, CodecResult};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::dictionary::{CompressionDictionary, DecompressionDictionary};
    pub use crate::params::{Bounds, ParamKind, ParamValue};
    pub use crate::session::{
        CapacityDefaults, CompressOptions, CompressionSession, DecompressOptions,
        DecompressionSession, ResetMode,
    };
    pub use crate::stream::{Reader, ReaderOptions, Sink, Source, Writer, WriterOptions};
    pub use crate::types::{CodecError, CodecResult};
}
