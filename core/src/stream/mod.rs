//! src/stream/mod.rs
//!
//! Incremental compression into a sink and decompression from a source.
//!
//! Design notes:
//! - `Writer` and `Reader` each wrap one session; all frame state lives in the
//!   engine context, the wrappers only move bytes.
//! - Endpoints are the `Sink` / `Source` traits; `IoSink` / `IoSource` adapt any
//!   `std::io::Write` / `std::io::Read`.

mod io;
mod reader;
mod writer;

pub use io::{IoSink, IoSource, SharedSink, Sink, Source};
pub use reader::{Reader, ReaderOptions};
pub use writer::{Writer, WriterOptions};
