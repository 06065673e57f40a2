use std::io;
use std::num::NonZeroUsize;

use bytes::Bytes;

use crate::dictionary::DecompressionDictionary;
use crate::engine::{self, InBuf, OutBuf};
use crate::session::DecompressionSession;
use crate::types::{CodecError, CodecResult};
use crate::utils::nonzero_size;

use super::Source;

/// Construction options for `Reader`.
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    pub dict: Option<DecompressionDictionary>,
    /// Default `read` size; the engine's suggested output size when `None`.
    pub chunk_size: Option<NonZeroUsize>,
}

impl ReaderOptions {
    pub fn with_dict(mut self, dict: DecompressionDictionary) -> Self {
        self.dict = Some(dict);
        self
    }

    pub fn with_chunk_size(mut self, size: NonZeroUsize) -> Self {
        self.chunk_size = Some(size);
        self
    }
}

/// Streaming decompressor over a `Source`. Stops at the end of the first frame.
pub struct Reader<R: Source> {
    session: DecompressionSession,
    source: R,
    input: Bytes,
    pos: usize,
    chunk_size: usize,
    refill_size: usize,
    // the last step filled the caller's window; the engine may still hold output
    pending_output: bool,
    in_frame: bool,
    eof: bool,
}

impl<R: Source> Reader<R> {
    pub fn new(source: R, opts: ReaderOptions) -> CodecResult<Self> {
        Self::with_session(DecompressionSession::new()?, source, opts)
    }

    pub fn with_session(
        mut session: DecompressionSession,
        source: R,
        opts: ReaderOptions,
    ) -> CodecResult<Self> {
        if opts.dict.is_some() {
            session.use_dictionary(opts.dict);
        }
        session.begin_stream()?;

        Ok(Self {
            session,
            source,
            input: Bytes::new(),
            pos: 0,
            chunk_size: opts.chunk_size.map_or_else(engine::dstream_out_size, NonZeroUsize::get),
            refill_size: engine::dstream_in_size(),
            pending_output: false,
            in_frame: false,
            eof: false,
        })
    }

    /// Up to `requested` (default: the configured chunk size) decompressed bytes.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. A short read does not mean
    /// the end; keep calling until `None`.
    ///
    /// # Errors
    /// - `InvalidArgument` for a requested size of 0.
    /// - `DecompressionFailure` on engine error or when the read window cannot
    ///   be allocated.
    /// - `Io` when the source fails.
    pub fn read(&mut self, requested: Option<usize>) -> CodecResult<Option<Vec<u8>>> {
        if self.eof {
            return Ok(None);
        }
        let want = match requested {
            Some(n) => nonzero_size("read size", n)?.get(),
            None => self.chunk_size,
        };

        let mut out = Vec::new();
        out.try_reserve_exact(want).map_err(|e| {
            CodecError::decompression(format!("cannot allocate a {want}-byte read window: {e}"))
        })?;
        out.resize(want, 0);
        let mut filled = 0;
        while filled < want {
            if self.pos >= self.input.len() && !self.pending_output && !self.refill()? {
                break;
            }

            let consumed_before = self.pos;
            let filled_before = filled;
            let mut output = OutBuf::at(&mut out, filled);
            let mut input = InBuf { src: &self.input, pos: self.pos };
            let hint = self.session.stream_step(&mut output, &mut input)?;
            filled = output.pos;
            self.pos = input.pos;

            if hint == 0 {
                self.in_frame = false;
                self.eof = true;
                break;
            }
            self.in_frame = true;

            let progressed = filled != filled_before || self.pos != consumed_before;
            if !progressed && self.pos < self.input.len() {
                return Err(CodecError::decompression("decoder made no forward progress"));
            }
            self.pending_output = progressed && filled == want;
        }

        log::trace!("reader: produced {filled} of {want} bytes");
        if filled == 0 {
            self.eof = true;
            return Ok(None);
        }
        out.truncate(filled);
        Ok(Some(out))
    }

    /// Pull the next compressed chunk; false once the source is done.
    fn refill(&mut self) -> CodecResult<bool> {
        match self.source.read_chunk(self.refill_size)? {
            Some(chunk) if !chunk.is_empty() => {
                self.input = Bytes::from(chunk);
                self.pos = 0;
                Ok(true)
            }
            _ => {
                if self.in_frame {
                    log::warn!("reader: source ended inside a frame");
                }
                self.eof = true;
                Ok(false)
            }
        }
    }

    /// True once the frame is complete or the source has run dry.
    pub fn eof(&self) -> bool {
        self.eof
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    pub fn into_session(self) -> DecompressionSession {
        self.session
    }
}

impl<R: Source> io::Read for Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match Reader::read(self, Some(buf.len())).map_err(io::Error::from)? {
            Some(chunk) => {
                buf[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
            None => Ok(0),
        }
    }
}
