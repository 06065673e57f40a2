use std::io;

use crate::constants::{param_names::COMPRESSION_LEVEL, DEFAULT_WRITER_LEVEL};
use crate::dictionary::CompressionDictionary;
use crate::engine::{self, EndOp, InBuf, OutBuf};
use crate::session::CompressionSession;
use crate::types::{CodecError, CodecResult};

use super::Sink;

/// Construction options for `Writer`.
#[derive(Debug, Clone, Default)]
pub struct WriterOptions {
    /// `None` means level 3 for `Writer::new`, and "keep the session's level"
    /// for `Writer::with_session`.
    pub level: Option<i32>,
    pub dict: Option<CompressionDictionary>,
    pub pledged_size: Option<u64>,
}

impl WriterOptions {
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_dict(mut self, dict: CompressionDictionary) -> Self {
        self.dict = Some(dict);
        self
    }

    pub fn with_pledged_size(mut self, size: u64) -> Self {
        self.pledged_size = Some(size);
        self
    }
}

/// Streaming compressor: `write`* -> `flush`? -> `finish`.
pub struct Writer<S: Sink> {
    session: CompressionSession,
    sink: S,
    scratch: Vec<u8>,
    finished: bool,
}

impl<S: Sink> Writer<S> {
    pub fn new(sink: S, opts: WriterOptions) -> CodecResult<Self> {
        let level = opts.level.unwrap_or(DEFAULT_WRITER_LEVEL);
        Self::with_session(CompressionSession::new()?, sink, opts.with_level(level))
    }

    /// Stream through an existing (possibly tuned) session.
    pub fn with_session(
        mut session: CompressionSession,
        sink: S,
        opts: WriterOptions,
    ) -> CodecResult<Self> {
        if let Some(level) = opts.level {
            session.set_parameter(COMPRESSION_LEVEL, level)?;
        }
        if opts.dict.is_some() {
            session.use_dictionary(opts.dict);
        }
        session.begin_stream(opts.pledged_size)?;

        Ok(Self {
            session,
            sink,
            scratch: vec![0u8; engine::cstream_out_size()],
            finished: false,
        })
    }

    fn ensure_open(&self) -> CodecResult<()> {
        if self.finished {
            return Err(CodecError::invalid("writer is already finished"));
        }
        Ok(())
    }

    /// Feed `data` to the engine; whatever it emits goes to the sink before returning.
    pub fn write(&mut self, data: &[u8]) -> CodecResult<usize> {
        self.ensure_open()?;
        let mut input = InBuf::new(data);
        while !input.is_consumed() {
            let consumed_before = input.pos;
            let mut output = OutBuf::new(&mut self.scratch);
            self.session.stream_step(&mut output, &mut input, EndOp::Continue)?;
            let produced = output.pos;
            if produced > 0 {
                self.sink.write_chunk(&self.scratch[..produced])?;
            } else if input.pos == consumed_before {
                return Err(CodecError::compression("encoder made no forward progress"));
            }
        }
        log::trace!("writer: consumed {} bytes", data.len());
        Ok(data.len())
    }

    /// Emit everything compressed so far; the frame stays open.
    pub fn flush(&mut self) -> CodecResult<()> {
        self.ensure_open()?;
        self.drain(EndOp::Flush)
    }

    /// Close the frame. Calling it again is a no-op.
    pub fn finish(&mut self) -> CodecResult<()> {
        if self.finished {
            return Ok(());
        }
        self.drain(EndOp::End)?;
        self.finished = true;
        self.session.end_stream()
    }

    pub fn close(&mut self) -> CodecResult<()> {
        self.finish()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn drain(&mut self, op: EndOp) -> CodecResult<()> {
        let mut input = InBuf::new(&[]);
        loop {
            let mut output = OutBuf::new(&mut self.scratch);
            let remaining = self.session.stream_step(&mut output, &mut input, op)?;
            let produced = output.pos;
            if produced > 0 {
                self.sink.write_chunk(&self.scratch[..produced])?;
            }
            if remaining == 0 {
                return Ok(());
            }
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give back the sink. Does not finish the frame.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Finish the frame and give back the sink.
    pub fn finish_into_inner(mut self) -> CodecResult<S> {
        self.finish()?;
        Ok(self.sink)
    }

    /// Give back the session for reuse; an unfinished frame is abandoned.
    pub fn into_session(self) -> CompressionSession {
        self.session
    }
}

impl<S: Sink> io::Write for Writer<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Writer::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Writer::flush(self).map_err(io::Error::from)
    }
}
