use crate::constants::param_names::COMPRESSION_LEVEL;
use crate::dictionary::CompressionDictionary;
use crate::engine::{self, EndOp, EngineError, InBuf, OutBuf, RawCCtx, ResetScope};
use crate::params::{self, Bounds, ParamKind, ParamValue};
use crate::types::{CodecError, CodecResult};

use super::ResetMode;

/// Per-call overrides for `CompressionSession::compress`.
#[derive(Debug, Clone, Default)]
pub struct CompressOptions {
    /// Level for this call only; the session's level is restored afterwards.
    pub level: Option<i32>,
    /// Dictionary for this call only; takes precedence over a pending prefix.
    pub dict: Option<CompressionDictionary>,
    pub pledged_size: Option<u64>,
}

impl CompressOptions {
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

/// A compression context plus the dictionary/prefix it should use.
pub struct CompressionSession {
    cctx: RawCCtx,
    dict: Option<CompressionDictionary>,
    prefix: Option<Vec<u8>>,
}

impl CompressionSession {
    pub fn new() -> CodecResult<Self> {
        let cctx = RawCCtx::create()
            .ok_or_else(|| CodecError::compression("failed to allocate a compression context"))?;
        Ok(Self { cctx, dict: None, prefix: None })
    }

    /// New session with `params` applied in order; stops at the first failure.
    pub fn with_params<'a, I, V>(params: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Into<ParamValue>,
    {
        let mut session = Self::new()?;
        for (name, value) in params {
            session.set_parameter(name, value)?;
        }
        Ok(session)
    }

    // -------------------------------------------------------------------------
    // Parameters
    // -------------------------------------------------------------------------

    pub fn parameter_bounds(name: &str) -> CodecResult<Bounds> {
        params::bounds::<RawCCtx>(name)
    }

    pub fn parameter_names() -> impl Iterator<Item = (&'static str, ParamKind)> {
        params::catalog::<RawCCtx>()
    }

    pub fn canonical_parameter(name: &str) -> Option<&'static str> {
        params::canonical::<RawCCtx>(name)
    }

    pub fn set_parameter(&mut self, name: &str, value: impl Into<ParamValue>) -> CodecResult<()> {
        params::set(&mut self.cctx, name, value.into())
    }

    pub fn get_parameter(&self, name: &str) -> CodecResult<ParamValue> {
        params::get(&self.cctx, name)
    }

    pub fn level(&self) -> CodecResult<i32> {
        self.cctx.get_parameter(zstd_sys::ZSTD_cParameter::ZSTD_c_compressionLevel).map_err(|e| {
            CodecError::EngineQueryFailure {
                context: format!("Failed to get {COMPRESSION_LEVEL}"),
                reason: e.to_string(),
            }
        })
    }

    /// Memory a context would need for `level`.
    pub fn estimate_memory(level: i32) -> usize {
        engine::estimate_cctx_size(level)
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    pub fn reset(&mut self, mode: ResetMode) -> CodecResult<()> {
        self.cctx
            .reset(mode.scope())
            .map_err(|e| CodecError::EngineRejected { name: "reset", reason: e.to_string() })?;
        if mode.clears_parameters() {
            self.dict = None;
            self.prefix = None;
        }
        log::debug!("compression session reset ({mode:?})");
        Ok(())
    }

    /// Use `prefix` as raw history for the next frame only.
    pub fn use_prefix(&mut self, prefix: &[u8]) {
        self.prefix = Some(prefix.to_vec());
    }

    /// Attach (or detach with `None`) a dictionary for every following frame.
    pub fn use_dictionary(&mut self, dict: Option<CompressionDictionary>) {
        self.dict = dict;
    }

    pub fn dictionary(&self) -> Option<&CompressionDictionary> {
        self.dict.as_ref()
    }

    // -------------------------------------------------------------------------
    // One-shot
    // -------------------------------------------------------------------------

    /// Compress `data` into a single complete frame.
    ///
    /// # Errors
    /// - `CompressionFailure` with the engine diagnostic on any engine error.
    pub fn compress(&mut self, data: &[u8], opts: &CompressOptions) -> CodecResult<Vec<u8>> {
        self.cctx.reset(ResetScope::Session).map_err(CodecError::compression)?;

        let saved_level = match opts.level {
            Some(level) => {
                let previous = self
                    .cctx
                    .get_parameter(zstd_sys::ZSTD_cParameter::ZSTD_c_compressionLevel)
                    .map_err(CodecError::compression)?;
                self.cctx
                    .set_parameter(zstd_sys::ZSTD_cParameter::ZSTD_c_compressionLevel, level)
                    .map_err(CodecError::compression)?;
                Some(previous)
            }
            None => None,
        };

        let outcome = self.compress_frame(data, opts);
        let restored = self.end_call(saved_level);
        let frame = outcome?;
        restored?;
        Ok(frame)
    }

    fn compress_frame(&mut self, data: &[u8], opts: &CompressOptions) -> CodecResult<Vec<u8>> {
        self.attach(opts.dict.as_ref()).map_err(CodecError::compression)?;
        if let Some(size) = opts.pledged_size {
            self.cctx.set_pledged_src_size(Some(size)).map_err(|e| {
                CodecError::compression(format!("Failed to set pledged_size {size}: {e}"))
            })?;
        }

        let mut out = vec![0u8; zstd_safe::compress_bound(data.len())];
        let mut output = OutBuf::new(&mut out);
        let mut input = InBuf::new(data);
        loop {
            let remaining = self
                .cctx
                .compress_stream(&mut output, &mut input, EndOp::End)
                .map_err(CodecError::compression)?;
            if remaining == 0 {
                break;
            }
            if output.is_full() {
                return Err(CodecError::compression("output exceeded the compress bound"));
            }
        }

        let written = output.pos;
        out.truncate(written);
        log::trace!("compressed {} -> {} bytes", data.len(), written);
        Ok(out)
    }

    /// Reference the dictionary for the next frame: `over`, else the sticky one,
    /// else the pending prefix, else nothing.
    #[allow(unsafe_code)]
    fn attach(&mut self, over: Option<&CompressionDictionary>) -> Result<(), EngineError> {
        let dict = over.or(self.dict.as_ref());
        // SAFETY: the dictionary is kept alive by `over` (caller) or `self.dict`, and
        // the prefix by `self.prefix`; `end_call` re-points the engine before either
        // can be released.
        unsafe {
            match (dict, self.prefix.as_deref()) {
                (Some(d), _) => self.cctx.ref_cdict(Some(d.raw())),
                (None, Some(prefix)) => self.cctx.ref_prefix(prefix),
                (None, None) => self.cctx.ref_cdict(None),
            }
        }
    }

    /// Put the context back into its between-calls state on every exit path.
    #[allow(unsafe_code)]
    fn end_call(&mut self, saved_level: Option<i32>) -> CodecResult<()> {
        self.prefix = None;
        self.cctx.reset(ResetScope::Session).map_err(CodecError::compression)?;
        // SAFETY: `self.dict` outlives the reference; a detach has no pointer.
        unsafe { self.cctx.ref_cdict(self.dict.as_ref().map(CompressionDictionary::raw)) }
            .map_err(CodecError::compression)?;
        if let Some(level) = saved_level {
            self.cctx
                .set_parameter(zstd_sys::ZSTD_cParameter::ZSTD_c_compressionLevel, level)
                .map_err(CodecError::compression)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Streaming hooks (Writer)
    // -------------------------------------------------------------------------

    /// Start a fresh frame with the sticky dictionary (or pending prefix) attached.
    pub(crate) fn begin_stream(&mut self, pledged_size: Option<u64>) -> CodecResult<()> {
        self.cctx.reset(ResetScope::Session).map_err(CodecError::compression)?;
        self.cctx.set_pledged_src_size(pledged_size).map_err(|e| {
            CodecError::compression(format!("Failed to set pledged_size {pledged_size:?}: {e}"))
        })?;
        self.attach(None).map_err(CodecError::compression)
    }

    pub(crate) fn stream_step(
        &mut self,
        output: &mut OutBuf<'_>,
        input: &mut InBuf<'_>,
        op: EndOp,
    ) -> CodecResult<usize> {
        self.cctx.compress_stream(output, input, op).map_err(CodecError::compression)
    }

    /// The frame is closed; the prefix it used can go.
    pub(crate) fn end_stream(&mut self) -> CodecResult<()> {
        self.end_call(None)
    }
}

impl std::fmt::Debug for CompressionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressionSession")
            .field("dict", &self.dict)
            .field("prefix_len", &self.prefix.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}
