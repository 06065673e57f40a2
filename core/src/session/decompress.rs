use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::dictionary::DecompressionDictionary;
use crate::engine::{self, ContentSize, EngineError, InBuf, OutBuf, RawDCtx, ResetScope};
use crate::frames;
use crate::params::{self, Bounds, ParamKind, ParamValue};
use crate::types::{CodecError, CodecResult};

use super::{CapacityDefaults, ResetMode};

/// Per-call overrides for `DecompressionSession::decompress`.
#[derive(Debug, Clone, Default)]
pub struct DecompressOptions {
    pub dict: Option<DecompressionDictionary>,
    /// Starting size of the result buffer when the frame does not declare its size.
    pub initial_capacity: Option<NonZeroUsize>,
}

impl DecompressOptions {
    pub fn with_dict(mut self, dict: DecompressionDictionary) -> Self {
        self.dict = Some(dict);
        self
    }

    pub fn with_initial_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }
}

/// A decompression context plus its dictionary, prefix and capacity settings.
pub struct DecompressionSession {
    dctx: RawDCtx,
    dict: Option<DecompressionDictionary>,
    prefix: Option<Vec<u8>>,
    initial_capacity: Option<NonZeroUsize>,
    defaults: Arc<CapacityDefaults>,
}

impl DecompressionSession {
    /// New session that falls back to the process-wide capacity defaults.
    pub fn new() -> CodecResult<Self> {
        Self::with_defaults(CapacityDefaults::global())
    }

    /// New session reading its capacity fallback from `defaults`.
    pub fn with_defaults(defaults: Arc<CapacityDefaults>) -> CodecResult<Self> {
        let dctx = RawDCtx::create()
            .ok_or_else(|| CodecError::decompression("failed to allocate a decompression context"))?;
        Ok(Self { dctx, dict: None, prefix: None, initial_capacity: None, defaults })
    }

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
        params::bounds::<RawDCtx>(name)
    }

    pub fn parameter_names() -> impl Iterator<Item = (&'static str, ParamKind)> {
        params::catalog::<RawDCtx>()
    }

    pub fn canonical_parameter(name: &str) -> Option<&'static str> {
        params::canonical::<RawDCtx>(name)
    }

    pub fn set_parameter(&mut self, name: &str, value: impl Into<ParamValue>) -> CodecResult<()> {
        params::set(&mut self.dctx, name, value.into())
    }

    pub fn get_parameter(&self, name: &str) -> CodecResult<ParamValue> {
        params::get(&self.dctx, name)
    }

    pub fn estimate_memory() -> usize {
        engine::estimate_dctx_size()
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    pub fn initial_capacity(&self) -> Option<NonZeroUsize> {
        self.initial_capacity
    }

    pub fn set_initial_capacity(&mut self, capacity: Option<NonZeroUsize>) {
        self.initial_capacity = capacity;
    }

    pub fn capacity_defaults(&self) -> &Arc<CapacityDefaults> {
        &self.defaults
    }

    pub fn reset(&mut self, mode: ResetMode) -> CodecResult<()> {
        self.dctx
            .reset(mode.scope())
            .map_err(|e| CodecError::EngineRejected { name: "reset", reason: e.to_string() })?;
        if mode.clears_parameters() {
            self.dict = None;
            self.prefix = None;
        }
        log::debug!("decompression session reset ({mode:?})");
        Ok(())
    }

    /// Use `prefix` as the history the next frame was compressed against.
    pub fn use_prefix(&mut self, prefix: &[u8]) {
        self.prefix = Some(prefix.to_vec());
    }

    pub fn use_dictionary(&mut self, dict: Option<DecompressionDictionary>) {
        self.dict = dict;
    }

    pub fn dictionary(&self) -> Option<&DecompressionDictionary> {
        self.dict.as_ref()
    }

    // -------------------------------------------------------------------------
    // One-shot
    // -------------------------------------------------------------------------

    /// Decompress the first payload frame in `data`, skipping leading skippable frames.
    ///
    /// Frames that declare their size are decoded in one call into an exact
    /// buffer. Frames that don't are streamed into a buffer that doubles as needed.
    ///
    /// # Errors
    /// - `MalformedFrame` / `NoPayloadFrame` from the skippable-frame scan.
    /// - `InvalidFrame` when the frame header cannot be read.
    /// - `DecompressionFailure` on engine error, truncated input or a stalled decoder.
    pub fn decompress(&mut self, data: &[u8], opts: &DecompressOptions) -> CodecResult<Vec<u8>> {
        let offset = frames::payload_offset(data)?;
        let payload = &data[offset..];

        let declared = match engine::frame_content_size(payload) {
            ContentSize::Invalid => return Err(CodecError::InvalidFrame),
            other => other,
        };

        self.dctx.reset(ResetScope::Session).map_err(CodecError::decompression)?;
        let outcome = self
            .attach(opts.dict.as_ref())
            .map_err(CodecError::decompression)
            .and_then(|()| match declared {
                ContentSize::Known(size) => self.decompress_exact(payload, size),
                _ => {
                    let capacity = self.effective_initial_capacity(opts.initial_capacity);
                    self.decompress_adaptive(payload, capacity)
                }
            });
        let restored = self.end_call();
        let out = outcome?;
        restored?;
        Ok(out)
    }

    /// Starting buffer size for unknown-size frames:
    /// per-call -> session -> shared default -> engine suggestion.
    pub fn effective_initial_capacity(&self, per_call: Option<NonZeroUsize>) -> usize {
        per_call
            .or(self.initial_capacity)
            .or_else(|| self.defaults.initial_capacity())
            .map_or_else(engine::dstream_out_size, NonZeroUsize::get)
    }

    fn decompress_exact(&mut self, src: &[u8], declared: u64) -> CodecResult<Vec<u8>> {
        let len = usize::try_from(declared).map_err(|_| {
            CodecError::decompression(format!("declared content size {declared} does not fit in memory"))
        })?;
        let mut out = Vec::new();
        out.try_reserve_exact(len).map_err(|e| {
            CodecError::decompression(format!("cannot allocate {len} bytes: {e}"))
        })?;
        out.resize(len, 0);

        let written = self.dctx.decompress(&mut out, src).map_err(CodecError::decompression)?;
        out.truncate(written);
        Ok(out)
    }

    fn decompress_adaptive(&mut self, src: &[u8], initial_capacity: usize) -> CodecResult<Vec<u8>> {
        let chunk_len = engine::dstream_out_size();
        let mut scratch = vec![0u8; chunk_len];
        let mut capacity = initial_capacity;
        let mut result: Vec<u8> = Vec::new();
        result.try_reserve_exact(capacity).map_err(|e| {
            CodecError::decompression(format!("cannot allocate {capacity} bytes: {e}"))
        })?;
        let mut input = InBuf::new(src);

        loop {
            let consumed_before = input.pos;
            let (hint, produced) = {
                let mut output = OutBuf::new(&mut scratch);
                let hint = self
                    .dctx
                    .decompress_stream(&mut output, &mut input)
                    .map_err(CodecError::decompression)?;
                (hint, output.pos)
            };

            if produced > 0 {
                let needed = result.len() + produced;
                if needed > capacity {
                    while needed > capacity {
                        capacity = capacity.saturating_mul(2);
                    }
                    result.try_reserve_exact(capacity - result.len()).map_err(|e| {
                        CodecError::decompression(format!("cannot grow buffer to {capacity} bytes: {e}"))
                    })?;
                    log::trace!("adaptive decompress: grew buffer to {capacity} bytes");
                }
                result.extend_from_slice(&scratch[..produced]);
            }

            if input.is_consumed() {
                if hint == 0 {
                    break;
                }
                if produced < chunk_len {
                    return Err(CodecError::decompression("input ended inside a frame"));
                }
            } else if produced == 0 && input.pos == consumed_before {
                return Err(CodecError::decompression("decoder made no forward progress"));
            }
        }

        result.shrink_to_fit();
        Ok(result)
    }

    /// Reference `over`, else the sticky dictionary, else the pending prefix.
    #[allow(unsafe_code)]
    fn attach(&mut self, over: Option<&DecompressionDictionary>) -> Result<(), EngineError> {
        let dict = over.or(self.dict.as_ref());
        // SAFETY: the dictionary is kept alive by `over` (caller) or `self.dict`, and
        // the prefix by `self.prefix`; `end_call` re-points the engine before either
        // can be released.
        unsafe {
            match (dict, self.prefix.as_deref()) {
                (Some(d), _) => self.dctx.ref_ddict(Some(d.raw())),
                (None, Some(prefix)) => self.dctx.ref_prefix(prefix),
                (None, None) => self.dctx.ref_ddict(None),
            }
        }
    }

    #[allow(unsafe_code)]
    fn end_call(&mut self) -> CodecResult<()> {
        self.dctx.reset(ResetScope::Session).map_err(CodecError::decompression)?;
        // SAFETY: `self.dict` outlives the reference; a detach has no pointer.
        unsafe { self.dctx.ref_ddict(self.dict.as_ref().map(DecompressionDictionary::raw)) }
            .map_err(CodecError::decompression)?;
        self.prefix = None;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Streaming hooks (Reader)
    // -------------------------------------------------------------------------

    pub(crate) fn begin_stream(&mut self) -> CodecResult<()> {
        self.dctx.reset(ResetScope::Session).map_err(CodecError::decompression)?;
        self.attach(None).map_err(CodecError::decompression)
    }

    pub(crate) fn stream_step(
        &mut self,
        output: &mut OutBuf<'_>,
        input: &mut InBuf<'_>,
    ) -> CodecResult<usize> {
        self.dctx.decompress_stream(output, input).map_err(CodecError::decompression)
    }
}

impl std::fmt::Debug for DecompressionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecompressionSession")
            .field("dict", &self.dict)
            .field("initial_capacity", &self.initial_capacity)
            .finish_non_exhaustive()
    }
}
