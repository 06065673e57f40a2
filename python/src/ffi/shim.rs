//! Off-thread execution.
//!
//! Arguments are copied into an owned job before the GIL is released; nothing
//! Python-owned is touched until the result is back on this side.

use codec_core::prelude::*;
use codec_core::CodecResult;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use super::errors::to_py_err;

/// Owned inputs of one one-shot compress call.
pub(crate) struct CompressJob {
    pub data: Vec<u8>,
    pub opts: CompressOptions,
}

impl CompressJob {
    pub fn run(self, session: &mut CompressionSession) -> CodecResult<Vec<u8>> {
        session.compress(&self.data, &self.opts)
    }
}

/// Owned inputs of one one-shot decompress call.
pub(crate) struct DecompressJob {
    pub data: Vec<u8>,
    pub opts: DecompressOptions,
}

impl DecompressJob {
    pub fn run(self, session: &mut DecompressionSession) -> CodecResult<Vec<u8>> {
        session.decompress(&self.data, &self.opts)
    }
}

/// Run `f(job)` with the GIL released.
pub(crate) fn offload<J, T, F>(py: Python<'_>, job: J, f: F) -> PyResult<T>
where
    J: Send,
    T: Send,
    F: FnOnce(J) -> CodecResult<T> + Send,
{
    py.allow_threads(move || f(job)).map_err(to_py_err)
}

/// Same as `offload`, returning the bytes as a Python `bytes` object.
pub(crate) fn offload_bytes<J, F>(py: Python<'_>, job: J, f: F) -> PyResult<Py<PyBytes>>
where
    J: Send,
    F: FnOnce(J) -> CodecResult<Vec<u8>> + Send,
{
    let out = offload(py, job, f)?;
    Ok(PyBytes::new_bound(py, &out).unbind())
}

// -----------------------------------------------------------------------------
// Async entry points (Tokio blocking pool)
// -----------------------------------------------------------------------------

async fn on_blocking_pool<F>(f: F) -> PyResult<Py<PyBytes>>
where
    F: FnOnce() -> CodecResult<Vec<u8>> + Send + 'static,
{
    let out = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PyRuntimeError::new_err(format!("codec task failed: {e}")))?
        .map_err(to_py_err)?;
    Ok(Python::with_gil(|py| PyBytes::new_bound(py, &out).unbind()))
}

/// Compress on a fresh session in the blocking pool; returns an awaitable.
pub(crate) fn compress_async<'py>(py: Python<'py>, job: CompressJob) -> PyResult<Bound<'py, PyAny>> {
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        on_blocking_pool(move || {
            let mut session = CompressionSession::new()?;
            job.run(&mut session)
        })
        .await
    })
}

/// Decompress on a fresh session in the blocking pool; returns an awaitable.
pub(crate) fn decompress_async<'py>(py: Python<'py>, job: DecompressJob) -> PyResult<Bound<'py, PyAny>> {
    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        on_blocking_pool(move || {
            let mut session = DecompressionSession::new()?;
            job.run(&mut session)
        })
        .await
    })
}
