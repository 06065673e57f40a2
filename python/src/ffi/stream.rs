//! Streaming writer/reader over Python file-like objects.
//!
//! These keep the GIL: every engine step may call back into the sink or source.

use std::io;
use std::num::NonZeroUsize;

use codec_core::prelude::*;
use codec_core::utils::nonzero_size;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use super::dict::{PyCompressionDict, PyDecompressionDict};
use super::errors::to_py_err;

fn require_method(obj: &Bound<'_, PyAny>, role: &str, method: &str) -> PyResult<()> {
    if obj.hasattr(method)? {
        Ok(())
    } else {
        Err(to_py_err(CodecError::invalid(format!("{role} must have a '{method}' method"))))
    }
}

/// Python object with `write(bytes)`. The first Python exception is kept so it
/// can be re-raised unchanged.
struct PySink {
    target: Py<PyAny>,
    failure: Option<PyErr>,
}

impl Sink for PySink {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        Python::with_gil(|py| {
            match self.target.call_method1(py, "write", (PyBytes::new_bound(py, chunk),)) {
                Ok(_) => Ok(()),
                Err(e) => {
                    let msg = e.to_string();
                    self.failure = Some(e);
                    Err(io::Error::other(msg))
                }
            }
        })
    }
}

/// Python object with `read(n)` returning bytes, or `None`/empty at the end.
struct PySource {
    source: Py<PyAny>,
    failure: Option<PyErr>,
}

impl PySource {
    fn pull(&self, py: Python<'_>, max_len: usize) -> PyResult<Option<Vec<u8>>> {
        let chunk = self.source.call_method1(py, "read", (max_len,))?;
        let chunk = chunk.bind(py);
        if chunk.is_none() {
            return Ok(None);
        }
        let bytes = match chunk.downcast::<PyBytes>() {
            Ok(b) => b.as_bytes().to_vec(),
            Err(_) => chunk.extract::<Vec<u8>>()?,
        };
        Ok((!bytes.is_empty()).then_some(bytes))
    }
}

impl Source for PySource {
    fn read_chunk(&mut self, max_len: usize) -> io::Result<Option<Vec<u8>>> {
        Python::with_gil(|py| {
            self.pull(py, max_len).map_err(|e| {
                let msg = e.to_string();
                self.failure = Some(e);
                io::Error::other(msg)
            })
        })
    }
}

// -----------------------------------------------------------------------------
// Writer
// -----------------------------------------------------------------------------

#[pyclass(name = "CompressWriter", module = "rust_codec")]
pub struct PyCompressWriter {
    writer: Writer<PySink>,
}

impl PyCompressWriter {
    fn raise(&mut self, err: CodecError) -> PyErr {
        self.writer.get_mut().failure.take().unwrap_or_else(|| to_py_err(err))
    }
}

#[pymethods]
impl PyCompressWriter {
    #[new]
    #[pyo3(signature = (sink, level = None, dict = None, pledged_size = None))]
    fn new(
        sink: &Bound<'_, PyAny>,
        level: Option<i32>,
        dict: Option<PyRef<'_, PyCompressionDict>>,
        pledged_size: Option<u64>,
    ) -> PyResult<Self> {
        require_method(sink, "sink", "write")?;
        let opts = WriterOptions { level, dict: dict.map(|d| d.inner.clone()), pledged_size };
        let sink = PySink { target: sink.clone().unbind(), failure: None };
        let writer = Writer::new(sink, opts).map_err(to_py_err)?;
        Ok(Self { writer })
    }

    fn write(&mut self, data: &[u8]) -> PyResult<usize> {
        self.writer.write(data).map_err(|e| self.raise(e))
    }

    fn flush(&mut self) -> PyResult<()> {
        self.writer.flush().map_err(|e| self.raise(e))
    }

    fn finish(&mut self) -> PyResult<()> {
        self.writer.finish().map_err(|e| self.raise(e))
    }

    fn close(&mut self) -> PyResult<()> {
        self.writer.close().map_err(|e| self.raise(e))
    }

    #[getter]
    fn finished(&self) -> bool {
        self.writer.is_finished()
    }

    fn __enter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    #[pyo3(signature = (exc_type = None, _exc_value = None, _traceback = None))]
    fn __exit__(
        &mut self,
        exc_type: Option<&Bound<'_, PyAny>>,
        _exc_value: Option<&Bound<'_, PyAny>>,
        _traceback: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<bool> {
        // an exception inside the block leaves the frame unfinished
        if exc_type.map_or(true, |t| t.is_none()) {
            self.finish()?;
        }
        Ok(false)
    }
}

// -----------------------------------------------------------------------------
// Reader
// -----------------------------------------------------------------------------

#[pyclass(name = "DecompressReader", module = "rust_codec")]
pub struct PyDecompressReader {
    reader: Reader<PySource>,
}

impl PyDecompressReader {
    fn raise(&mut self, err: CodecError) -> PyErr {
        self.reader.get_mut().failure.take().unwrap_or_else(|| to_py_err(err))
    }

    fn next_chunk(&mut self, py: Python<'_>, size: Option<usize>) -> PyResult<Option<Py<PyBytes>>> {
        let chunk = self.reader.read(size).map_err(|e| self.raise(e))?;
        Ok(chunk.map(|c| PyBytes::new_bound(py, &c).unbind()))
    }
}

#[pymethods]
impl PyDecompressReader {
    #[new]
    #[pyo3(signature = (source, dict = None, chunk_size = None))]
    fn new(
        source: &Bound<'_, PyAny>,
        dict: Option<PyRef<'_, PyDecompressionDict>>,
        chunk_size: Option<usize>,
    ) -> PyResult<Self> {
        require_method(source, "source", "read")?;
        let chunk_size: Option<NonZeroUsize> = chunk_size
            .map(|n| nonzero_size("initial_chunk_size", n))
            .transpose()
            .map_err(to_py_err)?;
        let opts = ReaderOptions { dict: dict.map(|d| d.inner.clone()), chunk_size };
        let source = PySource { source: source.clone().unbind(), failure: None };
        let reader = Reader::new(source, opts).map_err(to_py_err)?;
        Ok(Self { reader })
    }

    /// Up to `size` decompressed bytes; `None` once exhausted.
    #[pyo3(signature = (size = None))]
    fn read(&mut self, py: Python<'_>, size: Option<usize>) -> PyResult<Option<Py<PyBytes>>> {
        self.next_chunk(py, size)
    }

    #[getter]
    fn eof(&self) -> bool {
        self.reader.eof()
    }

    #[getter]
    fn chunk_size(&self) -> usize {
        self.reader.chunk_size()
    }

    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(&mut self, py: Python<'_>) -> PyResult<Option<Py<PyBytes>>> {
        self.next_chunk(py, None)
    }
}
