use codec_core::prelude::*;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use super::dict::PyCompressionDict;
use super::errors::{to_attr_err, to_py_err};
use super::shim::{self, CompressJob};
use super::{apply_kwargs, param_from_py, param_to_py};

/// Compression session. Parameters can be passed as keyword arguments and read
/// or written as attributes (`ctx.level = 19`).
#[pyclass(name = "CompressionContext", module = "rust_codec")]
pub struct PyCompressionContext {
    inner: CompressionSession,
}

#[pymethods]
impl PyCompressionContext {
    #[new]
    #[pyo3(signature = (**kwargs))]
    fn new(kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let mut inner = CompressionSession::new().map_err(to_py_err)?;
        apply_kwargs(kwargs, |name, value| inner.set_parameter(name, value))?;
        Ok(Self { inner })
    }

    // -------------------------------------------------------------------------
    // Parameters
    // -------------------------------------------------------------------------

    fn set_parameter(&mut self, name: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let value = param_from_py(name, value)?;
        self.inner.set_parameter(name, value).map_err(to_py_err)
    }

    fn get_parameter(&self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
        let value = self.inner.get_parameter(name).map_err(to_py_err)?;
        Ok(param_to_py(py, value))
    }

    fn __getattr__(&self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
        let value = self.inner.get_parameter(name).map_err(to_attr_err)?;
        Ok(param_to_py(py, value))
    }

    fn __setattr__(&mut self, name: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let value = param_from_py(name, value)?;
        self.inner.set_parameter(name, value).map_err(to_attr_err)
    }

    #[staticmethod]
    fn parameter_bounds(name: &str) -> PyResult<(i32, i32)> {
        let b = CompressionSession::parameter_bounds(name).map_err(to_py_err)?;
        Ok((b.min, b.max))
    }

    #[staticmethod]
    fn parameter_names() -> Vec<&'static str> {
        CompressionSession::parameter_names().map(|(name, _)| name).collect()
    }

    #[staticmethod]
    fn estimate_memory(level: i32) -> usize {
        CompressionSession::estimate_memory(level)
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    #[pyo3(signature = (mode = 3))]
    fn reset(&mut self, mode: i32) -> PyResult<()> {
        let mode = ResetMode::from_raw(mode).map_err(to_py_err)?;
        self.inner.reset(mode).map_err(to_py_err)
    }

    fn use_prefix(&mut self, prefix: &[u8]) {
        self.inner.use_prefix(prefix);
    }

    #[pyo3(signature = (dict = None))]
    fn use_dictionary(&mut self, dict: Option<PyRef<'_, PyCompressionDict>>) {
        self.inner.use_dictionary(dict.map(|d| d.inner.clone()));
    }

    // -------------------------------------------------------------------------
    // One-shot
    // -------------------------------------------------------------------------

    #[pyo3(signature = (data, level = None, dict = None, pledged_size = None))]
    fn compress(
        &mut self,
        py: Python<'_>,
        data: &[u8],
        level: Option<i32>,
        dict: Option<PyRef<'_, PyCompressionDict>>,
        pledged_size: Option<u64>,
    ) -> PyResult<Py<PyBytes>> {
        let job = CompressJob {
            data: data.to_vec(),
            opts: CompressOptions { level, dict: dict.map(|d| d.inner.clone()), pledged_size },
        };
        let session = &mut self.inner;
        shim::offload_bytes(py, job, move |job| job.run(session))
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.inner)
    }
}

/// Awaitable one-shot compression on the Tokio blocking pool.
#[pyfunction]
#[pyo3(signature = (data, level = None, dict = None, pledged_size = None))]
pub fn compress_async<'py>(
    py: Python<'py>,
    data: &[u8],
    level: Option<i32>,
    dict: Option<PyRef<'py, PyCompressionDict>>,
    pledged_size: Option<u64>,
) -> PyResult<Bound<'py, PyAny>> {
    let job = CompressJob {
        data: data.to_vec(),
        opts: CompressOptions { level, dict: dict.map(|d| d.inner.clone()), pledged_size },
    };
    shim::compress_async(py, job)
}
