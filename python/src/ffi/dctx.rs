use codec_core::constants::param_names::WINDOW_LOG_MAX;
use codec_core::frames;
use codec_core::prelude::*;
use codec_core::utils::nonzero_size;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};

use super::dict::PyDecompressionDict;
use super::errors::{to_attr_err, to_py_err};
use super::shim::{self, DecompressJob};
use super::{apply_kwargs, param_from_py, param_to_py};

const INITIAL_CAPACITY: &str = "initial_capacity";

fn capacity_from_py(value: Option<usize>) -> PyResult<Option<std::num::NonZeroUsize>> {
    value.map(|n| nonzero_size(INITIAL_CAPACITY, n)).transpose().map_err(to_py_err)
}

/// Decompression session. `window_log_max` and `initial_capacity` are accepted as
/// keyword arguments and attributes. Reading `initial_capacity` reports the size
/// the next unknown-size decompress starts from, falling back to the class default.
#[pyclass(name = "DecompressionContext", module = "rust_codec")]
pub struct PyDecompressionContext {
    inner: DecompressionSession,
}

#[pymethods]
impl PyDecompressionContext {
    #[new]
    #[pyo3(signature = (initial_capacity = None, **kwargs))]
    fn new(initial_capacity: Option<usize>, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let mut inner = DecompressionSession::new().map_err(to_py_err)?;
        inner.set_initial_capacity(capacity_from_py(initial_capacity)?);
        apply_kwargs(kwargs, |name, value| inner.set_parameter(name, value))?;
        Ok(Self { inner })
    }

    fn set_parameter(&mut self, name: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let value = param_from_py(name, value)?;
        self.inner.set_parameter(name, value).map_err(to_py_err)
    }

    fn get_parameter(&self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
        let value = self.inner.get_parameter(name).map_err(to_py_err)?;
        Ok(param_to_py(py, value))
    }

    fn __getattr__(&self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
        if name == INITIAL_CAPACITY {
            return Ok(self.inner.effective_initial_capacity(None).into_py(py));
        }
        let value = self.inner.get_parameter(name).map_err(to_attr_err)?;
        Ok(param_to_py(py, value))
    }

    fn __setattr__(&mut self, name: &str, value: &Bound<'_, PyAny>) -> PyResult<()> {
        if name == INITIAL_CAPACITY {
            let capacity = capacity_from_py(value.extract::<Option<usize>>()?)?;
            self.inner.set_initial_capacity(capacity);
            return Ok(());
        }
        let value = param_from_py(name, value)?;
        self.inner.set_parameter(name, value).map_err(to_attr_err)
    }

    #[staticmethod]
    fn parameter_bounds(name: &str) -> PyResult<(i32, i32)> {
        let b = DecompressionSession::parameter_bounds(name).map_err(to_py_err)?;
        Ok((b.min, b.max))
    }

    #[staticmethod]
    fn parameter_names() -> Vec<&'static str> {
        DecompressionSession::parameter_names().map(|(name, _)| name).collect()
    }

    #[staticmethod]
    fn estimate_memory() -> usize {
        DecompressionSession::estimate_memory()
    }

    /// Process-wide fallback used when neither the call nor the context sets one.
    #[staticmethod]
    fn default_initial_capacity() -> Option<usize> {
        CapacityDefaults::global().initial_capacity().map(|n| n.get())
    }

    #[staticmethod]
    #[pyo3(signature = (value = None))]
    fn set_default_initial_capacity(value: Option<usize>) -> PyResult<()> {
        CapacityDefaults::global().set_initial_capacity(capacity_from_py(value)?);
        Ok(())
    }

    #[staticmethod]
    fn frame_content_size(data: &[u8]) -> Option<u64> {
        frames::frame_content_size(data)
    }

    #[pyo3(signature = (mode = 3))]
    fn reset(&mut self, mode: i32) -> PyResult<()> {
        let mode = ResetMode::from_raw(mode).map_err(to_py_err)?;
        self.inner.reset(mode).map_err(to_py_err)
    }

    fn use_prefix(&mut self, prefix: &[u8]) {
        self.inner.use_prefix(prefix);
    }

    #[pyo3(signature = (dict = None))]
    fn use_dictionary(&mut self, dict: Option<PyRef<'_, PyDecompressionDict>>) {
        self.inner.use_dictionary(dict.map(|d| d.inner.clone()));
    }

    #[pyo3(signature = (data, dict = None, initial_capacity = None))]
    fn decompress(
        &mut self,
        py: Python<'_>,
        data: &[u8],
        dict: Option<PyRef<'_, PyDecompressionDict>>,
        initial_capacity: Option<usize>,
    ) -> PyResult<Py<PyBytes>> {
        let job = DecompressJob {
            data: data.to_vec(),
            opts: DecompressOptions {
                dict: dict.map(|d| d.inner.clone()),
                initial_capacity: capacity_from_py(initial_capacity)?,
            },
        };
        let session = &mut self.inner;
        shim::offload_bytes(py, job, move |job| job.run(session))
    }

    fn __repr__(&self) -> String {
        let window = self
            .inner
            .get_parameter(WINDOW_LOG_MAX)
            .map_or_else(|_| "?".to_string(), |v| v.to_string());
        format!("DecompressionContext(window_log_max={window}, {:?})", self.inner)
    }
}

/// Awaitable one-shot decompression on the Tokio blocking pool.
#[pyfunction]
#[pyo3(signature = (data, dict = None, initial_capacity = None))]
pub fn decompress_async<'py>(
    py: Python<'py>,
    data: &[u8],
    dict: Option<PyRef<'py, PyDecompressionDict>>,
    initial_capacity: Option<usize>,
) -> PyResult<Bound<'py, PyAny>> {
    let job = DecompressJob {
        data: data.to_vec(),
        opts: DecompressOptions {
            dict: dict.map(|d| d.inner.clone()),
            initial_capacity: capacity_from_py(initial_capacity)?,
        },
    };
    shim::decompress_async(py, job)
}
