use codec_core::constants::DEFAULT_MAX_DICT_SIZE;
use codec_core::dictionary::{
    self, CompressionDictionary, CoverParams, DecompressionDictionary, FastCoverParams,
    FinalizeParams,
};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use super::shim;

/// Digested compression dictionary; immutable and shareable between contexts.
#[pyclass(name = "CompressionDict", module = "rust_codec", frozen)]
pub struct PyCompressionDict {
    pub(crate) inner: CompressionDictionary,
}

#[pymethods]
impl PyCompressionDict {
    #[new]
    #[pyo3(signature = (data, level = None))]
    fn new(py: Python<'_>, data: &[u8], level: Option<i32>) -> PyResult<Self> {
        let inner = shim::offload(py, data.to_vec(), move |content| {
            CompressionDictionary::new(&content, level)
        })?;
        Ok(Self { inner })
    }

    #[getter]
    fn level(&self) -> i32 {
        self.inner.level()
    }

    #[getter]
    fn size(&self) -> usize {
        self.inner.size()
    }

    #[getter]
    fn dict_id(&self) -> u32 {
        self.inner.dict_id()
    }

    #[staticmethod]
    fn estimate_memory(dict_size: usize, level: i32) -> usize {
        CompressionDictionary::estimate_memory(dict_size, level)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.inner)
    }
}

#[pyclass(name = "DecompressionDict", module = "rust_codec", frozen)]
pub struct PyDecompressionDict {
    pub(crate) inner: DecompressionDictionary,
}

#[pymethods]
impl PyDecompressionDict {
    #[new]
    fn new(py: Python<'_>, data: &[u8]) -> PyResult<Self> {
        let inner = shim::offload(py, data.to_vec(), |content| DecompressionDictionary::new(&content))?;
        Ok(Self { inner })
    }

    #[getter]
    fn size(&self) -> usize {
        self.inner.size()
    }

    #[getter]
    fn dict_id(&self) -> u32 {
        self.inner.dict_id()
    }

    #[staticmethod]
    fn estimate_memory(dict_size: usize) -> usize {
        DecompressionDictionary::estimate_memory(dict_size)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.inner)
    }
}

// -----------------------------------------------------------------------------
// Training
// -----------------------------------------------------------------------------

#[pyfunction]
#[pyo3(signature = (samples, max_dict_size = DEFAULT_MAX_DICT_SIZE))]
pub fn train_dictionary(py: Python<'_>, samples: Vec<Vec<u8>>, max_dict_size: usize) -> PyResult<Py<PyBytes>> {
    shim::offload_bytes(py, samples, |samples| dictionary::train(&samples, max_dict_size))
}

#[pyfunction]
#[pyo3(signature = (
    samples,
    max_dict_size = DEFAULT_MAX_DICT_SIZE,
    k = 0,
    d = 0,
    steps = 0,
    split_point = 1.0,
    shrink_dict = false,
    shrink_dict_max_regression = 0,
    nb_threads = 1,
))]
#[allow(clippy::too_many_arguments)]
pub fn train_cover_dictionary(
    py: Python<'_>,
    samples: Vec<Vec<u8>>,
    max_dict_size: usize,
    k: u32,
    d: u32,
    steps: u32,
    split_point: f64,
    shrink_dict: bool,
    shrink_dict_max_regression: u32,
    nb_threads: u32,
) -> PyResult<Py<PyBytes>> {
    let params = CoverParams {
        max_dict_size,
        k,
        d,
        steps,
        split_point,
        shrink_dict,
        shrink_dict_max_regression,
        nb_threads,
    };
    shim::offload_bytes(py, samples, move |samples| dictionary::train_cover(&samples, &params))
}

#[pyfunction]
#[pyo3(signature = (
    samples,
    max_dict_size = DEFAULT_MAX_DICT_SIZE,
    k = 0,
    d = 0,
    f = 0,
    steps = 0,
    split_point = 1.0,
    accel = 0,
    shrink_dict = false,
    shrink_dict_max_regression = 0,
    nb_threads = 1,
))]
#[allow(clippy::too_many_arguments)]
pub fn train_fast_cover_dictionary(
    py: Python<'_>,
    samples: Vec<Vec<u8>>,
    max_dict_size: usize,
    k: u32,
    d: u32,
    f: u32,
    steps: u32,
    split_point: f64,
    accel: u32,
    shrink_dict: bool,
    shrink_dict_max_regression: u32,
    nb_threads: u32,
) -> PyResult<Py<PyBytes>> {
    let params = FastCoverParams {
        max_dict_size,
        k,
        d,
        f,
        steps,
        split_point,
        accel,
        shrink_dict,
        shrink_dict_max_regression,
        nb_threads,
    };
    shim::offload_bytes(py, samples, move |samples| dictionary::train_fast_cover(&samples, &params))
}

#[pyfunction]
#[pyo3(signature = (content, samples, max_size, level = 0, dict_id = 0))]
pub fn finalize_dictionary(
    py: Python<'_>,
    content: &[u8],
    samples: Vec<Vec<u8>>,
    max_size: usize,
    level: i32,
    dict_id: u32,
) -> PyResult<Py<PyBytes>> {
    let params = FinalizeParams::new(max_size).with_level(level).with_dict_id(dict_id);
    shim::offload_bytes(py, (content.to_vec(), samples), move |(content, samples)| {
        dictionary::finalize_dictionary(&content, &samples, &params)
    })
}

#[pyfunction]
pub fn dictionary_id(data: &[u8]) -> u32 {
    dictionary::dictionary_id(data)
}

#[pyfunction]
pub fn dictionary_id_from_frame(data: &[u8]) -> u32 {
    dictionary::dictionary_id_from_frame(data)
}

#[pyfunction]
pub fn dictionary_header_size(data: &[u8]) -> PyResult<usize> {
    dictionary::dictionary_header_size(data).map_err(super::errors::to_py_err)
}
