use codec_core::{frames, info};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use super::errors::to_py_err;

#[pyfunction]
pub fn compress_bound(size: usize) -> usize {
    frames::compress_bound(size)
}

#[pyfunction]
pub fn is_skippable_frame(data: &[u8]) -> bool {
    frames::is_skippable_frame(data)
}

#[pyfunction]
#[pyo3(signature = (payload, magic_variant = 0))]
pub fn write_skippable_frame(py: Python<'_>, payload: &[u8], magic_variant: u32) -> PyResult<Py<PyBytes>> {
    let frame = frames::write_skippable_frame(payload, magic_variant).map_err(to_py_err)?;
    Ok(PyBytes::new_bound(py, &frame).unbind())
}

/// `(payload, magic_variant)` of the skippable frame at the start of `data`.
#[pyfunction]
pub fn read_skippable_frame(py: Python<'_>, data: &[u8]) -> PyResult<(Py<PyBytes>, u32)> {
    let (payload, variant) = frames::read_skippable_frame(data).map_err(to_py_err)?;
    Ok((PyBytes::new_bound(py, &payload).unbind(), variant))
}

#[pyfunction]
pub fn find_frame_compressed_size(data: &[u8]) -> PyResult<usize> {
    frames::find_frame_compressed_size(data).map_err(to_py_err)
}

#[pyfunction]
pub fn frame_content_size(data: &[u8]) -> Option<u64> {
    frames::frame_content_size(data)
}

// -----------------------------------------------------------------------------
// Engine introspection
// -----------------------------------------------------------------------------

#[pyfunction]
pub fn version_number() -> u32 {
    info::version_number()
}

#[pyfunction]
pub fn version_string() -> &'static str {
    info::version_string()
}

#[pyfunction]
pub fn min_level() -> i32 {
    info::min_level()
}

#[pyfunction]
pub fn max_level() -> i32 {
    info::max_level()
}

#[pyfunction]
pub fn default_level() -> i32 {
    info::default_level()
}

/// `(compress_in, compress_out, decompress_in, decompress_out)` buffer size hints.
#[pyfunction]
pub fn stream_size_hints() -> (usize, usize, usize, usize) {
    (
        info::compression_input_size_hint(),
        info::compression_output_size_hint(),
        info::decompression_input_size_hint(),
        info::decompression_output_size_hint(),
    )
}
