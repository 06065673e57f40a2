//! Python surface: classes, functions and exceptions of `rust_codec`.

mod cctx;
mod dctx;
mod dict;
mod errors;
mod frames;
mod shim;
mod stream;

use codec_core::params::ParamValue;
use codec_core::{CodecError, CodecResult};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict};
use pyo3::wrap_pyfunction;

use errors::to_py_err;

/// Host value to parameter value. `bool` is checked first: it is an `int` in Python.
pub(crate) fn param_from_py(name: &str, value: &Bound<'_, PyAny>) -> PyResult<ParamValue> {
    if value.is_instance_of::<PyBool>() {
        return Ok(ParamValue::Bool(value.extract()?));
    }
    value.extract::<i64>().map(ParamValue::Int).map_err(|_| {
        to_py_err(CodecError::invalid(format!(
            "{name} expects an int or bool (got {})",
            value.get_type().name().map_or_else(|_| "?".to_string(), |n| n.to_string())
        )))
    })
}

pub(crate) fn param_to_py(py: Python<'_>, value: ParamValue) -> PyObject {
    match value {
        ParamValue::Int(v) => v.into_py(py),
        ParamValue::Bool(b) => b.into_py(py),
    }
}

/// Apply `name=value` keyword arguments in order.
pub(crate) fn apply_kwargs<F>(kwargs: Option<&Bound<'_, PyDict>>, mut set: F) -> PyResult<()>
where
    F: FnMut(&str, ParamValue) -> CodecResult<()>,
{
    let Some(kwargs) = kwargs else {
        return Ok(());
    };
    for (key, value) in kwargs.iter() {
        let name: String = key.extract()?;
        let value = param_from_py(&name, &value)?;
        set(&name, value).map_err(to_py_err)?;
    }
    Ok(())
}

pub(crate) fn register(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    errors::register(py, m)?;

    m.add_class::<cctx::PyCompressionContext>()?;
    m.add_class::<dctx::PyDecompressionContext>()?;
    m.add_class::<dict::PyCompressionDict>()?;
    m.add_class::<dict::PyDecompressionDict>()?;
    m.add_class::<stream::PyCompressWriter>()?;
    m.add_class::<stream::PyDecompressReader>()?;

    // one-shot async
    m.add_function(wrap_pyfunction!(cctx::compress_async, m)?)?;
    m.add_function(wrap_pyfunction!(dctx::decompress_async, m)?)?;

    // dictionaries
    m.add_function(wrap_pyfunction!(dict::train_dictionary, m)?)?;
    m.add_function(wrap_pyfunction!(dict::train_cover_dictionary, m)?)?;
    m.add_function(wrap_pyfunction!(dict::train_fast_cover_dictionary, m)?)?;
    m.add_function(wrap_pyfunction!(dict::finalize_dictionary, m)?)?;
    m.add_function(wrap_pyfunction!(dict::dictionary_id, m)?)?;
    m.add_function(wrap_pyfunction!(dict::dictionary_id_from_frame, m)?)?;
    m.add_function(wrap_pyfunction!(dict::dictionary_header_size, m)?)?;

    // frames and introspection
    m.add_function(wrap_pyfunction!(frames::compress_bound, m)?)?;
    m.add_function(wrap_pyfunction!(frames::is_skippable_frame, m)?)?;
    m.add_function(wrap_pyfunction!(frames::write_skippable_frame, m)?)?;
    m.add_function(wrap_pyfunction!(frames::read_skippable_frame, m)?)?;
    m.add_function(wrap_pyfunction!(frames::find_frame_compressed_size, m)?)?;
    m.add_function(wrap_pyfunction!(frames::frame_content_size, m)?)?;
    m.add_function(wrap_pyfunction!(frames::version_number, m)?)?;
    m.add_function(wrap_pyfunction!(frames::version_string, m)?)?;
    m.add_function(wrap_pyfunction!(frames::min_level, m)?)?;
    m.add_function(wrap_pyfunction!(frames::max_level, m)?)?;
    m.add_function(wrap_pyfunction!(frames::default_level, m)?)?;
    m.add_function(wrap_pyfunction!(frames::stream_size_hints, m)?)?;

    m.add("DEFAULT_MAX_DICT_SIZE", codec_core::constants::DEFAULT_MAX_DICT_SIZE)?;
    log::debug!("rust_codec registered (engine {})", codec_core::info::version_string());
    Ok(())
}
