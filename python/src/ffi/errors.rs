//! Exception hierarchy and the `CodecError` -> Python exception mapping.

use codec_core::CodecError;
use pyo3::create_exception;
use pyo3::exceptions::{PyAttributeError, PyException, PyOSError, PyValueError};
use pyo3::prelude::*;

create_exception!(rust_codec, ZstdError, PyException, "Base class for codec failures.");
create_exception!(rust_codec, CompressionError, ZstdError);
create_exception!(rust_codec, DecompressionError, ZstdError);
create_exception!(rust_codec, FrameError, ZstdError, "Malformed, skippable-only or invalid frames.");
create_exception!(rust_codec, DictionaryError, ZstdError);
create_exception!(rust_codec, ParameterError, PyValueError, "Unknown parameters, bad values and bad arguments.");

pub(crate) fn to_py_err(err: CodecError) -> PyErr {
    let msg = err.to_string();
    match err {
        CodecError::UnknownParameter { .. }
        | CodecError::OutOfRange { .. }
        | CodecError::InvalidArgument(_) => ParameterError::new_err(msg),
        CodecError::EngineRejected { .. } | CodecError::EngineQueryFailure { .. } => {
            ZstdError::new_err(msg)
        }
        CodecError::CompressionFailure { .. } => CompressionError::new_err(msg),
        CodecError::DecompressionFailure { .. } => DecompressionError::new_err(msg),
        CodecError::MalformedFrame { .. }
        | CodecError::NotSkippableFrame
        | CodecError::NoPayloadFrame { .. }
        | CodecError::InvalidFrame => FrameError::new_err(msg),
        CodecError::DictionaryBuildFailure { .. }
        | CodecError::TrainingFailure { .. }
        | CodecError::InvalidDictionary { .. }
        | CodecError::EmptySampleSet => DictionaryError::new_err(msg),
        CodecError::Io(e) => PyOSError::new_err(e.to_string()),
    }
}

/// Attribute-style access: unknown names are `AttributeError`, everything else as usual.
pub(crate) fn to_attr_err(err: CodecError) -> PyErr {
    match err {
        CodecError::UnknownParameter { name } => {
            PyAttributeError::new_err(format!("no attribute or parameter named '{name}'"))
        }
        other => to_py_err(other),
    }
}

pub(crate) fn register(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("ZstdError", py.get_type_bound::<ZstdError>())?;
    m.add("CompressionError", py.get_type_bound::<CompressionError>())?;
    m.add("DecompressionError", py.get_type_bound::<DecompressionError>())?;
    m.add("FrameError", py.get_type_bound::<FrameError>())?;
    m.add("DictionaryError", py.get_type_bound::<DictionaryError>())?;
    m.add("ParameterError", py.get_type_bound::<ParameterError>())?;
    Ok(())
}
