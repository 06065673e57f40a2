//! src/params/mod.rs
//!
//! Parameter registry.
//!
//! Design notes:
//! - One descriptor table per engine direction; names and aliases resolve to a
//!   descriptor, the descriptor carries the engine identifier and the value kind.
//! - A single generic get/set/bounds path serves every parameter. Bounds come
//!   from the engine at call time, never from a hardcoded copy.
//! - A trailing `?` is accepted on switch names (`checksum?`) as a read alias.

mod table;
mod value;

pub use crate::engine::Bounds;
pub use value::{ParamKind, ParamValue};

use zstd_sys::{ZSTD_cParameter, ZSTD_dParameter};

use crate::engine::{EngineError, RawCCtx, RawDCtx};
use crate::types::{CodecError, CodecResult};
use table::{ParamDescriptor, COMPRESSION_PARAMS, DECOMPRESSION_PARAMS};

/// An engine context that exposes a parameter table.
pub(crate) trait ParamTarget {
    type Id: Copy + 'static;

    fn table() -> &'static [ParamDescriptor<Self::Id>];
    fn engine_bounds(id: Self::Id) -> Result<Bounds, EngineError>;
    fn engine_set(&mut self, id: Self::Id, value: i32) -> Result<(), EngineError>;
    fn engine_get(&self, id: Self::Id) -> Result<i32, EngineError>;
}

impl ParamTarget for RawCCtx {
    type Id = ZSTD_cParameter;

    fn table() -> &'static [ParamDescriptor<ZSTD_cParameter>] {
        &COMPRESSION_PARAMS
    }

    fn engine_bounds(id: ZSTD_cParameter) -> Result<Bounds, EngineError> {
        RawCCtx::bounds(id)
    }

    fn engine_set(&mut self, id: ZSTD_cParameter, value: i32) -> Result<(), EngineError> {
        self.set_parameter(id, value)
    }

    fn engine_get(&self, id: ZSTD_cParameter) -> Result<i32, EngineError> {
        self.get_parameter(id)
    }
}

impl ParamTarget for RawDCtx {
    type Id = ZSTD_dParameter;

    fn table() -> &'static [ParamDescriptor<ZSTD_dParameter>] {
        &DECOMPRESSION_PARAMS
    }

    fn engine_bounds(id: ZSTD_dParameter) -> Result<Bounds, EngineError> {
        RawDCtx::bounds(id)
    }

    fn engine_set(&mut self, id: ZSTD_dParameter, value: i32) -> Result<(), EngineError> {
        self.set_parameter(id, value)
    }

    fn engine_get(&self, id: ZSTD_dParameter) -> Result<i32, EngineError> {
        self.get_parameter(id)
    }
}

/// Name or alias (optionally with a trailing `?` for switches) to descriptor.
pub(crate) fn resolve<T: ParamTarget>(name: &str) -> CodecResult<&'static ParamDescriptor<T::Id>> {
    let (base, predicate) = match name.strip_suffix('?') {
        Some(base) => (base, true),
        None => (name, false),
    };
    T::table()
        .iter()
        .find(|d| d.name == base || d.aliases.contains(&base))
        .filter(|d| !predicate || d.kind == ParamKind::Bool)
        .ok_or_else(|| CodecError::UnknownParameter { name: name.to_string() })
}

fn bounds_of<T: ParamTarget>(desc: &ParamDescriptor<T::Id>) -> CodecResult<Bounds> {
    T::engine_bounds(desc.id).map_err(|e| CodecError::EngineQueryFailure {
        context: format!("Failed to get bounds for {}", desc.name),
        reason: e.to_string(),
    })
}

pub(crate) fn bounds<T: ParamTarget>(name: &str) -> CodecResult<Bounds> {
    bounds_of::<T>(resolve::<T>(name)?)
}

pub(crate) fn set<T: ParamTarget>(target: &mut T, name: &str, value: ParamValue) -> CodecResult<()> {
    let desc = resolve::<T>(name)?;
    let raw = value.coerce(desc.kind).ok_or_else(|| {
        CodecError::invalid(format!("{} expects an integer (got {value})", desc.name))
    })?;

    let range = bounds_of::<T>(desc)?;
    if !range.contains(raw) {
        return Err(CodecError::OutOfRange {
            name: desc.name,
            min: range.min,
            max: range.max,
            value: raw,
        });
    }

    // In range implies it fits in an i32.
    let raw = raw as i32;
    target
        .engine_set(desc.id, raw)
        .map_err(|e| CodecError::EngineRejected { name: desc.name, reason: e.to_string() })?;
    log::trace!("param {} = {}", desc.name, raw);
    Ok(())
}

pub(crate) fn get<T: ParamTarget>(target: &T, name: &str) -> CodecResult<ParamValue> {
    let desc = resolve::<T>(name)?;
    let raw = target.engine_get(desc.id).map_err(|e| CodecError::EngineQueryFailure {
        context: format!("Failed to get {}", desc.name),
        reason: e.to_string(),
    })?;
    Ok(ParamValue::from_engine(desc.kind, raw))
}

/// Canonical names with their kinds, in table order.
pub(crate) fn catalog<T: ParamTarget>() -> impl Iterator<Item = (&'static str, ParamKind)> {
    T::table().iter().map(|d| (d.name, d.kind))
}

/// Canonical name for `name` if it is registered.
pub(crate) fn canonical<T: ParamTarget>(name: &str) -> Option<&'static str> {
    resolve::<T>(name).ok().map(|d| d.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_entries() {
        assert_eq!(canonical::<RawCCtx>("level"), Some("compression_level"));
        assert_eq!(canonical::<RawCCtx>("checksum"), Some("checksum_flag"));
        assert_eq!(canonical::<RawCCtx>("checksum?"), Some("checksum_flag"));
        assert_eq!(canonical::<RawCCtx>("nb_workers"), Some("workers"));
        assert_eq!(canonical::<RawDCtx>("max_window_log"), Some("window_log_max"));
    }

    #[test]
    fn predicate_form_only_for_switches() {
        assert_eq!(canonical::<RawCCtx>("window_log?"), None);
        assert_eq!(canonical::<RawCCtx>("rsyncable?"), Some("rsyncable"));
    }

    #[test]
    fn tables_have_unique_names() {
        let mut seen = std::collections::HashSet::new();
        for d in COMPRESSION_PARAMS.iter() {
            assert!(seen.insert(d.name), "duplicate {}", d.name);
            for a in d.aliases {
                assert!(seen.insert(*a), "duplicate alias {a}");
            }
        }
    }

    #[test]
    fn unknown_name_reports_itself() {
        let err = bounds::<RawCCtx>("nope").unwrap_err();
        assert_eq!(err.to_string(), "Unknown parameter: nope");
    }
}
