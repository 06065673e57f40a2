use std::fmt;

/// Whether a parameter is a plain integer or a 0/1 switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Bool,
}

/// A parameter value as callers hand it in or read it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    /// Integer form used for the bounds check.
    ///
    /// Switches accept a native bool or any integer (non-zero means on).
    /// Integer parameters refuse bools.
    pub(crate) fn coerce(self, kind: ParamKind) -> Option<i64> {
        match (kind, self) {
            (ParamKind::Bool, ParamValue::Bool(b)) => Some(i64::from(b)),
            (ParamKind::Bool, ParamValue::Int(v)) => Some(i64::from(v != 0)),
            (ParamKind::Int, ParamValue::Int(v)) => Some(v),
            (ParamKind::Int, ParamValue::Bool(_)) => None,
        }
    }

    pub(crate) fn from_engine(kind: ParamKind, raw: i32) -> Self {
        match kind {
            ParamKind::Bool => ParamValue::Bool(raw != 0),
            ParamKind::Int => ParamValue::Int(i64::from(raw)),
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            ParamValue::Int(v) => v,
            ParamValue::Bool(b) => i64::from(b),
        }
    }

    pub fn as_bool(self) -> bool {
        self.as_i64() != 0
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}
