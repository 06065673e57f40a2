//! src/session/mod.rs
//!
//! Long-lived compression/decompression sessions.
//!
//! Design notes:
//! - A session owns exactly one engine context and never shadows its parameters;
//!   reads go straight to the engine.
//! - Dictionaries and prefixes are attached right before each codec call and the
//!   sticky state is restored afterwards, so a per-call override never leaks into
//!   the next call.
//! - Sessions are `Send` but not `Sync`: one operation at a time.

mod capacity;
mod compress;
mod decompress;

pub use capacity::CapacityDefaults;
pub use compress::{CompressOptions, CompressionSession};
pub use decompress::{DecompressOptions, DecompressionSession};

use num_enum::TryFromPrimitive;

use crate::engine::ResetScope;
use crate::types::{CodecError, CodecResult};

/// What `reset` returns to its initial state.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum ResetMode {
    /// Abandon the current frame; parameters and dictionary stay.
    Session = 1,
    /// Restore engine default parameters and detach dictionaries.
    Parameters = 2,
    Both = 3,
}

// Not `#[default]`: num_enum reads that attribute as the catch-all for unknown integers.
impl Default for ResetMode {
    fn default() -> Self {
        ResetMode::Both
    }
}

impl ResetMode {
    /// Decode the integer form hosts pass around (1, 2 or 3).
    pub fn from_raw(raw: i32) -> CodecResult<Self> {
        Self::try_from_primitive(raw).map_err(|_| CodecError::invalid(format!("Invalid reset mode {raw}")))
    }

    pub(crate) fn scope(self) -> ResetScope {
        match self {
            ResetMode::Session => ResetScope::Session,
            ResetMode::Parameters => ResetScope::Parameters,
            ResetMode::Both => ResetScope::Both,
        }
    }

    pub(crate) fn clears_parameters(self) -> bool {
        !matches!(self, ResetMode::Session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_mode_from_raw() {
        assert_eq!(ResetMode::from_raw(1).unwrap(), ResetMode::Session);
        assert_eq!(ResetMode::from_raw(3).unwrap(), ResetMode::Both);
        assert_eq!(ResetMode::default(), ResetMode::Both);
        let err = ResetMode::from_raw(4).unwrap_err();
        assert_eq!(err.to_string(), "Invalid reset mode 4");
    }
}
