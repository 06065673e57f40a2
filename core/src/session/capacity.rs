use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared fallback for the initial output capacity of unknown-size decompression.
///
/// `None` means unset; the engine's suggested chunk size is used then. A value is
/// meant to be configured at startup; it is read on every decompress call.
#[derive(Debug, Default)]
pub struct CapacityDefaults {
    // 0 encodes "unset"
    initial_capacity: AtomicUsize,
}

impl CapacityDefaults {
    pub const fn new() -> Self {
        Self { initial_capacity: AtomicUsize::new(0) }
    }

    /// Process-wide instance used by `DecompressionSession::new`.
    pub fn global() -> Arc<CapacityDefaults> {
        static GLOBAL: OnceLock<Arc<CapacityDefaults>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(CapacityDefaults::new())))
    }

    pub fn initial_capacity(&self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.initial_capacity.load(Ordering::Relaxed))
    }

    pub fn set_initial_capacity(&self, value: Option<NonZeroUsize>) {
        self.initial_capacity.store(value.map_or(0, NonZeroUsize::get), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_until_configured() {
        let d = CapacityDefaults::new();
        assert_eq!(d.initial_capacity(), None);
        d.set_initial_capacity(NonZeroUsize::new(4096));
        assert_eq!(d.initial_capacity().map(NonZeroUsize::get), Some(4096));
        d.set_initial_capacity(None);
        assert_eq!(d.initial_capacity(), None);
    }
}
