/// Default capacity handed to the trainers when the caller gives none (110 KiB).
pub const DEFAULT_MAX_DICT_SIZE: usize = 112_640;

/// Compression level a `Writer` starts with unless told otherwise.
pub const DEFAULT_WRITER_LEVEL: i32 = 3;

/// Skippable frames occupy the magic range `0x184D2A50..=0x184D2A5F`.
pub const SKIPPABLE_MAGIC_START: u32 = 0x184D_2A50;
pub const SKIPPABLE_MAGIC_MASK: u32 = 0xFFFF_FFF0;
/// Highest variant that fits in the low nibble of the magic.
pub const MAX_SKIPPABLE_VARIANT: u32 = 15;
/// Magic (4 bytes, LE) + payload length (4 bytes, LE).
pub const SKIPPABLE_HEADER_LEN: usize = 8;

/// Parameter names the Writer/one-shot paths address directly.
pub mod param_names {
    pub const COMPRESSION_LEVEL: &str = "compression_level";
    pub const WINDOW_LOG_MAX: &str = "window_log_max";
}
