//! src/frames.rs
//!
//! Frame-level helpers: sizes, boundaries and skippable metadata frames.
//!
//! Skippable frame layout (little endian):
//!
//! ```text
//! [ magic 0x184D2A50 + variant : u32 ][ payload length : u32 ][ payload ]
//! ```

use crate::constants::{
    MAX_SKIPPABLE_VARIANT, SKIPPABLE_HEADER_LEN, SKIPPABLE_MAGIC_MASK, SKIPPABLE_MAGIC_START,
};
use crate::engine::{self, ContentSize};
use crate::types::{CodecError, CodecResult};

/// Worst-case compressed size for `size` input bytes.
pub fn compress_bound(size: usize) -> usize {
    zstd_safe::compress_bound(size)
}

fn read_u32_le(bytes: &[u8], at: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    Some(u32::from_le_bytes(raw))
}

/// True when `data` starts with a skippable-frame magic number.
pub fn is_skippable_frame(data: &[u8]) -> bool {
    read_u32_le(data, 0).is_some_and(|magic| magic & SKIPPABLE_MAGIC_MASK == SKIPPABLE_MAGIC_START)
}

/// Wrap `payload` into a skippable frame tagged with `magic_variant` (0..=15).
///
/// # Errors
/// - `InvalidArgument` if the variant is above 15 or the payload exceeds `u32::MAX` bytes.
pub fn write_skippable_frame(payload: &[u8], magic_variant: u32) -> CodecResult<Vec<u8>> {
    if magic_variant > MAX_SKIPPABLE_VARIANT {
        return Err(CodecError::invalid(format!(
            "magic_number {magic_variant} out of bounds (valid: 0-{MAX_SKIPPABLE_VARIANT})"
        )));
    }
    let len = u32::try_from(payload.len()).map_err(|_| {
        CodecError::invalid(format!("skippable payload of {} bytes is too large", payload.len()))
    })?;

    let mut out = Vec::with_capacity(SKIPPABLE_HEADER_LEN + payload.len());
    out.extend_from_slice(&(SKIPPABLE_MAGIC_START + magic_variant).to_le_bytes());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Split a skippable frame at the start of `data` into `(payload, magic_variant)`.
/// Bytes after the frame are ignored.
///
/// # Errors
/// - `NotSkippableFrame` when the magic does not match.
/// - `MalformedFrame` when the header is short or the declared length overruns `data`.
pub fn read_skippable_frame(data: &[u8]) -> CodecResult<(Vec<u8>, u32)> {
    if !is_skippable_frame(data) {
        return Err(CodecError::NotSkippableFrame);
    }
    let (Some(magic), Some(declared)) = (read_u32_le(data, 0), read_u32_le(data, 4)) else {
        return Err(CodecError::malformed("skippable frame too small"));
    };

    let declared = declared as usize;
    let end = SKIPPABLE_HEADER_LEN
        .checked_add(declared)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            CodecError::malformed(format!(
                "skippable frame declares {declared} bytes but only {} follow the header",
                data.len() - SKIPPABLE_HEADER_LEN
            ))
        })?;

    Ok((data[SKIPPABLE_HEADER_LEN..end].to_vec(), magic - SKIPPABLE_MAGIC_START))
}

/// Length of the first complete frame (compressed or skippable) in `data`.
///
/// # Errors
/// - `MalformedFrame` on truncated or invalid input.
pub fn find_frame_compressed_size(data: &[u8]) -> CodecResult<usize> {
    zstd_safe::find_frame_compressed_size(data)
        .map_err(|code| CodecError::malformed(zstd_safe::get_error_name(code)))
}

/// Declared decompressed size of the frame at the start of `data`.
/// `None` when the size was not recorded or the header is invalid.
pub fn frame_content_size(data: &[u8]) -> Option<u64> {
    match engine::frame_content_size(data) {
        ContentSize::Known(n) => Some(n),
        ContentSize::Unknown | ContentSize::Invalid => None,
    }
}

/// Offset of the first non-skippable frame in `data`.
pub(crate) fn payload_offset(data: &[u8]) -> CodecResult<usize> {
    let mut offset = 0;
    while offset < data.len() && is_skippable_frame(&data[offset..]) {
        let len = zstd_safe::find_frame_compressed_size(&data[offset..]).map_err(|code| {
            CodecError::malformed(format!(
                "Invalid skippable frame at offset {offset}: {}",
                zstd_safe::get_error_name(code)
            ))
        })?;
        offset += len;
    }
    if offset >= data.len() {
        return Err(CodecError::NoPayloadFrame { len: data.len() });
    }
    Ok(offset)
}
