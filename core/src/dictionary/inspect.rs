use crate::engine;
use crate::types::{CodecError, CodecResult};

/// Id stored in a dictionary blob; 0 when the bytes carry no header.
pub fn dictionary_id(dict: &[u8]) -> u32 {
    engine::dict_id_from_dict(dict)
}

/// Id a compressed frame says it needs; 0 when none was recorded.
pub fn dictionary_id_from_frame(frame: &[u8]) -> u32 {
    engine::dict_id_from_frame(frame)
}

/// Length of the entropy-table header in front of the dictionary content.
///
/// # Errors
/// - `InvalidDictionary` if the header cannot be parsed.
pub fn dictionary_header_size(dict: &[u8]) -> CodecResult<usize> {
    engine::dict_header_size(dict).map_err(|e| CodecError::InvalidDictionary {
        reason: format!("Failed to get dictionary header size: {e}"),
    })
}
