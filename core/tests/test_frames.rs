mod common;

#[cfg(test)]
mod tests {
    use codec_core::constants::{MAX_SKIPPABLE_VARIANT, SKIPPABLE_HEADER_LEN};
    use codec_core::frames::{
        compress_bound, find_frame_compressed_size, frame_content_size, is_skippable_frame,
        read_skippable_frame, write_skippable_frame,
    };
    use codec_core::info::{self, MemoryEstimate};
    use codec_core::prelude::*;

    use crate::common::corpus;

    // -------------------------------------------------------------------------
    // Skippable frames
    // -------------------------------------------------------------------------

    #[test]
    fn skippable_frame_roundtrip_all_variants() {
        for variant in 0..=MAX_SKIPPABLE_VARIANT {
            let payload = format!("variant {variant}").into_bytes();
            let frame = write_skippable_frame(&payload, variant).unwrap();
            assert_eq!(frame.len(), SKIPPABLE_HEADER_LEN + payload.len());
            assert!(is_skippable_frame(&frame));
            assert_eq!(read_skippable_frame(&frame).unwrap(), (payload, variant));
            assert_eq!(find_frame_compressed_size(&frame).unwrap(), frame.len());
        }
    }

    #[test]
    fn variant_above_fifteen_is_rejected() {
        let err = write_skippable_frame(b"x", 16).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "magic_number 16 out of bounds (valid: 0-15)");
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut frame = write_skippable_frame(b"head", 4).unwrap();
        frame.extend_from_slice(b"trailing garbage");
        assert_eq!(read_skippable_frame(&frame).unwrap(), (b"head".to_vec(), 4));
    }

    #[test]
    fn compressed_frame_is_not_skippable() {
        let frame = CompressionSession::new().unwrap().compress(b"data", &CompressOptions::default()).unwrap();
        assert!(!is_skippable_frame(&frame));
        assert!(!is_skippable_frame(b"abc"));
        assert!(matches!(read_skippable_frame(&frame), Err(CodecError::NotSkippableFrame)));
    }

    #[test]
    fn stock_decoder_skips_our_metadata() -> anyhow::Result<()> {
        let data = corpus(5_000, 41);
        let mut input = write_skippable_frame(b"{\"schema\":2}", 7)?;
        input.extend(zstd::bulk::compress(&data, 3)?);
        assert_eq!(zstd::stream::decode_all(&input[..])?, data);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Frame boundaries and sizes
    // -------------------------------------------------------------------------

    #[test]
    fn frame_boundaries_in_concatenation() {
        let mut c = CompressionSession::new().unwrap();
        let a = c.compress(&corpus(9_000, 42), &CompressOptions::default()).unwrap();
        let b = c.compress(&corpus(3_000, 43), &CompressOptions::default()).unwrap();
        let mut both = a.clone();
        both.extend(&b);

        let first = find_frame_compressed_size(&both).unwrap();
        assert_eq!(first, a.len());
        assert_eq!(find_frame_compressed_size(&both[first..]).unwrap(), b.len());
        assert_eq!(frame_content_size(&both[first..]), Some(3_000));
    }

    #[test]
    fn truncated_frame_has_no_boundary() {
        let frame = CompressionSession::new()
            .unwrap()
            .compress(&corpus(20_000, 44), &CompressOptions::default())
            .unwrap();
        assert!(matches!(
            find_frame_compressed_size(&frame[..frame.len() - 1]),
            Err(CodecError::MalformedFrame { .. })
        ));
        assert_eq!(frame_content_size(b"nope"), None);
    }

    #[test]
    fn compress_bound_covers_worst_case() {
        assert!(compress_bound(0) > 0);
        assert!(compress_bound(1 << 20) >= 1 << 20);
        assert!(compress_bound(100) < compress_bound(100_000));
    }

    // -------------------------------------------------------------------------
    // Engine introspection
    // -------------------------------------------------------------------------

    #[test]
    fn version_and_levels() {
        let n = info::version_number();
        assert!(n >= 10_500, "engine too old: {n}");
        let s = info::version_string();
        assert_eq!(s.split('.').count(), 3);
        assert!(s.starts_with(&(n / 10_000).to_string()));

        assert!(info::min_level() < 0);
        assert_eq!(info::max_level(), 22);
        assert_eq!(info::default_level(), 3);
    }

    #[test]
    fn size_hints_are_engine_sized() {
        assert_eq!(info::decompression_output_size_hint(), 128 * 1024);
        assert!(info::compression_input_size_hint() > 0);
        assert!(info::compression_output_size_hint() > 0);
        assert!(info::decompression_input_size_hint() > 0);
    }

    #[test]
    fn memory_estimates_by_kind() {
        assert_eq!(
            MemoryEstimate::CompressionSession { level: 3 }.bytes(),
            CompressionSession::estimate_memory(3)
        );
        assert_eq!(MemoryEstimate::DecompressionSession.bytes(), DecompressionSession::estimate_memory());
        assert!(MemoryEstimate::DecompressionDictionary { dict_size: 4096 }.bytes() > 0);
    }
}
