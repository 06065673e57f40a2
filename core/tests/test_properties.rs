mod common;

#[cfg(test)]
mod tests {
    use codec_core::frames::{read_skippable_frame, write_skippable_frame};
    use codec_core::prelude::*;
    use proptest::prelude::*;

    use crate::common::Trickle;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn oneshot_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..20_000), level in 1i32..=9) {
            let mut c = CompressionSession::new().unwrap();
            let frame = c.compress(&data, &CompressOptions::default().with_level(level)).unwrap();
            let mut d = DecompressionSession::new().unwrap();
            prop_assert_eq!(d.decompress(&frame, &DecompressOptions::default()).unwrap(), data);
        }

        #[test]
        fn streaming_roundtrip_with_random_cuts(
            data in proptest::collection::vec(0u8..4, 0..50_000),
            cuts in proptest::collection::vec(1usize..5_000, 1..20),
            step in 1usize..2_000,
            read_size in 1usize..10_000,
        ) {
            let mut w = Writer::new(Vec::new(), WriterOptions::default()).unwrap();
            let mut rest = &data[..];
            for cut in cuts.iter().cycle() {
                if rest.is_empty() {
                    break;
                }
                let (head, tail) = rest.split_at((*cut).min(rest.len()));
                w.write(head).unwrap();
                rest = tail;
            }
            let frame = w.finish_into_inner().unwrap();

            let mut r = Reader::new(Trickle::new(frame, step), ReaderOptions::default()).unwrap();
            let mut out = Vec::new();
            while let Some(chunk) = r.read(Some(read_size)).unwrap() {
                prop_assert!(chunk.len() <= read_size);
                out.extend(chunk);
            }
            prop_assert_eq!(out, data);
        }

        #[test]
        fn skippable_roundtrip(payload in proptest::collection::vec(any::<u8>(), 0..512), variant in 0u32..=15) {
            let frame = write_skippable_frame(&payload, variant).unwrap();
            prop_assert_eq!(read_skippable_frame(&frame).unwrap(), (payload, variant));
        }

        #[test]
        fn skippable_variant_out_of_range(variant in 16u32..) {
            prop_assert!(write_skippable_frame(b"", variant).is_err());
        }

        #[test]
        fn out_of_range_levels_are_refused(level in 23i64..1_000_000) {
            let mut c = CompressionSession::new().unwrap();
            let refused = matches!(c.set_parameter("level", level), Err(CodecError::OutOfRange { .. }));
            prop_assert!(refused);
        }
    }
}
