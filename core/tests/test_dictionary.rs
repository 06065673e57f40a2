mod common;

#[cfg(test)]
mod tests {
    use codec_core::dictionary::{
        dictionary_header_size, dictionary_id, dictionary_id_from_frame, finalize_dictionary,
        train, train_cover, train_fast_cover, CoverParams, FastCoverParams, FinalizeParams,
    };
    use codec_core::prelude::*;

    use crate::common::{init_logging, record_samples};

    const MAX_DICT: usize = 4096;

    fn trained() -> Vec<u8> {
        train(&record_samples(), MAX_DICT).expect("training")
    }

    // -------------------------------------------------------------------------
    // 1. Training
    // -------------------------------------------------------------------------

    #[test]
    fn trained_dictionary_shrinks_small_records() {
        init_logging();
        let samples = record_samples();
        let dict = train(&samples, MAX_DICT).unwrap();
        assert!(!dict.is_empty() && dict.len() <= MAX_DICT, "len {}", dict.len());
        assert_ne!(dictionary_id(&dict), 0);

        let cdict = CompressionDictionary::new(&dict, Some(3)).unwrap();
        let mut c = CompressionSession::new().unwrap();
        let record = &samples[17];

        let plain = c.compress(record, &CompressOptions::default()).unwrap();
        let with_dict = c.compress(record, &CompressOptions::default().with_dict(cdict)).unwrap();
        assert!(with_dict.len() < plain.len(), "{} >= {}", with_dict.len(), plain.len());
    }

    #[test]
    fn training_is_deterministic() {
        assert_eq!(trained(), trained());
    }

    #[test]
    fn dictionary_compression_is_deterministic() {
        let samples = record_samples();
        let cdict = CompressionDictionary::new(&trained(), Some(3)).unwrap();
        let opts = CompressOptions::default().with_level(3).with_dict(cdict);

        let mut c = CompressionSession::new().unwrap();
        let first = c.compress(&samples[5], &opts).unwrap();
        let second = c.compress(&samples[5], &opts).unwrap();
        assert_eq!(first, second);

        let fresh = CompressionSession::new().unwrap().compress(&samples[5], &opts).unwrap();
        assert_eq!(first, fresh);
    }

    #[test]
    fn training_rejects_bad_input() {
        let none: Vec<Vec<u8>> = Vec::new();
        assert!(matches!(train(&none, MAX_DICT), Err(CodecError::EmptySampleSet)));
        assert!(matches!(train(&record_samples(), 0), Err(CodecError::InvalidArgument(_))));

        let bad_split = CoverParams { split_point: 0.0, ..CoverParams::default() };
        assert!(matches!(
            train_cover(&record_samples(), &bad_split),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn cover_with_fixed_segment() {
        let params = CoverParams::default().with_max_dict_size(MAX_DICT).with_segment(128, 8);
        let dict = train_cover(&record_samples(), &params).unwrap();
        assert!(dict.len() <= MAX_DICT);
        assert_ne!(dictionary_id(&dict), 0);
        assert!(dictionary_header_size(&dict).unwrap() < dict.len());
    }

    #[test]
    fn fast_cover_searches_when_unset() {
        let params = FastCoverParams::default().with_max_dict_size(MAX_DICT);
        let dict = train_fast_cover(&record_samples(), &params).unwrap();
        assert!(!dict.is_empty() && dict.len() <= MAX_DICT);

        let fixed = FastCoverParams::default()
            .with_max_dict_size(MAX_DICT)
            .with_segment(64, 8)
            .with_accel(2);
        assert!(train_fast_cover(&record_samples(), &fixed).unwrap().len() <= MAX_DICT);
    }

    #[test]
    fn finalize_keeps_requested_id() {
        let samples = record_samples();
        let content: Vec<u8> = samples.concat().into_iter().take(1000).collect();
        let params = FinalizeParams::new(MAX_DICT).with_level(3).with_dict_id(12345);

        let dict = finalize_dictionary(&content, &samples, &params).unwrap();
        assert_eq!(dictionary_id(&dict), 12345);
        assert!(dict.len() <= MAX_DICT);
        assert!(dict.ends_with(&content));
    }

    // -------------------------------------------------------------------------
    // 2. Inspection
    // -------------------------------------------------------------------------

    #[test]
    fn raw_content_has_no_id_or_header() {
        let raw = b"plain bytes used as history, no magic in front".repeat(4);
        assert_eq!(dictionary_id(&raw), 0);
        assert!(matches!(
            dictionary_header_size(&raw),
            Err(CodecError::InvalidDictionary { .. })
        ));

        let cdict = CompressionDictionary::new(&raw, None).unwrap();
        assert_eq!(cdict.dict_id(), 0);
        assert_eq!(cdict.level(), codec_core::info::default_level());
    }

    #[test]
    fn digested_handles_report_id_and_size() {
        let dict = trained();
        let cdict = CompressionDictionary::new(&dict, Some(5)).unwrap();
        let ddict = DecompressionDictionary::new(&dict).unwrap();
        assert_eq!(cdict.dict_id(), dictionary_id(&dict));
        assert_eq!(ddict.dict_id(), dictionary_id(&dict));
        assert_eq!(cdict.level(), 5);
        assert!(cdict.size() > 0 && ddict.size() > 0);

        assert!(CompressionDictionary::estimate_memory(dict.len(), 5) > 0);
        assert!(DecompressionDictionary::estimate_memory(dict.len()) > 0);

        let shared = cdict.clone();
        drop(cdict);
        assert_eq!(shared.dict_id(), dictionary_id(&dict));
    }

    #[test]
    fn frames_record_dictionary_id() {
        let dict = trained();
        let cdict = CompressionDictionary::new(&dict, None).unwrap();
        let mut c = CompressionSession::new().unwrap();
        let record = &record_samples()[3];

        let frame = c.compress(record, &CompressOptions::default().with_dict(cdict)).unwrap();
        assert_eq!(dictionary_id_from_frame(&frame), dictionary_id(&dict));

        let bare = c.compress(record, &CompressOptions::default()).unwrap();
        assert_eq!(dictionary_id_from_frame(&bare), 0);

        c.set_parameter("dict_id_flag", false).unwrap();
        let cdict = CompressionDictionary::new(&dict, None).unwrap();
        let anonymous = c.compress(record, &CompressOptions::default().with_dict(cdict)).unwrap();
        assert_eq!(dictionary_id_from_frame(&anonymous), 0);
    }

    // -------------------------------------------------------------------------
    // 3. Sessions with dictionaries
    // -------------------------------------------------------------------------

    #[test]
    fn sticky_dictionary_on_both_sides() {
        let dict = trained();
        let mut c = CompressionSession::new().unwrap();
        let mut d = DecompressionSession::new().unwrap();
        c.use_dictionary(Some(CompressionDictionary::new(&dict, None).unwrap()));
        d.use_dictionary(Some(DecompressionDictionary::new(&dict).unwrap()));

        for record in record_samples().iter().take(10) {
            let frame = c.compress(record, &CompressOptions::default()).unwrap();
            assert_eq!(dictionary_id_from_frame(&frame), dictionary_id(&dict));
            assert_eq!(&d.decompress(&frame, &DecompressOptions::default()).unwrap(), record);
        }
    }

    #[test]
    fn missing_dictionary_fails_to_decode() {
        let dict = trained();
        let record = &record_samples()[0];
        let frame = CompressionSession::new()
            .unwrap()
            .compress(record, &CompressOptions::default().with_dict(CompressionDictionary::new(&dict, None).unwrap()))
            .unwrap();

        let mut d = DecompressionSession::new().unwrap();
        let err = d.decompress(&frame, &DecompressOptions::default()).unwrap_err();
        assert!(matches!(err, CodecError::DecompressionFailure { .. }), "{err}");

        let ddict = DecompressionDictionary::new(&dict).unwrap();
        let out = d.decompress(&frame, &DecompressOptions::default().with_dict(ddict)).unwrap();
        assert_eq!(&out, record);

        // per-call dictionary is not sticky
        assert!(d.dictionary().is_none());
        assert!(d.decompress(&frame, &DecompressOptions::default()).is_err());
    }

    #[test]
    fn per_call_dictionary_wins_over_sticky() {
        let samples = record_samples();
        let first = trained();
        let content: Vec<u8> = samples.concat().into_iter().take(1000).collect();
        let second =
            finalize_dictionary(&content, &samples, &FinalizeParams::new(MAX_DICT).with_dict_id(12345)).unwrap();

        let mut c = CompressionSession::new().unwrap();
        c.use_dictionary(Some(CompressionDictionary::new(&first, None).unwrap()));
        let over = CompressionDictionary::new(&second, None).unwrap();

        let frame = c.compress(&samples[5], &CompressOptions::default().with_dict(over)).unwrap();
        assert_eq!(dictionary_id_from_frame(&frame), 12345);

        let frame = c.compress(&samples[5], &CompressOptions::default()).unwrap();
        assert_eq!(dictionary_id_from_frame(&frame), dictionary_id(&first));
    }

    #[test]
    fn reset_parameters_detaches_dictionary() {
        let dict = trained();
        let mut c = CompressionSession::new().unwrap();
        c.use_dictionary(Some(CompressionDictionary::new(&dict, None).unwrap()));
        c.reset(ResetMode::Session).unwrap();
        assert!(c.dictionary().is_some());

        c.reset(ResetMode::Both).unwrap();
        assert!(c.dictionary().is_none());
        let frame = c.compress(&record_samples()[1], &CompressOptions::default()).unwrap();
        assert_eq!(dictionary_id_from_frame(&frame), 0);
    }

    #[test]
    fn raw_dictionary_roundtrip() {
        let raw = record_samples().concat();
        let mut c = CompressionSession::new().unwrap();
        let mut d = DecompressionSession::new().unwrap();
        c.use_dictionary(Some(CompressionDictionary::new(&raw, Some(3)).unwrap()));
        d.use_dictionary(Some(DecompressionDictionary::new(&raw).unwrap()));

        let record = record_samples()[42].clone();
        let frame = c.compress(&record, &CompressOptions::default()).unwrap();
        assert_eq!(d.decompress(&frame, &DecompressOptions::default()).unwrap(), record);
    }
}
