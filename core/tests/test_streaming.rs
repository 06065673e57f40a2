// Streaming writer/reader against in-memory sinks and sources.

mod common;

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read, Write};
    use std::num::NonZeroUsize;

    use codec_core::dictionary::train;
    use codec_core::frames::frame_content_size;
    use codec_core::prelude::*;
    use codec_core::stream::{IoSink, IoSource, SharedSink};

    use crate::common::{corpus, init_logging, random_bytes, record_samples, Trickle};

    fn read_all<R: Source>(reader: &mut Reader<R>, size: Option<usize>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = reader.read(size).unwrap() {
            assert!(!chunk.is_empty());
            out.extend(chunk);
        }
        out
    }

    fn source(bytes: Vec<u8>) -> IoSource<Cursor<Vec<u8>>> {
        IoSource(Cursor::new(bytes))
    }

    // -------------------------------------------------------------------------
    // 1. Writer
    // -------------------------------------------------------------------------

    #[test]
    fn chunked_writes_roundtrip() {
        init_logging();
        let data = corpus(400_000, 21);
        let mut w = Writer::new(Vec::new(), WriterOptions::default()).unwrap();
        for piece in data.chunks(7_777) {
            assert_eq!(w.write(piece).unwrap(), piece.len());
        }
        let frame = w.finish_into_inner().unwrap();

        let mut d = DecompressionSession::new().unwrap();
        assert_eq!(d.decompress(&frame, &DecompressOptions::default()).unwrap(), data);
        assert_eq!(frame_content_size(&frame), None);
    }

    #[test]
    fn pledged_size_lands_in_header() {
        let data = corpus(12_345, 22);
        let opts = WriterOptions::default().with_pledged_size(data.len() as u64);
        let mut w = Writer::new(Vec::new(), opts).unwrap();
        w.write(&data).unwrap();
        let frame = w.finish_into_inner().unwrap();
        assert_eq!(frame_content_size(&frame), Some(12_345));
    }

    #[test]
    fn pledged_size_mismatch_fails() {
        let opts = WriterOptions::default().with_pledged_size(10);
        let mut w = Writer::new(Vec::new(), opts).unwrap();
        w.write(b"only five").ok();
        assert!(matches!(w.finish(), Err(CodecError::CompressionFailure { .. })));
    }

    #[test]
    fn flush_makes_prefix_decodable() {
        let sink = SharedSink::new();
        let mut w = Writer::new(sink.clone(), WriterOptions::default().with_level(1)).unwrap();
        let first = corpus(50_000, 23);
        w.write(&first).unwrap();
        w.flush().unwrap();

        let visible = sink.snapshot();
        assert!(!visible.is_empty());
        let mut r = Reader::new(source(visible), ReaderOptions::default()).unwrap();
        assert_eq!(read_all(&mut r, None), first);

        let second = corpus(10_000, 24);
        w.write(&second).unwrap();
        w.finish().unwrap();

        let mut expected = first;
        expected.extend(second);
        let mut r = Reader::new(source(sink.snapshot()), ReaderOptions::default()).unwrap();
        assert_eq!(read_all(&mut r, None), expected);
        assert!(r.eof());
    }

    #[test]
    fn finish_is_idempotent_and_final() {
        let mut w = Writer::new(Vec::new(), WriterOptions::default()).unwrap();
        w.write(b"hello").unwrap();
        w.finish().unwrap();
        let len = w.get_ref().len();

        w.finish().unwrap();
        w.close().unwrap();
        assert!(w.is_finished());
        assert_eq!(w.get_ref().len(), len);

        assert!(matches!(w.write(b"more"), Err(CodecError::InvalidArgument(_))));
        assert!(matches!(w.flush(), Err(CodecError::InvalidArgument(_))));
    }

    #[test]
    fn empty_stream_is_a_valid_frame() {
        let frame = Writer::new(Vec::new(), WriterOptions::default())
            .unwrap()
            .finish_into_inner()
            .unwrap();
        assert!(!frame.is_empty());
        let mut d = DecompressionSession::new().unwrap();
        assert!(d.decompress(&frame, &DecompressOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn writer_reuses_tuned_session() {
        let session = CompressionSession::with_params([("checksum", 1), ("window_log", 18)]).unwrap();
        let mut w = Writer::with_session(session, Vec::new(), WriterOptions::default()).unwrap();
        w.write(&corpus(30_000, 25)).unwrap();
        w.finish().unwrap();

        let session = w.into_session();
        assert!(session.get_parameter("checksum").unwrap().as_bool());
        assert_eq!(session.get_parameter("window_log").unwrap(), ParamValue::Int(18));
    }

    #[test]
    fn io_write_adapter() -> anyhow::Result<()> {
        let data = corpus(80_000, 26);
        let mut w = Writer::new(IoSink(Vec::new()), WriterOptions::default().with_level(6))?;
        io::copy(&mut &data[..], &mut w)?;
        Write::flush(&mut w)?;
        let frame = w.finish_into_inner()?.0;
        assert_eq!(zstd::stream::decode_all(&frame[..])?, data);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // 2. Reader
    // -------------------------------------------------------------------------

    #[test]
    fn reader_over_trickling_source() {
        let data = corpus(300_000, 27);
        let frame = zstd::stream::encode_all(&data[..], 3).unwrap();

        for step in [1usize, 17, 4096] {
            let mut r = Reader::new(Trickle::new(frame.clone(), step), ReaderOptions::default()).unwrap();
            assert_eq!(read_all(&mut r, Some(1000)), data, "step {step}");
        }
    }

    #[test]
    fn small_reads_lose_nothing() {
        let data = random_bytes(100_000, 28);
        let frame = CompressionSession::new().unwrap().compress(&data, &CompressOptions::default()).unwrap();

        let mut r = Reader::new(source(frame), ReaderOptions::default()).unwrap();
        assert_eq!(read_all(&mut r, Some(3)), data);
        assert_eq!(r.read(None).unwrap(), None);
    }

    #[test]
    fn default_chunk_size_applies() {
        let data = corpus(200_000, 29);
        let frame = CompressionSession::new().unwrap().compress(&data, &CompressOptions::default()).unwrap();

        let opts = ReaderOptions::default().with_chunk_size(NonZeroUsize::new(5_000).unwrap());
        let mut r = Reader::new(source(frame), opts).unwrap();
        assert_eq!(r.chunk_size(), 5_000);
        let first = r.read(None).unwrap().unwrap();
        assert!(first.len() <= 5_000);
    }

    #[test]
    fn zero_read_size_is_rejected() {
        let frame = CompressionSession::new().unwrap().compress(b"abc", &CompressOptions::default()).unwrap();
        let mut r = Reader::new(source(frame), ReaderOptions::default()).unwrap();
        assert!(matches!(r.read(Some(0)), Err(CodecError::InvalidArgument(_))));
        assert_eq!(r.read(None).unwrap(), Some(b"abc".to_vec()));
    }

    #[test]
    fn huge_read_size_fails_without_consuming() {
        let frame = CompressionSession::new().unwrap().compress(b"abc", &CompressOptions::default()).unwrap();
        let mut r = Reader::new(source(frame), ReaderOptions::default()).unwrap();
        let err = r.read(Some(usize::MAX / 2)).unwrap_err();
        assert!(matches!(err, CodecError::DecompressionFailure { .. }), "{err:?}");
        assert!(!r.eof());
        assert_eq!(r.read(Some(16)).unwrap(), Some(b"abc".to_vec()));
    }

    #[test]
    fn reader_stops_after_first_frame() {
        let mut c = CompressionSession::new().unwrap();
        let mut input = c.compress(b"first", &CompressOptions::default()).unwrap();
        input.extend(c.compress(b"second", &CompressOptions::default()).unwrap());

        let mut r = Reader::new(source(input), ReaderOptions::default()).unwrap();
        assert_eq!(read_all(&mut r, None), b"first");
        assert!(r.eof());
    }

    #[test]
    fn corrupt_stream_errors() {
        let data = corpus(60_000, 30);
        let mut frame = CompressionSession::with_params([("checksum", 1)])
            .unwrap()
            .compress(&data, &CompressOptions::default())
            .unwrap();
        let mid = frame.len() / 2;
        frame[mid] ^= 0x5A;
        frame[mid + 1] ^= 0xA5;

        let mut r = Reader::new(source(frame), ReaderOptions::default()).unwrap();
        let mut result = Ok(None);
        for _ in 0..1_000 {
            result = r.read(None);
            if !matches!(result, Ok(Some(_))) {
                break;
            }
        }
        assert!(matches!(result, Err(CodecError::DecompressionFailure { .. })), "{result:?}");
    }

    #[test]
    fn io_read_adapter() -> anyhow::Result<()> {
        let data = corpus(90_000, 31);
        let frame = zstd::bulk::compress(&data, 2)?;
        let mut r = Reader::new(source(frame), ReaderOptions::default())?;
        let mut out = Vec::new();
        r.read_to_end(&mut out)?;
        assert_eq!(out, data);
        Ok(())
    }

    #[test]
    fn dictionary_streams() {
        let samples = record_samples();
        let dict = train(&samples, 4096).unwrap();
        let payload = samples.concat();

        let opts = WriterOptions::default().with_dict(CompressionDictionary::new(&dict, None).unwrap());
        let mut w = Writer::new(Vec::new(), opts).unwrap();
        w.write(&payload).unwrap();
        let frame = w.finish_into_inner().unwrap();

        let opts = ReaderOptions::default().with_dict(DecompressionDictionary::new(&dict).unwrap());
        let mut r = Reader::new(source(frame), opts).unwrap();
        assert_eq!(read_all(&mut r, None), payload);
    }
}
