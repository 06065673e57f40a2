#![allow(dead_code)]

use std::io;

use codec_core::stream::Source;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Text-like payload: compressible but not trivially so.
pub fn corpus(len: usize, seed: u64) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "session", "frame", "window", "dictionary", "prefix", "level", "block", "stream",
        "checksum", "flush", "finish", "reader", "writer", "engine", "bounds",
    ];
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(len + 16);
    while out.len() < len {
        out.extend_from_slice(WORDS[rng.gen_range(0..WORDS.len())].as_bytes());
        out.push(if rng.gen_ratio(1, 8) { b'\n' } else { b' ' });
    }
    out.truncate(len);
    out
}

pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

/// 50 JSON-ish records padded to exactly 200 bytes each.
pub fn record_samples() -> Vec<Vec<u8>> {
    (0..50)
        .map(|i| {
            let mut s = format!(
                "{{\"id\":{i},\"user\":\"user_{:04}\",\"status\":\"active\",\"roles\":[\"reader\",\"writer\"],\
                 \"region\":\"eu-west-{}\",\"tags\":[\"alpha\",\"beta\",\"gamma\"],\"score\":{}}}",
                i * 7,
                i % 3,
                i * 13 % 101
            )
            .into_bytes();
            s.resize(200, b' ');
            s
        })
        .collect()
}

/// Source that hands out at most `step` bytes per call.
pub struct Trickle {
    data: Vec<u8>,
    pos: usize,
    step: usize,
}

impl Trickle {
    pub fn new(data: Vec<u8>, step: usize) -> Self {
        Self { data, pos: 0, step }
    }
}

impl Source for Trickle {
    fn read_chunk(&mut self, max_len: usize) -> io::Result<Option<Vec<u8>>> {
        if self.pos >= self.data.len() {
            return Ok(None);
        }
        let end = (self.pos + self.step.min(max_len)).min(self.data.len());
        let chunk = self.data[self.pos..end].to_vec();
        self.pos = end;
        Ok(Some(chunk))
    }
}
