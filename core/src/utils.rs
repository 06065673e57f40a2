use crate::types::{CodecError, CodecResult};

/// Training input laid out the way the trainers want it: one contiguous
/// buffer plus the length of every sample inside it.
#[derive(Debug, Default)]
pub struct SampleCorpus {
    buffer: Vec<u8>,
    sizes: Vec<usize>,
}

impl SampleCorpus {
    /// Concatenate `samples` in order.
    ///
    /// # Errors
    /// - `EmptySampleSet` when `samples` is empty.
    pub fn concat<S: AsRef<[u8]>>(samples: &[S]) -> CodecResult<Self> {
        if samples.is_empty() {
            return Err(CodecError::EmptySampleSet);
        }

        let total: usize = samples.iter().map(|s| s.as_ref().len()).sum();
        let mut buffer = Vec::with_capacity(total);
        let mut sizes = Vec::with_capacity(samples.len());
        for sample in samples {
            let bytes = sample.as_ref();
            buffer.extend_from_slice(bytes);
            sizes.push(bytes.len());
        }
        Ok(Self { buffer, sizes })
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Sample count in the width the trainers take.
    pub(crate) fn count_u32(&self) -> CodecResult<u32> {
        u32::try_from(self.sizes.len())
            .map_err(|_| CodecError::invalid(format!("too many samples ({})", self.sizes.len())))
    }
}

/// Reject a zero size coming from the host; `what` names the argument in the message.
pub fn nonzero_size(what: &str, value: usize) -> CodecResult<std::num::NonZeroUsize> {
    std::num::NonZeroUsize::new(value)
        .ok_or_else(|| CodecError::invalid(format!("{what} must be greater than 0")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_tracks_boundaries() {
        let corpus = SampleCorpus::concat(&[b"ab".as_slice(), b"", b"cde"]).unwrap();
        assert_eq!(corpus.buffer(), b"abcde");
        assert_eq!(corpus.sizes(), &[2, 0, 3]);
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn concat_rejects_empty_set() {
        let empty: [&[u8]; 0] = [];
        assert!(matches!(SampleCorpus::concat(&empty), Err(CodecError::EmptySampleSet)));
    }

    #[test]
    fn nonzero_size_names_argument() {
        let err = nonzero_size("initial_capacity", 0).unwrap_err();
        assert_eq!(err.to_string(), "initial_capacity must be greater than 0");
        assert_eq!(nonzero_size("x", 7).unwrap().get(), 7);
    }
}
