use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

/// Destination for compressed output.
pub trait Sink {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()>;
}

/// Origin of compressed input.
pub trait Source {
    /// Up to `max_len` bytes, or `None` once the data is exhausted.
    fn read_chunk(&mut self, max_len: usize) -> io::Result<Option<Vec<u8>>>;
}

impl Sink for Vec<u8> {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

impl<T: Sink + ?Sized> Sink for &mut T {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).write_chunk(chunk)
    }
}

impl<T: Sink + ?Sized> Sink for Box<T> {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).write_chunk(chunk)
    }
}

impl<T: Source + ?Sized> Source for &mut T {
    fn read_chunk(&mut self, max_len: usize) -> io::Result<Option<Vec<u8>>> {
        (**self).read_chunk(max_len)
    }
}

impl<T: Source + ?Sized> Source for Box<T> {
    fn read_chunk(&mut self, max_len: usize) -> io::Result<Option<Vec<u8>>> {
        (**self).read_chunk(max_len)
    }
}

/// Any `Write` as a sink.
#[derive(Debug)]
pub struct IoSink<W>(pub W);

impl<W: Write> Sink for IoSink<W> {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.0.write_all(chunk)
    }
}

/// Any `Read` as a source; a zero-length read means end of data.
#[derive(Debug)]
pub struct IoSource<R>(pub R);

impl<R: Read> Source for IoSource<R> {
    fn read_chunk(&mut self, max_len: usize) -> io::Result<Option<Vec<u8>>> {
        let mut buf = vec![0u8; max_len];
        loop {
            match self.0.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(n) => {
                    buf.truncate(n);
                    return Ok(Some(buf));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Sink backed by a buffer other owners can inspect while a `Writer` holds it.
#[derive(Debug, Clone, Default)]
pub struct SharedSink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn snapshot(&self) -> Vec<u8> {
        match self.buf.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Sink for SharedSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::other("shared sink lock poisoned"))?;
        guard.extend_from_slice(chunk);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_source_signals_end() {
        let mut src = IoSource(io::Cursor::new(b"abc".to_vec()));
        assert_eq!(src.read_chunk(2).unwrap(), Some(b"ab".to_vec()));
        assert_eq!(src.read_chunk(2).unwrap(), Some(b"c".to_vec()));
        assert_eq!(src.read_chunk(2).unwrap(), None);
    }

    #[test]
    fn shared_sink_is_visible_through_clones() {
        let sink = SharedSink::new();
        let mut writer_side = sink.clone();
        writer_side.write_chunk(b"12").unwrap();
        writer_side.write_chunk(b"3").unwrap();
        assert_eq!(sink.snapshot(), b"123");
    }
}
