use std::io::{self, Write};

/// A bounded writer that counts bytes written. Wrapping `std::io::sink()`
/// turns this into a pure length-counter, which is how the high-level API's
/// "size then allocate then write" two-pass scheme (spec §4.6) gets its
/// first pass without allocating anything.
pub struct BufPrinter<W> {
    writer: W,
    bytes_written: usize,
}

impl<W: Write> BufPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Write for BufPrinter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.writer.write(buf)?;
        self.bytes_written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// A `BufPrinter` over `io::sink()`: counts bytes without writing them
/// anywhere, for sizing a value before allocating the real output buffer.
pub fn counting_printer() -> BufPrinter<io::Sink> {
    BufPrinter::new(io::sink())
}
