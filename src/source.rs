//! Pull-based character sources

use std::io::{self, BufRead, BufReader, Read};
use std::str::Chars;

/// Supplies input to the parser on demand.
///
/// `read(n)` returns at most `n` characters. A shorter result, empty
/// included, means the input ends there; the parser never asks again after
/// a short read, so a source must not return one before its real end.
///
/// Any `FnMut(usize) -> io::Result<String>` is a source.
pub trait Source {
    fn read(&mut self, n: usize) -> io::Result<String>;
}

impl<F> Source for F
where
    F: FnMut(usize) -> io::Result<String>,
{
    fn read(&mut self, n: usize) -> io::Result<String> {
        self(n)
    }
}

/// Reads from an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }
}

impl Source for StrSource<'_> {
    fn read(&mut self, n: usize) -> io::Result<String> {
        Ok(self.chars.by_ref().take(n).collect())
    }
}

/// Decodes UTF-8 from a byte reader one character at a time.
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

impl<R: Read> IoSource<BufReader<R>> {
    pub fn from_reader(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
        }
    }
}

impl<R: BufRead> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn next_char(&mut self) -> io::Result<Option<char>> {
        let first = match self.inner.fill_buf()?.first() {
            Some(&byte) => byte,
            None => return Ok(None),
        };
        let width = match first {
            0x00..=0x7f => 1,
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Err(invalid_utf8()),
        };

        let mut buf = [0u8; 4];
        // A sequence cut short by the end of the stream is malformed too.
        self.inner
            .read_exact(&mut buf[..width])
            .map_err(|err| match err.kind() {
                io::ErrorKind::UnexpectedEof => invalid_utf8(),
                _ => err,
            })?;
        let decoded = std::str::from_utf8(&buf[..width]).map_err(|_| invalid_utf8())?;
        Ok(decoded.chars().next())
    }
}

impl<R: BufRead> Source for IoSource<R> {
    fn read(&mut self, n: usize) -> io::Result<String> {
        let mut out = String::with_capacity(n);
        for _ in 0..n {
            match self.next_char()? {
                Some(c) => out.push(c),
                None => break,
            }
        }
        Ok(out)
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}
