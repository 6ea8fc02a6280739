//! Line reading and field splitting for single-byte separators.
//!
//! `LineReader` hands out one line at a time from an underlying `BufRead`, reusing a single
//! buffer. Lines are borrowed from the reader, so the sequence is lazy and can only be walked
//! once. Field access works on raw bytes: nothing outside the requested field is decoded.
use crate::common::{Error, Result};

use memchr::{memchr2, memchr_iter};

use std::io::{BufRead, ErrorKind};
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub(crate) struct LineReader<R> {
    inner: R,
    // Only used to give read errors some context.
    path: PathBuf,
    buf: Vec<u8>,
    line_no: usize,
    // The last line ended in \r at the end of a buffer; a leading \n on the next read belongs to it.
    after_cr: bool,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R, path: impl AsRef<Path>) -> LineReader<R> {
        LineReader {
            inner,
            path: path.as_ref().to_path_buf(),
            buf: Vec::with_capacity(256),
            line_no: 0,
            after_cr: false,
        }
    }

    /// Read the next line, returning its 1-based line number along with its contents. Lines end
    /// at `\n`, `\r\n` or a lone `\r`; the terminator is not included. Returns `None` at end of
    /// input.
    pub(crate) fn read_line(&mut self) -> Result<Option<(usize, &[u8])>> {
        self.buf.clear();
        let mut read_any = false;
        loop {
            let available = match self.inner.fill_buf() {
                Ok(bs) => bs,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io(&self.path, e)),
            };
            if available.is_empty() {
                break;
            }
            if self.after_cr {
                // The \n of a \r\n pair that straddled two reads.
                self.after_cr = false;
                if available[0] == b'\n' {
                    self.inner.consume(1);
                    continue;
                }
            }
            read_any = true;
            match memchr2(b'\n', b'\r', available) {
                Some(i) => {
                    self.buf.extend_from_slice(&available[..i]);
                    let mut used = i + 1;
                    if available[i] == b'\r' {
                        match available.get(i + 1) {
                            Some(b'\n') => used += 1,
                            Some(_) => {}
                            None => self.after_cr = true,
                        }
                    }
                    self.inner.consume(used);
                    break;
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.inner.consume(len);
                }
            }
        }
        if !read_any {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some((self.line_no, &self.buf[..])))
    }
}

/// Get the `ix`th (zero-based) field of `line`, or `None` if the line has too few fields.
pub(crate) fn get_field(line: &[u8], sep: u8, ix: usize) -> Option<&[u8]> {
    let mut start = 0;
    let mut cur = 0;
    for pos in memchr_iter(sep, line) {
        if cur == ix {
            return Some(&line[start..pos]);
        }
        cur += 1;
        start = pos + 1;
    }
    if cur == ix {
        Some(&line[start..])
    } else {
        None
    }
}

/// Number of fields in `line`. An empty line has a single (empty) field.
pub(crate) fn count_fields(line: &[u8], sep: u8) -> usize {
    memchr_iter(sep, line).count() + 1
}

/// Find the index of the header column named `name`. Names are compared after trimming; a
/// byte-order mark in front of the first name is ignored.
pub(crate) fn find_column(header: &[u8], sep: u8, name: &str) -> Option<usize> {
    let header = header.strip_prefix(UTF8_BOM).unwrap_or(header);
    header
        .split(|b| *b == sep)
        .position(|col| trim(col) == name.trim().as_bytes())
}

/// The header's column names, for error messages.
pub(crate) fn column_names(header: &[u8], sep: u8) -> Vec<String> {
    let header = header.strip_prefix(UTF8_BOM).unwrap_or(header);
    header
        .split(|b| *b == sep)
        .map(|col| String::from_utf8_lossy(trim(col)).into_owned())
        .collect()
}

/// Strip leading and trailing bytes at or below ASCII space; control characters are trimmed
/// along with whitespace.
pub(crate) fn trim(mut bs: &[u8]) -> &[u8] {
    while let Some((first, rest)) = bs.split_first() {
        if *first > b' ' {
            break;
        }
        bs = rest;
    }
    while let Some((last, rest)) = bs.split_last() {
        if *last > b' ' {
            break;
        }
        bs = rest;
    }
    bs
}
