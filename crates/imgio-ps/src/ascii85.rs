/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{self, Write};

/// Maximum characters on a single output line
const LINE_LENGTH: usize = 75;

/// A streaming ASCII85 encoder
///
/// Bytes are taken four at a time and written as five characters in the range `!`..=`u`,
/// an all zero group is written as `z`. Output is broken into lines of at most
/// 75 characters. [`finish`](Ascii85Writer::finish) flushes the final partial group and writes
/// the `~>` end of data marker.
pub struct Ascii85Writer<W: Write> {
    writer: W,
    group:  [u8; 4],
    filled: usize,
    column: usize
}

impl<W: Write> Ascii85Writer<W> {
    pub fn new(writer: W) -> Ascii85Writer<W> {
        Ascii85Writer {
            writer,
            group: [0; 4],
            filled: 0,
            column: 0
        }
    }

    fn encode_group(group: [u8; 4]) -> [u8; 5] {
        let mut value = u32::from_be_bytes(group);
        let mut out = [0; 5];

        for c in out.iter_mut().rev() {
            *c = (value % 85) as u8 + b'!';
            value /= 85;
        }
        out
    }

    fn emit(&mut self, chars: &[u8]) -> io::Result<()> {
        if self.column + chars.len() > LINE_LENGTH {
            self.writer.write_all(b"\n")?;
            self.column = 0;
        }
        // a line starting with % would read as a comment to document parsers,
        // whitespace is ignored by the decode filter
        if self.column == 0 && chars.first() == Some(&b'%') {
            self.writer.write_all(b" ")?;
            self.column = 1;
        }
        self.writer.write_all(chars)?;
        self.column += chars.len();
        Ok(())
    }

    fn flush_group(&mut self) -> io::Result<()> {
        if self.group == [0; 4] {
            self.emit(b"z")?;
        } else {
            self.emit(&Self::encode_group(self.group))?;
        }
        self.filled = 0;
        Ok(())
    }

    /// Write the final partial group and the end of data marker,
    /// returning the inner writer
    pub fn finish(mut self) -> io::Result<W> {
        if self.filled > 0 {
            let n = self.filled;
            self.group[n..].fill(0);
            let encoded = Self::encode_group(self.group);
            // a partial group is never abbreviated to z
            self.emit(&encoded[..n + 1])?;
        }
        self.emit(b"~>")?;
        self.writer.write_all(b"\n")?;
        Ok(self.writer)
    }
}

impl<W: Write> Write for Ascii85Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            self.group[self.filled] = byte;
            self.filled += 1;

            if self.filled == 4 {
                self.flush_group()?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::Ascii85Writer;

    fn encode(bytes: &[u8]) -> String {
        let mut writer = Ascii85Writer::new(vec![]);
        writer.write_all(bytes).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn full_group() {
        assert_eq!(encode(b"Man "), "9jqo^~>\n");
    }

    #[test]
    fn zero_group_is_abbreviated() {
        assert_eq!(encode(&[0, 0, 0, 0]), "z~>\n");
    }

    #[test]
    fn partial_group() {
        assert_eq!(encode(b"Ma"), "9jn~>\n");
        assert_eq!(encode(&[0]), "!!~>\n");
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode(&[]), "~>\n");
    }

    #[test]
    fn lines_are_wrapped() {
        let out = encode(&[0xAB; 400]);

        assert!(out.lines().all(|line| line.len() <= 75));
        assert!(out.lines().count() > 1);
    }
}
