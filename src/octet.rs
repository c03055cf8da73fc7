use std::io::{self, Write};

use byteorder::{BigEndian, ByteOrder};

use crate::{error::CafError, numeral, scan::Scanner};

/// The run-length marker between an octet value and its repeat count.
pub const RUN_MARKER: &str = " X ";

/// Write a payload as run-length-compressed 64-bit big-endian groups.
///
/// The final partial group is padded with zero bytes; the reader truncates
/// against the size declared elsewhere. Every octet value is preceded by the
/// newline that terminates the previous line, and the payload's own closing
/// newline flushes the last run, so an empty payload still contributes one
/// newline.
pub fn write_payload<W: Write>(w: &mut W, data: &[u8]) -> io::Result<()> {
    let mut last = 0u64;
    let mut run = 0u64;
    for chunk in data.chunks(8) {
        let mut group = [0u8; 8];
        group[..chunk.len()].copy_from_slice(chunk);
        let value = BigEndian::read_u64(&group);
        if run > 0 && value == last {
            run += 1;
            continue;
        }
        if run > 1 {
            w.write_all(RUN_MARKER.as_bytes())?;
            numeral::write_u64(w, run)?;
        }
        w.write_all(b"\n")?;
        numeral::write_u64(w, value)?;
        last = value;
        run = 1;
    }
    if run > 1 {
        w.write_all(RUN_MARKER.as_bytes())?;
        numeral::write_u64(w, run)?;
    }
    w.write_all(b"\n")
}

/// Read octet lines until `len` payload bytes (rounded up to whole groups)
/// have been produced, then truncate the zero padding away
pub fn read_payload(s: &mut Scanner, len: u64) -> Result<Vec<u8>, CafError> {
    let groups = len.div_ceil(8);
    // The size is declared by the input; grow as octets actually arrive.
    let mut out = Vec::new();
    let mut filled = 0u64;
    while filled < groups {
        let line = s.offset();
        let value = numeral::read_u64(s);
        if s.offset() == line {
            // An under-run stream would otherwise swallow the surrounding
            // framing as octets of zero.
            return Err(CafError::ExpectedNumeral { offset: line });
        }
        let repeat = if s.eat(RUN_MARKER) {
            numeral::read_u64(s)
        } else {
            1
        };
        s.expect_newline()?;
        if repeat > groups - filled {
            return Err(CafError::PayloadOverrun {
                offset:   line,
                declared: len,
            });
        }
        let mut group = [0u8; 8];
        BigEndian::write_u64(&mut group, value);
        for _ in 0..repeat {
            out.extend_from_slice(&group);
        }
        filled += repeat;
    }
    out.truncate(len as usize);
    Ok(out)
}
