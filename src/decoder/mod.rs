// twobit-reader: Reader and interactive query tool for .2bit files.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Decoder for the packed bases of a sequence.
//!
//! Each byte holds 4 bases at 2 bits per base with the first base in the two
//! most significant bits. The 2-bit values map to bases as
//!
//! | bits | base |
//! |------|------|
//! | 00   | T    |
//! | 01   | C    |
//! | 10   | A    |
//! | 11   | G    |
//!
//! ## Usage
//!
//! ```rust
//! use twobit_reader::decoder::BaseDecoder;
//!
//! let packed: Vec<u8> = vec![0b11100100, 0b00011011];
//!
//! let all: Vec<u8> = BaseDecoder::new(&packed, 0, 8).collect();
//! assert_eq!(all, b"GACTTCAG");
//!
//! // `packed` must start from the byte containing the first requested base
//! let middle: Vec<u8> = BaseDecoder::new(&packed[1..], 5, 2).collect();
//! assert_eq!(middle, b"CA");
//! ```
//!

pub mod blocks;

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

use log::debug;

type E = Box<dyn std::error::Error>;

/// Bases indexed by their 2-bit value.
pub const BASES: [u8; 4] = [b'T', b'C', b'A', b'G'];

/// Iterator over the bases of a packed byte slice.
///
/// The first byte of `bytes` must be the byte containing base `start`.
pub struct BaseDecoder<'a> {
    bytes: &'a [u8],

    // Internals
    byte_index: usize,
    pair_index: usize,
    remaining: u64,
}

impl<'a> BaseDecoder<'a> {
    pub fn new(
        bytes: &'a [u8],
        start: u64,
        len: u64,
    ) -> Self {
        BaseDecoder{
            bytes,
            byte_index: 0, pair_index: (start % 4) as usize, remaining: len,
        }
    }
}

impl Iterator for BaseDecoder<'_> {
    type Item = u8;

    fn next(
        &mut self,
    ) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }

        if self.pair_index == 4 {
            self.byte_index += 1;
            self.pair_index = 0;
        }

        let packed = *self.bytes.get(self.byte_index)?;
        let shift = (3 - self.pair_index) * 2;
        let value = (packed >> shift) & 0b11;

        self.pair_index += 1;
        self.remaining -= 1;

        Some(BASES[value as usize])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let available = (self.bytes.len().saturating_sub(self.byte_index) * 4)
            .saturating_sub(self.pair_index) as u64;
        let n = self.remaining.min(available) as usize;
        (n, Some(n))
    }
}

/// Number of packed bytes spanned by `len` bases starting from base `start`.
pub fn packed_span(
    start: u64,
    len: u64,
) -> u64 {
    if len == 0 {
        0
    } else {
        (start + len).div_ceil(4) - start / 4
    }
}

/// Read and decode `len` bases starting from base `start`.
///
/// `data_offset` is the absolute file offset of the first packed byte of the
/// sequence. Reads exactly the bytes spanned by the requested bases.
pub fn read_bases<R: Read + Seek>(
    data_offset: u64,
    start: u64,
    len: u64,
    conn: &mut R,
) -> Result<Vec<u8>, E> {
    let n_bytes = packed_span(start, len);
    if n_bytes == 0 {
        return Ok(Vec::new());
    }

    conn.seek(SeekFrom::Start(data_offset + start / 4))?;

    let mut packed: Vec<u8> = vec![0; n_bytes as usize];
    conn.read_exact(&mut packed)?;
    debug!("First packed byte at base {}: 0x{:02x}", start, packed[0]);

    let bases: Vec<u8> = BaseDecoder::new(&packed, start, len).collect();
    Ok(bases)
}
