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

//! Plain text output of the file header, the index and decoded bases.
//!
//! ## Usage
//!
//! ```rust
//! use twobit_reader::printer::format_bases;
//!
//! let mut output: Vec<u8> = Vec::new();
//! format_bases(b"GACTGACTGACTGA", 12, &mut output).unwrap();
//!
//! assert_eq!(output, b"GACTGACTGACT\nGA\n");
//! ```
//!

use crate::headers::file::FileHeader;
use crate::headers::index::IndexEntry;
use crate::headers::record::SequenceRecord;

use std::io::Write;

use needletail::parser::LineEnding;
use needletail::parser::write_fasta;

type E = Box<dyn std::error::Error>;

/// Number of bases per line in the interactive output.
pub const LINE_WIDTH: usize = 12;

/// Number of decimal digits in `n`.
pub fn num_places(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

/// Format the file header on a single line.
pub fn format_file_header<W: Write>(
    header: &FileHeader,
    conn: &mut W,
) -> Result<(), E> {
    writeln!(conn, "{{ signature = 0x{:08x}, version = {}, sequenceCount = {}, reserved = 0x{:08x} }}",
             header.signature, header.version, header.sequence_count, header.reserved)?;
    Ok(())
}

/// Format a single index entry as `<idx>. <name> @ <offset>`.
///
/// `idx` is zero-padded to the width of `sequence_count`.
pub fn format_index_line<W: Write>(
    idx: usize,
    sequence_count: u32,
    entry: &IndexEntry,
    conn: &mut W,
) -> Result<(), E> {
    let width = num_places(sequence_count);
    writeln!(conn, "{:0width$}. {} @ 0x{:08x}", idx, entry.name, entry.offset, width = width)?;
    Ok(())
}

pub fn format_index<W: Write>(
    index: &[IndexEntry],
    sequence_count: u32,
    conn: &mut W,
) -> Result<(), E> {
    for (idx, entry) in index.iter().enumerate() {
        format_index_line(idx, sequence_count, entry, conn)?;
    }
    Ok(())
}

/// Format the name, length and block counts of a loaded sequence.
pub fn format_sequence_summary<W: Write>(
    idx: usize,
    sequence_count: u32,
    entry: &IndexEntry,
    record: &SequenceRecord,
    conn: &mut W,
) -> Result<(), E> {
    let width = num_places(sequence_count);
    writeln!(conn, "Sequence {} ({:0width$}) is {} bases long. nBlockCount = {}, maskBlockCount = {}",
             entry.name, idx, record.dna_size, record.n_blocks.len(), record.mask_blocks.len(), width = width)?;
    Ok(())
}

/// Write `bases` wrapped to lines of `width` bases.
///
/// An empty input is written as an empty line.
pub fn format_bases<W: Write>(
    bases: &[u8],
    width: usize,
    conn: &mut W,
) -> Result<(), E> {
    if bases.is_empty() {
        conn.write_all(b"\n")?;
        return Ok(());
    }

    for line in bases.chunks(width.max(1)) {
        conn.write_all(line)?;
        conn.write_all(b"\n")?;
    }
    Ok(())
}

/// Write `bases` as a FASTA record called `name`.
pub fn format_fasta_record<W: Write>(
    name: &[u8],
    bases: &[u8],
    conn: &mut W,
) -> Result<(), E> {
    write_fasta(name, bases, conn, LineEnding::Unix)?;
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn num_places_digits() {
        use super::num_places;

        assert_eq!(num_places(0), 1);
        assert_eq!(num_places(9), 1);
        assert_eq!(num_places(10), 2);
        assert_eq!(num_places(999), 3);
        assert_eq!(num_places(1000), 4);
        assert_eq!(num_places(u32::MAX), 10);
    }

    #[test]
    fn format_file_header_line() {
        use super::format_file_header;
        use crate::headers::file::{FileHeader, MAGIC};

        let header = FileHeader{ signature: MAGIC, version: 0, sequence_count: 25, reserved: 0 };
        let expected = b"{ signature = 0x1a412743, version = 0, sequenceCount = 25, reserved = 0x00000000 }\n".to_vec();

        let mut got: Vec<u8> = Vec::new();
        format_file_header(&header, &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn format_index_padded() {
        use super::format_index;
        use crate::headers::index::IndexEntry;
        use bstr::BString;

        let index = vec![
            IndexEntry::new(BString::from("chr1"), 0x1f5),
            IndexEntry::new(BString::from("chrM"), 0x0a0b0c0d),
        ];

        let mut expected: Vec<u8> = Vec::new();
        expected.append(&mut b"00. chr1 @ 0x000001f5\n".to_vec());
        expected.append(&mut b"01. chrM @ 0x0a0b0c0d\n".to_vec());

        let mut got: Vec<u8> = Vec::new();
        format_index(&index, 12, &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn format_sequence_summary_line() {
        use super::format_sequence_summary;
        use crate::headers::index::IndexEntry;
        use crate::headers::record::{Block, SequenceRecord};
        use bstr::BString;

        let entry = IndexEntry::new(BString::from("chr2"), 0x40);
        let record = SequenceRecord{ dna_size: 1000, n_blocks: vec![Block{ start: 0, size: 10 }], ..Default::default() };
        let expected = b"Sequence chr2 (002) is 1000 bases long. nBlockCount = 1, maskBlockCount = 0\n".to_vec();

        let mut got: Vec<u8> = Vec::new();
        format_sequence_summary(2, 100, &entry, &record, &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn format_bases_wrapped() {
        use super::{format_bases, LINE_WIDTH};

        let mut got: Vec<u8> = Vec::new();
        format_bases(b"GACTGACTGACTGACTGACTGACT", LINE_WIDTH, &mut got).unwrap();
        assert_eq!(got, b"GACTGACTGACT\nGACTGACTGACT\n");

        let mut got: Vec<u8> = Vec::new();
        format_bases(b"", LINE_WIDTH, &mut got).unwrap();
        assert_eq!(got, b"\n");
    }

    #[test]
    fn format_fasta() {
        use super::format_fasta_record;

        let mut got: Vec<u8> = Vec::new();
        format_fasta_record(b"chr1:0-4", b"GACT", &mut got).unwrap();

        assert_eq!(got, b">chr1:0-4\nGACT\n");
    }
}
