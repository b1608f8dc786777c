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

//! twobit-reader is a library and a command-line client for reading
//! [.2bit](https://genome.ucsc.edu/FAQ/FAQformat.html#format7) genome sequence
//! files.
//!
//! A .2bit file stores an index of named DNA sequences followed by one record
//! per sequence. Each record contains the number of bases, the regions of
//! unknown bases (N-blocks), the repeat masked regions (mask blocks) and the
//! bases themselves packed at 2 bits per base.
//!
//! ## Usage
//!
//! ### Command line
//!
//! `twobit-reader <file>` prints the file header and the index and then asks
//! for a sequence, a start position and a length to print. Entering `-1` at a
//! prompt returns to the previous prompt or exits.
//!
//! `twobit-reader <file> --region chr1:100-200` prints bases 100..200 of chr1
//! as FASTA without starting the interactive session.
//!
//! ### Rust API
//!
//! [TwoBit] reads the header and the index from anything that implements
//! [Read] and [Seek]. The sequence records are loaded on first access and kept
//! for the lifetime of the reader.
//!
//! ```rust
//! use twobit_reader::TwoBit;
//! use twobit_reader::decoder::blocks::Rendering;
//! use std::io::Cursor;
//!
//! // Little endian file with one sequence `chr1` containing the bases GACT
//! let mut bytes: Vec<u8> = Vec::new();
//! bytes.extend_from_slice(&0x1A412743_u32.to_le_bytes()); // signature
//! bytes.extend_from_slice(&0_u32.to_le_bytes());          // version
//! bytes.extend_from_slice(&1_u32.to_le_bytes());          // sequence count
//! bytes.extend_from_slice(&0_u32.to_le_bytes());          // reserved
//! bytes.push(4);
//! bytes.extend_from_slice(b"chr1");
//! bytes.extend_from_slice(&25_u32.to_le_bytes());         // record offset
//! bytes.extend_from_slice(&4_u32.to_le_bytes());          // base count
//! bytes.extend_from_slice(&0_u32.to_le_bytes());          // N-block count
//! bytes.extend_from_slice(&0_u32.to_le_bytes());          // mask block count
//! bytes.extend_from_slice(&0_u32.to_le_bytes());          // reserved
//! bytes.push(0b11100100);                                 // GACT
//!
//! let mut reader = TwoBit::new(Cursor::new(bytes)).unwrap();
//! assert_eq!(reader.len(), 1);
//!
//! let idx = reader.find(b"chr1").unwrap();
//! assert_eq!(reader.load(idx).unwrap().dna_size, 4);
//!
//! let bases = reader.sequence(idx, 1, 3, Rendering::Raw).unwrap();
//! assert_eq!(bases, b"ACT");
//! ```
//!

use headers::file::ByteOrder;
use headers::file::FileHeader;
use headers::file::read_file_header;
use headers::index::IndexEntry;
use headers::index::RecordState;
use headers::index::read_index;
use headers::record::SequenceRecord;
use headers::record::read_sequence_record;
use decoder::blocks::Rendering;
use decoder::read_bases;

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;

use log::info;

pub mod decoder;
pub mod headers;
pub mod printer;
pub mod query;
pub mod region;

#[cfg(test)]
mod testdata;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct SequenceOutOfRange {
    pub index: usize,
    pub count: usize,
}

impl std::fmt::Display for SequenceOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Sequence index {} is out of range for {} sequences", self.index, self.count)
    }
}

impl std::error::Error for SequenceOutOfRange {}

#[derive(Debug, Clone)]
pub struct BasesOutOfRange {
    pub start: u64,
    pub len: u64,
    pub dna_size: u32,
}

impl std::fmt::Display for BasesOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Bases {}..{} are out of range for a sequence of {} bases", self.start, self.start.saturating_add(self.len), self.dna_size)
    }
}

impl std::error::Error for BasesOutOfRange {}

/// Reader for a .2bit file.
pub struct TwoBit<R: Read + Seek> {
    conn: R,

    header: FileHeader,
    byte_order: ByteOrder,
    index: Vec<IndexEntry>,
}

impl TwoBit<BufReader<File>> {
    /// Open the .2bit file at `path`.
    pub fn open<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, E> {
        let f = File::open(path.as_ref())?;
        info!("Reading {}", path.as_ref().display());
        TwoBit::new(BufReader::new(f))
    }
}

impl<R: Read + Seek> TwoBit<R> {
    /// Read the file header and the index from the start of `conn`.
    pub fn new(
        mut conn: R,
    ) -> Result<Self, E> {
        conn.seek(SeekFrom::Start(0))?;
        let (header, byte_order) = read_file_header(&mut conn)?;
        info!("Read header: {} sequences, {:?} endian", header.sequence_count, byte_order);

        let index = read_index(header.sequence_count, byte_order, &mut conn)?;

        Ok(TwoBit{ conn, header, byte_order, index })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn index(&self) -> &[IndexEntry] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get_ref(&self) -> &R {
        &self.conn
    }

    /// Position of the first sequence called `name` in the index.
    pub fn find(
        &self,
        name: &[u8],
    ) -> Option<usize> {
        self.index.iter().position(|entry| entry.name == name)
    }

    /// Load the record of sequence `idx`.
    ///
    /// The record is read from the file only on the first call for each
    /// sequence. If reading fails nothing is cached and the next call will
    /// try again.
    pub fn load(
        &mut self,
        idx: usize,
    ) -> Result<&SequenceRecord, E> {
        let count = self.index.len();
        let entry = self.index.get_mut(idx).ok_or(SequenceOutOfRange{ index: idx, count })?;

        if let RecordState::Unloaded = entry.record {
            let record = read_sequence_record(entry.offset, self.byte_order, &mut self.conn)?;
            entry.record = RecordState::Loaded(record);
        }

        match &entry.record {
            RecordState::Loaded(record) => Ok(record),
            RecordState::Unloaded => unreachable!(),
        }
    }

    /// Decode `len` bases from sequence `idx` starting from base `start`.
    ///
    /// Fails with [BasesOutOfRange] if the bases extend past the end of the
    /// sequence.
    pub fn sequence(
        &mut self,
        idx: usize,
        start: u64,
        len: u64,
        rendering: Rendering,
    ) -> Result<Vec<u8>, E> {
        let record = self.load(idx)?.clone();
        match start.checked_add(len) {
            Some(end) if end <= record.dna_size as u64 => (),
            _ => return Err(Box::new(BasesOutOfRange{ start, len, dna_size: record.dna_size })),
        }

        let mut bases = read_bases(record.data_offset, start, len, &mut self.conn)?;
        decoder::blocks::render(&record, start, &mut bases, rendering);
        Ok(bases)
    }
}
