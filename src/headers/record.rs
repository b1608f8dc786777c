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
use crate::headers::file::ByteOrder;

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

use log::debug;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct TruncatedRecord {
    pub offset: u32,
    pub source: String,
}

impl std::fmt::Display for TruncatedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Truncated sequence record at 0x{:08x}: {}", self.offset, self.source)
    }
}

impl std::error::Error for TruncatedRecord {}

/// A region of a sequence given as a 0-based start and a length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Block {
    pub start: u32,
    pub size: u32,
}

impl Block {
    /// Exclusive end position of the block.
    pub fn end(&self) -> u64 {
        self.start as u64 + self.size as u64
    }
}

/// Metadata stored in front of the packed bases of a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Number of bases in the sequence.
    pub dna_size: u32,
    /// Regions of unknown bases.
    pub n_blocks: Vec<Block>,
    /// Repeat masked regions.
    pub mask_blocks: Vec<Block>,
    pub reserved: u32,
    /// Absolute file offset of the first packed base byte.
    pub data_offset: u64,
}

/// Read a block list stored as a count, all start positions, then all sizes.
pub fn read_blocks<R: Read>(
    byte_order: ByteOrder,
    conn: &mut R,
) -> Result<Vec<Block>, E> {
    let count = byte_order.read_u32(conn)?;
    let starts = byte_order.read_u32_array(count, conn)?;
    let sizes = byte_order.read_u32_array(count, conn)?;

    let blocks = starts.into_iter().zip(sizes).map(|(start, size)| {
        Block{ start, size }
    }).collect();

    Ok(blocks)
}

fn read_record_fields<R: Read + Seek>(
    offset: u32,
    byte_order: ByteOrder,
    conn: &mut R,
) -> Result<SequenceRecord, E> {
    conn.seek(SeekFrom::Start(offset as u64))?;

    let dna_size = byte_order.read_u32(conn)?;
    let n_blocks = read_blocks(byte_order, conn)?;
    let mask_blocks = read_blocks(byte_order, conn)?;
    let reserved = byte_order.read_u32(conn)?;
    let data_offset = conn.stream_position()?;

    Ok(SequenceRecord{ dna_size, n_blocks, mask_blocks, reserved, data_offset })
}

/// Read the sequence record starting at `offset`.
///
/// A short read anywhere in the record is reported as [TruncatedRecord] and
/// no partial record is returned.
pub fn read_sequence_record<R: Read + Seek>(
    offset: u32,
    byte_order: ByteOrder,
    conn: &mut R,
) -> Result<SequenceRecord, E> {
    let record = read_record_fields(offset, byte_order, conn).map_err(|err| {
        TruncatedRecord{ offset, source: err.to_string() }
    })?;

    debug!("Loaded record at 0x{:08x}: {} bases, {} N-blocks, {} mask blocks, data at 0x{:08x}",
           offset, record.dna_size, record.n_blocks.len(), record.mask_blocks.len(), record.data_offset);

    Ok(record)
}
