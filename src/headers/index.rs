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
use crate::headers::record::SequenceRecord;

use std::io::Read;

use bstr::BString;
use log::trace;

type E = Box<dyn std::error::Error>;

/// Load state of the [SequenceRecord] attached to an [IndexEntry].
///
/// Moves from `Unloaded` to `Loaded` once and never back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordState {
    #[default]
    Unloaded,
    Loaded(SequenceRecord),
}

/// A named sequence in the file index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    /// Sequence name, at most 255 bytes and not necessarily valid UTF-8.
    pub name: BString,
    /// Absolute file offset of the sequence record.
    pub offset: u32,
    /// Lazily loaded sequence record.
    pub record: RecordState,
}

impl IndexEntry {
    pub fn new(
        name: BString,
        offset: u32,
    ) -> Self {
        IndexEntry{ name, offset, record: RecordState::Unloaded }
    }

    pub fn record(&self) -> Option<&SequenceRecord> {
        match &self.record {
            RecordState::Loaded(record) => Some(record),
            RecordState::Unloaded => None,
        }
    }
}

/// Read a single index entry: name length, name and record offset.
pub fn read_index_entry<R: Read>(
    byte_order: ByteOrder,
    conn: &mut R,
) -> Result<IndexEntry, E> {
    let mut name_len: [u8; 1] = [0];
    conn.read_exact(&mut name_len)?;

    let mut name: Vec<u8> = vec![0; name_len[0] as usize];
    conn.read_exact(&mut name)?;

    let offset = byte_order.read_u32(conn)?;

    Ok(IndexEntry::new(BString::from(name), offset))
}

/// Read `sequence_count` entries from the index following the file header.
///
/// Record offsets are not validated here. An invalid offset is only detected
/// when the record is loaded.
pub fn read_index<R: Read>(
    sequence_count: u32,
    byte_order: ByteOrder,
    conn: &mut R,
) -> Result<Vec<IndexEntry>, E> {
    let mut index: Vec<IndexEntry> = Vec::new();
    for i in 0..sequence_count {
        let entry = read_index_entry(byte_order, conn)?;
        trace!("Index entry {}: {} @ 0x{:08x}", i, entry.name, entry.offset);
        index.push(entry);
    }
    Ok(index)
}
