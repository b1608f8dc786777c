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
// Synthetic .2bit files for the unit tests.
use crate::decoder::BASES;
use crate::headers::file::{ByteOrder, MAGIC};
use crate::headers::record::Block;

use std::io::{Read, Seek, SeekFrom};

pub struct TestSequence<'a> {
    pub name: &'a str,
    pub bases: &'a [u8],
    pub n_blocks: Vec<Block>,
    pub mask_blocks: Vec<Block>,
}

impl<'a> TestSequence<'a> {
    pub fn new(name: &'a str, bases: &'a [u8]) -> Self {
        TestSequence{ name, bases, n_blocks: Vec::new(), mask_blocks: Vec::new() }
    }
}

pub fn u32_bytes(order: ByteOrder, value: u32) -> Vec<u8> {
    match order {
        ByteOrder::Little => value.to_le_bytes().to_vec(),
        ByteOrder::Big => value.to_be_bytes().to_vec(),
    }
}

fn encode_blocks(order: ByteOrder, blocks: &[Block]) -> Vec<u8> {
    let mut bytes = u32_bytes(order, blocks.len() as u32);
    blocks.iter().for_each(|block| bytes.append(&mut u32_bytes(order, block.start)));
    blocks.iter().for_each(|block| bytes.append(&mut u32_bytes(order, block.size)));
    bytes
}

/// Sequence record without the packed bases.
pub fn encode_record(order: ByteOrder, dna_size: u32, n_blocks: &[Block], mask_blocks: &[Block]) -> Vec<u8> {
    let mut bytes = u32_bytes(order, dna_size);
    bytes.append(&mut encode_blocks(order, n_blocks));
    bytes.append(&mut encode_blocks(order, mask_blocks));
    bytes.append(&mut u32_bytes(order, 0));
    bytes
}

/// Pack upper case T, C, A, G at 2 bits per base, padding with T.
pub fn pack_bases(bases: &[u8]) -> Vec<u8> {
    bases.chunks(4).map(|chunk| {
        chunk.iter().enumerate().fold(0_u8, |packed, (i, base)| {
            let value = BASES.iter().position(|x| x == base).unwrap() as u8;
            packed | (value << ((3 - i) * 2))
        })
    }).collect()
}

pub fn build_file(order: ByteOrder, sequences: &[TestSequence]) -> Vec<u8> {
    let mut bytes = u32_bytes(order, MAGIC);
    bytes.append(&mut u32_bytes(order, 0));
    bytes.append(&mut u32_bytes(order, sequences.len() as u32));
    bytes.append(&mut u32_bytes(order, 0));

    let index_len: usize = sequences.iter().map(|seq| 1 + seq.name.len() + 4).sum();
    let mut records: Vec<u8> = Vec::new();
    let mut offset = bytes.len() + index_len;

    sequences.iter().for_each(|seq| {
        bytes.push(seq.name.len() as u8);
        bytes.extend_from_slice(seq.name.as_bytes());
        bytes.append(&mut u32_bytes(order, offset as u32));

        let mut record = encode_record(order, seq.bases.len() as u32, &seq.n_blocks, &seq.mask_blocks);
        record.append(&mut pack_bases(seq.bases));
        offset += record.len();
        records.append(&mut record);
    });

    bytes.append(&mut records);
    bytes
}

/// Wraps a reader and counts the calls to `read` and `seek`.
pub struct CountingReader<R> {
    pub inner: R,
    pub reads: usize,
    pub seeks: usize,
}

impl<R> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        CountingReader{ inner, reads: 0, seeks: 0 }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reads += 1;
        self.inner.read(buf)
    }
}

impl<R: Seek> Seek for CountingReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.seeks += 1;
        self.inner.seek(pos)
    }
}
