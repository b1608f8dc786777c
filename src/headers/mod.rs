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

//! File header, sequence index and sequence records of the .2bit format.
//!
//! All multi-byte integers in a .2bit file are 32 bits wide and stored in one
//! byte order that is resolved from the file signature, see
//! [ByteOrder](file::ByteOrder).
//!
//! ## File header
//!
//! A [FileHeader](file::FileHeader) is always 16 bytes long and appears at the
//! start of the file:
//!
//! - Signature, `0x1A412743`.
//! - Version, must be 0.
//! - Number of sequences in the file.
//! - Reserved, ignored.
//!
//! ## Index
//!
//! The header is followed by one [IndexEntry](index::IndexEntry) per sequence:
//!
//! - Length of the sequence name (1 byte).
//! - Sequence name, without a terminating NUL.
//! - Absolute offset of the sequence record.
//!
//! ## Sequence record
//!
//! A [SequenceRecord](record::SequenceRecord) is stored at the offset given in
//! the index:
//!
//! - Number of bases in the sequence.
//! - Number of N-blocks, followed by all of their start positions and then all
//!   of their sizes.
//! - Number of mask blocks, laid out the same way as the N-blocks.
//! - Reserved, ignored.
//! - Packed bases, 4 bases per byte.
//!

pub mod file;
pub mod index;
pub mod record;
