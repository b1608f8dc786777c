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

//! Sequence regions given on the command line.
//!
//! A region is either a sequence name, selecting the whole sequence, or
//! `name:start-end` with 0-based half-open coordinates.
//!
//! ## Usage
//!
//! ```rust
//! use twobit_reader::region::Region;
//!
//! let region: Region = "chr1:100-200".parse().unwrap();
//! assert_eq!(region.name, "chr1");
//! assert_eq!(region.range, Some((100, 200)));
//! ```
//!

use crate::TwoBit;
use crate::decoder::blocks::Rendering;
use crate::printer::format_fasta_record;

use std::io::Read;
use std::io::Seek;
use std::io::Write;

use bstr::BString;
use bstr::ByteSlice;
use log::info;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct SequenceNotFound {
    pub name: BString,
}

impl std::fmt::Display for SequenceNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Sequence {} is not in the index", self.name)
    }
}

impl std::error::Error for SequenceNotFound {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: BString,
    /// Start and exclusive end, or None for the whole sequence.
    pub range: Option<(u64, u64)>,
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("Region can't be empty".to_string());
        }

        // Sequence names may contain ':', so only a valid range suffix is split off.
        if let Some((name, range)) = s.rsplit_once(':') {
            if let Some((start, end)) = range.split_once('-') {
                if let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>()) {
                    if name.is_empty() {
                        return Err(format!("'{}' is missing a sequence name", s));
                    }
                    if end < start {
                        return Err(format!("'{}' ends before it starts", s));
                    }
                    return Ok(Region{ name: BString::from(name), range: Some((start, end)) });
                }
            }
        }

        Ok(Region{ name: BString::from(s), range: None })
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.range {
            Some((start, end)) => write!(f, "{}:{}-{}", self.name, start, end),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Region {
    /// Decode the bases in this region from `reader`.
    pub fn extract<R: Read + Seek>(
        &self,
        reader: &mut TwoBit<R>,
        rendering: Rendering,
    ) -> Result<Vec<u8>, E> {
        let idx = reader.find(self.name.as_bytes()).ok_or(SequenceNotFound{ name: self.name.clone() })?;
        let (start, end) = match self.range {
            Some(range) => range,
            None => (0, reader.load(idx)?.dna_size as u64),
        };
        let len = end.checked_sub(start).ok_or_else(|| format!("'{}' ends before it starts", self))?;
        reader.sequence(idx, start, len, rendering)
    }
}

/// Write each region in `regions` as a FASTA record to `conn`.
pub fn extract_regions<R: Read + Seek, W: Write>(
    regions: &[Region],
    reader: &mut TwoBit<R>,
    rendering: Rendering,
    conn: &mut W,
) -> Result<(), E> {
    for region in regions {
        info!("Extracting {}", region);
        let bases = region.extract(reader, rendering)?;
        format_fasta_record(region.to_string().as_bytes(), &bases, conn)?;
    }
    conn.flush()?;
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn parse_regions() {
        use super::Region;
        use bstr::BString;

        let got: Region = "chr1".parse().unwrap();
        assert_eq!(got, Region{ name: BString::from("chr1"), range: None });

        let got: Region = "chr1:0-10".parse().unwrap();
        assert_eq!(got, Region{ name: BString::from("chr1"), range: Some((0, 10)) });

        let got: Region = "HLA-A*01:01:01:01".parse().unwrap();
        assert_eq!(got, Region{ name: BString::from("HLA-A*01:01:01:01"), range: None });

        let got: Region = "HLA:1-2:5-7".parse().unwrap();
        assert_eq!(got, Region{ name: BString::from("HLA:1-2"), range: Some((5, 7)) });
    }

    #[test]
    fn parse_invalid_regions() {
        use super::Region;

        assert!("".parse::<Region>().is_err());
        assert!(":1-2".parse::<Region>().is_err());
        assert!("chr1:10-2".parse::<Region>().is_err());
    }

    #[test]
    fn extract_regions_as_fasta() {
        use super::{extract_regions, Region};
        use crate::TwoBit;
        use crate::decoder::blocks::Rendering;
        use crate::headers::file::ByteOrder;
        use crate::testdata::{build_file, TestSequence};
        use std::io::Cursor;

        let data = build_file(ByteOrder::Big, &[TestSequence::new("chr1", b"GACTTCAGG"), TestSequence::new("chr2", b"")]);
        let mut reader = TwoBit::new(Cursor::new(data)).unwrap();

        let regions: Vec<Region> = ["chr1:2-6", "chr2", "chr1"].iter().map(|x| x.parse().unwrap()).collect();

        let mut expected: Vec<u8> = Vec::new();
        expected.append(&mut b">chr1:2-6\nCTTC\n".to_vec());
        expected.append(&mut b">chr2\n\n".to_vec());
        expected.append(&mut b">chr1\nGACTTCAGG\n".to_vec());

        let mut got: Vec<u8> = Vec::new();
        extract_regions(&regions, &mut reader, Rendering::Raw, &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn extract_reversed_range() {
        use super::Region;
        use crate::TwoBit;
        use crate::decoder::blocks::Rendering;
        use crate::headers::file::ByteOrder;
        use crate::testdata::{build_file, TestSequence};
        use bstr::BString;
        use std::io::Cursor;

        let data = build_file(ByteOrder::Little, &[TestSequence::new("chr1", b"GACTGA")]);
        let mut reader = TwoBit::new(Cursor::new(data)).unwrap();

        let region = Region{ name: BString::from("chr1"), range: Some((5, 2)) };
        let got = region.extract(&mut reader, Rendering::Raw).unwrap_err();

        assert_eq!(got.to_string(), "'chr1:5-2' ends before it starts");
    }

    #[test]
    fn extract_missing_sequence() {
        use super::{Region, SequenceNotFound};
        use crate::TwoBit;
        use crate::decoder::blocks::Rendering;
        use crate::headers::file::ByteOrder;
        use crate::testdata::{build_file, TestSequence};
        use std::io::Cursor;

        let data = build_file(ByteOrder::Little, &[TestSequence::new("chr1", b"GACT")]);
        let mut reader = TwoBit::new(Cursor::new(data)).unwrap();

        let region: Region = "chrX:0-1".parse().unwrap();
        let got = region.extract(&mut reader, Rendering::Raw).unwrap_err();

        assert!(got.downcast_ref::<SequenceNotFound>().is_some());
    }
}
