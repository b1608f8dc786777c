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
use crate::headers::record::Block;
use crate::headers::record::SequenceRecord;

/// How N-blocks and mask blocks are applied to decoded bases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rendering {
    /// Bases exactly as packed in the file, ignoring both block lists.
    #[default]
    Raw,
    /// N-blocks as `N` and mask blocks in lower case.
    Annotated,
}

impl std::str::FromStr for Rendering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Rendering::Raw),
            "annotated" => Ok(Rendering::Annotated),
            _ => Err(format!("'{}' is not a valid Rendering", s)),
        }
    }
}

/// Call `f` on the part of `bases` overlapped by each block.
///
/// `start` is the position of `bases[0]` in the sequence.
fn for_each_overlap<F: FnMut(&mut [u8])>(
    blocks: &[Block],
    start: u64,
    bases: &mut [u8],
    mut f: F,
) {
    let end = start + bases.len() as u64;
    blocks.iter().for_each(|block| {
        let from = (block.start as u64).max(start);
        let to = block.end().min(end);
        if from < to {
            f(&mut bases[((from - start) as usize)..((to - start) as usize)]);
        }
    });
}

/// Replace positions inside N-blocks with `N`.
pub fn apply_n_blocks(
    blocks: &[Block],
    start: u64,
    bases: &mut [u8],
) {
    for_each_overlap(blocks, start, bases, |region| region.fill(b'N'));
}

/// Convert positions inside mask blocks to lower case.
pub fn apply_mask_blocks(
    blocks: &[Block],
    start: u64,
    bases: &mut [u8],
) {
    for_each_overlap(blocks, start, bases, |region| region.make_ascii_lowercase());
}

/// Apply the blocks of `record` to `bases` decoded from position `start`.
pub fn render(
    record: &SequenceRecord,
    start: u64,
    bases: &mut [u8],
    rendering: Rendering,
) {
    match rendering {
        Rendering::Raw => (),
        Rendering::Annotated => {
            apply_n_blocks(&record.n_blocks, start, bases);
            apply_mask_blocks(&record.mask_blocks, start, bases);
        },
    }
}
