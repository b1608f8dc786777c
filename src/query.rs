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

//! Interactive line based query session.
//!
//! Prints the header and the index, then repeatedly asks for a sequence, a
//! start position and a length, and prints the decoded bases. Entering `-1`
//! or closing the input at the sequence prompt ends the session; at the start
//! or length prompt it returns to the sequence prompt.
//!
//! Invalid input is reported and asked again. A sequence record that can't be
//! read is reported and the session continues with the next query.
//!
//! ## Usage
//!
//! ```rust
//! use twobit_reader::TwoBit;
//! use twobit_reader::decoder::blocks::Rendering;
//! use twobit_reader::query::run_session;
//! use std::io::Cursor;
//!
//! let mut bytes: Vec<u8> = Vec::new();
//! for value in [0x1A412743_u32, 0, 1, 0] {
//!     bytes.extend_from_slice(&value.to_be_bytes());
//! }
//! bytes.push(2);
//! bytes.extend_from_slice(b"MT");
//! for value in [23_u32, 4, 0, 0, 0] {
//!     bytes.extend_from_slice(&value.to_be_bytes());
//! }
//! bytes.push(0b11100100);
//!
//! let mut reader = TwoBit::new(Cursor::new(bytes)).unwrap();
//! let mut input = Cursor::new(b"0\n1\n3\n-1\n".to_vec());
//! let mut output: Vec<u8> = Vec::new();
//!
//! run_session(&mut reader, &mut input, &mut output, Rendering::Raw).unwrap();
//!
//! let output = String::from_utf8(output).unwrap();
//! assert!(output.contains("Sequence MT (0) is 4 bases long."));
//! assert!(output.contains("ACT\n"));
//! ```
//!

use crate::TwoBit;
use crate::decoder::blocks::Rendering;
use crate::printer::LINE_WIDTH;
use crate::printer::format_bases;
use crate::printer::format_file_header;
use crate::printer::format_index;
use crate::printer::format_sequence_summary;

use std::io::BufRead;
use std::io::Read;
use std::io::Seek;
use std::io::Write;

use bstr::ByteSlice;
use log::{debug, error};

type E = Box<dyn std::error::Error>;

/// Value entered at a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Value(u64),
    /// `-1` or end of input.
    Stop,
}

/// Print `prompt` and read integers until one in `0..=max` or a stop is given.
///
/// Non-numeric input prints `Invalid input` and out of range values print
/// `Invalid index` before asking again.
pub fn prompt_value<I: BufRead, W: Write>(
    prompt: &str,
    max: u64,
    input: &mut I,
    output: &mut W,
) -> Result<Answer, E> {
    loop {
        output.write_all(prompt.as_bytes())?;
        output.flush()?;

        let mut line: Vec<u8> = Vec::new();
        if input.read_until(b'\n', &mut line)? == 0 {
            writeln!(output)?;
            return Ok(Answer::Stop);
        }

        let Ok(line) = line.to_str() else {
            writeln!(output, "Invalid input")?;
            continue;
        };

        match line.trim().parse::<i64>() {
            Ok(-1) => return Ok(Answer::Stop),
            Ok(value) if value >= 0 && value as u64 <= max => return Ok(Answer::Value(value as u64)),
            Ok(value) => {
                debug!("Rejected {} outside of 0-{}", value, max);
                writeln!(output, "Invalid index")?;
            },
            Err(_) => writeln!(output, "Invalid input")?,
        }
    }
}

/// Ask for a start and a length in sequence `idx` and print the bases.
///
/// Returns when the bases have been printed or when either prompt is stopped.
pub fn query_sequence<R: Read + Seek, I: BufRead, W: Write>(
    idx: usize,
    reader: &mut TwoBit<R>,
    input: &mut I,
    output: &mut W,
    rendering: Rendering,
) -> Result<(), E> {
    let sequence_count = reader.header().sequence_count;
    let record = match reader.load(idx) {
        Ok(record) => record.clone(),
        Err(err) => {
            error!("{}", err);
            writeln!(output, "Could not read sequence {}: {}", idx, err)?;
            return Ok(());
        },
    };

    format_sequence_summary(idx, sequence_count, &reader.index()[idx], &record, output)?;

    if record.dna_size == 0 {
        writeln!(output, "Sequence is empty")?;
        return Ok(());
    }

    let dna_size = record.dna_size as u64;
    let start = match prompt_value(&format!("Starting base offset (0-{}, -1 to exit)> ", dna_size - 1), dna_size - 1, input, output)? {
        Answer::Value(start) => start,
        Answer::Stop => return Ok(()),
    };
    let len = match prompt_value(&format!("Length to read (0-{}, -1 to exit)> ", dna_size - start), dna_size - start, input, output)? {
        Answer::Value(len) => len,
        Answer::Stop => return Ok(()),
    };

    match reader.sequence(idx, start, len, rendering) {
        Ok(bases) => format_bases(&bases, LINE_WIDTH, output)?,
        Err(err) => {
            error!("{}", err);
            writeln!(output, "Could not read bases {}..{}: {}", start, start + len, err)?;
        },
    }
    Ok(())
}

/// Print the header and index of `reader` and answer queries from `input`.
pub fn run_session<R: Read + Seek, I: BufRead, W: Write>(
    reader: &mut TwoBit<R>,
    input: &mut I,
    output: &mut W,
    rendering: Rendering,
) -> Result<(), E> {
    let sequence_count = reader.header().sequence_count;

    format_file_header(reader.header(), output)?;
    format_index(reader.index(), sequence_count, output)?;
    write!(output, "\n\n")?;

    if reader.is_empty() {
        writeln!(output, "No sequences in file")?;
        output.flush()?;
        return Ok(());
    }

    let max = reader.len() as u64 - 1;
    let prompt = format!("Sequence index (0-{}, -1 to exit)> ", max);
    while let Answer::Value(idx) = prompt_value(&prompt, max, input, output)? {
        query_sequence(idx as usize, reader, input, output, rendering)?;
    }

    output.flush()?;
    Ok(())
}
