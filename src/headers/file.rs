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
use std::io::Read;

use bincode::{Encode, Decode};
use bincode::decode_from_slice;

use log::debug;

type E = Box<dyn std::error::Error>;

/// Signature at the start of every .2bit file.
pub const MAGIC: u32 = 0x1A412743;

/// Length of an encoded [FileHeader] in bytes.
pub const FILE_HEADER_LEN: usize = 16;

#[derive(Debug, Clone)]
pub struct BadSignature {
    pub value: u32,
}

impl std::fmt::Display for BadSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "0x{:08x} != 0x{:08X}: Not a 2bit file", self.value, MAGIC)
    }
}

impl std::error::Error for BadSignature {}

#[derive(Debug, Clone)]
pub struct UnsupportedVersion {
    pub version: u32,
}

impl std::fmt::Display for UnsupportedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Invalid file version {}", self.version)
    }
}

impl std::error::Error for UnsupportedVersion {}

/// Order of the multi-byte integers in a .2bit file.
///
/// Detected once from the signature with [ByteOrder::detect] and then passed
/// to every read of the header, index and sequence records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the machine running the program.
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Resolve the byte order from the first four bytes of a file.
    ///
    /// The signature is first interpreted in host order and then swapped. If
    /// neither matches [MAGIC] the raw host order value is reported in
    /// [BadSignature].
    pub fn detect(
        signature: [u8; 4],
    ) -> Result<Self, E> {
        let host = ByteOrder::host();
        let swapped = host.swapped();
        if host.decode::<u32>(&signature)? == MAGIC {
            Ok(host)
        } else if swapped.decode::<u32>(&signature)? == MAGIC {
            debug!("Signature is byte swapped, reading as {:?} endian", swapped);
            Ok(swapped)
        } else {
            Err(Box::new(BadSignature{ value: u32::from_ne_bytes(signature) }))
        }
    }

    pub fn swapped(&self) -> Self {
        match self {
            ByteOrder::Little => ByteOrder::Big,
            ByteOrder::Big => ByteOrder::Little,
        }
    }

    /// Decode a fixed width struct stored in this byte order.
    pub fn decode<T: Decode<()>>(
        &self,
        bytes: &[u8],
    ) -> Result<T, E> {
        let config = bincode::config::standard().with_fixed_int_encoding();
        let res = match self {
            ByteOrder::Little => decode_from_slice(bytes, config.with_little_endian())?.0,
            ByteOrder::Big => decode_from_slice(bytes, config.with_big_endian())?.0,
        };
        Ok(res)
    }

    /// Read a single u32 from `conn`.
    pub fn read_u32<R: Read>(
        &self,
        conn: &mut R,
    ) -> Result<u32, E> {
        let mut bytes: [u8; 4] = [0_u8; 4];
        conn.read_exact(&mut bytes)?;
        self.decode::<u32>(&bytes)
    }

    /// Read `count` consecutive u32 values from `conn`.
    ///
    /// Reads through [Read::take] so that a corrupted count fails with a
    /// short read instead of a huge allocation.
    pub fn read_u32_array<R: Read>(
        &self,
        count: u32,
        conn: &mut R,
    ) -> Result<Vec<u32>, E> {
        let n_bytes = count as u64 * 4;
        let mut bytes: Vec<u8> = Vec::new();
        conn.by_ref().take(n_bytes).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) < n_bytes {
            return Err(Box::new(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)));
        }

        bytes.chunks_exact(4).map(|chunk| self.decode::<u32>(chunk)).collect()
    }
}

/// Fixed size header at the start of a .2bit file.
#[derive(Encode, Decode, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: u32,
    pub version: u32,
    pub sequence_count: u32,
    pub reserved: u32,
}

/// Decode a [FileHeader] and the [ByteOrder] it was written in.
///
/// Fails with [BadSignature] if the signature does not match [MAGIC] in
/// either byte order and with [UnsupportedVersion] if the version is not 0.
pub fn decode_file_header(
    header_bytes: &[u8; FILE_HEADER_LEN],
) -> Result<(FileHeader, ByteOrder), E> {
    let mut signature: [u8; 4] = [0; 4];
    signature.copy_from_slice(&header_bytes[0..4]);
    let byte_order = ByteOrder::detect(signature)?;

    let header: FileHeader = byte_order.decode(header_bytes)?;
    if header.version != 0 {
        return Err(Box::new(UnsupportedVersion{ version: header.version }));
    }

    Ok((header, byte_order))
}

pub fn read_file_header<R: Read>(
    conn: &mut R,
) -> Result<(FileHeader, ByteOrder), E> {
    let mut header_bytes: [u8; FILE_HEADER_LEN] = [0_u8; FILE_HEADER_LEN];
    conn.read_exact(&mut header_bytes)?;
    decode_file_header(&header_bytes)
}
