//! Savefile container handling
//!
//! Heroes III savefiles are gzip streams wrapping the raw game state. Some
//! tools write the raw state uncompressed, so the container is detected from
//! the magic bytes and remembered for writing back.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Errors that can occur while unpacking or packing a savefile
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to decompress savefile: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Failed to compress savefile: {0}")]
    Compress(#[source] std::io::Error),
}

/// How the raw game state is stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Gzip,
    Plain,
}

impl Container {
    /// Detect the container from the leading bytes of a file
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(&GZIP_MAGIC) {
            Container::Gzip
        } else {
            Container::Plain
        }
    }

    /// Extract the raw game state
    pub fn unpack(self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        match self {
            Container::Plain => Ok(data.to_vec()),
            Container::Gzip => {
                let mut decoder = GzDecoder::new(data);
                let mut raw = Vec::with_capacity(data.len() * 4);
                decoder
                    .read_to_end(&mut raw)
                    .map_err(CodecError::Decompress)?;
                Ok(raw)
            }
        }
    }

    /// Wrap raw game state for writing to disk
    pub fn pack(self, raw: &[u8]) -> Result<Vec<u8>, CodecError> {
        match self {
            Container::Plain => Ok(raw.to_vec()),
            Container::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(raw).map_err(CodecError::Compress)?;
                encoder.finish().map_err(CodecError::Compress)
            }
        }
    }
}
