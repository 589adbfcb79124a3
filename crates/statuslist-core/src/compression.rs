//! Pluggable compression for encoded status lists.
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use thiserror::Error;

/// Default GZIP compression level.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// An error relating to compression of a status list.
#[derive(Error, Debug)]
pub enum CompressionError {
    /// Compressor failed to write or finish the output stream.
    #[error("Failed to compress status list: {0}")]
    Compress(std::io::Error),
    /// Payload is corrupt, truncated or not in the expected format.
    #[error("Failed to decompress status list: {0}")]
    Decompress(std::io::Error),
    /// Decompressed payload is larger than the permitted bound.
    #[error("Decompressed status list exceeds limit of {0} bytes.")]
    LimitExceeded(usize),
}

/// A general-purpose lossless compressor used by the status list codec.
///
/// Implementations must be deterministic: the same input always compresses to
/// byte-identical output.
#[cfg_attr(test, mockall::automock)]
pub trait Compressor: Send + Sync {
    /// Compresses the packed status list bytes.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;
    /// Decompresses a payload, failing if the output would exceed `limit` bytes.
    fn decompress(&self, input: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError>;
}

/// GZIP compressor (RFC 1952) as used by StatusList2021 and BitstringStatusList.
///
/// The header carries no file name and a zero modification time so output
/// depends only on the input and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GzipCompressor {
    level: u32,
}

impl GzipCompressor {
    /// Constructs a compressor with the given level, clamped to `0..=9`.
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_COMPRESSION_LEVEL)
    }
}

impl Compressor for GzipCompressor {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::new(self.level));
        encoder
            .write_all(input)
            .map_err(CompressionError::Compress)?;
        encoder.finish().map_err(CompressionError::Compress)
    }

    fn decompress(&self, input: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError> {
        // Read one byte past the limit to detect oversized payloads.
        let mut decoder = GzDecoder::new(input).take(limit as u64 + 1);
        let mut output = Vec::new();
        decoder
            .read_to_end(&mut output)
            .map_err(CompressionError::Decompress)?;
        if output.len() > limit {
            return Err(CompressionError::LimitExceeded(limit));
        }
        // A payload is exactly one gzip member.
        let remaining = decoder.into_inner().into_inner();
        if !remaining.is_empty() {
            return Err(CompressionError::Decompress(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{} trailing bytes after gzip member", remaining.len()),
            )));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_header_is_fixed() {
        let compressed = GzipCompressor::default().compress(&[0u8; 64]).unwrap();
        // Magic, deflate method, no flags, zero mtime.
        assert_eq!(&compressed[..8], &[0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0]);
    }

    #[test]
    fn test_gzip_decompress() {
        let input: Vec<u8> = (0..=255).collect();
        let compressor = GzipCompressor::new(9);
        let compressed = compressor.compress(&input).unwrap();
        assert_eq!(compressor.decompress(&compressed, 256).unwrap(), input);
    }

    #[test]
    fn test_gzip_decompress_limit() {
        let compressor = GzipCompressor::default();
        let compressed = compressor.compress(&[0u8; 1024]).unwrap();
        assert!(matches!(
            compressor.decompress(&compressed, 1023),
            Err(CompressionError::LimitExceeded(1023))
        ));
        assert!(compressor.decompress(&compressed, 1024).is_ok());
    }

    #[test]
    fn test_gzip_decompress_truncated() {
        let compressor = GzipCompressor::default();
        let compressed = compressor.compress(&[1u8; 512]).unwrap();
        let truncated = &compressed[..compressed.len() / 2];
        assert!(matches!(
            compressor.decompress(truncated, 1024),
            Err(CompressionError::Decompress(_))
        ));
    }

    #[test]
    fn test_gzip_decompress_trailing_bytes() {
        let compressor = GzipCompressor::default();
        let mut compressed = compressor.compress(&[0u8; 512]).unwrap();
        compressed.extend_from_slice(b"trailing");
        assert!(matches!(
            compressor.decompress(&compressed, 1024),
            Err(CompressionError::Decompress(_))
        ));
    }

    #[test]
    fn test_level_clamped() {
        assert_eq!(GzipCompressor::new(42).level(), 9);
    }
}
