//! Bitstring status list codec.
//!
//! An encoded list is the base64url (no padding) encoding of the compressed
//! bitstring. Bits are packed most-significant-bit first, so index `0` is the
//! left-most bit of the first byte and the last index is the right-most bit of
//! the final byte. See [Bitstring Status List v1.0](https://www.w3.org/TR/vc-bitstring-status-list/).
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use bit_vec::BitVec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::{Compressor, GzipCompressor, DEFAULT_COMPRESSION_LEVEL};

/// Multibase prefix for base64url without padding.
pub const MULTIBASE_BASE64URL_PREFIX: char = 'u';

/// Default upper bound on the size of a decompressed list (16 MiB).
pub const DEFAULT_MAX_DECODED_BYTES: usize = 16 * 1024 * 1024;

/// An error relating to encoding, decoding or querying a status list.
#[derive(Error, Debug)]
pub enum StatusListError {
    /// Requested list length is zero or smaller than the supplied bits.
    #[error("Invalid status list length: {0}")]
    InvalidLength(String),
    /// Encoded list is not valid base64url.
    #[error("Malformed encoded list: {0}")]
    MalformedEncoding(String),
    /// Encoded list does not decompress to a status list.
    #[error("Failed to decompress encoded list: {0}")]
    DecompressionError(String),
    /// Index lies outside `[0, length)`.
    #[error("Index {index} is out of range for status list of length {length}.")]
    IndexOutOfRange { index: i64, length: usize },
    /// Compressor failed while encoding.
    #[error("Failed to compress status list: {0}")]
    CompressionError(String),
}

/// A fixed-length sequence of status bits, one per issued credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusList {
    bits: BitVec,
}

impl StatusList {
    /// Constructs a list of `length` clear bits.
    pub fn new(length: usize) -> Result<Self, StatusListError> {
        if length == 0 {
            return Err(StatusListError::InvalidLength(
                "length must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            bits: BitVec::from_elem(length, false),
        })
    }

    /// Constructs a list of `length` bits from `bits`, with trailing entries clear.
    pub fn from_bits(bits: &[bool], length: usize) -> Result<Self, StatusListError> {
        if bits.len() > length {
            return Err(StatusListError::InvalidLength(format!(
                "{} bits supplied for a list of length {}",
                bits.len(),
                length
            )));
        }
        let mut list = Self::new(length)?;
        for (index, _) in bits.iter().enumerate().filter(|(_, set)| **set) {
            list.bits.set(index, true);
        }
        Ok(list)
    }

    /// Unpacks bytes MSB-first. The length is always `bytes.len() * 8`.
    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bits: BitVec::from_bytes(bytes),
        }
    }

    /// Packs the list MSB-first, padding the final byte with clear bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits.to_bytes()
    }

    /// Number of entries in the list.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always `false`: a list holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    fn position(&self, index: i64) -> Result<usize, StatusListError> {
        usize::try_from(index)
            .ok()
            .filter(|position| *position < self.len())
            .ok_or(StatusListError::IndexOutOfRange {
                index,
                length: self.len(),
            })
    }

    /// Gets the status at `index`: `true` if asserted (e.g. revoked).
    pub fn get_status(&self, index: i64) -> Result<bool, StatusListError> {
        let position = self.position(index)?;
        Ok(self.bits[position])
    }

    /// Sets the status at `index`.
    pub fn set_status(&mut self, index: i64, status: bool) -> Result<(), StatusListError> {
        let position = self.position(index)?;
        self.bits.set(position, status);
        Ok(())
    }

    /// Iterates over the indices whose status is asserted.
    pub fn asserted_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(index, set)| set.then_some(index))
    }
}

/// Codec configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// GZIP compression level (0-9).
    pub compression_level: u32,
    /// Prefix encoded lists with the multibase `u` and accept it when decoding.
    pub multibase: bool,
    /// Upper bound on the decompressed list size in bytes.
    pub max_decoded_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            multibase: false,
            max_decoded_bytes: DEFAULT_MAX_DECODED_BYTES,
        }
    }
}

/// Lossless, deterministic transformation between a [`StatusList`] and its encoded form.
#[derive(Debug, Clone)]
pub struct StatusListCodec<C = GzipCompressor> {
    compressor: C,
    multibase: bool,
    max_decoded_bytes: usize,
}

impl Default for StatusListCodec<GzipCompressor> {
    fn default() -> Self {
        Self::with_compressor(GzipCompressor::default())
    }
}

impl From<&CodecConfig> for StatusListCodec<GzipCompressor> {
    fn from(config: &CodecConfig) -> Self {
        Self::with_compressor(GzipCompressor::new(config.compression_level))
            .multibase(config.multibase)
            .max_decoded_bytes(config.max_decoded_bytes)
    }
}

impl<C: Compressor> StatusListCodec<C> {
    pub fn with_compressor(compressor: C) -> Self {
        Self {
            compressor,
            multibase: false,
            max_decoded_bytes: DEFAULT_MAX_DECODED_BYTES,
        }
    }

    pub fn multibase(mut self, multibase: bool) -> Self {
        self.multibase = multibase;
        self
    }

    pub fn max_decoded_bytes(mut self, max_decoded_bytes: usize) -> Self {
        self.max_decoded_bytes = max_decoded_bytes;
        self
    }

    /// Encodes a status list.
    pub fn encode(&self, list: &StatusList) -> Result<String, StatusListError> {
        let compressed = self
            .compressor
            .compress(&list.to_bytes())
            .map_err(|e| StatusListError::CompressionError(e.to_string()))?;
        let encoded = URL_SAFE_NO_PAD.encode(compressed);
        if self.multibase {
            Ok(format!("{MULTIBASE_BASE64URL_PREFIX}{encoded}"))
        } else {
            Ok(encoded)
        }
    }

    /// Encodes `bits` as a list of `length` entries.
    pub fn encode_bits(&self, bits: &[bool], length: usize) -> Result<String, StatusListError> {
        self.encode(&StatusList::from_bits(bits, length)?)
    }

    /// Decodes an encoded list.
    ///
    /// The decoded length is a whole number of bytes; callers that know the
    /// true list size must ignore trailing pad bits, which are always clear.
    pub fn decode(&self, encoded: &str) -> Result<StatusList, StatusListError> {
        let encoded = match encoded.strip_prefix(MULTIBASE_BASE64URL_PREFIX) {
            Some(stripped) if self.multibase => stripped,
            _ => encoded,
        };
        if encoded.is_empty() {
            return Err(StatusListError::MalformedEncoding(
                "encoded list is empty".to_string(),
            ));
        }
        let compressed = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| StatusListError::MalformedEncoding(e.to_string()))?;
        let bytes = self
            .compressor
            .decompress(&compressed, self.max_decoded_bytes)
            .map_err(|e| StatusListError::DecompressionError(e.to_string()))?;
        if bytes.is_empty() {
            return Err(StatusListError::DecompressionError(
                "decompressed list is empty".to_string(),
            ));
        }
        Ok(StatusList::from_bytes(&bytes))
    }
}

/// Encodes `bits` as a list of `length` entries with the default GZIP codec.
pub fn encode(bits: &[bool], length: usize) -> Result<String, StatusListError> {
    StatusListCodec::<GzipCompressor>::default().encode_bits(bits, length)
}

/// Decodes an encoded list with the default GZIP codec.
pub fn decode(encoded: &str) -> Result<StatusList, StatusListError> {
    StatusListCodec::<GzipCompressor>::default().decode(encoded)
}

/// Gets the status at `index` of `list`.
pub fn get_status(list: &StatusList, index: i64) -> Result<bool, StatusListError> {
    list.get_status(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{CompressionError, MockCompressor};
    use crate::data::{TEST_ENCODED_LIST_NO_REVOCATIONS, TEST_ENCODED_LIST_ONE_REVOCATION};
    use crate::DEFAULT_STATUS_LIST_SIZE;
    use rand::{Rng, RngCore};

    fn is_base64url(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[test]
    fn test_encode_matches_reference_vector() {
        let encoded = encode(&[false, true, false, false], DEFAULT_STATUS_LIST_SIZE).unwrap();
        assert_eq!(encoded, TEST_ENCODED_LIST_ONE_REVOCATION);
    }

    #[test]
    fn test_decode_reference_vectors() {
        let list = decode(TEST_ENCODED_LIST_ONE_REVOCATION).unwrap();
        assert_eq!(list.len(), DEFAULT_STATUS_LIST_SIZE);
        assert!(!list.get_status(0).unwrap());
        assert!(list.get_status(1).unwrap());
        assert_eq!(list.asserted_indices().collect::<Vec<_>>(), vec![1]);

        let list = decode(TEST_ENCODED_LIST_NO_REVOCATIONS).unwrap();
        assert_eq!(list.len(), DEFAULT_STATUS_LIST_SIZE);
        assert_eq!(list.asserted_indices().count(), 0);
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let length = rng.gen_range(1..4096);
            let bits: Vec<bool> = (0..length).map(|_| rng.gen_bool(0.1)).collect();
            let decoded = decode(&encode(&bits, length).unwrap()).unwrap();
            // Decoding yields whole bytes; pad bits are clear.
            assert_eq!(decoded.len(), (length + 7) / 8 * 8);
            for (index, bit) in bits.iter().enumerate() {
                assert_eq!(decoded.get_status(index as i64).unwrap(), *bit);
            }
            for index in length..decoded.len() {
                assert!(!decoded.get_status(index as i64).unwrap());
            }
        }
    }

    #[test]
    fn test_round_trip_byte_aligned() {
        let mut list = StatusList::new(1024).unwrap();
        for index in [0, 7, 8, 511, 1023] {
            list.set_status(index, true).unwrap();
        }
        let codec = StatusListCodec::<GzipCompressor>::default();
        assert_eq!(codec.decode(&codec.encode(&list).unwrap()).unwrap(), list);
    }

    #[test]
    fn test_encode_deterministic() {
        let bits: Vec<bool> = (0..8192).map(|i| i % 3 == 0).collect();
        assert_eq!(encode(&bits, 8192).unwrap(), encode(&bits, 8192).unwrap());
    }

    #[test]
    fn test_encode_alphabet() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let bits: Vec<bool> = (0..2048).map(|_| rng.gen()).collect();
            let encoded = encode(&bits, 2048).unwrap();
            assert!(is_base64url(&encoded), "unexpected character in {encoded}");
        }
    }

    #[test]
    fn test_encode_invalid_length() {
        assert!(matches!(
            encode(&[], 0),
            Err(StatusListError::InvalidLength(_))
        ));
        assert!(matches!(
            encode(&[true, false, true], 2),
            Err(StatusListError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_encode_missing_entries_default_clear() {
        let list = decode(&encode(&[true], 16).unwrap()).unwrap();
        assert_eq!(list.asserted_indices().collect::<Vec<_>>(), vec![0]);
        assert_eq!(list.len(), 16);
    }

    #[test]
    fn test_get_status_boundaries() {
        let list = StatusList::from_bits(&[true], 64).unwrap();
        assert!(get_status(&list, 0).unwrap());
        assert!(!get_status(&list, 63).unwrap());
        assert!(matches!(
            get_status(&list, -1),
            Err(StatusListError::IndexOutOfRange {
                index: -1,
                length: 64
            })
        ));
        assert!(matches!(
            get_status(&list, 64),
            Err(StatusListError::IndexOutOfRange {
                index: 64,
                length: 64
            })
        ));
    }

    #[test]
    fn test_set_status_out_of_range() {
        let mut list = StatusList::new(8).unwrap();
        assert!(matches!(
            list.set_status(8, true),
            Err(StatusListError::IndexOutOfRange { .. })
        ));
        assert_eq!(list, StatusList::new(8).unwrap());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(
            decode("not-valid-base64!!"),
            Err(StatusListError::MalformedEncoding(_))
        ));
        assert!(matches!(
            decode(""),
            Err(StatusListError::MalformedEncoding(_))
        ));
        // Standard alphabet and padding are rejected.
        assert!(matches!(
            decode("H4sI+/8="),
            Err(StatusListError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_decode_random_bytes() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let mut bytes = [0u8; 64];
            rng.fill_bytes(&mut bytes);
            // Never a GZIP magic number.
            bytes[0] = 0;
            let encoded = URL_SAFE_NO_PAD.encode(bytes);
            assert!(matches!(
                decode(&encoded),
                Err(StatusListError::DecompressionError(_))
            ));
        }
    }

    #[test]
    fn test_decode_truncated() {
        let encoded = encode(&[true; 100], 4096).unwrap();
        let compressed = URL_SAFE_NO_PAD.decode(&encoded).unwrap();
        let truncated = URL_SAFE_NO_PAD.encode(&compressed[..compressed.len() - 4]);
        assert!(matches!(
            decode(&truncated),
            Err(StatusListError::DecompressionError(_))
        ));
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let encoded = encode(&[false, true], DEFAULT_STATUS_LIST_SIZE).unwrap();
        let mut compressed = URL_SAFE_NO_PAD.decode(&encoded).unwrap();
        compressed.extend_from_slice(b"garbage-garbage-garbage");
        assert!(matches!(
            decode(&URL_SAFE_NO_PAD.encode(&compressed)),
            Err(StatusListError::DecompressionError(_))
        ));
    }

    #[test]
    fn test_decode_exceeds_limit() {
        let codec = StatusListCodec::<GzipCompressor>::default().max_decoded_bytes(1024);
        let encoded = encode(&[], 16 * 1024).unwrap();
        assert!(matches!(
            codec.decode(&encoded),
            Err(StatusListError::DecompressionError(_))
        ));
    }

    #[test]
    fn test_scenario_single_bit() {
        let mut list = StatusList::new(DEFAULT_STATUS_LIST_SIZE).unwrap();
        list.set_status(50, true).unwrap();
        let decoded = decode(&StatusListCodec::<GzipCompressor>::default().encode(&list).unwrap()).unwrap();
        assert!(decoded.get_status(50).unwrap());
        assert!(!decoded.get_status(49).unwrap());
        assert_eq!(decoded, list);
    }

    #[test]
    fn test_multibase() {
        let config = CodecConfig {
            multibase: true,
            ..CodecConfig::default()
        };
        let codec = StatusListCodec::<GzipCompressor>::from(&config);
        let list = StatusList::from_bits(&[false, false, true], 256).unwrap();
        let encoded = codec.encode(&list).unwrap();
        assert!(encoded.starts_with(MULTIBASE_BASE64URL_PREFIX));
        assert!(is_base64url(&encoded));
        assert_eq!(codec.decode(&encoded).unwrap(), list);
        // Unprefixed lists are still accepted.
        assert_eq!(codec.decode(&encoded[1..]).unwrap(), list);
    }

    #[test]
    fn test_pluggable_compressor() {
        let mut compressor = MockCompressor::new();
        compressor
            .expect_compress()
            .returning(|input| Ok(input.to_vec()));
        compressor
            .expect_decompress()
            .returning(|input, _| Ok(input.to_vec()));
        let codec = StatusListCodec::with_compressor(compressor);
        let list = StatusList::from_bits(&[true, false, false, false, false, false, false, true], 8)
            .unwrap();
        let encoded = codec.encode(&list).unwrap();
        // 0b1000_0001 without compression.
        assert_eq!(encoded, URL_SAFE_NO_PAD.encode([0x81u8]));
        assert_eq!(codec.decode(&encoded).unwrap(), list);
    }

    #[test]
    fn test_compressor_failure() {
        let mut compressor = MockCompressor::new();
        compressor.expect_compress().returning(|_| {
            Err(CompressionError::Compress(std::io::Error::new(
                std::io::ErrorKind::Other,
                "boom",
            )))
        });
        let codec = StatusListCodec::with_compressor(compressor);
        assert!(matches!(
            codec.encode(&StatusList::new(8).unwrap()),
            Err(StatusListError::CompressionError(_))
        ));
    }
}
