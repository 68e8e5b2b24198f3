//! Secret data with an explicit length.
//!
//! Bits are produced most significant first. Zero bytes are ordinary data, there
//! is no terminator. The optional length frame prefixes the bytes with a 32 bit
//! big endian byte count so that an image can be unveiled without knowing the
//! payload size up front.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::error::{Result, StegoError};

/// Bits occupied by the length header of a framed payload.
pub const LENGTH_HEADER_BITS: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    bytes: Vec<u8>,
}

impl Payload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// All bits of the payload, most significant bit of each byte first.
    pub fn bits(&self) -> Result<Vec<bool>> {
        let mut reader = BitReader::endian(self.bytes.as_slice(), BigEndian);
        let mut bits = Vec::with_capacity(self.bit_len());
        for _ in 0..self.bit_len() {
            bits.push(reader.read_bit()?);
        }

        Ok(bits)
    }

    /// Packs bits (most significant first) into bytes, a trailing partial byte
    /// is padded with zero bits.
    pub fn from_bits(bits: &[bool]) -> Result<Self> {
        let mut writer = BitWriter::endian(Vec::with_capacity(bits.len().div_ceil(8)), BigEndian);
        for &bit in bits {
            writer.write_bit(bit)?;
        }
        writer.byte_align()?;

        Ok(Self::new(writer.into_writer()))
    }

    /// The payload prefixed with its byte length as 32 bit big endian integer.
    pub fn framed(&self) -> Result<Payload> {
        let len = u32::try_from(self.len()).map_err(|_| StegoError::PayloadTooLarge {
            required: self.bit_len(),
            available: u32::MAX as usize * 8,
        })?;

        let mut framed = Vec::with_capacity(self.len() + LENGTH_HEADER_BITS / 8);
        framed.write_u32::<byteorder::BigEndian>(len)?;
        framed.extend_from_slice(&self.bytes);

        Ok(Payload::new(framed))
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::new(text.as_bytes())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::new(bytes)
    }
}

/// Reads the byte length announced by the header of a framed payload.
pub fn parse_length_header(mut header: &[u8]) -> Result<usize> {
    let len = header.read_u32::<byteorder::BigEndian>()?;
    Ok(len as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_bits_msb_first() {
        let bits = Payload::new(vec![0x41]).bits().unwrap();

        assert_eq!(
            bits,
            vec![false, true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn should_keep_zero_bytes() {
        let payload = Payload::new(vec![0x00, b'A', 0x00]);

        assert_eq!(payload.len(), 3);
        assert_eq!(payload.bit_len(), 24);
        assert_eq!(Payload::from_bits(&payload.bits().unwrap()).unwrap(), payload);
    }

    #[test]
    fn should_pad_a_partial_byte_with_zeros() {
        let payload = Payload::from_bits(&[true, false, true]).unwrap();

        assert_eq!(payload.as_bytes(), &[0b1010_0000]);
    }

    #[test]
    fn empty_payload_has_no_bits() {
        let payload = Payload::default();

        assert!(payload.is_empty());
        assert!(payload.bits().unwrap().is_empty());
        assert!(Payload::from_bits(&[]).unwrap().is_empty());
    }

    #[test]
    fn framed_payload_starts_with_its_length() {
        let framed = Payload::from("Hello World!").framed().unwrap();

        assert_eq!(&framed.as_bytes()[..4], &[0, 0, 0, 12]);
        assert_eq!(&framed.as_bytes()[4..], b"Hello World!");
        assert_eq!(parse_length_header(framed.as_bytes()).unwrap(), 12);
    }

    #[test]
    fn should_fail_on_a_short_header() {
        assert!(parse_length_header(&[0, 1]).is_err());
    }
}
