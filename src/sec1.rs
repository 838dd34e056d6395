//! SEC1 point encoding for 256-bit curves.
//!
//! Supports the identity (a single zero byte), compressed (tag `0x02` or
//! `0x03` followed by the x-coordinate), and uncompressed (tag `0x04`
//! followed by both coordinates) forms from SEC1 section 2.3.3. The hybrid
//! form is not supported.
//!
//! Encodings carry public data, so parsing here is allowed to branch; the
//! constant-time work happens when an encoding is converted to or from a
//! point.

use crate::{Error, Result};
use core::fmt::{self, Debug};

/// Tag byte prefixing a SEC1 encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
enum Tag {
    Identity = 0,
    CompressedEvenY = 2,
    CompressedOddY = 3,
    Uncompressed = 4,
}

impl Tag {
    fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Tag::Identity),
            2 => Ok(Tag::CompressedEvenY),
            3 => Ok(Tag::CompressedOddY),
            4 => Ok(Tag::Uncompressed),
            _ => Err(Error::Decode),
        }
    }

    fn message_len(self) -> usize {
        match self {
            Tag::Identity => 1,
            Tag::CompressedEvenY | Tag::CompressedOddY => 33,
            Tag::Uncompressed => 65,
        }
    }
}

/// A SEC1-encoded point on a 256-bit curve.
///
/// This type guarantees a structurally valid encoding: a known tag byte
/// and the exact length that tag requires. It makes no claim that the
/// coordinates lie on any particular curve.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct EncodedPoint {
    bytes: [u8; 65],
    len: usize,
}

impl EncodedPoint {
    /// Parses a SEC1 encoding from a byte slice.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        let tag = Tag::from_u8(*input.first().ok_or(Error::Decode)?)?;

        if input.len() != tag.message_len() {
            return Err(Error::Decode);
        }

        let mut bytes = [0u8; 65];
        bytes[..input.len()].copy_from_slice(input);

        Ok(Self {
            bytes,
            len: input.len(),
        })
    }

    /// Encodes the identity (point at infinity).
    pub fn identity() -> Self {
        Self {
            bytes: [0u8; 65],
            len: 1,
        }
    }

    /// Builds a compressed encoding from an x-coordinate and the parity of
    /// the y-coordinate.
    pub fn from_compressed(x: &[u8; 32], y_is_odd: bool) -> Self {
        let mut bytes = [0u8; 65];
        bytes[0] = if y_is_odd {
            Tag::CompressedOddY as u8
        } else {
            Tag::CompressedEvenY as u8
        };
        bytes[1..33].copy_from_slice(x);

        Self { bytes, len: 33 }
    }

    /// Builds an uncompressed encoding from both coordinates.
    pub fn from_uncompressed(x: &[u8; 32], y: &[u8; 32]) -> Self {
        let mut bytes = [0u8; 65];
        bytes[0] = Tag::Uncompressed as u8;
        bytes[1..33].copy_from_slice(x);
        bytes[33..65].copy_from_slice(y);

        Self { bytes, len: 65 }
    }

    /// Borrows the encoding as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Returns the length of the encoding in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether this encoding is empty (it never is).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns whether this encodes the identity.
    pub fn is_identity(&self) -> bool {
        self.bytes[0] == Tag::Identity as u8
    }

    /// Returns whether this is a compressed encoding.
    pub fn is_compressed(&self) -> bool {
        matches!(
            self.bytes[0],
            b if b == Tag::CompressedEvenY as u8 || b == Tag::CompressedOddY as u8
        )
    }

    /// Splits the encoding into its coordinate content.
    pub fn coordinates(&self) -> Coordinates {
        match self.bytes[0] {
            b if b == Tag::Uncompressed as u8 => Coordinates::Uncompressed {
                x: copy32(&self.bytes[1..33]),
                y: copy32(&self.bytes[33..65]),
            },
            b if b == Tag::CompressedEvenY as u8 || b == Tag::CompressedOddY as u8 => {
                Coordinates::Compressed {
                    x: copy32(&self.bytes[1..33]),
                    y_is_odd: self.bytes[0] == Tag::CompressedOddY as u8,
                }
            }
            _ => Coordinates::Identity,
        }
    }
}

impl AsRef<[u8]> for EncodedPoint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Debug for EncodedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncodedPoint(")?;
        for byte in self.as_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        f.write_str(")")
    }
}

/// Coordinate content of a SEC1 encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coordinates {
    /// The point at infinity.
    Identity,

    /// Compressed form: x-coordinate plus the parity of y.
    Compressed {
        /// Big-endian x-coordinate.
        x: [u8; 32],
        /// Whether the y-coordinate is odd.
        y_is_odd: bool,
    },

    /// Uncompressed form: both coordinates.
    Uncompressed {
        /// Big-endian x-coordinate.
        x: [u8; 32],
        /// Big-endian y-coordinate.
        y: [u8; 32],
    },
}

fn copy32(slice: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(slice);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn identity_round_trip() {
        let point = EncodedPoint::from_bytes(&[0]).unwrap();
        assert!(point.is_identity());
        assert_eq!(point.as_bytes(), &[0]);
        assert_eq!(point.coordinates(), Coordinates::Identity);
        assert_eq!(point, EncodedPoint::identity());
    }

    #[test]
    fn compressed_round_trip() {
        let x = hex!("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7");
        let point = EncodedPoint::from_compressed(&x, false);
        assert_eq!(point.len(), 33);
        assert!(point.is_compressed());
        assert_eq!(point.as_bytes()[0], 2);
        assert_eq!(
            point.coordinates(),
            Coordinates::Compressed { x, y_is_odd: false }
        );
        assert_eq!(EncodedPoint::from_bytes(point.as_bytes()).unwrap(), point);
    }

    #[test]
    fn uncompressed_round_trip() {
        let x = hex!("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7");
        let y = hex!("BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0");
        let point = EncodedPoint::from_uncompressed(&x, &y);
        assert_eq!(point.len(), 65);
        assert!(!point.is_compressed());
        assert_eq!(point.coordinates(), Coordinates::Uncompressed { x, y });
        assert_eq!(EncodedPoint::from_bytes(point.as_bytes()).unwrap(), point);
    }

    #[test]
    fn rejects_malformed_encodings() {
        // empty
        assert_eq!(EncodedPoint::from_bytes(&[]), Err(Error::Decode));
        // unknown tags (including hybrid)
        for tag in [1u8, 5, 6, 7, 0xff] {
            let mut bytes = [0u8; 65];
            bytes[0] = tag;
            assert_eq!(EncodedPoint::from_bytes(&bytes), Err(Error::Decode));
        }
        // wrong lengths for each tag
        assert_eq!(EncodedPoint::from_bytes(&[0, 0]), Err(Error::Decode));
        assert_eq!(EncodedPoint::from_bytes(&[2; 65]), Err(Error::Decode));
        assert_eq!(EncodedPoint::from_bytes(&[4; 33]), Err(Error::Decode));
    }
}
