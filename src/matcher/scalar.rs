// Fixed-width scalar matchers: literal equality tests and extractions

use super::Matcher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte order applied when extracting a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endian {
    /// Store the bytes as the host reads them
    Native,
    /// Reverse from network (big-endian) order to host order
    Network,
}

impl Endian {
    pub fn is_network(&self) -> bool {
        matches!(self, Endian::Network)
    }
}

impl Default for Endian {
    fn default() -> Self {
        Endian::Native
    }
}

/// A fixed-width integer that can be read straight out of a frame.
///
/// `WIDTH` is the number of bytes consumed; it never depends on the buffer.
pub trait Scalar: Copy + PartialEq + fmt::Debug {
    const WIDTH: usize;

    /// Read `WIDTH` bytes at the start of `buf` in native byte order
    fn from_ne_buf(buf: &[u8]) -> Self;

    /// Convert a value read as network order to host order
    fn net_to_host(self) -> Self;
}

/// Scalars with a defined network byte order conversion.
///
/// Network order only exists for the 2- and 4-byte widths; asking for it on
/// a single byte is a programming error, ruled out here at compile time.
pub trait NetScalar: Scalar {}

impl Scalar for u8 {
    const WIDTH: usize = 1;

    fn from_ne_buf(buf: &[u8]) -> Self {
        buf[0]
    }

    fn net_to_host(self) -> Self {
        self
    }
}

impl Scalar for i8 {
    const WIDTH: usize = 1;

    fn from_ne_buf(buf: &[u8]) -> Self {
        buf[0] as i8
    }

    fn net_to_host(self) -> Self {
        self
    }
}

impl Scalar for u16 {
    const WIDTH: usize = 2;

    fn from_ne_buf(buf: &[u8]) -> Self {
        u16::from_ne_bytes([buf[0], buf[1]])
    }

    fn net_to_host(self) -> Self {
        u16::from_be(self)
    }
}

impl Scalar for i16 {
    const WIDTH: usize = 2;

    fn from_ne_buf(buf: &[u8]) -> Self {
        i16::from_ne_bytes([buf[0], buf[1]])
    }

    fn net_to_host(self) -> Self {
        i16::from_be(self)
    }
}

impl Scalar for u32 {
    const WIDTH: usize = 4;

    fn from_ne_buf(buf: &[u8]) -> Self {
        u32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]])
    }

    fn net_to_host(self) -> Self {
        u32::from_be(self)
    }
}

impl Scalar for i32 {
    const WIDTH: usize = 4;

    fn from_ne_buf(buf: &[u8]) -> Self {
        i32::from_ne_bytes([buf[0], buf[1], buf[2], buf[3]])
    }

    fn net_to_host(self) -> Self {
        i32::from_be(self)
    }
}

impl NetScalar for u16 {}
impl NetScalar for i16 {}
impl NetScalar for u32 {}
impl NetScalar for i32 {}

/// Tests the bytes at the cursor for bit-exact equality with a literal.
///
/// The comparison is done in native byte order; literals for big-endian
/// wire fields are built with `from_ne_bytes` over the wire bytes.
pub struct ScalarTest<T: Scalar> {
    expected: T,
}

impl<T: Scalar> ScalarTest<T> {
    pub fn new(expected: T) -> Self {
        Self { expected }
    }
}

impl<T: Scalar> Matcher for ScalarTest<T> {
    fn matches(&mut self, buf: &[u8], pos: usize) -> bool {
        T::from_ne_buf(&buf[pos..]) == self.expected
    }

    fn size(&self) -> usize {
        T::WIDTH
    }
}

/// Extracts the scalar at the cursor into caller-owned storage.
///
/// Extraction always succeeds; the only question is what byte order the
/// stored value ends up in.
pub struct ScalarAssign<'a, T: Scalar> {
    target: &'a mut T,
    endian: Endian,
}

impl<'a, T: Scalar> ScalarAssign<'a, T> {
    /// Store the value as read, without conversion
    pub fn native(target: &'a mut T) -> Self {
        Self {
            target,
            endian: Endian::Native,
        }
    }
}

impl<'a, T: NetScalar> ScalarAssign<'a, T> {
    /// Convert from network order before storing
    pub fn network(target: &'a mut T) -> Self {
        Self {
            target,
            endian: Endian::Network,
        }
    }
}

impl<T: Scalar> Matcher for ScalarAssign<'_, T> {
    fn matches(&mut self, buf: &[u8], pos: usize) -> bool {
        let raw = T::from_ne_buf(&buf[pos..]);
        *self.target = match self.endian {
            Endian::Native => raw,
            Endian::Network => raw.net_to_host(),
        };
        true
    }

    fn size(&self) -> usize {
        T::WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endian_flags() {
        assert!(Endian::Network.is_network());
        assert!(!Endian::Native.is_network());
        assert_eq!(Endian::default(), Endian::Native);
    }

    #[test]
    fn test_literal_equality() {
        let bytes = 0x1234u16.to_ne_bytes();
        let mut m = ScalarTest::new(0x1234u16);
        assert!(m.matches(&bytes, 0));
        assert_eq!(m.size(), 2);

        let mut m = ScalarTest::new(0x4321u16);
        assert!(!m.matches(&bytes, 0));
    }

    #[test]
    fn test_literal_at_position() {
        let mut buf = vec![0u8; 3];
        buf[1..3].copy_from_slice(&0x0a0bu16.to_ne_bytes());
        let mut m = ScalarTest::new(0x0a0bu16);
        assert!(m.matches(&buf, 1));
    }

    #[test]
    fn test_assign_native_roundtrip() {
        let bytes = 0xdeadbeefu32.to_ne_bytes();
        let mut target = 0u32;
        let mut m = ScalarAssign::native(&mut target);
        assert!(m.matches(&bytes, 0));
        assert_eq!(m.size(), 4);
        drop(m);
        assert_eq!(target, 0xdeadbeef);
    }

    #[test]
    fn test_assign_network_u16() {
        // On a little-endian host a naive read of {0x01, 0x00} gives 1;
        // network order must yield 256 on every host.
        let mut target = 0u16;
        let mut m = ScalarAssign::network(&mut target);
        assert!(m.matches(&[0x01, 0x00], 0));
        drop(m);
        assert_eq!(target, 256);
    }

    #[test]
    fn test_assign_network_u32() {
        let mut target = 0u32;
        let mut m = ScalarAssign::network(&mut target);
        assert!(m.matches(&[0x12, 0x34, 0x56, 0x78], 0));
        drop(m);
        assert_eq!(target, 0x12345678);
    }

    #[test]
    fn test_assign_signed() {
        let bytes = (-2i16).to_ne_bytes();
        let mut target = 0i16;
        let mut m = ScalarAssign::native(&mut target);
        assert!(m.matches(&bytes, 0));
        drop(m);
        assert_eq!(target, -2);

        let mut target = 0i16;
        let mut m = ScalarAssign::network(&mut target);
        assert!(m.matches(&[0xFF, 0xFE], 0));
        drop(m);
        assert_eq!(target, -2);
    }

    #[test]
    fn test_single_byte_scalars() {
        let mut m = ScalarTest::new(0x7fu8);
        assert!(m.matches(&[0x7f], 0));
        assert_eq!(m.size(), 1);

        let mut target = 0i8;
        let mut m = ScalarAssign::native(&mut target);
        assert!(m.matches(&[0xFE], 0));
        drop(m);
        assert_eq!(target, -2);
    }
}
