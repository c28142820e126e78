// Byte-aligned cluster of bit fields decoded from one combined read

use super::bitvec::BitVec;
use super::view::BitView;
use crate::matcher::Matcher;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitFieldError {
    #[error("bit field of {0} bits is not aligned on an octet")]
    Misaligned(usize),
}

pub type Result<T> = std::result::Result<T, BitFieldError>;

/// Decodes one byte-aligned extent into several independently-sized bit
/// fields in declaration order.
///
/// The first member receives the lowest bits of the extent: against the
/// single byte `0b0010_1010`, members of width (4, 4) come out as `1010`
/// and `0010`.
///
/// The extent is read once into a scratch vector and then sliced per member,
/// so all members see a single consistent snapshot of the source bytes.
#[derive(Debug)]
pub struct BitFieldGroup<'a> {
    members: Vec<BitView<'a>>,
    total_bits: usize,
}

impl<'a> BitFieldGroup<'a> {
    /// Build a group over the given bit vectors, in declaration order.
    ///
    /// Each member's width is taken from its vector. The summed width must
    /// be a multiple of 8.
    pub fn new(targets: Vec<&'a mut BitVec>) -> Result<Self> {
        let total_bits: usize = targets.iter().map(|t| t.width()).sum();
        if total_bits % 8 != 0 {
            return Err(BitFieldError::Misaligned(total_bits));
        }

        Ok(Self {
            members: targets.into_iter().map(BitView::new).collect(),
            total_bits,
        })
    }

    /// Summed width of all members in bits
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Decode the extent at the start of `buf` into every member
    pub fn read(&mut self, buf: &[u8]) -> bool {
        let mut scratch = BitVec::new(self.total_bits);
        if !BitView::new(&mut scratch).read(buf, 0) {
            return false;
        }

        let mut offset = 0;
        for member in &mut self.members {
            member.fill_from(&scratch, offset);
            offset += member.width();
        }
        true
    }
}

impl Matcher for BitFieldGroup<'_> {
    fn matches(&mut self, buf: &[u8], pos: usize) -> bool {
        self.read(&buf[pos..])
    }

    fn size(&self) -> usize {
        self.total_bits / 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_one_byte() {
        let mut lo = BitVec::new(4);
        let mut hi = BitVec::new(4);
        let mut group = BitFieldGroup::new(vec![&mut lo, &mut hi]).unwrap();

        assert_eq!(group.size(), 1);
        assert!(group.read(&[42]));
        drop(group);

        assert_eq!(lo.to_string(), "1010");
        assert_eq!(hi.to_string(), "0010");
    }

    #[test]
    fn test_sizes() {
        let mut a = BitVec::new(8);
        let mut b = BitVec::new(8);
        let group = BitFieldGroup::new(vec![&mut a, &mut b]).unwrap();
        assert_eq!(group.total_bits(), 16);
        assert_eq!(group.size(), 2);

        let mut c = BitVec::new(4);
        let mut d = BitVec::new(4);
        let mut e = BitVec::new(8);
        let group = BitFieldGroup::new(vec![&mut c, &mut d, &mut e]).unwrap();
        assert_eq!(group.size(), 2);
    }

    #[test]
    fn test_misaligned_rejected() {
        let mut a = BitVec::new(4);
        let mut b = BitVec::new(3);
        let err = BitFieldGroup::new(vec![&mut a, &mut b]).unwrap_err();
        assert!(matches!(err, BitFieldError::Misaligned(7)));
    }

    #[test]
    fn test_member_spanning_byte_boundary() {
        let mut lo = BitVec::new(4);
        let mut wide = BitVec::new(12);
        let mut group = BitFieldGroup::new(vec![&mut lo, &mut wide]).unwrap();

        assert!(group.read(&[0x2a, 0xFF]));
        drop(group);

        assert_eq!(lo.to_string(), "1010");
        assert_eq!(wide.to_string(), "111111110010");
        assert_eq!(wide.value(), 0xFF2);
    }

    #[test]
    fn test_as_matcher_reads_at_position() {
        let mut lo = BitVec::new(4);
        let mut hi = BitVec::new(4);
        let mut group = BitFieldGroup::new(vec![&mut lo, &mut hi]).unwrap();

        assert!(group.matches(&[0x00, 0x00, 42], 2));
        drop(group);

        assert_eq!(lo.to_string(), "1010");
        assert_eq!(hi.to_string(), "0010");
    }
}
