// Ordered matcher sequence evaluated over one buffer with a running cursor

use crate::bitwise::{BitFieldGroup, BitVec, BitView};
use crate::matcher::{
    ByteCapture, Matcher, NetScalar, PayloadMark, Scalar, ScalarAssign, ScalarTest,
};

/// A declared frame layout: matcher elements evaluated left to right.
///
/// Built once via [`PatternBuilder`], then matched any number of times.
/// Targets referenced by the elements stay mutably borrowed until the
/// pattern is dropped.
pub struct Pattern<'a> {
    elements: Vec<Box<dyn Matcher + 'a>>,
}

impl<'a> Pattern<'a> {
    pub fn builder() -> PatternBuilder<'a> {
        PatternBuilder::new()
    }

    /// Total bytes the pattern advances over a matching buffer
    pub fn size(&self) -> usize {
        self.elements.iter().map(|e| e.size()).sum()
    }

    /// Run the sequence against `buf`.
    ///
    /// Elements run in declaration order; the first `false` aborts the whole
    /// match and nothing after it is evaluated. A zero-sized element ends
    /// the sequence successfully. Writes made by elements before a failure
    /// are not rolled back: after a failed match, earlier targets hold the
    /// partially extracted values.
    ///
    /// Panics if `buf` is shorter than [`size`](Self::size); the caller
    /// guarantees the buffer covers the declared layout.
    pub fn matches(&mut self, buf: &[u8]) -> bool {
        let mut pos = 0;
        for (index, element) in self.elements.iter_mut().enumerate() {
            if !element.matches(buf, pos) {
                tracing::debug!("pattern mismatch at element {} (byte offset {})", index, pos);
                return false;
            }
            let incr = element.size();
            if incr == 0 {
                tracing::trace!("payload marker hit at byte offset {}", pos);
                return true;
            }
            pos += incr;
        }
        true
    }
}

/// Assembles a [`Pattern`] from intent-explicit element constructors.
///
/// Each call appends one element; argument order is match order.
#[derive(Default)]
pub struct PatternBuilder<'a> {
    elements: Vec<Box<dyn Matcher + 'a>>,
}

impl<'a> PatternBuilder<'a> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Require the scalar at the cursor to equal `value` (native byte order)
    pub fn literal<T: Scalar + 'a>(mut self, value: T) -> Self {
        self.elements.push(Box::new(ScalarTest::new(value)));
        self
    }

    /// Extract the scalar at the cursor into `target` as the host reads it
    pub fn assign_into<T: Scalar + 'a>(mut self, target: &'a mut T) -> Self {
        self.elements.push(Box::new(ScalarAssign::native(target)));
        self
    }

    /// Extract the scalar at the cursor into `target`, converting from
    /// network byte order
    pub fn assign_net_into<T: NetScalar + 'a>(mut self, target: &'a mut T) -> Self {
        self.elements.push(Box::new(ScalarAssign::network(target)));
        self
    }

    /// Copy the next `N` raw bytes into `target`
    pub fn capture_into<const N: usize>(mut self, target: &'a mut [u8; N]) -> Self {
        self.elements.push(Box::new(ByteCapture::new(target)));
        self
    }

    /// Read `target.width()` bits at the cursor into `target`.
    ///
    /// The width should be a whole number of bytes here; narrower vectors
    /// belong inside a [`BitFieldGroup`].
    pub fn bits_into(mut self, target: &'a mut BitVec) -> Self {
        self.elements.push(Box::new(BitView::new(target)));
        self
    }

    /// Decode a byte-aligned bit-field group at the cursor
    pub fn bit_field(mut self, group: BitFieldGroup<'a>) -> Self {
        self.elements.push(Box::new(group));
        self
    }

    /// End the sequence here and record the cursor as the payload start
    pub fn payload_into(mut self, target: &'a mut Option<usize>) -> Self {
        self.elements.push(Box::new(PayloadMark::new(target)));
        self
    }

    pub fn build(self) -> Pattern<'a> {
        Pattern {
            elements: self.elements,
        }
    }
}
