// Matcher capability shared by every pattern element

pub mod capture;
pub mod payload;
pub mod scalar;

pub use capture::ByteCapture;
pub use payload::PayloadMark;
pub use scalar::{Endian, NetScalar, Scalar, ScalarAssign, ScalarTest};

/// One element of a pattern: tests and/or extracts a fixed-size span of a
/// buffer.
///
/// `matches` is handed the whole buffer plus the current cursor so that
/// zero-width elements can record absolute positions. `size` depends only on
/// how the element was constructed, never on buffer contents; a size of 0
/// marks the end of the sequence.
pub trait Matcher {
    /// Test or extract at `pos`. A `false` return aborts the whole pattern.
    fn matches(&mut self, buf: &[u8], pos: usize) -> bool;

    /// Bytes the cursor advances past this element on success
    fn size(&self) -> usize;
}
