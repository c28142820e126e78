// Bit-level primitives: bit vectors, cross-byte bit reads, bit-field groups

pub mod bitvec;
pub mod group;
pub mod view;

pub use bitvec::BitVec;
pub use group::{BitFieldError, BitFieldGroup};
pub use view::BitView;
