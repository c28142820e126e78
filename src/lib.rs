// BINMATCH: declarative matching and decoding of fixed-layout binary frames
// Copyright 2025 - Licensed under MIT

pub mod bitwise;
pub mod matcher;
pub mod pattern;

// Re-export commonly used types
pub use bitwise::{BitFieldError, BitFieldGroup, BitVec, BitView};
pub use matcher::{ByteCapture, Endian, Matcher, NetScalar, PayloadMark, Scalar, ScalarAssign, ScalarTest};
pub use pattern::{Pattern, PatternBuilder};

/// BINMATCH version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
