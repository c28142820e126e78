// Pattern sequences: ordered matcher lists with a builder

pub mod sequence;

pub use sequence::{Pattern, PatternBuilder};
