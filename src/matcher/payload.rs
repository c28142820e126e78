// Zero-width terminal marker: everything from here on is payload

use super::Matcher;

/// Records the cursor position where the declared header ends.
///
/// Always succeeds and consumes nothing; a pattern stops evaluating at the
/// first zero-sized element, so this must be the last element of its
/// sequence. Anything declared after it is never reached. The caller turns
/// the recorded offset back into a slice with `&buf[pos..]`, which ties the
/// payload's lifetime to the buffer it came from.
pub struct PayloadMark<'a> {
    target: &'a mut Option<usize>,
}

impl<'a> PayloadMark<'a> {
    pub fn new(target: &'a mut Option<usize>) -> Self {
        Self { target }
    }
}

impl Matcher for PayloadMark<'_> {
    fn matches(&mut self, _buf: &[u8], pos: usize) -> bool {
        *self.target = Some(pos);
        true
    }

    fn size(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_position() {
        let mut at = None;
        let mut m = PayloadMark::new(&mut at);
        assert!(m.matches(&[1, 2, 3, 4], 3));
        assert_eq!(m.size(), 0);
        drop(m);
        assert_eq!(at, Some(3));
    }

    #[test]
    fn test_rerecords_on_each_match() {
        let mut at = None;
        let mut m = PayloadMark::new(&mut at);
        assert!(m.matches(&[0; 8], 2));
        assert!(m.matches(&[0; 8], 5));
        drop(m);
        assert_eq!(at, Some(5));
    }
}
