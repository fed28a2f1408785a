//! Pagination cursor over a result set.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Tracks how many results of the current result set have been revealed
///
/// Invariant: `0 <= revealed <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    page_size: NonZeroUsize,
    total: usize,
    revealed: usize,
}

impl Cursor {
    /// Create a cursor over an empty result set
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            total: 0,
            revealed: 0,
        }
    }

    /// Start over on a new result set of `total` items, revealing one page
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.revealed = self.page_size.get().min(total);
    }

    /// Reveal one more page
    ///
    /// Returns the range of newly revealed indices, or `None` when everything
    /// is already revealed (the cursor is left unchanged).
    pub fn advance(&mut self) -> Option<Range<usize>> {
        if self.revealed >= self.total {
            return None;
        }

        let start = self.revealed;
        self.revealed = self.revealed.saturating_add(self.page_size.get()).min(self.total);
        Some(start..self.revealed)
    }

    /// Results not yet revealed
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.revealed)
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Indices currently on screen
    pub fn visible_range(&self) -> Range<usize> {
        0..self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cursor(page_size: usize) -> Cursor {
        Cursor::new(NonZeroUsize::new(page_size).unwrap())
    }

    #[test]
    fn test_five_books_page_of_two() {
        let mut c = cursor(2);

        c.reset(5);
        assert_eq!((c.revealed(), c.remaining()), (2, 3));

        assert_eq!(c.advance(), Some(2..4));
        assert_eq!((c.revealed(), c.remaining()), (4, 1));

        assert_eq!(c.advance(), Some(4..5));
        assert_eq!((c.revealed(), c.remaining()), (5, 0));

        assert_eq!(c.advance(), None);
        assert_eq!((c.revealed(), c.remaining()), (5, 0));
        assert!(!c.has_more());
    }

    #[test]
    fn test_reset_smaller_than_page() {
        let mut c = cursor(36);
        c.reset(3);
        assert_eq!(c.revealed(), 3);
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.advance(), None);
    }

    #[test]
    fn test_empty_result_set() {
        let mut c = cursor(4);
        c.reset(0);
        assert_eq!(c.revealed(), 0);
        assert_eq!(c.visible_range(), 0..0);
        assert_eq!(c.advance(), None);
    }

    #[test]
    fn test_reset_after_advance_starts_over() {
        let mut c = cursor(2);
        c.reset(10);
        c.advance();
        c.advance();
        assert_eq!(c.revealed(), 6);

        c.reset(7);
        assert_eq!(c.revealed(), 2);
        assert_eq!(c.total(), 7);
        assert_eq!(c.page_size(), 2);
    }

    #[test]
    fn test_new_cursor_is_empty() {
        let c = cursor(5);
        assert_eq!(c.revealed(), 0);
        assert_eq!(c.remaining(), 0);
    }

    proptest! {
        #[test]
        fn prop_reset_is_idempotent(page in 1usize..50, total in 0usize..500) {
            let mut once = cursor(page);
            once.reset(total);

            let mut twice = cursor(page);
            twice.reset(total);
            twice.reset(total);

            prop_assert_eq!(once, twice);
            prop_assert_eq!(once.revealed(), page.min(total));
        }

        #[test]
        fn prop_advance_shrinks_remaining_by_page(page in 1usize..50, total in 0usize..500) {
            let mut c = cursor(page);
            c.reset(total);

            loop {
                prop_assert!(c.revealed() <= c.total());
                let before = c.remaining();
                match c.advance() {
                    Some(range) => {
                        prop_assert_eq!(range.len(), page.min(before));
                        prop_assert_eq!(c.remaining(), before - page.min(before));
                    }
                    None => {
                        prop_assert_eq!(before, 0);
                        break;
                    }
                }
            }
            prop_assert_eq!(c.revealed(), total);
        }
    }
}
