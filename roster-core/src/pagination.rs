//! Fixed-size windowing over the accumulated record list.
//!
//! Windows are independent of the remote page size: window `c` always covers
//! indices `[(c-1)*size, c*size)` of the accumulated list, clipped to what has
//! been fetched so far.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

/// 1-based index of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageCursor(NonZeroUsize);

impl PageCursor {
    pub const FIRST: PageCursor = PageCursor(NonZeroUsize::MIN);

    /// `None` for 0.
    pub fn new(index: usize) -> Option<Self> {
        NonZeroUsize::new(index).map(PageCursor)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn next(self) -> Self {
        PageCursor(self.0.saturating_add(1))
    }

    pub fn prev(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unclipped index range of window `cursor`.
pub fn window_bounds(cursor: PageCursor, size: NonZeroUsize) -> Range<usize> {
    let size = size.get();
    let start = (cursor.get() - 1).saturating_mul(size);
    start..start.saturating_add(size)
}

/// Records visible at `cursor`, clipped to the available length.
pub fn window<T>(items: &[T], cursor: PageCursor, size: NonZeroUsize) -> &[T] {
    let Range { start, end } = window_bounds(cursor, size);
    let end = end.min(items.len());
    let start = start.min(end);
    &items[start..end]
}

/// True when the next window already has at least one record, i.e. the list
/// holds more than the current window's upper bound.
pub fn has_next_window(len: usize, cursor: PageCursor, size: NonZeroUsize) -> bool {
    len > window_bounds(cursor, size).end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four() -> NonZeroUsize {
        NonZeroUsize::new(4).unwrap()
    }

    #[test]
    fn bounds_follow_cursor() {
        assert_eq!(window_bounds(PageCursor::FIRST, four()), 0..4);
        assert_eq!(window_bounds(PageCursor::new(3).unwrap(), four()), 8..12);
    }

    #[test]
    fn window_clips_to_available_length() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(window(&items, PageCursor::FIRST, four()), &[0, 1, 2, 3]);
        assert_eq!(window(&items, PageCursor::new(3).unwrap(), four()), &[8, 9]);
        assert!(window(&items, PageCursor::new(4).unwrap(), four()).is_empty());
    }

    #[test]
    fn window_matches_bounds_for_every_cursor() {
        let items: Vec<usize> = (0..23).collect();
        for c in 1..=8 {
            let cursor = PageCursor::new(c).unwrap();
            let expected: Vec<usize> =
                ((c - 1) * 4..(c * 4).min(items.len())).collect();
            assert_eq!(window(&items, cursor, four()), expected.as_slice());
        }
    }

    #[test]
    fn next_window_requires_more_than_upper_bound() {
        assert!(!has_next_window(4, PageCursor::FIRST, four()));
        assert!(has_next_window(5, PageCursor::FIRST, four()));
        assert!(!has_next_window(8, PageCursor::new(2).unwrap(), four()));
    }

    #[test]
    fn cursor_never_goes_below_one() {
        assert!(PageCursor::new(0).is_none());
        assert!(PageCursor::FIRST.prev().is_none());
        assert_eq!(PageCursor::FIRST.next().prev(), Some(PageCursor::FIRST));
    }
}
