//! Scroll state for a pane of lines.

use std::ops::Range;

/// The window of lines a pane currently shows.
///
/// # Example
///
/// ```
/// use lazyview::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(10, 100);
/// vp.scroll_down(5);
/// assert_eq!(vp.visible_range(), 5..15);
/// vp.ensure_visible(40);
/// assert_eq!(vp.visible_range(), 31..41);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(height: u16, total_lines: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Line indices on screen, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset.min(end)..end
    }

    /// Scroll position as a percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        let percent = self.offset.min(max_offset) * 100 / max_offset;
        u8::try_from(percent).unwrap_or(100)
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the least amount that brings `line` on screen.
    pub const fn ensure_visible(&mut self, line: usize) {
        let height = self.height as usize;
        if line < self.offset {
            self.offset = line;
        } else if height > 0 && line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }

    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the content length, e.g. after a new render.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_content_fits() {
        let vp = Viewport::new(24, 5);
        assert_eq!(vp.visible_range(), 0..5);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_down_clamps_to_last_page() {
        let mut vp = Viewport::new(10, 25);
        vp.scroll_down(100);
        assert_eq!(vp.offset(), 15);
        assert_eq!(vp.scroll_percent(), 100);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.scroll_percent(), 0);
    }

    #[test]
    fn test_paging() {
        let mut vp = Viewport::new(10, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 10);
        vp.half_page_down();
        assert_eq!(vp.offset(), 15);
        vp.half_page_up();
        vp.page_up();
        assert_eq!(vp.offset(), 0);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 90);
        vp.go_to_top();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_ensure_visible_scrolls_minimally() {
        let mut vp = Viewport::new(10, 100);
        vp.ensure_visible(5);
        assert_eq!(vp.offset(), 0);
        vp.ensure_visible(10);
        assert_eq!(vp.offset(), 1);
        vp.ensure_visible(0);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_shrinking_content_pulls_offset_back() {
        let mut vp = Viewport::new(10, 100);
        vp.go_to_bottom();
        vp.set_total_lines(30);
        assert_eq!(vp.offset(), 20);
        vp.resize(40);
        assert_eq!(vp.offset(), 0);
    }

    proptest! {
        #[test]
        fn visible_range_within_bounds(
            total_lines in 0..10_000usize,
            height in 1..100u16,
            scroll in 0..10_000usize,
        ) {
            let mut vp = Viewport::new(height, total_lines);
            vp.scroll_down(scroll);
            let range = vp.visible_range();
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end <= total_lines);
            prop_assert!(vp.scroll_percent() <= 100);
        }

        #[test]
        fn ensure_visible_shows_the_line(
            total_lines in 1..10_000usize,
            height in 1..100u16,
            line_seed in any::<usize>(),
        ) {
            let line = line_seed % total_lines;
            let mut vp = Viewport::new(height, total_lines);
            vp.ensure_visible(line);
            prop_assert!(vp.visible_range().contains(&line));
        }
    }
}
