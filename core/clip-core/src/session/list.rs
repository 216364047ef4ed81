//! Selection + scroll offset for the list screens.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCursor {
    pub selected: usize,
    pub offset: usize,
    pub viewport: usize,
}

impl ListCursor {
    pub fn new(viewport: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            viewport: viewport.max(1),
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
            if self.selected >= self.offset + self.viewport {
                self.offset = self.selected + 1 - self.viewport;
            }
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Indices currently inside the viewport.
    pub fn visible(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = (self.offset + self.viewport).min(len);
        start..end
    }

    /// Appends the visible rows of `items`, with "more" markers at the edges.
    pub fn render_rows<T>(
        &self,
        out: &mut String,
        items: &[T],
        row: impl Fn(&T, bool) -> String,
    ) {
        let range = self.visible(items.len());
        if range.start > 0 {
            out.push_str("  ... (more items above)\n");
        }
        for i in range.clone() {
            out.push_str(&row(&items[i], i == self.selected));
            out.push('\n');
        }
        if range.end < items.len() {
            out.push_str("  ... (more items below)\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_scrolls_viewport() {
        let mut cursor = ListCursor::new(3);
        for _ in 0..4 {
            cursor.down(10);
        }
        assert_eq!(cursor.selected, 4);
        assert_eq!(cursor.offset, 2);
        assert_eq!(cursor.visible(10), 2..5);
    }

    #[test]
    fn test_up_scrolls_back_and_stops_at_zero() {
        let mut cursor = ListCursor::new(2);
        cursor.down(5);
        cursor.down(5);
        cursor.down(5);
        assert_eq!(cursor.offset, 2);
        cursor.up();
        cursor.up();
        assert_eq!(cursor.selected, 1);
        assert_eq!(cursor.offset, 1);
        cursor.up();
        cursor.up();
        assert_eq!(cursor.selected, 0);
        assert_eq!(cursor.offset, 0);
    }

    #[test]
    fn test_down_stops_at_last_item() {
        let mut cursor = ListCursor::new(10);
        cursor.down(2);
        cursor.down(2);
        assert_eq!(cursor.selected, 1);
        cursor.reset();
        cursor.down(0);
        assert_eq!(cursor.selected, 0);
    }

    #[test]
    fn test_render_rows_marks_selection_and_overflow() {
        let mut cursor = ListCursor::new(2);
        cursor.down(4);
        cursor.down(4);
        let mut out = String::new();
        cursor.render_rows(&mut out, &["a", "b", "c", "d"], |s, sel| {
            format!("{}{}", if sel { "> " } else { "  " }, s)
        });
        assert_eq!(
            out,
            "  ... (more items above)\n  b\n> c\n  ... (more items below)\n"
        );
    }
}
