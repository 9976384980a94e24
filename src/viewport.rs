pub const ROW_WIDTH: usize = 16;

/// Lines of the terminal that never show data: column header, status bar and
/// hint bar.
pub const CHROME_ROWS: usize = 3;

/// Rows kept between the cursor and the edge it scrolled past.
const SCROLL_MARGIN: usize = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn move_by(&mut self, delta: isize, len: usize) {
        let target = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize)
        };
        self.move_to(target, len);
    }

    pub fn move_to(&mut self, offset: usize, len: usize) {
        self.offset = offset.min(len.saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    top_offset: usize,
    rows_visible: usize,
    row_width: usize,
}

impl Viewport {
    pub fn new(rows_visible: usize) -> Self {
        Self {
            top_offset: 0,
            rows_visible: rows_visible.max(1),
            row_width: ROW_WIDTH,
        }
    }

    pub fn top_offset(&self) -> usize {
        self.top_offset
    }

    pub fn rows_visible(&self) -> usize {
        self.rows_visible
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    pub fn resize(&mut self, rows_visible: usize) {
        self.rows_visible = rows_visible.max(1);
    }

    pub fn contains_row_of(&self, offset: usize) -> bool {
        let row = offset / self.row_width;
        let view_row = self.top_offset / self.row_width;
        row >= view_row && row < view_row + self.rows_visible
    }

    /// Scrolls just enough that the row holding `cursor` is on screen. When
    /// scrolling is needed the cursor row ends up on the last visible row.
    pub fn follow(&mut self, cursor: usize) {
        let w = self.row_width;
        let cursor_row = cursor / w;
        let view_row = self.top_offset / w;
        let reach = self.rows_visible - SCROLL_MARGIN;

        if cursor_row < view_row {
            self.top_offset = (cursor_row * w).saturating_sub(reach * w);
        } else if cursor_row >= view_row + reach {
            self.top_offset = (cursor_row + SCROLL_MARGIN).saturating_sub(self.rows_visible) * w;
        }
    }
}

pub fn data_rows(height: u16) -> usize {
    (height as usize).saturating_sub(CHROME_ROWS).max(1)
}
