use crate::bookmarks::BookmarkSet;
use crate::config::Config;
use crate::document::ByteDocument;
use crate::error::{EngineError, EngineResult};
use crate::search::{self, Direction};
use crate::view::{ModeView, RowView, ViewModel, ViewRadix};
use crate::viewport::{Cursor, Viewport};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search { term: String },
    Edit { buffer: String },
}

/// What the host has to do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    QuitRequested,
    ShowHelp,
    ShowStats,
}

/// One editing session: the document plus everything the operator has done
/// to it since it was opened.
pub struct Editor {
    document: ByteDocument,
    cursor: Cursor,
    viewport: Viewport,
    mode: Mode,
    radix: ViewRadix,
    bookmarks: BookmarkSet,
    last_search: String,
    page_rows: usize,
    status: Option<String>,
}

impl Editor {
    pub fn new(document: ByteDocument, config: &Config, rows_visible: usize) -> Self {
        Self {
            document,
            cursor: Cursor::default(),
            viewport: Viewport::new(rows_visible),
            mode: Mode::Normal,
            radix: config.default_view,
            bookmarks: BookmarkSet::default(),
            last_search: String::new(),
            page_rows: config.page_rows.max(1),
            status: None,
        }
    }

    pub fn document(&self) -> &ByteDocument {
        &self.document
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn radix(&self) -> ViewRadix {
        self.radix
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Adapts the viewport to a new number of data rows and re-syncs it.
    pub fn resize(&mut self, rows_visible: usize) {
        self.viewport.resize(rows_visible);
        self.viewport.follow(self.cursor.offset());
    }

    pub fn flush(&mut self) -> EngineResult<()> {
        self.document.flush()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        let outcome = match self.mode {
            Mode::Normal => self.handle_normal_mode(key),
            Mode::Search { .. } => {
                self.handle_search_input(key);
                Outcome::Continue
            }
            Mode::Edit { .. } => {
                self.handle_edit_input(key);
                Outcome::Continue
            }
        };
        self.viewport.follow(self.cursor.offset());
        outcome
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Outcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Outcome::Continue;
        }
        let row = self.viewport.row_width() as isize;
        let page = row.saturating_mul(self.page_rows as isize);
        match key.code {
            KeyCode::Char('q') => return Outcome::QuitRequested,
            KeyCode::Char('h') => return Outcome::ShowHelp,
            KeyCode::Char('f') => return Outcome::ShowStats,
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-row),
            KeyCode::Down => self.move_cursor(row),
            KeyCode::PageUp => self.move_cursor(-page),
            KeyCode::PageDown => self.move_cursor(page),
            KeyCode::Char('g') | KeyCode::Home => self.jump_to(0),
            KeyCode::Char('G') | KeyCode::End => {
                self.jump_to(self.document.len().saturating_sub(1))
            }
            KeyCode::Char('/') => {
                self.enter_mode(Mode::Search {
                    term: String::new(),
                });
                self.status = None;
            }
            KeyCode::Char('e') => {
                self.enter_mode(Mode::Edit {
                    buffer: String::new(),
                });
                self.status = Some("Enter new byte value".to_string());
            }
            KeyCode::Char('v') => {
                self.radix = self.radix.next();
                self.status = Some(format!("View mode changed to: {}", self.radix.label()));
            }
            KeyCode::Char('b') => self.toggle_bookmark(),
            KeyCode::Char('B') => self.jump_to_next_bookmark(),
            KeyCode::Char('n') => self.search(Direction::Forward),
            KeyCode::Char('N') => self.search(Direction::Backward),
            KeyCode::Char('s') => self.save(),
            _ => {}
        }
        Outcome::Continue
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        let Mode::Search { term } = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.enter_mode(Mode::Normal);
                self.status = Some("Search cancelled".to_string());
            }
            KeyCode::Enter => {
                let term = std::mem::take(term);
                self.enter_mode(Mode::Normal);
                if term.is_empty() {
                    self.status = Some("Empty search term".to_string());
                    return;
                }
                self.last_search = term;
                self.search(Direction::Forward);
            }
            KeyCode::Backspace => {
                term.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                term.push(c);
            }
            _ => {}
        }
    }

    fn handle_edit_input(&mut self, key: KeyEvent) {
        let Mode::Edit { buffer } = &mut self.mode else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // In Ascii view an empty buffer takes `e` as the character to write.
        let e_is_text = self.radix == ViewRadix::Ascii && buffer.is_empty();
        match key.code {
            KeyCode::Esc => {
                self.enter_mode(Mode::Normal);
                self.status = Some("Edit cancelled".to_string());
            }
            KeyCode::Char('e') if !ctrl && e_is_text => {
                buffer.push('e');
            }
            // The key that opened Edit mode also commits it.
            KeyCode::Enter | KeyCode::Char('e') if !ctrl => {
                let buffer = std::mem::take(buffer);
                self.enter_mode(Mode::Normal);
                self.commit_edit(&buffer);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if !ctrl => {
                buffer.push(c);
            }
            _ => {}
        }
    }

    fn enter_mode(&mut self, mode: Mode) {
        tracing::debug!(
            target: "editor",
            from = mode_name(&self.mode),
            to = mode_name(&mode),
            "mode"
        );
        self.mode = mode;
    }

    fn move_cursor(&mut self, delta: isize) {
        self.cursor.move_by(delta, self.document.len());
        self.status = None;
    }

    fn jump_to(&mut self, offset: usize) {
        self.cursor.move_to(offset, self.document.len());
        self.status = None;
    }

    fn commit_edit(&mut self, input: &str) {
        let offset = self.cursor.offset();
        match self.write_at_cursor(input) {
            Ok(byte) => {
                tracing::debug!(target: "editor", offset, byte, "byte written");
                self.status = Some(format!("Byte updated to: {byte:02x}"));
            }
            Err(err) => {
                tracing::debug!(target: "editor", offset, input, %err, "edit rejected");
                self.status = Some(format!("Edit failed: {err}"));
            }
        }
    }

    fn write_at_cursor(&mut self, input: &str) -> EngineResult<u8> {
        let value = self.radix.parse_input(input)?;
        self.document.write(self.cursor.offset(), value)?;
        let byte = self.document.read(self.cursor.offset(), 1)?[0];
        self.cursor.move_by(1, self.document.len());
        Ok(byte)
    }

    fn search(&mut self, direction: Direction) {
        if self.last_search.is_empty() {
            self.status = Some("No previous search".to_string());
            return;
        }
        let found = match direction.step_from(self.cursor.offset()) {
            Some(start) => search::find(
                self.document.bytes(),
                self.last_search.as_bytes(),
                start,
                direction,
            ),
            None => Err(EngineError::NotFound),
        };
        match found {
            Ok(offset) => {
                self.cursor.move_to(offset, self.document.len());
                self.status = Some(format!("Found at offset: {offset:08x}"));
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn toggle_bookmark(&mut self) {
        let offset = self.cursor.offset();
        self.status = Some(if self.bookmarks.toggle(offset) {
            format!("Bookmark added at offset: {offset:08x}")
        } else {
            format!("Bookmark removed at offset: {offset:08x}")
        });
    }

    fn jump_to_next_bookmark(&mut self) {
        match self.bookmarks.next_after(self.cursor.offset()) {
            Ok(offset) => {
                self.cursor.move_to(offset, self.document.len());
                self.status = Some(format!("Jumped to bookmark at offset: {offset:08x}"));
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn save(&mut self) {
        match self.document.flush() {
            Ok(()) => self.status = Some("File saved successfully".to_string()),
            Err(err) => {
                tracing::warn!(target: "editor", %err, "save failed");
                self.status = Some(format!("Save failed: {err}"));
            }
        }
    }

    pub fn view_model(&self) -> ViewModel {
        let len = self.document.len();
        let width = self.viewport.row_width();
        let top = self.viewport.top_offset().min(len);
        let end = top
            .saturating_add(self.viewport.rows_visible() * width)
            .min(len);
        let bytes = self.document.bytes();
        let rows = (top..end)
            .step_by(width)
            .map(|offset| RowView {
                offset,
                bytes: bytes[offset..(offset + width).min(end)].to_vec(),
            })
            .collect();
        let mode = match &self.mode {
            Mode::Normal => ModeView::Normal,
            Mode::Search { term } => ModeView::Search(term.clone()),
            Mode::Edit { buffer } => ModeView::Edit(buffer.clone()),
        };
        let file_name = self
            .document
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.document.path().display().to_string());

        ViewModel {
            file_name,
            len,
            dirty: self.document.is_dirty(),
            rows,
            cursor_offset: self.cursor.offset(),
            cursor_row_visible: !self.document.is_empty()
                && self.viewport.contains_row_of(self.cursor.offset()),
            mode,
            radix: self.radix,
            bookmarks: self.bookmarks.iter().collect(),
            matches: search::matches_in(bytes, self.last_search.as_bytes(), top..end),
            status: self.status.clone(),
        }
    }
}

fn mode_name(mode: &Mode) -> &'static str {
    match mode {
        Mode::Normal => "normal",
        Mode::Search { .. } => "search",
        Mode::Edit { .. } => "edit",
    }
}

#[cfg(test)]
mod tests {
    use super::{Editor, Mode, Outcome};
    use crate::config::Config;
    use crate::document::ByteDocument;
    use crate::view::{ModeView, ViewRadix};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn editor_with(bytes: &[u8], rows: usize) -> (NamedTempFile, Editor) {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(bytes).expect("write temp file");
        file.flush().expect("flush temp file");
        let doc = ByteDocument::open(file.path()).expect("open document");
        let editor = Editor::new(doc, &Config::default(), rows);
        (file, editor)
    }

    fn press(editor: &mut Editor, code: KeyCode) -> Outcome {
        editor.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(editor: &mut Editor, text: &str) {
        for c in text.chars() {
            press(editor, KeyCode::Char(c));
        }
    }

    fn byte_at(editor: &Editor, offset: usize) -> u8 {
        editor.document().read(offset, 1).unwrap()[0]
    }

    #[test]
    fn starts_in_normal_mode_with_configured_view() {
        let (_file, editor) = editor_with(b"abc", 4);
        assert_eq!(editor.mode(), &Mode::Normal);
        assert_eq!(editor.radix(), ViewRadix::Hex);
        assert_eq!(editor.cursor_offset(), 0);
        assert_eq!(editor.status(), None);
    }

    #[test]
    fn arrows_move_by_byte_and_row_and_saturate() {
        let (_file, mut editor) = editor_with(&[0; 40], 4);
        press(&mut editor, KeyCode::Down);
        assert_eq!(editor.cursor_offset(), 16);
        press(&mut editor, KeyCode::Right);
        assert_eq!(editor.cursor_offset(), 17);
        press(&mut editor, KeyCode::Down);
        press(&mut editor, KeyCode::Down);
        assert_eq!(editor.cursor_offset(), 39);
        press(&mut editor, KeyCode::PageUp);
        assert_eq!(editor.cursor_offset(), 0);
        press(&mut editor, KeyCode::Left);
        assert_eq!(editor.cursor_offset(), 0);
        press(&mut editor, KeyCode::Char('G'));
        assert_eq!(editor.cursor_offset(), 39);
        press(&mut editor, KeyCode::Char('g'));
        assert_eq!(editor.cursor_offset(), 0);
    }

    #[test]
    fn viewport_follows_cursor_on_a_one_row_terminal() {
        let (_file, mut editor) = editor_with(&[0; 32], 1);
        press(&mut editor, KeyCode::End);
        assert_eq!(editor.cursor_offset(), 31);
        assert_eq!(editor.viewport().top_offset(), 16);
        let view = editor.view_model();
        assert!(view.cursor_row_visible);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].offset, 16);
    }

    #[test]
    fn search_enter_finds_forward_from_next_byte() {
        let (_file, mut editor) = editor_with(&[0x58, 0x41, 0x41, 0x42, 0x43, 0x41, 0x42], 4);
        press(&mut editor, KeyCode::Char('/'));
        assert_eq!(editor.mode(), &Mode::Search { term: String::new() });
        type_text(&mut editor, "ABX");
        press(&mut editor, KeyCode::Backspace);
        press(&mut editor, KeyCode::Enter);
        assert_eq!(editor.mode(), &Mode::Normal);
        assert_eq!(editor.cursor_offset(), 2);
        assert_eq!(editor.status(), Some("Found at offset: 00000002"));

        press(&mut editor, KeyCode::Char('n'));
        assert_eq!(editor.cursor_offset(), 5);
        press(&mut editor, KeyCode::Char('n'));
        assert_eq!(editor.cursor_offset(), 5);
        assert_eq!(editor.status(), Some("Search term not found"));
        press(&mut editor, KeyCode::Char('N'));
        assert_eq!(editor.cursor_offset(), 2);
    }

    #[test]
    fn search_from_match_under_cursor_skips_it() {
        let (_file, mut editor) = editor_with(b"ABAB", 4);
        press(&mut editor, KeyCode::Char('/'));
        type_text(&mut editor, "AB");
        press(&mut editor, KeyCode::Enter);
        assert_eq!(editor.cursor_offset(), 2);
    }

    #[test]
    fn backward_search_at_start_is_not_found() {
        let (_file, mut editor) = editor_with(b"ABAB", 4);
        press(&mut editor, KeyCode::Char('/'));
        type_text(&mut editor, "AB");
        press(&mut editor, KeyCode::Enter);
        press(&mut editor, KeyCode::Char('g'));
        press(&mut editor, KeyCode::Char('N'));
        assert_eq!(editor.cursor_offset(), 0);
        assert_eq!(editor.status(), Some("Search term not found"));
    }

    #[test]
    fn search_escape_keeps_previous_term() {
        let (_file, mut editor) = editor_with(b"xxAByyAB", 4);
        press(&mut editor, KeyCode::Char('/'));
        type_text(&mut editor, "AB");
        press(&mut editor, KeyCode::Enter);
        press(&mut editor, KeyCode::Char('/'));
        type_text(&mut editor, "yy");
        press(&mut editor, KeyCode::Esc);
        assert_eq!(editor.mode(), &Mode::Normal);
        assert_eq!(editor.cursor_offset(), 2);
        press(&mut editor, KeyCode::Char('n'));
        assert_eq!(editor.cursor_offset(), 6);
    }

    #[test]
    fn repeat_without_previous_search_reports_it() {
        let (_file, mut editor) = editor_with(b"abc", 4);
        press(&mut editor, KeyCode::Char('n'));
        assert_eq!(editor.status(), Some("No previous search"));
        press(&mut editor, KeyCode::Char('/'));
        press(&mut editor, KeyCode::Enter);
        assert_eq!(editor.status(), Some("Empty search term"));
    }

    #[test]
    fn hex_edit_writes_and_advances() {
        let (_file, mut editor) = editor_with(&[0, 0, 0], 4);
        press(&mut editor, KeyCode::Char('e'));
        assert_eq!(editor.mode(), &Mode::Edit { buffer: String::new() });
        type_text(&mut editor, "ff");
        press(&mut editor, KeyCode::Enter);
        assert_eq!(editor.mode(), &Mode::Normal);
        assert_eq!(byte_at(&editor, 0), 255);
        assert_eq!(editor.cursor_offset(), 1);
        assert_eq!(editor.status(), Some("Byte updated to: ff"));
        assert!(editor.document().is_dirty());
    }

    #[test]
    fn invalid_hex_edit_changes_nothing() {
        let (_file, mut editor) = editor_with(&[9, 9], 4);
        press(&mut editor, KeyCode::Char('e'));
        type_text(&mut editor, "zz");
        press(&mut editor, KeyCode::Enter);
        assert_eq!(byte_at(&editor, 0), 9);
        assert_eq!(editor.cursor_offset(), 0);
        assert!(!editor.document().is_dirty());
        assert!(editor.status().unwrap().starts_with("Edit failed: Invalid byte value"));
    }

    #[test]
    fn edit_key_commits_when_already_editing() {
        let (_file, mut editor) = editor_with(&[0, 0], 4);
        press(&mut editor, KeyCode::Char('e'));
        type_text(&mut editor, "4A");
        press(&mut editor, KeyCode::Char('e'));
        assert_eq!(editor.mode(), &Mode::Normal);
        assert_eq!(byte_at(&editor, 0), 0x4a);
        assert_eq!(editor.cursor_offset(), 1);
    }

    #[test]
    fn edit_escape_discards_buffer() {
        let (_file, mut editor) = editor_with(&[1], 4);
        press(&mut editor, KeyCode::Char('e'));
        type_text(&mut editor, "12");
        press(&mut editor, KeyCode::Backspace);
        assert_eq!(editor.mode(), &Mode::Edit { buffer: "1".to_string() });
        press(&mut editor, KeyCode::Esc);
        assert_eq!(editor.mode(), &Mode::Normal);
        assert_eq!(byte_at(&editor, 0), 1);
        press(&mut editor, KeyCode::Char('e'));
        assert_eq!(editor.mode(), &Mode::Edit { buffer: String::new() });
    }

    #[test]
    fn decimal_edit_rejects_values_above_255() {
        let (_file, mut editor) = editor_with(&[3, 3], 4);
        press(&mut editor, KeyCode::Char('v'));
        assert_eq!(editor.radix(), ViewRadix::Decimal);
        press(&mut editor, KeyCode::Char('e'));
        type_text(&mut editor, "256");
        press(&mut editor, KeyCode::Enter);
        assert_eq!(byte_at(&editor, 0), 3);
        assert_eq!(editor.cursor_offset(), 0);

        press(&mut editor, KeyCode::Char('e'));
        type_text(&mut editor, "200");
        press(&mut editor, KeyCode::Enter);
        assert_eq!(byte_at(&editor, 0), 200);
        assert_eq!(editor.cursor_offset(), 1);
    }

    #[test]
    fn ascii_edit_writes_code_point_and_stays_on_last_byte() {
        let (_file, mut editor) = editor_with(b"ab", 4);
        press(&mut editor, KeyCode::Char('v'));
        press(&mut editor, KeyCode::Char('v'));
        assert_eq!(editor.radix(), ViewRadix::Ascii);
        press(&mut editor, KeyCode::End);
        press(&mut editor, KeyCode::Char('e'));
        press(&mut editor, KeyCode::Char('Z'));
        press(&mut editor, KeyCode::Enter);
        assert_eq!(byte_at(&editor, 1), b'Z');
        assert_eq!(editor.cursor_offset(), 1);
    }

    #[test]
    fn ascii_edit_can_write_the_edit_key_itself() {
        let (_file, mut editor) = editor_with(b"ab", 4);
        press(&mut editor, KeyCode::Char('v'));
        press(&mut editor, KeyCode::Char('v'));
        press(&mut editor, KeyCode::Char('e'));
        press(&mut editor, KeyCode::Char('e'));
        assert_eq!(editor.mode(), &Mode::Edit { buffer: "e".to_string() });
        press(&mut editor, KeyCode::Enter);
        assert_eq!(byte_at(&editor, 0), b'e');
        assert_eq!(editor.cursor_offset(), 1);
        assert_eq!(editor.status(), Some("Byte updated to: 65"));

        // With a character already typed, `e` commits again.
        press(&mut editor, KeyCode::Char('e'));
        press(&mut editor, KeyCode::Char('x'));
        press(&mut editor, KeyCode::Char('e'));
        assert_eq!(editor.mode(), &Mode::Normal);
        assert_eq!(byte_at(&editor, 1), b'x');
    }

    #[test]
    fn hex_edit_key_still_commits_an_empty_buffer() {
        let (_file, mut editor) = editor_with(b"ab", 4);
        press(&mut editor, KeyCode::Char('e'));
        press(&mut editor, KeyCode::Char('e'));
        assert_eq!(editor.mode(), &Mode::Normal);
        assert!(editor.status().unwrap().starts_with("Edit failed:"));
        assert_eq!(byte_at(&editor, 0), b'a');
    }

    #[test]
    fn edit_on_empty_document_is_out_of_range() {
        let (_file, mut editor) = editor_with(&[], 4);
        press(&mut editor, KeyCode::Char('e'));
        type_text(&mut editor, "1");
        press(&mut editor, KeyCode::Enter);
        assert!(editor.status().unwrap().contains("outside the file"));
        assert_eq!(editor.document().len(), 0);
    }

    #[test]
    fn control_chars_are_not_typed_into_buffers() {
        let (_file, mut editor) = editor_with(&[0], 4);
        press(&mut editor, KeyCode::Char('/'));
        editor.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(editor.mode(), &Mode::Search { term: String::new() });
    }

    #[test]
    fn view_mode_cycles_and_reports() {
        let (_file, mut editor) = editor_with(&[0], 4);
        press(&mut editor, KeyCode::Char('v'));
        press(&mut editor, KeyCode::Char('v'));
        press(&mut editor, KeyCode::Char('v'));
        assert_eq!(editor.radix(), ViewRadix::Hex);
        assert_eq!(editor.status(), Some("View mode changed to: HEX"));
    }

    #[test]
    fn bookmarks_toggle_and_cycle() {
        let (_file, mut editor) = editor_with(&[0; 64], 4);
        press(&mut editor, KeyCode::Char('B'));
        assert_eq!(editor.status(), Some("No bookmarks set"));

        for target in [5usize, 20, 40] {
            press(&mut editor, KeyCode::Char('g'));
            for _ in 0..target {
                press(&mut editor, KeyCode::Right);
            }
            press(&mut editor, KeyCode::Char('b'));
        }
        assert_eq!(editor.bookmarks().iter().collect::<Vec<_>>(), vec![5, 20, 40]);
        assert_eq!(editor.status(), Some("Bookmark added at offset: 00000028"));

        press(&mut editor, KeyCode::Char('B'));
        assert_eq!(editor.cursor_offset(), 5);
        press(&mut editor, KeyCode::Char('B'));
        assert_eq!(editor.cursor_offset(), 20);
        press(&mut editor, KeyCode::Char('b'));
        assert_eq!(editor.status(), Some("Bookmark removed at offset: 00000014"));
        press(&mut editor, KeyCode::Char('B'));
        assert_eq!(editor.cursor_offset(), 40);
        press(&mut editor, KeyCode::Char('B'));
        assert_eq!(editor.cursor_offset(), 5);
    }

    #[test]
    fn save_flushes_to_disk_and_is_repeatable() {
        let (file, mut editor) = editor_with(b"hello", 4);
        press(&mut editor, KeyCode::Char('e'));
        type_text(&mut editor, "4A");
        press(&mut editor, KeyCode::Enter);
        press(&mut editor, KeyCode::Char('s'));
        assert_eq!(editor.status(), Some("File saved successfully"));
        press(&mut editor, KeyCode::Char('s'));
        assert_eq!(editor.status(), Some("File saved successfully"));
        assert_eq!(fs::read(file.path()).unwrap(), b"Jello");
    }

    #[test]
    fn failed_save_is_reported_and_keeps_changes_pending() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"hello").expect("write temp file");
        file.flush().expect("flush temp file");
        let doc = ByteDocument::open_read_only(file.path()).expect("open document");
        let mut editor = Editor::new(doc, &Config::default(), 4);

        press(&mut editor, KeyCode::Char('e'));
        type_text(&mut editor, "4A");
        press(&mut editor, KeyCode::Enter);
        press(&mut editor, KeyCode::Char('s'));

        assert!(editor.status().unwrap().starts_with("Save failed: I/O error"));
        assert!(editor.document().is_dirty());
        assert_eq!(byte_at(&editor, 0), b'J');
        assert_eq!(fs::read(file.path()).unwrap(), b"hello");
    }

    #[test]
    fn overlay_keys_are_left_to_the_host() {
        let (_file, mut editor) = editor_with(&[0], 4);
        assert_eq!(press(&mut editor, KeyCode::Char('q')), Outcome::QuitRequested);
        assert_eq!(press(&mut editor, KeyCode::Char('h')), Outcome::ShowHelp);
        assert_eq!(press(&mut editor, KeyCode::Char('f')), Outcome::ShowStats);
        press(&mut editor, KeyCode::Char('/'));
        assert_eq!(press(&mut editor, KeyCode::Char('q')), Outcome::Continue);
    }

    #[test]
    fn view_model_exposes_visible_rows_and_matches() {
        let mut bytes = vec![0u8; 40];
        bytes[18] = b'O';
        bytes[19] = b'K';
        let (_file, mut editor) = editor_with(&bytes, 2);
        press(&mut editor, KeyCode::Char('/'));
        type_text(&mut editor, "OK");
        let searching = editor.view_model();
        assert_eq!(searching.mode, ModeView::Search("OK".to_string()));
        press(&mut editor, KeyCode::Enter);
        press(&mut editor, KeyCode::Char('b'));

        let view = editor.view_model();
        assert_eq!(view.cursor_offset, 18);
        assert_eq!(view.rows.iter().map(|r| r.offset).collect::<Vec<_>>(), vec![0, 16]);
        assert_eq!(view.rows[1].bytes.len(), 16);
        assert_eq!(view.matches, vec![18..20]);
        assert!(view.is_bookmarked(18));
        assert!(view.in_match(19));
        assert!(!view.dirty);

        press(&mut editor, KeyCode::End);
        let view = editor.view_model();
        assert_eq!(view.rows.iter().map(|r| r.offset).collect::<Vec<_>>(), vec![16, 32]);
        assert_eq!(view.rows[1].bytes.len(), 8);
        assert!(view.cursor_row_visible);
    }
}
