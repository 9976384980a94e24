use crate::bookmarks::BookmarkSet;
use crate::theme::UiPalette;
use crate::view::{printable, ModeView, RowView, ViewModel, ViewRadix};
use crate::viewport::ROW_WIDTH;
use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use ratatui::Frame;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

const HINT: &str = concat!(
    " [\u{2190}\u{2191}\u{2193}\u{2192}] Navigate | [/] Search | [e] Edit | [v] View",
    " | [b] Bookmark | [s] Save | [q] Quit ",
);

const HELP_TEXT: &[&str] = &[
    "Hexplore Help",
    "",
    "Navigation:",
    "  Arrow keys: Move cursor",
    "  Page Up/Down: Scroll by page",
    "  Home (g): Go to start of file",
    "  End (G): Go to end of file",
    "",
    "Editing and Viewing:",
    "  e: Enter edit mode (Enter or e again to write)",
    "  v: Cycle view mode (HEX/DEC/ASCII)",
    "  b: Toggle bookmark at cursor",
    "  B: Jump to next bookmark",
    "",
    "Search:",
    "  /: Enter search mode",
    "  n: Find next occurrence",
    "  N: Find previous occurrence",
    "",
    "File Operations:",
    "  f: Display file statistics",
    "  s: Save file",
    "",
    "Other Commands:",
    "  h: Toggle this help panel",
    "  q: Quit the editor",
    "",
    "Press any key to close help",
];

const CONFIRM_TEXT: &str = "Quit? Pending changes will be saved. (y/n)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Stats(FileStats),
    ConfirmQuit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub lines: Vec<String>,
}

impl FileStats {
    pub fn collect(path: &Path, bookmarks: &BookmarkSet) -> Self {
        let mut lines = vec![
            "File Statistics".to_string(),
            String::new(),
            format!("Filename: {}", path.display()),
        ];
        match fs::metadata(path) {
            Ok(meta) => {
                lines.push(format!("Size: {} bytes", meta.len()));
                lines.push(format!("Created: {}", format_time(meta.created().ok())));
                lines.push(format!("Last Modified: {}", format_time(meta.modified().ok())));
                lines.push(format!("Last Accessed: {}", format_time(meta.accessed().ok())));
                lines.push(format!("Permissions: {}", permissions(&meta)));
            }
            Err(err) => lines.push(format!("Metadata unavailable: {err}")),
        }
        lines.push(format!("Number of bookmarks: {}", bookmarks.len()));
        lines.push(String::new());
        lines.push("Press any key to close".to_string());
        Self { lines }
    }
}

fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => DateTime::<Local>::from(time)
            .format("%a %b %e %H:%M:%S %Y")
            .to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(unix)]
fn permissions(meta: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:03o}", meta.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permissions(meta: &fs::Metadata) -> String {
    if meta.permissions().readonly() {
        "read-only".to_string()
    } else {
        "read-write".to_string()
    }
}

pub fn render(f: &mut Frame, view: &ViewModel, palette: &UiPalette, overlay: &Overlay) {
    let area = f.size();
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(header_line(view.radix)).style(palette.header()),
        vertical[0],
    );

    let rows: Vec<Line> = view.rows.iter().map(|row| row_line(row, view, palette)).collect();
    f.render_widget(Paragraph::new(Text::from(rows)), vertical[1]);

    f.render_widget(
        Paragraph::new(status_text(view)).style(palette.status()),
        vertical[2],
    );
    f.render_widget(Paragraph::new(HINT).style(palette.hint()), vertical[3]);

    match overlay {
        Overlay::None => {}
        Overlay::Help => render_panel(f, area, HELP_TEXT.iter().copied(), palette),
        Overlay::Stats(stats) => {
            render_panel(f, area, stats.lines.iter().map(String::as_str), palette)
        }
        Overlay::ConfirmQuit => render_panel(f, area, [CONFIRM_TEXT], palette),
    }
}

fn header_line(radix: ViewRadix) -> String {
    let columns: Vec<String> = (0..ROW_WIDTH)
        .map(|col| match radix {
            ViewRadix::Hex => format!("{col:02X}"),
            ViewRadix::Decimal => format!("{col:>3}"),
            ViewRadix::Ascii => format!("{col:X}"),
        })
        .collect();
    let separator = if radix == ViewRadix::Ascii { "" } else { " " };
    let mut header = format!(" Offset    {}", columns.join(separator));
    if radix != ViewRadix::Ascii {
        header.push_str("  ASCII");
    }
    header
}

fn row_line(row: &RowView, view: &ViewModel, palette: &UiPalette) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(" {:08x}: ", row.offset))];
    let ascii_view = view.radix == ViewRadix::Ascii;
    let base = if ascii_view { palette.ascii } else { palette.value };

    for (i, byte) in row.bytes.iter().enumerate() {
        let offset = row.offset + i;
        let style = cell_style(offset, view, palette, base);
        if i > 0 && !ascii_view {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(view.radix.format_byte(*byte), style));
    }

    if !ascii_view {
        let missing = ROW_WIDTH.saturating_sub(row.bytes.len());
        let pad = missing * (view.radix.cell_width() + 1) + 2;
        spans.push(Span::raw(" ".repeat(pad)));
        for (i, byte) in row.bytes.iter().enumerate() {
            let offset = row.offset + i;
            let style = cell_style(offset, view, palette, palette.ascii);
            spans.push(Span::styled(printable(*byte).to_string(), style));
        }
    }
    Line::from(spans)
}

fn cell_style(offset: usize, view: &ViewModel, palette: &UiPalette, base: Color) -> Style {
    palette.cell(
        base,
        view.is_bookmarked(offset),
        view.in_match(offset),
        view.cursor_row_visible && offset == view.cursor_offset,
    )
}

fn status_text(view: &ViewModel) -> String {
    let mut text = match &view.mode {
        ModeView::Search(term) => {
            format!(" Search: {term} | Press Enter to search, Esc to cancel ")
        }
        ModeView::Edit(buffer) => format!(
            " Edit mode ({}) | Current value: {buffer} | Press Enter to confirm, Esc to cancel ",
            view.radix.label()
        ),
        ModeView::Normal => {
            let marker = if view.dirty { "*" } else { "" };
            format!(
                " File: {marker}{} | Cursor: {:08x}/{:08x} | Mode: {} | Press 'h' for help ",
                view.file_name,
                view.cursor_offset,
                view.len,
                view.radix.label()
            )
        }
    };
    if let Some(msg) = &view.status {
        text.push_str("| ");
        text.push_str(msg);
    }
    text
}

fn render_panel<'a>(
    f: &mut Frame,
    area: Rect,
    lines: impl IntoIterator<Item = &'a str>,
    palette: &UiPalette,
) {
    let lines: Vec<Line> = lines.into_iter().map(|l| Line::from(l.to_string())).collect();
    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 4;
    let height = lines.len() as u16 + 2;
    let popup = centered_rect(width, height, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .style(Style::default().fg(palette.hint))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.border).add_modifier(Modifier::BOLD)),
            ),
        popup,
    );
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
