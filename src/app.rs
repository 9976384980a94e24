use crate::config::{self, Config};
use crate::document::ByteDocument;
use crate::editor::{Editor, Outcome};
use crate::theme::UiPalette;
use crate::ui::{self, FileStats, Overlay};
use crate::viewport::data_rows;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Once;

pub fn run_app(path: PathBuf, mut config: Config) -> Result<()> {
    let palette = match UiPalette::named(&config.theme) {
        Some(palette) => palette,
        None => {
            tracing::warn!(
                target: "runtime",
                theme = %config.theme,
                "unknown theme, using fallback"
            );
            config.theme = UiPalette::fallback_name().to_string();
            config::write_config(&config)?;
            UiPalette::named(&config.theme).context("Fallback theme missing")?
        }
    };

    let document = ByteDocument::open(&path)
        .with_context(|| format!("Failed to open {} for editing", path.display()))?;

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;
    install_panic_hook();

    let rows = data_rows(terminal.size()?.height);
    let mut app = App::new(Editor::new(document, &config, rows), palette, config.confirm_quit);

    loop {
        let size = terminal.size()?;
        app.editor.resize(data_rows(size.height));
        let view = app.editor.view_model();
        terminal.draw(|f| ui::render(f, &view, &app.palette, &app.overlay))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                break;
            }
            tracing::trace!(
                target: "runtime",
                cursor = app.editor.cursor_offset(),
                top = app.editor.viewport().top_offset(),
                mode = ?app.editor.mode(),
                radix = ?app.editor.radix(),
                "key handled"
            );
        }
    }

    app.finish()
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(LeaveAlternateScreen);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Leaves the alternate screen before the default hook prints, so the panic
/// message is visible. Pending writes are flushed when the editor unwinds.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            tracing::error!(target: "runtime", %info, "panic");
            default_panic(info);
        }));
    });
}

struct App {
    editor: Editor,
    palette: UiPalette,
    overlay: Overlay,
    confirm_quit: bool,
}

impl App {
    fn new(editor: Editor, palette: UiPalette, confirm_quit: bool) -> Self {
        Self {
            editor,
            palette,
            overlay: Overlay::None,
            confirm_quit,
        }
    }

    /// Returns true once the operator has confirmed quitting.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.overlay {
            Overlay::Help | Overlay::Stats(_) => {
                self.overlay = Overlay::None;
                return false;
            }
            Overlay::ConfirmQuit => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        self.overlay = Overlay::None;
                        self.editor.set_status("Quit cancelled");
                    }
                    _ => {}
                }
                return false;
            }
            Overlay::None => {}
        }

        match self.editor.handle_key(key) {
            Outcome::Continue => {}
            Outcome::QuitRequested => {
                if !self.confirm_quit {
                    return true;
                }
                self.overlay = Overlay::ConfirmQuit;
            }
            Outcome::ShowHelp => self.overlay = Overlay::Help,
            Outcome::ShowStats => {
                let stats =
                    FileStats::collect(self.editor.document().path(), self.editor.bookmarks());
                self.overlay = Overlay::Stats(stats);
            }
        }
        false
    }

    fn finish(mut self) -> Result<()> {
        let path = self.editor.document().path().to_path_buf();
        self.editor
            .flush()
            .with_context(|| format!("Failed to save {}", path.display()))?;
        tracing::info!(target: "runtime", "exit");
        Ok(())
    }
}
