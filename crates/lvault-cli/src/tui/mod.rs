//! Links Vault TUI
//!
//! Terminal user interface for Links Vault.
//!
//! ## Layout
//!
//! - Top: title and link counts
//! - Left: links list (title and host)
//! - Right: detail of the selected link
//! - Bottom: status bar, search line, or delete prompt
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move selection up/down
//! - g/G: First/last link
//! - Enter: Open link in browser
//! - /: Search (Enter keeps the term, Esc clears it)
//! - a: Add link
//! - e: Edit link
//! - d: Delete link (asks y/n)
//! - ?: Help
//! - q: Quit
//!
//! In the form, Tab/Shift+Tab (or ↓/↑) move between fields, Enter saves
//! and Esc cancels.

mod app;
mod ui;

use std::io::{self, stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use lvault_core::{Config, KeyValueStore, LinkStore};
use ratatui::prelude::*;
use tracing::info;

use app::{App, InputMode};

use crate::commands;
use crate::logging;

const HELP: &str = "j/k:↑↓  g/G:first/last  Enter:open  /:search  a:add  e:edit  d:delete  q:quit";

/// Run the TUI application
pub fn run() -> Result<()> {
    let config = Config::load()?;

    // File-based, only if LVAULT_LOG is set
    logging::init_tui_logging(&config);

    let mut store = commands::open_store(&config);
    info!("Opened vault '{}' with {} link(s)", store.key(), store.len());

    // Setup terminal; the guard restores it on every exit path
    let guard = TerminalGuard::enter(stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(&store);

    let result = run_app(&mut terminal, &mut app, &mut store);

    drop(terminal);
    drop(guard);

    result
}

/// Raw mode and the alternate screen, undone on drop
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { out };
        guard.out.execute(EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = self.out.execute(LeaveAlternateScreen);
    }
}

fn run_app<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut LinkStore<S>,
) -> Result<()> {
    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(app, store, key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Dispatch one key press according to the input mode
fn handle_key<S: KeyValueStore>(app: &mut App, store: &mut LinkStore<S>, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, store, key),
        InputMode::Search => match key.code {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.clear_search(store),
            KeyCode::Backspace => app.search_delete_char(store),
            KeyCode::Char(c) => app.search_insert_char(store, c),
            _ => {}
        },
        InputMode::Form => match key.code {
            KeyCode::Esc => app.close_form(),
            KeyCode::Enter => app.submit_form(store),
            KeyCode::Tab | KeyCode::Down => app.form_next_field(),
            KeyCode::BackTab | KeyCode::Up => app.form_prev_field(),
            KeyCode::Backspace => app.form_delete_char(),
            KeyCode::Char(c) => app.form_insert_char(c),
            _ => {}
        },
        InputMode::ConfirmDelete => {
            let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
            app.resolve_delete(store, confirmed);
        }
    }
}

fn handle_normal_key<S: KeyValueStore>(app: &mut App, store: &mut LinkStore<S>, key: KeyEvent) {
    // Clear status message on any key press
    app.clear_status();

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_first(),
        KeyCode::Char('G') | KeyCode::End => app.move_to_last(),
        KeyCode::Enter => app.open_current(),
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Esc => app.clear_search(store),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('?') => app.set_status(HELP),
        _ => {}
    }
}
