use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::app::{App, Focus, Tab};
use super::render;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.drain_events();

        terminal.draw(|f| render::draw(f, app)).context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")?
            && let Event::Key(key) = event::read().context("read event")?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    if app.focus != Focus::None {
        handle_editing_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Tab => app.tab = app.tab.next(),
        KeyCode::BackTab => app.tab = app.tab.prev(),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        _ => handle_tab_key(app, key),
    }
}

fn handle_tab_key(app: &mut App, key: KeyEvent) {
    match app.tab {
        Tab::Home => {}
        Tab::Eats => match key.code {
            KeyCode::Char('/') => app.focus = Focus::Search,
            KeyCode::Char('r') => app.load_restaurants(),
            KeyCode::Char(c @ '1'..='5') => {
                let i = (c as usize) - ('1' as usize);
                app.eats.criteria.toggle(crate::project::Chip::ALL[i]);
            }
            _ => {}
        },
        Tab::Recipes => match key.code {
            KeyCode::Char('i') => app.focus = Focus::Chat,
            KeyCode::Char('r') => app.load_recipes(),
            _ => {}
        },
        Tab::Community => match key.code {
            KeyCode::Char('i') => app.focus = Focus::Composer,
            KeyCode::Char('t') => app.feed.cycle_tag(),
            KeyCode::Char('u') => app.upvote_selected(),
            KeyCode::Char('r') => app.load_posts(),
            _ => {}
        },
    }
}

fn handle_editing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.focus = Focus::None,
        KeyCode::Enter => match app.focus {
            Focus::Search => app.focus = Focus::None,
            // Gated submits; no-ops while a send is in flight.
            Focus::Chat => app.send_chat(),
            Focus::Composer => app.submit_post(),
            Focus::None => {}
        },
        KeyCode::Backspace => {
            if let Some(buf) = active_buffer(app) {
                buf.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buf) = active_buffer(app) {
                buf.push(c);
            }
        }
        _ => {}
    }
}

fn active_buffer(app: &mut App) -> Option<&mut String> {
    match app.focus {
        Focus::Search => Some(&mut app.eats.criteria.query),
        Focus::Chat => Some(app.chat.input_mut()),
        Focus::Composer => Some(app.feed.draft_mut()),
        Focus::None => None,
    }
}
