use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs};
use time::OffsetDateTime;

use crate::feed::time_label;
use crate::model::{Role, Turn};
use crate::project::Chip;
use crate::sync::LoadState;

use super::app::{App, Focus, Tab};

pub(super) fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(f.area());

    let titles = Tab::ALL.map(Tab::title);
    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles.to_vec())
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    match app.tab {
        Tab::Home => draw_home(f, chunks[1]),
        Tab::Eats => draw_eats(f, chunks[1], app),
        Tab::Recipes => draw_recipes(f, chunks[1], app),
        Tab::Community => draw_community(f, chunks[1], app),
    }

    f.render_widget(Paragraph::new(status_line(app)), chunks[2]);
}

fn draw_home(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "bites",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Cheap eats, smart recipes, and campus food hacks."),
        Line::from(""),
        Line::from("  Cheap Eats — deals, discounts & happy hours near you"),
        Line::from("  Recipes   — budget ideas plus a recipe chatbot"),
        Line::from("  Community — student tips, hall remixes & $5 meals"),
        Line::from(""),
        Line::from(Span::styled(
            "Tab switches views. q quits.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_eats(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .split(area);

    let search_title = if app.focus == Focus::Search {
        "Search (Enter to apply, Esc to leave)"
    } else {
        "Search (/)"
    };
    let search = Paragraph::new(app.eats.criteria.query.as_str())
        .block(Block::default().borders(Borders::ALL).title(search_title));
    f.render_widget(search, chunks[0]);

    let mut chips: Vec<Span> = Vec::new();
    for (i, chip) in Chip::ALL.into_iter().enumerate() {
        let on = app.eats.criteria.active.contains(&chip);
        let marker = if on { "●" } else { "○" };
        let style = if on {
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        chips.push(Span::styled(
            format!(" {} {} {} ", i + 1, marker, chip.label()),
            style,
        ));
    }
    f.render_widget(Paragraph::new(Line::from(chips)), chunks[1]);

    let visible = app.eats.visible();
    if visible.is_empty() {
        let note = match app.eats.list.state() {
            LoadState::Pending => "Loading restaurants…",
            _ => "No eateries match.",
        };
        f.render_widget(Paragraph::new(note), chunks[2]);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|r| {
            let rating = r
                .rating
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "N/A".to_string());
            let meta = format!(
                "⭐ {} • 🚗 {} • ⏱ {}",
                rating,
                r.distance_text.as_deref().unwrap_or("?"),
                r.duration_text.as_deref().unwrap_or("?")
            );
            ListItem::new(vec![
                Line::from(Span::styled(
                    r.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {} — {}", meta, r.address.as_deref().unwrap_or("Address not marked")),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("▸ ");
    let mut state = ListState::default();
    state.select(Some(app.eats_selected.min(visible.len() - 1)));
    f.render_stateful_widget(list, chunks[2], &mut state);
}

fn draw_recipes(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .split(area);

    let featured = app
        .recipes
        .items()
        .iter()
        .map(|r| r.title.as_str())
        .collect::<Vec<_>>()
        .join("  •  ");
    let header = vec![
        Line::from(Span::styled(
            "Budget Recipes",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(featured, Style::default().add_modifier(Modifier::DIM))),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    // Tail-anchored: the most recent turn stays visible as the transcript
    // grows.
    let width = chunks[1].width.saturating_sub(1) as usize;
    let height = chunks[1].height as usize;
    let mut lines = transcript_lines(app.chat.turns(), width);
    if lines.len() > height {
        lines.drain(..lines.len() - height);
    }
    f.render_widget(Paragraph::new(lines), chunks[1]);

    let input_title = if app.chat.is_sending() {
        "Ingredients (sending…)"
    } else if app.focus == Focus::Chat {
        "Ingredients (Enter to send, Esc to leave)"
    } else {
        "Ingredients (i to type)"
    };
    let input = Paragraph::new(app.chat.input())
        .block(Block::default().borders(Borders::ALL).title(input_title));
    f.render_widget(input, chunks[2]);
}

fn draw_community(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .split(area);

    let composer_title = if app.post_in_flight {
        "Share a tip (posting…)"
    } else if app.focus == Focus::Composer {
        "Share a tip (Enter to post, Esc to leave)"
    } else {
        "Share a tip (i)"
    };
    let composer = Paragraph::new(app.feed.draft())
        .block(Block::default().borders(Borders::ALL).title(composer_title));
    f.render_widget(composer, chunks[0]);

    let tag_line = Line::from(vec![
        Span::styled("tag: ", Style::default().add_modifier(Modifier::DIM)),
        Span::styled(
            app.feed.tag().to_string(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (t to change)", Style::default().add_modifier(Modifier::DIM)),
    ]);
    f.render_widget(Paragraph::new(tag_line), chunks[1]);

    let posts = app.feed.posts.items();
    if posts.is_empty() {
        let note = match app.feed.posts.state() {
            LoadState::Pending => "Loading community tips…",
            _ => "No tips yet. Share one!",
        };
        f.render_widget(Paragraph::new(note), chunks[2]);
        return;
    }

    let now = OffsetDateTime::now_utc();
    let items: Vec<ListItem> = posts
        .iter()
        .map(|p| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", p.votes),
                        Style::default()
                            .fg(Color::Blue)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(p.text.clone()),
                ]),
                Line::from(Span::styled(
                    format!("  {} · {} · {}", p.author, time_label(p, now), p.tag),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("▸ ");
    let mut state = ListState::default();
    state.select(Some(app.feed_selected.min(posts.len() - 1)));
    f.render_stateful_widget(list, chunks[2], &mut state);
}

fn status_line(app: &App) -> Line<'static> {
    let mut note = match app.tab {
        Tab::Home => String::new(),
        Tab::Eats => match app.eats.list.state() {
            LoadState::Pending => "loading…".to_string(),
            LoadState::Ready => format!("{} shown", app.eats.visible().len()),
            LoadState::Unavailable => format!(
                "restaurants unavailable ({})",
                app.eats.list.last_error().unwrap_or("network error")
            ),
        },
        Tab::Recipes => {
            if app.chat.is_sending() {
                "thinking…".to_string()
            } else {
                String::new()
            }
        }
        Tab::Community => {
            if let Some(cause) = app.feed.last_submit_error() {
                format!("post failed ({}) — draft kept", cause)
            } else if app.feed.posts.state() == LoadState::Unavailable {
                "backend unreachable — showing sample tips".to_string()
            } else {
                String::new()
            }
        }
    };
    let hints = match app.tab {
        Tab::Home => "Tab views · q quit",
        Tab::Eats => "/ search · 1-5 chips · ↑↓ select · r reload",
        Tab::Recipes => "i type · Enter send · r reload",
        Tab::Community => "i compose · t tag · u upvote · r reload",
    };
    if !note.is_empty() {
        note.push_str("  ·  ");
    }
    note.push_str(hints);
    Line::from(Span::styled(note, Style::default().add_modifier(Modifier::DIM)))
}

fn transcript_lines(turns: &[Turn], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for turn in turns {
        let (prefix, style) = match turn.role {
            Role::User => ("you ▸ ", Style::default().fg(Color::Cyan)),
            Role::Assistant | Role::System => ("bot ▸ ", Style::default()),
        };
        let body_width = width.saturating_sub(prefix.chars().count());
        for (i, chunk) in wrap_text(&turn.text, body_width).into_iter().enumerate() {
            let lead = if i == 0 { prefix } else { "      " };
            lines.push(Line::from(vec![
                Span::styled(lead.to_string(), Style::default().add_modifier(Modifier::DIM)),
                Span::styled(chunk, style),
            ]));
        }
    }
    lines
}

/// Greedy word wrap; words longer than the width are hard-split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.split('\n') {
        if raw.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in raw.split_whitespace() {
            let sep = if line.is_empty() { 0 } else { 1 };
            if line.chars().count() + sep + word.chars().count() <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                continue;
            }
            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            let mut rest: Vec<char> = word.chars().collect();
            while rest.len() > width {
                out.push(rest.drain(..width).collect());
            }
            line = rest.into_iter().collect();
        }
        if !line.is_empty() {
            out.push(line);
        }
    }
    out
}
