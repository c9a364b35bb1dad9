//! UI rendering

use lvault_core::format_display_url;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Form, FormField, InputMode};
use crate::output::truncate;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    draw_links_pane(frame, app, panes[0]);
    draw_detail_pane(frame, app, panes[1]);

    match app.input_mode {
        InputMode::Search => draw_search_input(frame, app, chunks[2]),
        InputMode::ConfirmDelete => draw_delete_prompt(frame, app, chunks[2]),
        InputMode::Normal | InputMode::Form => draw_status_bar(frame, app, chunks[2]),
    }

    if let Some(form) = &app.form {
        draw_form(frame, form);
    }
}

/// Title and counts
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Links Vault ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {} total links", app.total),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    if !app.search_term.is_empty() {
        spans.push(Span::styled(
            format!("  {} matching results", app.links.len()),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the links list (left)
fn draw_links_pane(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Links ({}) ", app.links.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    if app.links.is_empty() {
        let (heading, hint) = if app.search_term.is_empty() {
            (
                "No links saved yet",
                "Start building your links collection by adding your first link (a)",
            )
        } else {
            ("No matching links found", "Try adjusting your search terms")
        };
        let content = vec![
            Line::from(""),
            Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::DIM))),
        ];
        let paragraph = Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let max_len = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .links
        .iter()
        .map(|link| {
            let title = Line::from(Span::raw(truncate(&link.title, max_len)));
            let host = Line::from(Span::styled(
                truncate(&format_display_url(&link.url), max_len),
                Style::default().add_modifier(Modifier::DIM),
            ));
            ListItem::new(vec![title, host])
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED),
    );

    let mut state = ListState::default();
    state.select(Some(app.link_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the detail pane (right)
fn draw_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let content = if let Some(link) = app.current_link() {
        let tags = if link.tags.is_empty() {
            "-".to_string()
        } else {
            link.tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join("  ")
        };
        let description = if link.description.is_empty() {
            "-"
        } else {
            link.description.as_str()
        };

        vec![
            Line::from(vec![Span::styled("Title: ", bold), Span::raw(&link.title)]),
            Line::from(""),
            Line::from(vec![Span::styled("URL: ", bold), Span::raw(&link.url)]),
            Line::from(""),
            Line::from(vec![Span::styled("Description: ", bold), Span::raw(description)]),
            Line::from(""),
            Line::from(vec![Span::styled("Tags: ", bold), Span::raw(tags)]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Created: ", bold),
                Span::raw(link.created_at.format("%Y-%m-%d %H:%M").to_string()),
            ]),
            Line::from(vec![
                Span::styled("ID: ", bold),
                Span::styled(link.id.to_string(), Style::default().add_modifier(Modifier::DIM)),
            ]),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select a link to view details",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ]
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = match &app.status_message {
        Some(msg) if app.status_is_error => {
            Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Red))
        }
        Some(msg) => Paragraph::new(msg.as_str()).style(Style::default().add_modifier(Modifier::DIM)),
        None => {
            let hint = if app.search_term.is_empty() {
                "a:add  e:edit  d:del  /:search  Enter:open  ?:help  q:quit".to_string()
            } else {
                format!("search: \"{}\"  Esc:clear  /:change  q:quit", app.search_term)
            };
            Paragraph::new(hint).style(Style::default().add_modifier(Modifier::DIM))
        }
    };

    frame.render_widget(paragraph, area);
}

/// Draw search input at the bottom
fn draw_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let prefix = "/";

    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Cyan)),
        Span::raw(app.search_term.as_str()),
        Span::styled(
            format!("  ({} matches)", app.links.len()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + (prefix.len() + app.search_term.chars().count()) as u16;
    frame.set_cursor_position((cursor_x, area.y));
}

/// Draw the delete confirmation at the bottom
fn draw_delete_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .pending_delete
        .as_ref()
        .map(|l| l.title.as_str())
        .unwrap_or("");

    let line = Line::from(vec![
        Span::styled(
            "Are you sure you want to delete this link? ",
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(format!("\"{}\" ", title), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("[y/N]"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the add/edit form as a centered popup
fn draw_form(frame: &mut Frame, form: &Form) {
    let area = centered_rect(60, 14, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .title_bottom(" Tab:next field  Enter:save  Esc:cancel ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(FormField::ALL.map(|_| Constraint::Length(3)))
        .split(inner);

    for (field, row) in FormField::ALL.into_iter().zip(rows.iter()) {
        let focused = field == form.field;
        let border_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let value = form.value(field);
        let input = Paragraph::new(value).block(
            Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(input, *row);

        if focused {
            let max_x = row.x + row.width.saturating_sub(2);
            let cursor_x = (row.x + 1 + value.chars().count() as u16).min(max_x);
            frame.set_cursor_position((cursor_x, row.y + 1));
        }
    }
}

/// A rectangle of `percent_x` width and `height` rows centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvault_core::{LinkInput, LinkStore, MemoryStore};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 10);
        let rect = centered_rect(60, 14, area);
        assert!(rect.height <= area.height);
        assert_eq!(rect.width, 60);
    }

    #[test]
    fn test_draw_empty_vault() {
        let store = LinkStore::load(MemoryStore::new(), "linksVault");
        let app = App::new(&store);

        let screen = render(&app);
        assert!(screen.contains("Links Vault"));
        assert!(screen.contains("0 total links"));
        assert!(screen.contains("No links saved yet"));
    }

    #[test]
    fn test_draw_shows_host_and_detail() {
        let mut store = LinkStore::load(MemoryStore::new(), "linksVault");
        store
            .create(
                &LinkInput::new("Rust", "https://www.rust-lang.org/learn").with_tags("lang"),
            )
            .unwrap();
        let app = App::new(&store);

        let screen = render(&app);
        assert!(screen.contains("1 total links"));
        assert!(screen.contains("www.rust-lang.org"));
        assert!(screen.contains("#lang"));
    }

    #[test]
    fn test_draw_form_popup() {
        let store = LinkStore::load(MemoryStore::new(), "linksVault");
        let mut app = App::new(&store);
        app.open_add_form();

        let screen = render(&app);
        assert!(screen.contains("Add New Link"));
        assert!(screen.contains("Title *"));
        assert!(screen.contains("URL *"));
    }

    #[test]
    fn test_long_title_is_truncated_in_list() {
        let mut store = LinkStore::load(MemoryStore::new(), "linksVault");
        let title = "A very long title that cannot possibly fit in the list pane at all";
        store.create(&LinkInput::new(title, "example.com")).unwrap();
        let app = App::new(&store);

        let screen = render(&app);
        assert!(screen.contains("A very long title"));
        assert!(screen.contains("..."));
    }
}
