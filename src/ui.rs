use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Mode};
use crate::session::Theme;
use crate::task::Status;

const SIDEBAR_WIDTH: u16 = 22;
const HELP: &str =
    "←/→ column  ↑/↓ task  Tab board  a add  n new board  e edit  Enter/> next  < back  d delete  s sidebar  t theme  q quit";

fn base_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().fg(Color::White),
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
    }
}

fn column_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Cyan,
        Status::Doing => Color::Magenta,
        Status::Done => Color::Green,
    }
}

pub fn draw<S, C>(f: &mut Frame, app: &App<S, C>) {
    let base = base_style(app.session.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = app.active_board().unwrap_or("No boards yet, press n");
    f.render_widget(
        Paragraph::new(title)
            .style(base.add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title("Board")),
        rows[0],
    );

    let body = if app.session.show_sidebar {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .split(rows[1]);
        draw_sidebar(f, app, split[0], base);
        split[1]
    } else {
        rows[1]
    };
    draw_columns(f, app, body, base);
    draw_footer(f, app, rows[2], base);
}

fn draw_sidebar<S, C>(f: &mut Frame, app: &App<S, C>, area: Rect, base: Style) {
    let items: Vec<ListItem> = app
        .boards
        .iter()
        .map(|board| {
            let style = if Some(board.as_str()) == app.active_board() {
                base.fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                base
            };
            ListItem::new(Span::styled(board.as_str(), style))
        })
        .collect();
    let header = format!("All boards ({})", app.boards.len());
    f.render_widget(
        List::new(items).block(Block::default().title(header).borders(Borders::ALL)),
        area,
    );
}

fn draw_columns<S, C>(f: &mut Frame, app: &App<S, C>, area: Rect, base: Style) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for status in Status::ALL {
        let tasks = app.view.column(status);
        let items: Vec<ListItem> = tasks
            .iter()
            .map(|t| ListItem::new(Line::from(Span::styled(t.title.as_str(), base))))
            .collect();

        let selected = app.selected_status == status;
        let heading = format!("{} ({})", status.as_str().to_uppercase(), tasks.len());
        let list = List::new(items)
            .style(base)
            .block(
                Block::default()
                    .title(Span::styled(heading, Style::default().fg(column_color(status))))
                    .borders(Borders::ALL)
                    .border_style(if selected {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    }),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

        let mut state = ListState::default();
        if selected && !tasks.is_empty() {
            state.select(Some(app.selected_task));
        }
        f.render_stateful_widget(list, chunks[status.index()], &mut state);
    }
}

fn draw_footer<S, C>(f: &mut Frame, app: &App<S, C>, area: Rect, base: Style) {
    let (title, text) = match &app.mode {
        Mode::Prompt(prompt) => (prompt.kind.label(), format!("{}_", prompt.input)),
        Mode::Normal => match (app.selected(), &app.message) {
            (_, Some(message)) => ("Error", message.clone()),
            (Some(task), None) if !task.description.is_empty() => {
                ("Description", task.description.clone())
            }
            _ => ("Keys", HELP.to_string()),
        },
    };
    let text = match (&app.mode, &app.message) {
        (Mode::Prompt(_), Some(message)) => format!("{text}  [{message}]"),
        _ => text,
    };
    f.render_widget(
        Paragraph::new(text)
            .style(base)
            .block(Block::default().title(title).borders(Borders::ALL)),
        area,
    );
}
