use super::{WidgetApp, SELECTOR_COLUMNS};
use crate::conversation::Phase;
use crate::language::Language;
use crate::transcript::{Message, Role};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const INPUT_PLACEHOLDER: &str =
    "Ask me about Dubai destinations, budget planning, or anything else...";

const FEATURE_HINTS: [&str; 3] = [
    "Budget Planning",
    "Destination Recommendations",
    "Real-time Information",
];

pub fn render(frame: &mut Frame, app: &WidgetApp) {
    let area = frame.area();
    match app.controller.phase() {
        Phase::SelectingLanguage => render_selector(frame, app, area),
        Phase::Chatting => render_chat(frame, app, area),
    }
}

// ============================================================
// Language selector
// ============================================================

fn render_selector(frame: &mut Frame, app: &WidgetApp, area: Rect) {
    let [title_area, grid_area, hints_area, footer_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(6),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(area);

    let title = Text::from(vec![
        Line::default(),
        Line::from(Span::styled(
            "Welcome to Dwntwna",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("Your AI Travel Assistant for Downtown Dubai"),
        Line::default(),
        Line::from(Span::styled(
            "Choose Your Language",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Select your preferred language to start planning your Dubai adventure",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), title_area);

    let languages = Language::all();
    let rows = languages.len().div_ceil(SELECTOR_COLUMNS);
    let row_areas = Layout::vertical(vec![Constraint::Length(3); rows]).split(grid_area);

    for (row, chunk) in languages.chunks(SELECTOR_COLUMNS).enumerate() {
        let Some(row_area) = row_areas.get(row) else {
            break;
        };
        let cells =
            Layout::horizontal(vec![Constraint::Fill(1); SELECTOR_COLUMNS]).split(*row_area);

        for (column, language) in chunk.iter().enumerate() {
            let index = row * SELECTOR_COLUMNS + column;
            let highlighted = index == app.selected;
            let border = if highlighted { Color::Yellow } else { Color::DarkGray };

            let button = Paragraph::new(format!(
                "{} {} ({})",
                language.flag_glyph,
                language.display_name,
                index + 1
            ))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
            frame.render_widget(button, cells[column]);
        }
    }

    let hints = Line::from(
        FEATURE_HINTS
            .iter()
            .enumerate()
            .flat_map(|(i, hint)| {
                let separator = if i == 0 { "" } else { "  •  " };
                [
                    Span::styled(separator, Style::default().fg(Color::DarkGray)),
                    Span::styled(*hint, Style::default().fg(Color::Cyan)),
                ]
            })
            .collect::<Vec<_>>(),
    );
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), hints_area);

    let footer = Paragraph::new(" ←/→/↑/↓ move  Enter select  1-6 choose  Esc quit ")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

// ============================================================
// Chat
// ============================================================

fn render_chat(frame: &mut Frame, app: &WidgetApp, area: Rect) {
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, app, header_area);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Downtown Dubai & Beyond ");
    let inner = chat_block.inner(chat_area);
    frame.render_widget(chat_block, chat_area);

    let lines = transcript_lines(app, usize::from(inner.width.max(1)));
    // Bottom-anchor: show the newest lines that fit
    let height = usize::from(inner.height);
    let tail = lines.len().saturating_sub(height);
    frame.render_widget(Paragraph::new(lines[tail..].to_vec()), inner);

    render_input(frame, app, input_area);

    let hint = if app.scroll_back > 0 {
        format!(" ↑/↓ scroll ({} back)  Ctrl+L language  Esc quit ", app.scroll_back)
    } else {
        " Enter send  ↑/↓ scroll  Ctrl+L language  Esc quit ".to_string()
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

fn render_header(frame: &mut Frame, app: &WidgetApp, area: Rect) {
    let badge = app
        .controller
        .language()
        .map(|l| format!(" {} {} ", l.flag_glyph, l.display_name))
        .unwrap_or_default();

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                "Dwntwna AI Concierge",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(badge, Style::default().bg(Color::DarkGray).fg(Color::White)),
        ]),
        Line::from(Span::styled(
            "Downtown Dubai Travel Assistant",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_input(frame: &mut Frame, app: &WidgetApp, area: Rect) {
    let awaiting = app.controller.is_awaiting_reply();
    let border = if awaiting { Color::DarkGray } else { Color::Yellow };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let input = app.controller.input();
    let paragraph = if input.is_empty() {
        Paragraph::new(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        // Keep the end of long input visible
        let inner_width = usize::from(area.width.saturating_sub(2));
        let count = input.chars().count();
        let visible: String = input.chars().skip(count.saturating_sub(inner_width)).collect();
        Paragraph::new(visible).style(Style::default().fg(Color::Cyan))
    };
    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);

    if !awaiting {
        let inner_width = area.width.saturating_sub(2);
        let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
        let cursor_x = area.x + 1 + typed.min(inner_width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// Rendered lines for the visible transcript, oldest first, stopping
/// `scroll_back` messages before the newest
fn transcript_lines(app: &WidgetApp, width: usize) -> Vec<Line<'static>> {
    let visible: Vec<&Message> = app.controller.visible_messages().collect();
    let shown = visible.len().saturating_sub(app.scroll_back);

    let mut lines = Vec::new();
    for message in &visible[..shown] {
        message_lines(message, width, &mut lines);
    }

    if app.controller.is_awaiting_reply() && app.scroll_back == 0 {
        let dots = ".".repeat(app.frame % 3 + 1);
        lines.push(Line::from(Span::styled(
            format!("Concierge is typing{dots}"),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

fn message_lines(message: &Message, width: usize, lines: &mut Vec<Line<'static>>) {
    let (label, color, alignment) = match message.role {
        Role::User => ("You", Color::Cyan, Alignment::Right),
        Role::Assistant => ("Concierge", Color::Yellow, Alignment::Left),
        Role::System => return,
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M:%S");

    // Bubbles take at most four fifths of the width
    let bubble = (width * 4 / 5).max(1);
    for text_line in message.content.lines() {
        for wrapped in wrap(text_line, bubble) {
            lines.push(Line::from(wrapped).alignment(alignment));
        }
    }
    lines.push(
        Line::from(vec![
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" · {time}"), Style::default().fg(Color::DarkGray)),
        ])
        .alignment(alignment),
    );
    lines.push(Line::default());
}

/// Greedy word wrap by display width; words wider than `width` are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = Span::raw(word).width();
        let needed = if current.is_empty() { word_width } else { word_width + 1 };

        if current_width + needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += needed;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            for c in word.chars() {
                let char_width = Span::raw(c.to_string()).width();
                if current_width + char_width > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += char_width;
            }
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}
