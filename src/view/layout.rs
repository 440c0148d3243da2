//! Layout rendering (top bar, footer)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use super::screen::{Screen, FOOTER, LOGO};
use super::utils::{border_style, POINT};

pub fn render_top_bar(frame: &mut Frame, area: Rect, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(11),    // Logo
            Constraint::Min(0),        // Search input
            Constraint::Length(20),    // Library button
        ])
        .split(area);

    let logo = Paragraph::new(LOGO)
        .alignment(Alignment::Center)
        .style(Style::default().fg(POINT).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(logo, chunks[0]);

    let (search_text, search_style) = if screen.search_query.is_empty() {
        ("아티스트, 노래 제목 검색...", Style::default().fg(Color::DarkGray))
    } else if screen.search_focused {
        (screen.search_query.as_str(), Style::default().fg(POINT))
    } else {
        (screen.search_query.as_str(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(border_style(screen.search_focused)),
        );
    frame.render_widget(search, chunks[1]);

    let library_style = if screen.library_active {
        Style::default().fg(POINT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let library = Paragraph::new(screen.library_label.as_str())
        .alignment(Alignment::Center)
        .style(library_style)
        .block(Block::default().borders(Borders::ALL).border_style(border_style(screen.library_active)));
    frame.render_widget(library, chunks[2]);
}

pub fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(format!("{}  ·  H: help  ·  Ctrl+Q: quit", FOOTER))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
