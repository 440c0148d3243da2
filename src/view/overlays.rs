//! Overlay rendering (notification toast, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::utils::POINT;

/// Small toast in the bottom-right corner, above the footer
pub fn render_notification(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let popup_width = (message.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(2))
        .max(10);
    let popup_height = 3.min(area.height);

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width + 1),
        y: area.height.saturating_sub(popup_height + 1),
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let toast = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(POINT))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(toast, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / /", "Focus search bar"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Search / Open song"),
        ("Backspace / Esc", "Go back"),
        ("M / Home", "Home"),
        ("L", "My Library"),
        ("", ""),
        ("", "── Song ──"),
        ("X / Delete", "Save / Unsave highlighted"),
        ("S", "Save / Unsave detail song"),
        ("R", "Refresh recommendations"),
        ("C", "Copy \"title - artist\""),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_width = 62.min(area.width);
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_x = area.width.saturating_sub(popup_width) / 2;
    let popup_y = area.height.saturating_sub(popup_height) / 2;

    let popup_area = Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    };

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(POINT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(POINT))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(POINT).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
