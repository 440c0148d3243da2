//! Main content area rendering (home, search results, detail, library)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use super::screen::{Body, DetailCard, FeaturedCard, Screen, SongRow, EMPTY_LIBRARY_TEXT, LIBRARY_HINT, LOADING_TEXT};
use super::utils::{border_style, calculate_num_width, render_scrollable_list, truncate_string, POINT};

const SAVED_MARK: &str = "♥";

pub fn render_main_content(frame: &mut Frame, area: Rect, screen: &Screen) {
    let is_focused = screen.content_focused;

    match &screen.body {
        Body::Loading => {
            let loading = Paragraph::new(LOADING_TEXT)
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::horizontal(1))
                        .border_style(border_style(is_focused)),
                );
            frame.render_widget(loading, area);
        }
        Body::Main { featured, starters, selected } => {
            render_home(frame, area, featured.as_ref(), starters, *selected, is_focused);
        }
        Body::Search { rows, selected } => {
            render_song_list(frame, area, " Search Results ", rows, *selected, is_focused, "검색 결과가 없습니다.");
        }
        Body::Detail { card, recommendations, selected } => {
            render_detail(frame, area, card, recommendations, *selected, is_focused);
        }
        Body::Saved { rows, selected } => {
            let title = format!(" My Library · {} ", LIBRARY_HINT);
            render_song_list(frame, area, &title, rows, *selected, is_focused, EMPTY_LIBRARY_TEXT);
        }
    }
}

fn saved_line(saved: bool) -> Span<'static> {
    if saved {
        Span::styled(format!("{} Saved", SAVED_MARK), Style::default().fg(POINT).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("♡ Not saved", Style::default().fg(Color::DarkGray))
    }
}

fn render_home(
    frame: &mut Frame,
    area: Rect,
    featured: Option<&FeaturedCard>,
    starters: &[String],
    selected_index: usize,
    is_focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Featured card
            Constraint::Min(0),    // Starter list
        ])
        .split(area);

    let lines = match featured {
        Some(card) => vec![
            Line::from(Span::styled(
                format!("{} - {}", card.title, card.artist),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "▶ {}",
                card.embed_url.as_deref().unwrap_or("No video available")
            )),
            Line::from(format!("♪ {}", card.music_url)),
            Line::from(vec![saved_line(card.saved), Span::raw("   x: save  c: copy")]),
        ],
        None => vec![Line::from(Span::styled(
            "No featured song yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Today's Pick ")
                .title_style(Style::default().fg(POINT).add_modifier(Modifier::BOLD))
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(header, chunks[0]);

    let num_width = calculate_num_width(starters.len());
    let items: Vec<ListItem> = starters
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = row_style(i == selected_index, is_focused);
            ListItem::new(format!(" {:<num_width$}  {}", i + 1, label, num_width = num_width)).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Start digging · Enter to search ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));
    render_scrollable_list(frame, chunks[1], items, selected_index, block);
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    card: &DetailCard,
    recommendations: &[SongRow],
    selected_index: usize,
    is_focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Song card
            Constraint::Min(0),    // Recommendations
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.artist.clone(), Style::default().fg(POINT))),
        Line::from(Span::styled(card.meta.clone(), Style::default().fg(Color::Gray))),
        Line::from(format!("🖼 {}", card.thumbnail)),
        Line::from(format!("♪ {}", card.music_url)),
        Line::from(vec![saved_line(card.saved), Span::raw("   s: save  r: refresh  Backspace: back")]),
    ];
    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(header, chunks[0]);

    render_song_list(
        frame,
        chunks[1],
        " 비슷한 노래 추천 ",
        recommendations,
        selected_index,
        is_focused,
        "추천 곡을 찾지 못했습니다. r 키로 다시 시도하세요.",
    );
}

fn render_song_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[SongRow],
    selected_index: usize,
    is_focused: bool,
    empty_text: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    if rows.is_empty() {
        let empty = Paragraph::new(empty_text.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items = render_song_items(rows, selected_index, is_focused, content_width);
    render_scrollable_list(frame, area, items, selected_index + 1, block); // +1 for header
}

fn row_style(is_selected: bool, is_focused: bool) -> Style {
    if is_selected && is_focused {
        Style::default().fg(POINT).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn render_song_items(
    rows: &[SongRow],
    selected_index: usize,
    is_focused: bool,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(rows.len());
    let saved_width = 1;
    // Format: " {num}   {saved}   {title}   {subtitle}"
    let fixed_width = 1 + num_width + 3 + saved_width + 3 + 3;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 45) / 100;
    let subtitle_width = remaining_width.saturating_sub(title_width);

    let mut items: Vec<ListItem<'static>> = vec![
        ListItem::new(format!(
            " {:<num_width$}   {}   {:<title_width$}   {}",
            "#", " ", "Title", "Artist",
            num_width = num_width,
            title_width = title_width,
        ))
        .style(Style::default().fg(POINT).add_modifier(Modifier::BOLD))
    ];

    items.extend(rows.iter().enumerate().map(|(i, row)| {
        let saved_indicator = if row.saved { SAVED_MARK } else { " " };
        let title_str = truncate_string(&row.title, title_width);
        let subtitle_str = truncate_string(&row.subtitle, subtitle_width);
        ListItem::new(format!(
            " {:<num_width$}   {}   {}   {}",
            i + 1, saved_indicator, title_str, subtitle_str,
            num_width = num_width,
        ))
        .style(row_style(i == selected_index, is_focused))
    }));
    items
}
