//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, ViewState};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Ctrl+Q quits from anywhere
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Help popup blocks all other interactions
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Search input
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => {
                    model.toggle_active_section().await;
                }
                KeyCode::Enter => {
                    if !ui_state.search_query.trim().is_empty() {
                        self.spawn(|c| async move { c.perform_search().await });
                    }
                }
                KeyCode::Esc => {
                    if ui_state.search_query.is_empty() {
                        model.set_active_section(ActiveSection::Content).await;
                    } else {
                        model.update_search_query(String::new()).await;
                    }
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                }
                KeyCode::Char(c) => {
                    model.append_to_search(c).await;
                }
                _ => {}
            }
            return Ok(());
        }

        let view = model.current_view().await;

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Up => {
                model.content_move_up().await;
            }
            KeyCode::Down => {
                model.content_move_down().await;
            }
            KeyCode::Enter => match view {
                ViewState::Main => {
                    let index = ui_state.selected_index;
                    self.spawn(move |c| async move { c.search_starter(index).await });
                }
                ViewState::Search | ViewState::Detail => {
                    if let Some(song) = model.get_highlighted_song().await {
                        self.spawn(|c| async move { c.select_song(song).await });
                    }
                }
                ViewState::Saved => {
                    if let Some(song) = model.get_highlighted_song().await {
                        self.copy_to_clipboard(&song).await;
                    }
                }
            },
            KeyCode::Backspace | KeyCode::Esc => {
                self.go_back().await;
            }
            // Save / unsave the highlighted song (featured song on the home view)
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
                if let Some(song) = model.get_highlighted_song().await {
                    self.toggle_save(&song).await;
                }
            }
            // Save / unsave the song the detail view is about
            KeyCode::Char('s') | KeyCode::Char('S') => {
                if view == ViewState::Detail {
                    if let Some(song) = model.get_selected_song().await {
                        self.toggle_save(&song).await;
                    }
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if view == ViewState::Detail {
                    self.spawn(|c| async move { c.refresh_recommendations().await });
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if let Some(song) = model.get_highlighted_song().await {
                    self.copy_to_clipboard(&song).await;
                }
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.open_library().await;
            }
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Home => {
                self.go_home().await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
