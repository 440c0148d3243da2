mod clipboard;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use clipboard::SystemClipboard;
use config::Config;
use controller::AppController;
use model::{AppModel, DiscoveryService, FileStorage, GeminiClient, LibraryStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    if let Err(e) = logging::init_logging(&config.logging.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== K-PULSE Starting ===");

    // A missing key is not fatal; every fetch then takes its failure path
    let gemini = GeminiClient::new(&config.oracle)?;
    let oracle = Arc::new(DiscoveryService::new(Arc::new(gemini)));

    let store = LibraryStore::new(Box::new(FileStorage::new(config.storage.data_dir.clone())));
    let model = Arc::new(AppModel::new(store));
    let controller = AppController::new(model.clone(), oracle, Arc::new(SystemClipboard));

    controller.spawn(|c| async move { c.load_featured().await });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("K-PULSE shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        model.auto_clear_notification().await;

        let ui_state = model.get_ui_state().await;
        let content_state = model.get_content_state().await;
        let saved = model.get_saved_songs().await;

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, &saved);
        })?;

        // Short poll so finished fetches show up promptly
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
