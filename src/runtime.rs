//! Main application runtime: the event loop and store task dispatch.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{Context, Result};
use tokio::sync::mpsc;

use crate::app::{self, tasks, AppAction, TaskResult};
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::store::{MemoryStore, SqliteStore, Store};
use crate::ui::theme;
use crate::{event, logging, ui};

/// Run the browser until the user quits.
pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load();

    // Logging problems are reported before the terminal is taken over.
    let _log_guard = match logging::init(&cli.log_path(), &config.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {e:#}");
            None
        }
    };

    theme::set_theme(config.color_theme.colors());

    let store: Arc<dyn Store> = if cli.memory {
        Arc::new(MemoryStore::demo())
    } else {
        let db = SqliteStore::open(&cli.db)
            .with_context(|| format!("could not open database {}", cli.db.display()))?;
        Arc::new(db)
    };
    tracing::info!(source = %cli.source_label(), "store opened");

    let page_size = cli.page_size(&config);
    let format = cli.format(&config);
    let mut app = app::App::new(cli.source_label(), config, page_size, format);

    let mut terminal = ratatui::init();
    let outcome = event_loop(&mut terminal, &mut app, store).await;
    ratatui::restore();
    tracing::info!("exiting");
    outcome
}

async fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut app::App,
    store: Arc<dyn Store>,
) -> Result<()> {
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<TaskResult>();
    let mut events = event::EventHandler::new(Duration::from_millis(50));

    let size = terminal.size().context("could not read terminal size")?;
    app.resize(size.width, size.height);
    app.start();
    dispatch(app, &store, &result_tx);

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(event::AppEvent::Key(key)) => app.handle_key(key),
                Some(event::AppEvent::Resize(width, height)) => app.resize(width, height),
                None => app.running = false,
            },
            Some(result) = result_rx.recv() => app.apply_result(result),
        }

        dispatch(app, &store, &result_tx);
    }
    Ok(())
}

/// Run queued actions: store tasks on the blocking pool, the rest inline.
fn dispatch(app: &mut app::App, store: &Arc<dyn Store>, results: &mpsc::UnboundedSender<TaskResult>) {
    for action in app.take_actions() {
        match action {
            AppAction::SaveConfig => app.config.save(),
            action => {
                tracing::debug!(?action, "dispatching store task");
                let store = Arc::clone(store);
                let results = results.clone();
                tokio::task::spawn_blocking(move || {
                    if let Some(result) = tasks::execute(store.as_ref(), action) {
                        // The loop only drops the receiver on exit.
                        let _ = results.send(result);
                    }
                });
            }
        }
    }
}
