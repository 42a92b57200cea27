use cryptoquip::adapters::ReqwestHttpClient;
use cryptoquip::api::PuzzleClient;
use cryptoquip::app::{App, AppMessage, CommandRunner};
use cryptoquip::startup::{init_logging, AppConfig};
use cryptoquip::storage::{PlayerStore, SessionStore};
use cryptoquip::terminal::{setup_panic_hook, TerminalManager};
use cryptoquip::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Serial event loop: draw when dirty, then fold one terminal event or
/// command result into the app.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &CommandRunner,
    mut message_rx: mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    let startup = app.init();
    runner.dispatch_all(startup);

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        let msg = tokio::select! {
            event = event_stream.next() => match event {
                Some(Ok(Event::Key(key))) => AppMessage::Key(key),
                Some(Ok(Event::Mouse(mouse))) => AppMessage::Mouse(mouse),
                Some(Ok(Event::Resize(width, height))) => AppMessage::Resize { width, height },
                Some(Ok(_)) => continue,
                Some(Err(err)) => {
                    warn!(error = %err, "Terminal event error");
                    continue;
                }
                None => break,
            },
            Some(msg) = message_rx.recv() => msg,
            else => break,
        };

        let commands = app.update(msg);
        runner.dispatch_all(commands);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("cryptoquip {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;

    let config = AppConfig::from_env()?.with_args(std::env::args().skip(1))?;
    let log_path = init_logging(&config.data_dir)?;
    info!(
        version = VERSION,
        api_url = %config.api_url,
        log = %log_path.display(),
        launch = ?config.launch,
        "Starting cryptoquip"
    );

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;

    let http = Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout));
    let api = PuzzleClient::new(config.api_url.clone(), http);
    let sessions = SessionStore::new(&config.data_dir);
    let players = PlayerStore::new(&config.data_dir);

    let (message_tx, message_rx) = mpsc::unbounded_channel();
    let runner = CommandRunner::new(api, sessions, players, message_tx);
    let mut app = App::new(config.launch).with_max_width(config.max_width);

    let mut manager = TerminalManager::new()?;
    let result = runtime.block_on(run_app(manager.terminal(), &mut app, &runner, message_rx));
    manager.restore()?;

    // Saves still in flight hold older tickets and are dropped after this one.
    if let Some(snapshot) = app.session_snapshot() {
        if let Err(err) = runner.session_writer().write_latest(&snapshot) {
            warn!(game_id = %snapshot.game_id, error = %err, "Failed to save session on exit");
        }
    }

    info!("Exiting");
    result
}
