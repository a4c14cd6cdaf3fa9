use quakes::adapters::ReqwestHttpClient;
use quakes::app::{App, Focus};
use quakes::cli::{parse_args, run_cli_command};
use quakes::config::Config;
use quakes::logging::init_logging;
use quakes::terminal::{setup_panic_hook, TerminalManager};
use quakes::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// UI tick: debounce deadlines and camera animation are checked this often.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    if run_cli_command(parse_args(std::env::args())) {
        return Ok(());
    }

    color_eyre::install()?;
    setup_panic_hook();
    init_logging(None);

    let config = Config::from_env();
    if !config.credential.is_configured() {
        tracing::warn!("no map credential configured; map and search are disabled");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let mut app = App::new(config, Arc::new(ReqwestHttpClient::new()));
        app.load_initial_data();

        let mut term_manager = TerminalManager::new()?;
        let result = run_app(term_manager.terminal(), &mut app).await;
        app.shutdown();
        term_manager.restore()?;

        if let Err(ref err) = result {
            tracing::error!(error = %err, "event loop failed");
        }
        tracing::info!("quakes exiting");
        result
    })
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let Some(mut message_rx) = app.message_rx.take() else {
        return Ok(());
    };

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        let timeout = tokio::time::sleep(TICK);

        tokio::select! {
            _ = timeout => {
                app.tick(Instant::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => app.handle_key(key, Instant::now()),
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse, Instant::now()),
                    Some(Ok(Event::Paste(text))) if app.focus == Focus::Search => {
                        let now = Instant::now();
                        for c in text.chars().filter(|c| !c.is_control()) {
                            app.query.push(c, now);
                        }
                        app.mark_dirty();
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "terminal event error");
                    }
                    None => return Ok(()),
                }
            }

            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
            }
        }
    }
}
