//! LazyArt - browse the Art Institute of Chicago collection from the terminal.
//!
//! A paginated artwork table whose row selection survives page changes, with
//! a bulk action that selects the first N artworks of the collection.

mod api;
mod app;
mod config;
mod error;
mod events;
mod logging;
mod table;
mod tasks;
mod ui;

use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{error, info};

use crate::api::ArticClient;
use crate::app::App;
use crate::config::Config;
use crate::error::AppError;
use crate::events::EventHandler;
use crate::tasks::create_task_channel;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Parser, Debug)]
#[command(name = "lazyart", version)]
#[command(about = "Terminal browser for the Art Institute of Chicago collection")]
struct Cli {
    /// Catalog API base URL (overrides the config file).
    #[arg(long)]
    api_url: Option<String>,

    /// Path to the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    debug: bool,

    /// Do not capture the mouse.
    #[arg(long)]
    no_mouse: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.debug)?;

    if let Err(e) = run(cli) {
        error!(error = %e, critical = e.is_critical(), "Exiting with error");
        eprintln!("lazyart: {}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("  {}", action);
        }
        if let Some(dir) = logging::log_directory() {
            eprintln!("  Logs: {}", dir.display());
        }
        logging::shutdown();
        std::process::exit(1);
    }

    logging::shutdown();
    Ok(())
}

/// Resolve configuration, then run the TUI until the user quits.
fn run(cli: Cli) -> error::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    let mut config = Config::load_from(&config_path)?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if cli.no_mouse {
        config.mouse = false;
    }
    config.validate()?;

    if cli.init_config {
        config.save_to(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let client = ArticClient::from_config(&config)?;
    info!(api_url = %client.base_url(), mouse = config.mouse, "Configuration resolved");

    let mut terminal = init_terminal(config.mouse)?;
    let result = event_loop(&mut terminal, client, &config);
    restore_terminal(config.mouse)?;
    result
}

/// Main application loop: draw, handle one event, dispatch work, apply results.
fn event_loop(terminal: &mut Tui, client: ArticClient, config: &Config) -> error::Result<()> {
    let events = EventHandler::with_tick_rate(config.tick_rate_ms);
    let (mut rx, spawner) = create_task_channel(client);

    let mut app = App::new();
    app.start();

    loop {
        for command in app.take_commands() {
            spawner.dispatch(command);
        }

        terminal
            .draw(|frame| app.view(frame))
            .map_err(|e| AppError::terminal(e.to_string()))?;

        let event = events.next()?;
        app.update(event);

        loop {
            match rx.try_recv() {
                Ok(message) => app.handle_api_message(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(AppError::other("Background task channel closed"));
                }
            }
        }

        if app.should_quit() {
            info!(
                selected = app.table().selection().len(),
                "Quitting"
            );
            return Ok(());
        }
    }
}

/// Enter raw mode and the alternate screen.
///
/// A panic from here on restores the terminal before the default hook
/// prints, and a failure partway through setup undoes what was done.
fn init_terminal(mouse: bool) -> error::Result<Tui> {
    install_panic_hook(mouse);
    enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;

    let setup = || -> io::Result<Tui> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        Terminal::new(CrosstermBackend::new(stdout))
    };

    setup().map_err(|e| {
        if let Err(restore_err) = restore_terminal(mouse) {
            error!(error = %restore_err, "Failed to restore terminal after setup error");
        }
        AppError::terminal(e.to_string())
    })
}

fn install_panic_hook(mouse: bool) {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(mouse);
        original_hook(panic_info);
    }));
}

fn restore_terminal(mouse: bool) -> io::Result<()> {
    disable_raw_mode()?;
    write_restore_sequence(&mut io::stdout(), mouse)
}

/// Leave the alternate screen, release the mouse and show the cursor.
fn write_restore_sequence<W: Write>(out: &mut W, mouse: bool) -> io::Result<()> {
    if mouse {
        execute!(out, DisableMouseCapture)?;
    }
    execute!(out, LeaveAlternateScreen, Show)
}
