//! sprintdeck - a terminal drill-down browser for Jira.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};

use sprintdeck::app::App;
use sprintdeck::config::{Config, Profile};
use sprintdeck::error::AppError;
use sprintdeck::events::EventHandler;
use sprintdeck::logging;
use sprintdeck::tasks::{create_task_channel, TaskSpawner};

/// Browse Jira boards, active sprints and their issues.
#[derive(Debug, Parser)]
#[command(name = "sprintdeck", version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Profile to connect with.
    #[arg(short, long, value_name = "NAME")]
    profile: Option<String>,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging waits for the config, which picks its format.
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", AppError::from(e).user_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(None, config.settings.log_format) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    let profile = match config.select_profile(cli.profile.as_deref()) {
        Ok(profile) => profile.clone(),
        Err(e) => {
            eprintln!("{}", AppError::from(e).user_message());
            std::process::exit(1);
        }
    };
    info!(profile = %profile.name, host = %profile.host(), "Using profile");

    install_panic_hook();
    let mut terminal = setup_terminal().context("setting up the terminal")?;

    let result = run(&mut terminal, &config, profile).await;

    restore_terminal(&mut terminal).context("restoring the terminal")?;
    logging::shutdown();

    if let Err(err) = result {
        error!(error = %err, "Exiting with error");
        eprintln!("{}", err.user_message());
        std::process::exit(1);
    }
    Ok(())
}

/// The event loop: keys and ticks, then task messages, then dispatch, then draw.
async fn run(terminal: &mut Tui, config: &Config, profile: Profile) -> Result<(), AppError> {
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);
    let (mut rx, mut spawner) = create_task_channel();
    let max_retries = config.settings.max_retries;

    let mut app = App::new(&profile);
    spawner.spawn_connect(profile.clone(), max_retries);

    while !app.should_quit() {
        terminal
            .draw(|frame| app.view(frame))
            .map_err(|e| AppError::terminal(e.to_string()))?;

        let event = events.next().map_err(|e| AppError::terminal(e.to_string()))?;
        app.update(event)?;

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message)?;
        }

        if app.take_reconnect() {
            spawner.spawn_connect(profile.clone(), max_retries);
        }
        dispatch_fetches(&mut app, &mut spawner);
    }

    spawner.cancel();
    Ok(())
}

/// Spawn what the app queued. Each spawn aborts the fetch before it.
fn dispatch_fetches(app: &mut App, spawner: &mut TaskSpawner) {
    let requests = app.take_fetch_requests();
    let Some(client) = app.client().cloned() else {
        return;
    };
    for (ticket, request) in requests {
        spawner.spawn_fetch(&client, ticket, request);
    }
}

fn setup_terminal() -> io::Result<Tui> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = terminal::disable_raw_mode() {
            eprintln!("Failed to disable raw mode during panic: {}", e);
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
            eprintln!("Failed to leave alternate screen during panic: {}", e);
        }
        original_hook(panic_info);
    }));
}
