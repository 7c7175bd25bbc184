use std::{fs, io, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mockable::Clock;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use taskboard::{app::App, config::Config, ui, FileStorage, KeyValueStore, TaskStore};

fn init_logging(config: &Config) -> anyhow::Result<()> {
    // stdout belongs to the terminal UI, so logs only go to a file.
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(&config)?;

    let store = TaskStore::new(FileStorage::new(&config.data_file));
    if !config.no_seed {
        store.initialize()?;
    }
    let mut app = App::new(store)?;
    tracing::info!(data_file = %config.data_file.display(), "starting task board");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "task board exited with an error");
    }
    result
}

fn run_app<B, S, C>(terminal: &mut Terminal<B>, app: &mut App<S, C>) -> anyhow::Result<()>
where
    B: Backend,
    S: KeyValueStore,
    C: Clock,
{
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;
        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}
