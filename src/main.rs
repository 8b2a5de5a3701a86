use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plant_quiz::{App, Catalog, Config, logger, ui};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::path::PathBuf;

/// Practice common and scientific plant names in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (defaults to ./plant-quiz.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Plant list to preselect in the menu
    #[arg(short, long)]
    source: Option<String>,

    /// First plant number of the practice range
    #[arg(long)]
    low: Option<i64>,

    /// Last plant number of the practice range
    #[arg(long)]
    high: Option<i64>,

    /// Log file location
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logger::default_log_path);
    let _guard = logger::init(&log_path)
        .with_context(|| format!("cannot open log file {}", log_path.display()))?;

    let config = Config::load(cli.config.as_deref()).context("cannot read configuration")?;
    let sources = config.resolve_sources();
    tracing::info!(count = sources.len(), "plant lists found");

    let catalog = Catalog::new(sources, config.columns.clone());
    let mut app = App::new(catalog, config.range.initial_window);
    if let Some(name) = &cli.source {
        match app.catalog.position(name) {
            Some(index) => app.selected_source = index,
            None => tracing::warn!(source = %name, "unknown plant list on command line"),
        }
    }
    if cli.low.is_some() || cli.high.is_some() {
        app.initial_bounds = Some((cli.low, cli.high));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal loop failed");
    }
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    tracing::info!("quit");
    Ok(())
}
