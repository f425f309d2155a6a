//! skillplot - team rating charts in the terminal
//!
//! `skillplot view` opens the interactive scatter and density charts;
//! `skillplot export` renders one chart to SVG or JSON without a terminal.

mod app;
mod focus;
mod keybindings;
mod loader;
mod views;
mod widgets;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use app::App;
use skillplot_core::{
    export_scene, ChartKind, ChartSession, ExportFormat, QueryField, SkillplotConfig,
};

const LOG_ENV: &str = "SKILLPLOT_LOG";
const TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(author, version, about = "Team rating charts", long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/skillplot/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the charts interactively
    View(ViewArgs),
    /// Write one chart to a file
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// Rating table (.csv or .tsv)
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    data: PathBuf,

    /// Write logs here instead of discarding them
    #[arg(long, value_hint = ValueHint::FilePath)]
    log_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Rating table (.csv or .tsv)
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    data: PathBuf,

    /// Chart to export
    #[arg(long, value_enum, default_value_t = ChartOpt::Scatter)]
    chart: ChartOpt,

    /// Team to highlight on the scatter chart
    #[arg(long)]
    team: Option<String>,

    /// Left team on the density chart
    #[arg(long)]
    left: Option<String>,

    /// Right team on the density chart
    #[arg(long)]
    right: Option<String>,

    /// Output file; the extension picks SVG or JSON
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartOpt {
    Scatter,
    Density,
}

impl From<ChartOpt> for ChartKind {
    fn from(value: ChartOpt) -> Self {
        match value {
            ChartOpt::Scatter => ChartKind::Scatter,
            ChartOpt::Density => ChartKind::Density,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = SkillplotConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::View(args) => {
            init_logging(args.log_file.as_ref())?;
            view(args, config)
        }
        Command::Export(args) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(io::stderr)
                .init();
            export(args, config)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Logs go to `log_file` when given; the terminal belongs to the UI
fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(io::sink)
                .init();
        }
    }
    Ok(())
}

fn view(args: ViewArgs, config: SkillplotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let receiver = loader::spawn(args.data.clone());
    let mut app = App::new(&config, args.data.display().to_string(), receiver);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.poll_load();
        terminal.draw(|f| app.render(f))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

fn export(args: ExportArgs, config: SkillplotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let format = ExportFormat::from_path(&args.output)?;
    let mut session = ChartSession::new(&config);
    session.load(loader::load(&args.data));

    let queries = [
        (QueryField::Team, args.team),
        (QueryField::Left, args.left),
        (QueryField::Right, args.right),
    ];
    for (field, text) in queries {
        if let Some(text) = text {
            if session.on_query(field, &text).is_lookup_miss() {
                tracing::warn!("No team named {:?}", text.trim());
            }
        }
    }

    let kind = ChartKind::from(args.chart);
    export_scene(session.scene(kind), format, &args.output)?;
    println!("Wrote {} chart to {}", kind.name(), args.output.display());
    Ok(())
}
