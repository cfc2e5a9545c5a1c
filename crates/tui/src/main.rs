use anyhow::Result;
use clap::Parser;
use loadcell_tui::app::App;
use loadcell_tui::{Backend, Config};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "scale-wizard",
    version,
    about = "Add and calibrate HX711 load-cell scales on an OctoPrint host"
)]
struct Args {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Talk to an in-process simulated host instead of OctoPrint
    #[arg(long)]
    simulate: bool,
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn init_logging() -> Result<()> {
    let Some(dirs) = Config::project_dirs() else {
        return Ok(());
    };
    let log_dir = dirs.data_local_dir();
    std::fs::create_dir_all(log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("scale-wizard.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {e}");
    }

    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&config_path);
    config.apply_env();
    if args.simulate {
        config.wizard.simulate = true;
    }
    let backend = Backend::from_config(&config)?;
    tracing::info!(host = %backend.describe(), "Starting scale wizard");

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();
    let mut app = App::new(config, backend);

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &rt, &mut app);
    ratatui::restore();

    result
}

fn run(
    terminal: &mut ratatui::DefaultTerminal,
    rt: &tokio::runtime::Runtime,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|frame| app.render(frame))?;
    rt.block_on(app.init())?;

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;

            if let Event::Key(key) = &event {
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
            }

            if app.handle_event(event)? {
                break;
            }
        }

        app.process_events();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
