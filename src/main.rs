use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::error::Error;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use pokerecord_archive::app::App;
use pokerecord_archive::cli::{render_lookup, render_names};
use pokerecord_archive::config::Config;
use pokerecord_archive::fetch::{HttpSource, PokeSource};
use pokerecord_archive::ui::draw;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();
    init_logging(&config)?;
    let source = HttpSource::new(&config);

    // One-shot modes that print to stdout instead of opening the interface.
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--list") {
        let out = render_names(source.fetch_all_names().await);
        if !out.is_empty() {
            println!("{}", out);
        }
        return Ok(());
    }
    if let Some(pos) = args.iter().position(|a| a == "--lookup") {
        let identifier = args.get(pos + 1).map(String::as_str).unwrap_or("");
        let as_json = args.iter().any(|a| a == "--json");
        let result = source.fetch_by_identifier(identifier).await;
        println!("{}", render_lookup(result, as_json));
        return Ok(());
    }

    tracing::info!(api_base = %config.api_base, "starting interface");
    let mut terminal = init_terminal()?;
    let mut app = App::new(source);
    let result = run(&mut terminal, &mut app).await;
    restore_terminal()?;
    result
}

fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    // The interface owns the terminal, so logs only go to a file when asked for.
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_terminal() -> Result<Tui, Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

async fn run<S: PokeSource>(terminal: &mut Tui, app: &mut App<S>) -> Result<(), Box<dyn Error>> {
    let tick_rate = Duration::from_millis(200);
    while app.running {
        terminal.draw(|f| draw(f, app))?;

        // Drawn with the status line showing; the request blocks until done.
        if app.pending.is_some() {
            app.run_pending().await;
            continue;
        }

        if event::poll(tick_rate)? {
            match event::read()? {
                CEvent::Key(key) => app.handle_key(key),
                CEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(())
}
