//! sheet_tui - Character sheet calculators in the terminal

mod app;
mod guide;
mod ui;

use app::{App, Tab};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sheet_core::config::{default_config, SheetConfig};
use sheet_core::storage::FileStore;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "sheet_manager";
const CONFIG_FILE: &str = "sheet.toml";
const LOG_FILE: &str = "sheet_manager.log";

/// Config from the first argument, then the user config dir, then built-in defaults
fn load_config() -> SheetConfig {
    let path = std::env::args().nth(1).map(PathBuf::from).or_else(|| {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(CONFIG_FILE))
            .filter(|p| p.exists())
    });

    match path {
        Some(path) => match SheetConfig::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                default_config()
            }
        },
        None => default_config(),
    }
}

fn data_dir(config: &SheetConfig) -> PathBuf {
    config.storage.dir.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(APP_DIR))
    })
}

/// Log to a file so output does not tear the alternate screen
fn init_logging(dir: &Path) {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("Failed to create data directory: {}", e);
        return;
    }
    let file = match File::create(dir.join(LOG_FILE)) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to create log file: {}", e);
            return;
        }
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
}

fn main() -> io::Result<()> {
    // Logging needs the data dir before the config is known
    let config = default_config();
    let bootstrap_dir = data_dir(&config);
    init_logging(&bootstrap_dir);

    let config = load_config();
    let dir = data_dir(&config);
    let store = FileStore::new(&dir);
    let mut app = App::new(config, store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => break,
            KeyCode::Char('c') if ctrl => break,
            KeyCode::Char('n') if ctrl => app.add_row(),
            KeyCode::Char('d') if ctrl => app.add_defense(),
            KeyCode::Char('x') if ctrl => app.remove_defense(),
            KeyCode::Char('l') if ctrl => app.clear_page(),
            KeyCode::Char('z') if ctrl && app.current_tab == Tab::Profile => app.undo_profile(),
            KeyCode::Char('r') if ctrl && app.current_tab == Tab::Profile => app.build_profile(),
            KeyCode::Char('s') if ctrl => app.save_profile(),
            KeyCode::Char('e') if ctrl => {
                app.export_summary();
            }
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => app.on_char(c),
            KeyCode::Tab => app.next_tab(),
            KeyCode::BackTab => app.prev_tab(),
            KeyCode::F(n @ 1..=5) => app.set_tab(n as usize - 1),
            KeyCode::Up => app.on_up(),
            KeyCode::Down => app.on_down(),
            KeyCode::Left => app.on_left(),
            KeyCode::Right => app.on_right(),
            KeyCode::Enter => app.on_enter(),
            KeyCode::Backspace => app.on_backspace(),
            _ => {}
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("Session ended");
    Ok(())
}
