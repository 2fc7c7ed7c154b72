use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::{File, OpenOptions},
    io, panic,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tokio::sync::mpsc;

use vfsh::config::{self, Config, DATABASE_FILE, LOG_FILE};
use vfsh::handlers;
use vfsh::messages::Msg;
use vfsh::model::Model;
use vfsh::services::{finish_session, input, TaskRunner, SHUTDOWN_GRACE};
use vfsh::ui::{
    self,
    icons::{IconRenderer, IconTheme},
};
use vfsh::vfs::{demo, MemoryBackend, SqliteBackend, Storage, Vfs};

/// Mount point of the scratch in-memory backend
const EPHEMERAL_MOUNT: &str = "/ephemeral";

/// Terminal file browser and shell for a virtual filesystem
#[derive(Parser, Debug)]
#[command(name = "vfsh", author, version, about, long_about = None)]
struct Args {
    /// Log at debug level to <config dir>/vfsh.log
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the interface (default)
    Tui {
        /// Config directory (default: platform config dir + /vfsh)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Mount sample files at /demo
        #[arg(long)]
        demo: bool,
    },

    /// Print version information
    Version {
        /// Version number only
        #[arg(long)]
        short: bool,

        /// Machine-readable output
        #[arg(long, conflicts_with = "short")]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Command::Version { short, json }) => {
            print_version(short, json)?;
            Ok(())
        }
        Some(Command::Tui { config, demo }) => run_tui(config.as_deref(), demo, args.debug).await,
        None => run_tui(None, false, args.debug).await,
    }
}

fn print_version(short: bool, json: bool) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    if json {
        let info = serde_json::json!({
            "name": name,
            "version": version,
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else if short {
        println!("{}", version);
    } else {
        println!("{} {}", name, version);
    }
    Ok(())
}

/// Route tracing output to the log file; the terminal belongs to the UI
fn init_logging(dir: &Path, debug: bool) -> Result<()> {
    let path = dir.join(LOG_FILE);
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))
}

/// Root on SQLite, scratch space in memory, optional demo tree
fn open_storage(dir: &Path, with_demo: bool) -> Result<Vfs> {
    let vfs = Vfs::new();

    let db_path = dir.join(DATABASE_FILE);
    let root = SqliteBackend::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    vfs.mount("/", Arc::new(root))?;
    vfs.mount(EPHEMERAL_MOUNT, Arc::new(MemoryBackend::new()))?;

    if with_demo {
        demo::seed(&vfs).context("failed to seed demo files")?;
    }

    Ok(vfs)
}

/// Leave raw mode and the alternate screen before the panic message prints
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    match Terminal::new(backend) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            Err(e.into())
        }
    }
}

/// Undo `setup_terminal`, attempting every step even if one fails
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let cursor = terminal.show_cursor();
    raw?;
    screen?;
    cursor?;
    Ok(())
}

async fn run_tui(config_override: Option<&Path>, with_demo: bool, debug: bool) -> Result<()> {
    let dir = config::config_dir(config_override)?;
    config::ensure_dir(&dir)?;
    init_logging(&dir, debug)?;

    tracing::info!(dir = %dir.display(), "starting vfsh");

    let config = Config::load(&dir)?;
    let storage: Arc<dyn Storage> = Arc::new(open_storage(&dir, with_demo)?);

    let (tx, rx) = mpsc::unbounded_channel();
    let runner = TaskRunner::new(Arc::clone(&storage), tx.clone(), config.preview_options());

    install_panic_hook();
    let ui_result = run_ui(&runner, tx, rx, &config).await;

    // From here on the store is closed exactly once, whatever the UI did
    finish_session(ui_result, &runner, &*storage, SHUTDOWN_GRACE).await
}

/// Terminal setup, event loop and restore; a loop error wins over a restore error
async fn run_ui(
    runner: &TaskRunner,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    config: &Config,
) -> Result<()> {
    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let result = run_app(&mut terminal, runner, tx, rx, config).await;
    let restored = restore_terminal(&mut terminal).context("failed to restore terminal");
    result.and(restored)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    runner: &TaskRunner,
    tx: mpsc::UnboundedSender<Msg>,
    mut rx: mpsc::UnboundedReceiver<Msg>,
    config: &Config,
) -> Result<()> {
    let _listener = input::spawn_listener(tx);
    let icons = IconRenderer::new(config.icon_mode, IconTheme::default());

    let mut model = Model::new(config.settings());

    let size = terminal.size()?;
    runner.dispatch_all(handlers::update(
        &mut model,
        Msg::Resize {
            width: size.width,
            height: size.height,
        },
    ));
    runner.dispatch_all(handlers::init(&model));

    loop {
        terminal.draw(|f| ui::render(f, &model, &icons))?;

        let Some(msg) = rx.recv().await else {
            break;
        };
        runner.dispatch_all(handlers::update_queued(&mut model, msg, &mut rx));

        if model.ui.should_quit {
            break;
        }
    }

    tracing::info!(pending = runner.pending(), "event loop finished");
    Ok(())
}
