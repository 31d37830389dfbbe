use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use optcon::config::Config;
use optcon::session::{SessionOptions, settings_ui};
use optcon::store::memory::MemoryStore;
use optcon::store::nv_store::NvStore;
use optcon::store::SettingsStore;
use optcon::ui::console::TerminalConsole;
use optcon::ui::layout::layout_row;
use optcon::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "optcon", version, about = "Terminal option configuration console")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Options file to edit")]
    store: Option<PathBuf>,

    #[arg(long, help = "Edit in memory only; nothing is written to disk")]
    ephemeral: bool,

    #[arg(short = 'L', long, help = "Log level (trace, debug, info, warn, error)")]
    log_level: Option<String>,

    #[arg(short = 'F', long, help = "Log file; logging is off without one")]
    log_file: Option<String>,

    #[arg(long, help = "List available themes and exit")]
    list_themes: bool,

    #[arg(long, help = "Print settings and their stored values, then exit")]
    list: bool,

    #[arg(long, help = "Write the effective configuration to the config file")]
    save_config: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load()
        .with_context(|| format!("reading {}", Config::config_path().display()))?;
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(path) = cli.store {
        config.store_path = path.to_string_lossy().to_string();
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(file) = cli.log_file {
        config.log_file = file;
    }

    if config.logging_enabled() {
        init_logging(&config.log_level, &config.log_file);
    }

    if cli.save_config {
        config.save()?;
        println!("Wrote {}", Config::config_path().display());
    }

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut store: Box<dyn SettingsStore> = if cli.ephemeral {
        Box::new(MemoryStore::default())
    } else {
        let store = NvStore::open(&config.store_path)
            .with_context(|| format!("opening {}", config.store_path))?;
        Box::new(store)
    };

    if cli.list {
        print_settings(store.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let options = SessionOptions::from_config(&config);
    let mut console = TerminalConsole::new().context("initialising terminal")?;
    let result = settings_ui(&mut console, store.as_mut(), &options);
    drop(console);

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!("Session failed: {}", err);
            eprintln!("{err}");
            let code = u8::try_from(err.exit_code()).unwrap_or(1).max(1);
            Ok(ExitCode::from(code))
        }
    }
}

fn print_settings(store: &dyn SettingsStore) {
    for setting in store.settings() {
        let value = store.read(setting).unwrap_or_default();
        println!("{}", layout_row(setting.name, &value).text.trim_end());
    }
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
