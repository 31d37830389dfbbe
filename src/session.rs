use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::app::App;
use crate::config::Config;
use crate::store::{SettingsStore, StoreError};
use crate::ui::canvas::{Canvas, ColorPair};
use crate::ui::console::Console;
use crate::ui::theme::Theme;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("could not save options: {0}")]
    Persist(#[source] StoreError),

    #[error("no settings to edit")]
    NoSettings,

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl SessionError {
    /// Process exit status for this failure; never zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionError::Persist(err) => err.code(),
            SessionError::NoSettings => 2,
            SessionError::Terminal(err) => err.raw_os_error().unwrap_or(5),
        }
    }
}

pub struct SessionOptions {
    pub title: String,
    pub alert_delay: Duration,
    pub theme: Theme,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using default", config.theme);
            Theme::default()
        });
        Self {
            title: config.title.clone(),
            alert_delay: Duration::from_millis(config.alert_millis),
            theme,
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Run an interactive settings session on `console` until the operator saves.
///
/// Returns the outcome of the final save. The console is restored on every
/// path out, including errors.
pub fn settings_ui(
    console: &mut dyn Console,
    store: &mut dyn SettingsStore,
    options: &SessionOptions,
) -> Result<(), SessionError> {
    let result = run(console, store, options);
    let restored = console.restore();
    result?;
    restored?;
    Ok(())
}

fn run(
    console: &mut dyn Console,
    store: &mut dyn SettingsStore,
    options: &SessionOptions,
) -> Result<(), SessionError> {
    let (width, height) = console.size()?;
    let mut canvas = Canvas::new(width, height, options.theme.clone());
    canvas.set_pair(ColorPair::Normal);
    canvas.erase();

    tracing::info!(
        "Session started on {}x{} with {} settings",
        width,
        height,
        store.settings().len()
    );

    let mut app = App::start(store, &mut canvas, &options.title, options.alert_delay)
        .map_err(|err| match err {
            StoreError::NoSettings => SessionError::NoSettings,
            other => SessionError::Persist(other),
        })?;
    app.run(store, &mut canvas, console)
}
