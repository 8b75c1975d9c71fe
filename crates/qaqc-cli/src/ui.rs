//! Table rendering preferences, fixed once per invocation from the global
//! flags and the terminal the process was started in.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrowest `COLUMNS` value honored; anything smaller renders unwrapped.
const MIN_TABLE_WIDTH: usize = 40;

/// How table output is drawn. JSON and raw output ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TablePrefs {
    /// Color verdict and status cells.
    pub color: bool,
    /// Wrap tables to this many columns.
    pub max_width: Option<usize>,
}

/// What the process knows about where stdout goes.
#[derive(Clone, Debug, Default)]
pub struct Terminal {
    pub is_tty: bool,
    pub no_color: bool,
    pub columns: Option<String>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            is_tty: std::io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS").ok(),
        }
    }
}

impl TablePrefs {
    #[must_use]
    pub fn resolve(flags: &GlobalFlags, terminal: &Terminal) -> Self {
        let table = flags.format == OutputFormat::Table;
        let color = table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => terminal.is_tty && !flags.quiet && !terminal.no_color,
            };
        let max_width = terminal
            .columns
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width >= MIN_TABLE_WIDTH);
        Self { color, max_width }
    }
}

static TABLE_PREFS: OnceLock<TablePrefs> = OnceLock::new();

/// Fix the table preferences for this run. Later calls are ignored.
pub fn init(flags: &GlobalFlags) {
    let _ = TABLE_PREFS.set(TablePrefs::resolve(flags, &Terminal::detect()));
}

/// Preferences set by [`init`], or plain uncolored tables before it runs.
#[must_use]
pub fn prefs() -> TablePrefs {
    TABLE_PREFS.get().copied().unwrap_or_default()
}
