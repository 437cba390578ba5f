//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::path::Path;

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy)]
enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Error => "\u{2717}",   // ✗
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }
}

/// Manages CLI output based on configuration.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet and JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silenced() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Level::Success, msg)
    }

    /// Errors are printed even in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Level::Error, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Level::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Level::Info, msg)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silenced() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Indented path, directories dimmed.
    pub fn path(&self, path: &Path) -> io::Result<()> {
        if self.silenced() {
            return Ok(());
        }
        let shown = path.display().to_string();
        let line = match (self.no_color, shown.rsplit_once('/')) {
            (false, Some((dir, file))) => format!("  {}{}", format!("{dir}/").dimmed(), file),
            _ => format!("  {shown}"),
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout, printed regardless of `--quiet`.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn silenced(&self) -> bool {
        self.quiet || self.format == OutputFormat::Json
    }

    fn status(&self, level: Level, msg: &str) -> io::Result<()> {
        if self.silenced() && !matches!(level, Level::Error) {
            return Ok(());
        }
        let symbol = level.symbol();
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            match level {
                Level::Success => format!("{} {}", symbol.green().bold(), msg.green()),
                Level::Error => format!("{} {}", symbol.red().bold(), msg.red()),
                Level::Warning => format!("{} {}", symbol.yellow().bold(), msg.yellow()),
                Level::Info => format!("{} {}", symbol.blue().bold(), msg.blue()),
            }
        };
        self.term.write_line(&line)
    }
}
