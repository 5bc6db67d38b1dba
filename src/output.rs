//! Match output.
//!
//! Every match is one line, `[x, y, z]`. Sinks are shared by all workers, so
//! each record is written under a lock in a single call.

use crate::search::volume::Coordinate;
use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Destination for matches, shared across worker threads.
pub trait MatchSink: Sync {
    fn emit(&self, coordinate: Coordinate) -> io::Result<()>;

    /// Called once after the last worker has finished.
    fn finish(&self) -> io::Result<()> {
        Ok(())
    }
}

/// When to colour match lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `Auto` colours only when stdout is a terminal.
    pub fn to_choice(self) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!("unknown color mode '{}'", other)),
        }
    }
}

/// Render a match as `[x, y, z]`.
pub fn format_coordinate(c: Coordinate) -> String {
    let mut line = String::with_capacity(40);
    // Writing into a String cannot fail
    let _ = write!(line, "[{}, {}, {}]", c.x, c.y, c.z);
    line
}

/// Writes matches to stdout, optionally coloured.
pub struct StdoutSink {
    stream: Mutex<StandardStream>,
}

impl StdoutSink {
    pub fn new(color: ColorMode) -> Self {
        Self {
            stream: Mutex::new(StandardStream::stdout(color.to_choice())),
        }
    }
}

impl MatchSink for StdoutSink {
    fn emit(&self, coordinate: Coordinate) -> io::Result<()> {
        let mut stream = self.stream.lock().unwrap_or_else(|e| e.into_inner());
        print_coordinate(&mut *stream, coordinate)?;
        stream.flush()
    }

    fn finish(&self) -> io::Result<()> {
        self.stream.lock().unwrap_or_else(|e| e.into_inner()).flush()
    }
}

fn print_coordinate<W: WriteColor>(out: &mut W, c: Coordinate) -> io::Result<()> {
    if !out.supports_color() {
        return writeln!(out, "{}", format_coordinate(c));
    }

    write!(out, "[")?;
    for (i, value) in [c.x, c.y, c.z].into_iter().enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(out, "{}", value)?;
        out.reset()?;
    }
    writeln!(out, "]")
}

/// Writes plain match lines to any writer.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> MatchSink for WriterSink<W> {
    fn emit(&self, coordinate: Coordinate) -> io::Result<()> {
        let line = format_coordinate(coordinate) + "\n";
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writer.write_all(line.as_bytes())
    }

    fn finish(&self) -> io::Result<()> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner()).flush()
    }
}

/// Keeps matches in memory.
#[derive(Default)]
pub struct CollectSink {
    matches: Mutex<Vec<Coordinate>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected matches, sorted for stable comparison.
    pub fn into_sorted(self) -> Vec<Coordinate> {
        let mut matches = self.matches.into_inner().unwrap_or_else(|e| e.into_inner());
        matches.sort();
        matches
    }
}

impl MatchSink for CollectSink {
    fn emit(&self, coordinate: Coordinate) -> io::Result<()> {
        self.matches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(coordinate);
        Ok(())
    }
}
