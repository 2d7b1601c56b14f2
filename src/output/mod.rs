pub mod table;

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Stylize},
    terminal::{Clear, ClearType},
};

use crate::color::ColorScale;
use crate::ping::{ProbeResult, RunStats};
use table::{INDENT, Row, Summary};

/// Where the run writes its table. The core only talks to this trait, so it
/// never depends on terminal state.
pub trait OutputSink {
    /// Wipe the screen before the table is drawn
    fn clear(&mut self) -> io::Result<()>;

    fn header(&mut self) -> io::Result<()>;

    fn row(&mut self, result: &ProbeResult, target: &str) -> io::Result<()>;

    fn summary(&mut self, stats: &RunStats) -> io::Result<()>;

    /// Notice printed when the user interrupts the run
    fn interrupted(&mut self) -> io::Result<()>;

    fn error(&mut self, message: &str) -> io::Result<()>;
}

/// Colorized table on a terminal (stdout in practice)
pub struct TerminalSink<W: Write> {
    out: W,
    clear_screen: bool,
    /// Known once the run's timeout is; until then latencies are unstyled
    color_scale: Option<ColorScale>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self {
            out,
            clear_screen,
            color_scale: None,
        }
    }

    pub fn set_color_scale(&mut self, color_scale: ColorScale) {
        self.color_scale = Some(color_scale);
    }

    /// Write one complete line in a single call so an interrupt never
    /// leaves half a row behind
    fn line(&mut self, line: String) -> io::Result<()> {
        self.out.write_all(format!("{}\n", line).as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn clear(&mut self) -> io::Result<()> {
        if !self.clear_screen {
            return Ok(());
        }
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    fn header(&mut self) -> io::Result<()> {
        let header = Row::header();
        self.line(String::new())?;
        self.line(format!("{}{}", INDENT, header.plain().white().bold()))
    }

    fn row(&mut self, result: &ProbeResult, target: &str) -> io::Result<()> {
        let row = Row::from_result(result, target);
        let latency_color = match &self.color_scale {
            Some(scale) => scale.color_for_latency(result.latency_ms()),
            None => Color::Reset,
        };
        let status = if row.up {
            row.status.as_str().white()
        } else {
            row.status.as_str().red()
        };

        self.line(format!(
            "{}{}{}{}{}{}{}",
            INDENT,
            row.attempt,
            row.target,
            row.protocol,
            row.latency.as_str().with(latency_color),
            row.bytes,
            status
        ))
    }

    fn summary(&mut self, stats: &RunStats) -> io::Result<()> {
        let s = Summary::from_stats(stats);

        self.line(String::new())?;
        self.line(format!("{}{}", INDENT, Summary::title_rule().white()))?;
        self.line(format!(
            "{}{}{}{}, Received = {}, Lost = {} ({} loss)",
            INDENT,
            "Packets  : ".yellow(),
            "Sent = ".white(),
            s.sent.as_str().yellow(),
            s.received.as_str().green(),
            s.lost.as_str().red(),
            s.loss.as_str().red(),
        ))?;
        self.line(format!(
            "{}{}{}{}, Min = {}, Max = {}",
            INDENT,
            "Latency  : ".green(),
            "Avg = ".white(),
            s.avg.as_str().yellow(),
            s.min.as_str().green(),
            s.max.as_str().red(),
        ))?;
        self.line(format!("{}{}", INDENT, Summary::bottom_rule().white()))
    }

    fn interrupted(&mut self) -> io::Result<()> {
        self.line(String::new())?;
        self.line(format!("{}{}", INDENT, "User interrupted. Exiting".with(Color::Red)))
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.line(format!("Error: {}", message).red().to_string())
    }
}
