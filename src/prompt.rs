//! Interactive setup used when no host is given on the command line.
//!
//! Validation is shared with the CLI flags through [`parse_positive`] and
//! [`is_valid_target`]; invalid answers are reported and asked again.

use std::io::{BufRead, Write};

use crossterm::style::Stylize;

use crate::config::{
    DEFAULT_COUNT, DEFAULT_INTERVAL_MS, DEFAULT_TIMEOUT_MS, RunConfig, parse_positive,
};
use crate::error::PromptError;
use crate::target::is_valid_target;

const BANNER: [&str; 6] = [
    "██████╗ ██╗███╗   ██╗ ██████╗ ███████╗██████╗ ",
    "██╔══██╗██║████╗  ██║██╔════╝ ██╔════╝██╔══██╗",
    "██████╔╝██║██╔██╗ ██║██║  ███╗█████╗  ██████╔╝",
    "██╔═══╝ ██║██║╚██╗██║██║   ██║██╔══╝  ██╔══██╗",
    "██║     ██║██║ ╚████║╚██████╔╝███████╗██║  ██║",
    "╚═╝     ╚═╝╚═╝  ╚═══╝ ╚═════╝ ╚══════╝╚═╝  ╚═╝",
];

const BANNER_INDENT: &str = "                    ";
const PROMPT_INDENT: &str = "                                ";
const ERROR_INDENT: &str = "                             ";

/// Asks for the run settings on `input`, writing prompts to `output`
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Banner, wait for Enter, then host, count, interval and timeout
    pub fn run(&mut self) -> Result<RunConfig, PromptError> {
        self.banner()?;
        self.ask("Press [Enter] to start")?;

        let host = self.host()?;
        let count = self.positive(
            "Number of pings : [default 10]: ",
            DEFAULT_COUNT,
            "Invalid number of pings!",
        )?;
        let interval = self.positive(
            "Ping interval : [default 500]ms: ",
            DEFAULT_INTERVAL_MS,
            "Invalid interval!",
        )?;
        let timeout = self.positive(
            "Ping timeout : [default 1000]ms: ",
            DEFAULT_TIMEOUT_MS,
            "Invalid timeout value!",
        )?;

        Ok(RunConfig::new(host, count, interval, timeout)?)
    }

    fn banner(&mut self) -> Result<(), PromptError> {
        writeln!(self.output)?;
        for line in BANNER {
            writeln!(self.output, "{}{}", BANNER_INDENT, line.white())?;
        }
        Ok(())
    }

    /// Print a prompt and read one line, without its line ending
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{}{}", PROMPT_INDENT, prompt.white())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn complain(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{}{}", ERROR_INDENT, message.red())?;
        Ok(())
    }

    fn host(&mut self) -> Result<String, PromptError> {
        loop {
            let answer = self.ask("Enter host or IP : ")?;
            if is_valid_target(&answer) {
                return Ok(answer.trim().to_string());
            }
            tracing::debug!(answer = %answer, "rejected host");
            self.complain("Invalid host or IP")?;
        }
    }

    /// Ask until the answer is empty (take `default`) or a positive integer
    fn positive(&mut self, prompt: &str, default: u64, invalid: &str) -> Result<u64, PromptError> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.is_empty() {
                return Ok(default);
            }
            match parse_positive(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(answer = %answer, error = %e, "rejected value");
                    self.complain(invalid)?;
                }
            }
        }
    }
}
