mod color;
mod config;
mod error;
mod logging;
mod output;
mod ping;
mod prompt;
mod target;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use color::ColorScale;
use config::{Config, RunConfig};
use output::{OutputSink, TerminalSink};
use ping::icmp::IcmpProber;
use ping::runner::{self, Outcome};
use prompt::Prompter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(config.verbose);
    if config.no_color {
        crossterm::style::force_color_output(false);
    }

    let mut sink = TerminalSink::new(io::stdout(), !config.no_clear);

    match run_app(config, &mut sink).await {
        Ok(Outcome::Completed) => ExitCode::SUCCESS,
        Ok(Outcome::Interrupted) => {
            // A prompt may still be blocked reading stdin on a worker thread,
            // which would keep the runtime from shutting down
            std::process::exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            let _ = sink.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run_app(config: Config, sink: &mut TerminalSink<io::Stdout>) -> Result<Outcome> {
    let interactive = config.host.is_none();
    sink.clear()?;

    // Both paths may block: a name lookup for the target, or reading stdin
    let setup = tokio::task::spawn_blocking(move || -> Result<RunConfig> {
        match config.to_run_config()? {
            Some(run_config) => Ok(run_config),
            None => {
                let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
                Ok(prompter.run()?)
            }
        }
    });

    let run_config = tokio::select! {
        joined = setup => joined.context("setup task failed")??,
        _ = tokio::signal::ctrl_c() => {
            sink.interrupted()?;
            return Ok(Outcome::Interrupted);
        }
    };

    sink.set_color_scale(ColorScale::new(run_config.timeout.as_secs_f64() * 1000.0));
    if interactive {
        // Drop the banner and prompts before the table
        sink.clear()?;
    }

    let mut prober = IcmpProber::new(run_config.target.clone());
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    Ok(runner::run_until(&run_config, &mut prober, sink, shutdown).await?)
}
