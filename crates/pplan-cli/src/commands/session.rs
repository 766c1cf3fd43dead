//! Interactive tracking session.
//!
//! Owns one [`ProgressTracker`] for as long as the process runs. Each input
//! line is one event: it is forwarded to the tracker, toggles are followed by
//! the completion check, and the resulting state is rendered again. Nothing
//! is saved when the session ends.

use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use pplan_core::{ProgressTracker, UiConfig};
use tracing::debug;

use super::load_config;
use crate::render;

const HELP: &str = "\
commands:
  status                show the board
  check <n>             mark task n as done
  uncheck <n>           mark task n as not done
  toggle <n> [on|off]   set task n, or flip it when no value is given
  reset                 start a new day (points and level are kept)
  help                  show this help
  quit                  end the session";

#[derive(Args)]
pub struct SessionArgs {
    /// Print one JSON event per line instead of the text board
    #[arg(long)]
    pub json: bool,
    /// Starting level
    #[arg(long, default_value_t = 1)]
    pub level: u32,
    /// Starting points within the level
    #[arg(long, default_value_t = 0)]
    pub points: u32,
}

impl Default for SessionArgs {
    fn default() -> Self {
        Self {
            json: false,
            level: 1,
            points: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Status,
    Toggle { index: usize, value: Option<bool> },
    Reset,
    Help,
    Quit,
}

/// Parse a 1-based task number into a task index.
fn task_number(arg: Option<&str>, task_count: usize) -> Result<usize> {
    let arg = arg.context("missing task number")?;
    let n: usize = arg
        .parse()
        .with_context(|| format!("'{arg}' is not a task number"))?;
    if n == 0 || n > task_count {
        bail!("no task {n} (choose 1-{task_count})");
    }
    Ok(n - 1)
}

/// Returns `Ok(None)` for a blank line.
fn parse_input(line: &str, task_count: usize) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "status" | "s" => Input::Status,
        "check" | "c" => Input::Toggle {
            index: task_number(words.next(), task_count)?,
            value: Some(true),
        },
        "uncheck" | "u" => Input::Toggle {
            index: task_number(words.next(), task_count)?,
            value: Some(false),
        },
        "toggle" | "t" => {
            let index = task_number(words.next(), task_count)?;
            let value = match words.next() {
                None => None,
                Some("on" | "true" | "yes") => Some(true),
                Some("off" | "false" | "no") => Some(false),
                Some(other) => bail!("expected 'on' or 'off', got '{other}'"),
            };
            Input::Toggle { index, value }
        }
        "reset" | "new-day" => Input::Reset,
        "help" | "h" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => bail!("unknown command '{other}' (type 'help')"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument '{extra}'");
    }
    Ok(Some(input))
}

pub struct Session {
    tracker: ProgressTracker,
    ui: UiConfig,
    json: bool,
}

impl Session {
    pub fn new(tracker: ProgressTracker, ui: UiConfig, json: bool) -> Self {
        Self { tracker, ui, json }
    }

    /// Process `input` line by line until EOF or `quit`.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        interactive: bool,
    ) -> Result<()> {
        if !self.json {
            writeln!(out, "{}", render::TITLE)?;
        }
        self.render_status(out)?;

        let mut line = String::new();
        loop {
            if interactive {
                write!(out, "> ")?;
                out.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            match parse_input(&line, self.tracker.state().tasks().len()) {
                Ok(None) => continue,
                Ok(Some(Input::Quit)) => break,
                Ok(Some(command)) => self.apply(command, out)?,
                Err(e) => self.render_error(&e, out)?,
            }
        }

        if !self.json {
            let state = self.tracker.state();
            writeln!(
                out,
                "Session ended at Lv. {} with {} P.",
                state.level(),
                state.points()
            )?;
        }
        out.flush()?;
        Ok(())
    }

    fn apply<W: Write>(&mut self, command: Input, out: &mut W) -> Result<()> {
        debug!(?command, "session input");
        match command {
            Input::Status => return self.render_status(out),
            Input::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(());
            }
            Input::Toggle { index, value } => {
                let value = value.unwrap_or_else(|| {
                    self.tracker
                        .state()
                        .tasks()
                        .get(index)
                        .map_or(true, |t| !t.completed())
                });
                self.tracker.toggle_task(index, value)?;
                // Rendering reads the drained events below, not the outcome.
                let outcome = self.tracker.check_completion_and_award();
                debug!(?outcome, "completion checked");
            }
            Input::Reset => self.tracker.reset_day(),
            Input::Quit => return Ok(()),
        }

        let events = self.tracker.drain_events();
        if self.json {
            for event in &events {
                writeln!(out, "{}", serde_json::to_string(event)?)?;
            }
        } else {
            for event in &events {
                if let Some(message) = render::event_message(event, &self.ui) {
                    writeln!(out, "{message}")?;
                }
            }
            writeln!(out, "{}", render::status_board(&self.tracker, &self.ui))?;
        }
        Ok(())
    }

    fn render_status<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string(&self.tracker.snapshot())?)?;
        } else {
            writeln!(out, "{}", render::status_board(&self.tracker, &self.ui))?;
        }
        Ok(())
    }

    fn render_error<W: Write>(&self, error: &anyhow::Error, out: &mut W) -> Result<()> {
        if self.json {
            let value = serde_json::json!({ "type": "Error", "message": format!("{error:#}") });
            writeln!(out, "{value}")?;
        } else {
            writeln!(out, "error: {error:#}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Session {
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }
}

pub fn run(args: SessionArgs, explicit: Option<&Path>) -> Result<()> {
    let config = load_config(explicit)?;
    let tracker = ProgressTracker::with_progress(&config.progress, args.level, args.points)?;
    let mut session = Session::new(tracker, config.ui, args.json);

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = std::io::stdout().lock();
    session.run(stdin.lock(), &mut stdout, interactive)
}
