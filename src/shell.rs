// Line-oriented command shell driving a TaskStore

use crate::config::Config;
use crate::error::StoreError;
use crate::filter::{PriorityFilter, Query, SortKey, StatusFilter};
use crate::models::{Priority, TaskFields};
use crate::render::Renderer;
use crate::store::TaskStore;
use chrono::NaiveDate;
use clap::Parser;
use eyre::{Context, Result, eyre};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const PROMPT: &str = "todo> ";

/// One command typed at the prompt
#[derive(Debug, Parser)]
#[command(name = "todo", no_binary_name = true, disable_version_flag = true)]
pub enum ShellCommand {
    /// Add a new task
    Add {
        /// Task title (remaining words are joined)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long, value_enum)]
        priority: Option<Priority>,

        /// Due date as YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
    },

    /// Replace a task's title; options not given keep their current values
    Edit {
        id: u64,

        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long, value_enum)]
        priority: Option<Priority>,

        /// Due date as YYYY-MM-DD
        #[arg(long, value_parser = parse_date, conflicts_with = "no_due")]
        due: Option<NaiveDate>,

        /// Clear the due date
        #[arg(long)]
        no_due: bool,
    },

    /// Mark a task done, or not done again
    Toggle { id: u64 },

    /// Delete a task
    #[command(alias = "rm")]
    Delete { id: u64 },

    /// Show one task
    Show { id: u64 },

    /// List tasks
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,

        #[arg(long, value_enum)]
        priority: Option<PriorityFilter>,

        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show completion statistics
    Stats,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {} (expected YYYY-MM-DD)", s, e))
}

/// Split a command line into words; single or double quotes group words
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(eyre!("Unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

/// Run one command against the store, writing its output to `out`
///
/// Store rejections are reported on `out` and do not end the session.
pub fn execute<W: Write>(
    store: &mut TaskStore,
    config: &Config,
    renderer: &Renderer,
    command: ShellCommand,
    out: &mut W,
) -> Result<Flow> {
    debug!(?command, "execute: called");

    match command {
        ShellCommand::Add {
            title,
            description,
            priority,
            due,
        } => {
            let fields = TaskFields::new(title.join(" "))
                .description(description)
                .priority(priority.unwrap_or(config.default_priority))
                .due(due);
            match store.add(fields) {
                Ok(task) => writeln!(out, "Added task #{}: {}", task.id, task.title)?,
                Err(e) => report(out, &e)?,
            }
        }

        ShellCommand::Edit {
            id,
            title,
            description,
            priority,
            due,
            no_due,
        } => {
            let current = match store.get(id) {
                Ok(task) => task.clone(),
                Err(e) => return report(out, &e).map(|_| Flow::Continue),
            };
            let due = if no_due { None } else { due.or(current.due_date) };
            let fields = TaskFields::new(title.join(" "))
                .description(description.unwrap_or(current.description))
                .priority(priority.unwrap_or(current.priority))
                .due(due);
            match store.update(id, fields) {
                Ok(()) => writeln!(out, "Updated task #{}", id)?,
                Err(e) => report(out, &e)?,
            }
        }

        ShellCommand::Toggle { id } => match store.toggle(id) {
            Ok(true) => writeln!(out, "Task #{} completed", id)?,
            Ok(false) => writeln!(out, "Task #{} marked pending", id)?,
            Err(e) => report(out, &e)?,
        },

        ShellCommand::Delete { id } => match store.delete(id) {
            Ok(task) => writeln!(out, "Deleted task #{}: {}", task.id, task.title)?,
            Err(e) => report(out, &e)?,
        },

        ShellCommand::Show { id } => match store.get(id) {
            Ok(task) => writeln!(out, "{}", renderer.task(task))?,
            Err(e) => report(out, &e)?,
        },

        ShellCommand::List {
            status,
            priority,
            sort,
            json,
        } => {
            let defaults = config.default_query();
            let query = Query::new(
                status.unwrap_or(defaults.status),
                priority.unwrap_or(defaults.priority),
                sort.unwrap_or(defaults.sort),
            );
            let view = store.query(&query);
            if json {
                writeln!(out, "{}", renderer.json(&view)?)?;
            } else {
                writeln!(out, "{}", renderer.view(&view))?;
            }
        }

        ShellCommand::Stats => writeln!(out, "{}", renderer.stats(&store.stats()))?,

        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn report<W: Write>(out: &mut W, error: &StoreError) -> Result<()> {
    writeln!(out, "error: {}", error)?;
    Ok(())
}

/// Read commands from `input` until EOF or `quit`
///
/// Blank lines and lines starting with `#` are skipped. Parse errors are
/// printed and the session continues.
pub fn run<R: BufRead, W: Write>(
    store: &mut TaskStore,
    config: &Config,
    renderer: &Renderer,
    input: R,
    out: &mut W,
    interactive: bool,
) -> Result<()> {
    info!(interactive, "Session started");

    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        let command = match ShellCommand::try_parse_from(words) {
            Ok(command) => command,
            Err(e) => {
                write!(out, "{}", e)?;
                continue;
            }
        };

        if execute(store, config, renderer, command, out)? == Flow::Quit {
            break;
        }
    }

    info!(tasks = store.len(), "Session ended");
    Ok(())
}
