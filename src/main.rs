use clap::Parser;
use eyre::{Result, eyre};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use todostore::{Config, Renderer, TaskStore, shell};
use tracing::Level;

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "TodoStore - In-memory to-do list manager")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/todostore/todostore.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level for stderr output (overrides config)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn parse_level(level: &str) -> Result<Level> {
    level
        .parse::<Level>()
        .map_err(|_| eyre!("Invalid log level: {} (expected trace, debug, info, warn or error)", level))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // Setup tracing on stderr so logs never mix with task output
    let level = parse_level(cli.log_level.as_deref().unwrap_or(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let color = config.color && !cli.no_color;
    colored::control::set_override(color);
    let renderer = Renderer::new(color);

    let mut store = TaskStore::new();

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("TodoStore {} - type 'help' for commands, 'quit' to exit", env!("GIT_DESCRIBE"));
    }

    let mut stdout = io::stdout();
    shell::run(&mut store, &config, &renderer, stdin.lock(), &mut stdout, interactive)?;

    Ok(())
}
