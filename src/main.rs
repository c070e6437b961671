use clap::Parser;
use sqlplay::cli::Shell;
use sqlplay::{Config, FileStore, KeyValueStore, MemoryStore, Playground};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "sqlplay")]
#[command(about = "In-memory SQL playground", long_about = None)]
struct Args {
    /// Directory for the saved catalog and line history
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file (default: ./sqlplay.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep everything in memory; nothing is read or saved
    #[arg(long)]
    memory: bool,

    /// Run a statement and exit (repeatable)
    #[arg(short = 'e', long = "execute")]
    execute: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_file(path)?,
        None => Config::load(&std::env::current_dir()?)?,
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if args.memory {
        config.persist = false;
    }

    // Logs go to stderr so query output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| sqlplay::config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if config.persist {
        let store = FileStore::in_dir(&config.data_dir)?;
        let location = store.path().display().to_string();
        tracing::info!("Using store {}", location);
        let history = config.history_path();
        start(store, location, Some(history), &args.execute)
    } else {
        start(MemoryStore::new(), "memory".to_string(), None, &args.execute)
    }
}

fn start<S: KeyValueStore>(
    store: S,
    location: String,
    history: Option<PathBuf>,
    statements: &[String],
) -> anyhow::Result<()> {
    let playground = Playground::open(store)?;
    let mut shell = Shell::new(playground, location);

    if !statements.is_empty() {
        // The failing statement has already been reported
        if shell.execute_all(statements).is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    if let Some(path) = history {
        shell = shell.with_history_file(path);
    }
    shell.run_interactive()
}
