//! gitbrowse - step through the history of one file
//!
//! # Usage
//! ```bash
//! gitbrowse log src/lib.rs                       # Commits touching the file
//! gitbrowse blame src/lib.rs --back 2            # Blame two commits back
//! gitbrowse map src/lib.rs --from v1 --to HEAD   # Line mapping between revisions
//! gitbrowse serve src/lib.rs --port 3001         # HTTP API holding a cursor
//! ```

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use axum::Router;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitbrowse::config::Config;
use gitbrowse::git::{FileHistory, GitRepository};
use gitbrowse::models::MappedLine;
use gitbrowse::routes;

/// Browse the commit history, blame and line movement of a single file
#[derive(Parser)]
#[command(name = "gitbrowse")]
#[command(about = "Step through the history of a single file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path inside the git repository to open. Relative file paths start here
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Git executable used for blame
    #[arg(long, global = true, env = "GITBROWSE_GIT", default_value = "git")]
    git: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the file history over HTTP
    Serve {
        file: String,
        /// Revision to start from
        #[arg(short, long, default_value = "HEAD")]
        rev: String,
        /// Port to run the server on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
    /// List the commits that touched the file, newest first
    Log {
        file: String,
        #[arg(short, long, default_value = "HEAD")]
        rev: String,
    },
    /// Show blame, optionally after stepping back through history
    Blame {
        file: String,
        #[arg(short, long, default_value = "HEAD")]
        rev: String,
        /// Number of commits to step back before blaming
        #[arg(short, long, default_value = "0")]
        back: usize,
    },
    /// Map zero-based line numbers from one revision to another
    Map {
        file: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Only map this line
        #[arg(short, long)]
        line: Option<usize>,
    },
}

fn open_history(config: &Config, file: &str, rev: &str) -> FileHistory<GitRepository> {
    let repo = match config.open_repository() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ Failed to open repository: {}", e);
            eprintln!("  Path: {}", config.repo_path.display());
            std::process::exit(1);
        }
    };

    let path = repo.relative_path(file);
    match FileHistory::open(repo, &path, rev) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_log(config: &Config, file: &str, rev: &str) {
    let history = open_history(config, file, rev);
    for commit in history.commits() {
        println!("{} {:<20} {}", commit.short_sha(), commit.author, commit.message);
    }
}

fn handle_blame(config: &Config, file: &str, rev: &str, back: usize) -> anyhow::Result<()> {
    let mut history = open_history(config, file, rev);
    for _ in 0..back {
        if !history.step_backward() {
            break;
        }
    }

    let current = history.current().clone();
    println!("{} {} - {}", current.short_sha(), current.author, current.message);
    println!();

    for line in history.blame()? {
        let marker = if line.current { '*' } else { ' ' };
        let sha = &line.sha[..line.sha.len().min(7)];
        println!("{} {} {:>5} {}", marker, sha, line.final_line, line.line);
    }
    Ok(())
}

fn handle_map(
    config: &Config,
    file: &str,
    from: &str,
    to: &str,
    line: Option<usize>,
) -> anyhow::Result<()> {
    let mut history = open_history(config, file, "HEAD");

    if let Some(line) = line {
        match history.map_line(from, to, line)? {
            MappedLine::Line(target) => println!("{} -> {}", line, target),
            MappedLine::Deleted => println!("{} -> deleted", line),
            MappedLine::OutOfRange => println!("{} -> out of range", line),
        }
        return Ok(());
    }

    let mapping = history.line_mapping(from, to)?;
    for (line, target) in &mapping.forward {
        match target {
            Some(target) => println!("{} -> {}", line, target),
            None => println!("{} -> deleted", line),
        }
    }
    Ok(())
}

async fn handle_serve(config: &Config, file: &str, rev: &str, host: &str, port: u16) -> anyhow::Result<()> {
    let history = open_history(config, file, rev);
    let path = history.path().to_string();
    let total = history.len();
    let shared = Arc::new(RwLock::new(history));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(shared))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  File:    {} ({} commits)", path, total);
    println!("  Server:  http://{}", addr);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config {
        repo_path: cli.repo,
        git_cmd: cli.git,
    };

    match cli.command {
        Commands::Serve { file, rev, port, host } => handle_serve(&config, &file, &rev, &host, port).await?,
        Commands::Log { file, rev } => handle_log(&config, &file, &rev),
        Commands::Blame { file, rev, back } => handle_blame(&config, &file, &rev, back)?,
        Commands::Map { file, from, to, line } => handle_map(&config, &file, &from, &to, line)?,
    }

    Ok(())
}
