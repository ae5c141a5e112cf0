//! Blogpost Server Binary
//!
//! Command-line interface for the blog post service:
//! - Serving the HTTP API
//! - Initializing the database file
//! - Inspecting stored posts
//!
//! # Examples
//!
//! ```bash
//! # Start server on the default port (8000)
//! blogpost serve
//!
//! # Use another database file and port
//! BLOGPOST_DATABASE=/var/lib/blogpost/blogs.db blogpost serve --port 9000
//!
//! # Show one post
//! blogpost show 2
//! ```

use blogpost::server::{start_server, ServerConfig};
use blogpost::storage::{SqliteStorage, DEFAULT_DATABASE_PATH};
use blogpost::{BlogPost, Storage};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Blogpost - list, fetch and create blog posts over HTTP
#[derive(Parser, Debug)]
#[command(name = "blogpost")]
#[command(version = blogpost::VERSION)]
#[command(about = "Blog post CRUD service backed by SQLite", long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// SQLite database file
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_DATABASE_PATH,
        env = "BLOGPOST_DATABASE"
    )]
    database: PathBuf,

    /// Log directory path
    #[arg(long, global = true, default_value = "logs", env = "BLOGPOST_LOG_DIR")]
    log_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Create the posts table and seed sample posts if it is empty
    Init,

    /// List all posts, newest first
    List,

    /// Show a single post
    Show {
        /// Post id
        id: i64,
    },

    /// Show version
    Version,
}

/// Server configuration arguments
#[derive(Args, Debug)]
struct ServeArgs {
    /// HTTP bind address
    #[arg(short, long, default_value = "0.0.0.0", env = "BLOGPOST_BIND")]
    bind: String,

    /// HTTP port
    #[arg(short, long, default_value = "8000", env = "BLOGPOST_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = setup_logging(&cli)?;

    let storage = open_storage(&cli.database);

    match cli.command {
        Commands::Serve(args) => serve_command(storage, args).await,
        Commands::Init => init_command(storage).await,
        Commands::List => list_command(storage).await,
        Commands::Show { id } => show_command(storage, id).await,
        Commands::Version => {
            println!("blogpost {}", blogpost::VERSION);
            Ok(())
        }
    }
}

/// Setup logging with rolling files and console output
fn setup_logging(cli: &Cli) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(&cli.log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &cli.log_dir, "blogpost.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let log_level = cli
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(!cli.no_color),
        )
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    Ok(guard)
}

fn open_storage(path: &Path) -> Arc<Storage> {
    Arc::new(Storage::new(Box::new(SqliteStorage::new(path))))
}

/// Serve command - initialize storage, then start the HTTP server
async fn serve_command(storage: Arc<Storage>, args: ServeArgs) -> anyhow::Result<()> {
    info!(version = %blogpost::VERSION, "Blogpost starting");

    // A store that cannot be bootstrapped must not be served
    if let Err(e) = storage.initialize().await {
        error!(error = %e, "Failed to initialize storage");
        return Err(e.into());
    }
    info!("Storage initialized");

    let server_config = ServerConfig {
        http_addr: args.bind,
        http_port: args.port,
    };

    start_server(server_config, storage).await
}

async fn init_command(storage: Arc<Storage>) -> anyhow::Result<()> {
    storage.initialize().await?;
    let count = storage.list_posts().await?.len();
    println!("Database ready ({} posts)", count);
    Ok(())
}

async fn list_command(storage: Arc<Storage>) -> anyhow::Result<()> {
    storage.initialize().await?;
    let posts = storage.list_posts().await?;
    if posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    println!("Posts ({})", posts.len());
    println!("───────────────────────────────");
    for post in &posts {
        println!("  #{:<4} {} ({}, {})", post.id, post.title, post.author, post.created_at);
    }
    Ok(())
}

async fn show_command(storage: Arc<Storage>, id: i64) -> anyhow::Result<()> {
    storage.initialize().await?;
    match storage.get_post(id).await? {
        Some(post) => {
            print_post(&post);
            Ok(())
        }
        None => anyhow::bail!("Post {} not found", id),
    }
}

fn print_post(post: &BlogPost) {
    println!("#{} {}", post.id, post.title);
    println!("by {} at {}", post.author, post.created_at);
    println!();
    println!("{}", post.content);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_args(cli: Cli) -> ServeArgs {
        match cli.command {
            Commands::Serve(args) => args,
            other => panic!("Expected serve command, got {:?}", other),
        }
    }

    // Env overrides are process-wide, so defaults and overrides are checked in
    // one test to keep them from racing each other.
    #[test]
    fn test_database_and_port_defaults_and_env_overrides() {
        std::env::remove_var("BLOGPOST_DATABASE");
        std::env::remove_var("BLOGPOST_PORT");

        let cli = Cli::try_parse_from(["blogpost", "serve"]).unwrap();
        assert_eq!(cli.database, PathBuf::from("blogs.db"));
        assert_eq!(serve_args(cli).port, 8000);

        std::env::set_var("BLOGPOST_DATABASE", "/var/lib/blogpost/posts.db");
        std::env::set_var("BLOGPOST_PORT", "9100");
        let cli = Cli::try_parse_from(["blogpost", "serve"]).unwrap();
        assert_eq!(cli.database, PathBuf::from("/var/lib/blogpost/posts.db"));
        assert_eq!(serve_args(cli).port, 9100);

        // Explicit flags still win over the environment
        let cli =
            Cli::try_parse_from(["blogpost", "--database", "other.db", "serve", "--port", "8080"])
                .unwrap();
        assert_eq!(cli.database, PathBuf::from("other.db"));
        assert_eq!(serve_args(cli).port, 8080);

        std::env::remove_var("BLOGPOST_DATABASE");
        std::env::remove_var("BLOGPOST_PORT");
    }

    #[test]
    fn test_show_requires_integer_id() {
        assert!(Cli::try_parse_from(["blogpost", "show", "abc"]).is_err());
        let cli = Cli::try_parse_from(["blogpost", "show", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::Show { id: 2 }));
    }
}
