//! SQLite-backed storage engine
//!
//! Posts live in a single `blogs` table. The engine keeps no connection of
//! its own: each operation opens one on a blocking worker, runs, and drops it
//! before returning, so nothing is shared between requests. Concurrent
//! writers are serialized by SQLite's file locking.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::storage::engine::StorageEngine;
use crate::storage::post::{seed_posts, timestamp_now, BlogPost, NewPost};

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "blogs.db";

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Column additions are out of scope: there is no migration step.
const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS blogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    author TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

const INSERT_POST: &str =
    "INSERT INTO blogs (title, content, author, created_at) VALUES (?1, ?2, ?3, ?4)";

const SELECT_ALL: &str =
    "SELECT id, title, content, author, created_at FROM blogs ORDER BY id DESC";

const SELECT_ONE: &str =
    "SELECT id, title, content, author, created_at FROM blogs WHERE id = ?1";

/// File-backed storage engine
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// How long an operation waits on a locked database before failing
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `op` against a freshly opened connection on the blocking pool.
    async fn with_connection<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        let busy_timeout = self.busy_timeout;

        let result = tokio::task::spawn_blocking(move || {
            let mut conn = Connection::open(&path)?;
            conn.busy_timeout(busy_timeout)?;
            op(&mut conn)
        })
        .await?;

        Ok(result?)
    }
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[async_trait]
impl StorageEngine for SqliteStorage {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn initialize(&self) -> Result<()> {
        let seeded = self
            .with_connection(|conn| {
                conn.execute_batch(CREATE_TABLE)?;

                // IMMEDIATE takes the write lock up front so two processes
                // starting together cannot both see an empty table.
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let count: i64 = tx.query_row("SELECT COUNT(*) FROM blogs", [], |row| row.get(0))?;
                if count > 0 {
                    return Ok(0);
                }

                let created_at = timestamp_now();
                let seeds = seed_posts();
                for post in &seeds {
                    tx.execute(
                        INSERT_POST,
                        params![post.title(), post.content(), post.author(), created_at],
                    )?;
                }
                tx.commit()?;
                Ok(seeds.len())
            })
            .await?;

        if seeded > 0 {
            info!(rows = seeded, "Created posts table with sample posts");
        } else {
            debug!("Posts table already populated, skipping seed");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(SELECT_ALL)?;
            let posts = stmt
                .query_map([], post_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(posts)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>> {
        self.with_connection(move |conn| {
            conn.query_row(SELECT_ONE, params![id], post_from_row)
                .optional()
        })
        .await
    }

    #[instrument(skip(self, post), fields(author = %post.author()))]
    async fn insert_post(&self, post: NewPost) -> Result<BlogPost> {
        let created = self
            .with_connection(move |conn| {
                let created_at = timestamp_now();
                conn.execute(
                    INSERT_POST,
                    params![post.title(), post.content(), post.author(), created_at],
                )?;
                let id = conn.last_insert_rowid();
                Ok(post.into_post(id, created_at))
            })
            .await?;

        debug!(id = created.id, "Inserted post");
        Ok(created)
    }
}
