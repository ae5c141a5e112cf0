//! Integration tests for the SQLite storage engine

use blogpost::error::Result;
use blogpost::storage::{SqliteStorage, StorageEngine, SEED_POSTS};
use blogpost::NewPost;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn test_posts_survive_reopen() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blogs.db");

    let created = {
        let storage = SqliteStorage::new(&path);
        storage.initialize().await?;
        storage
            .insert_post(NewPost::new("Persisted", "Across restarts", "Nodira")?)
            .await?
    };

    // A second process start sees the same rows and does not re-seed
    let storage = SqliteStorage::new(&path);
    storage.initialize().await?;
    let posts = storage.list_posts().await?;
    assert_eq!(posts.len(), SEED_POSTS.len() + 1);
    assert_eq!(posts[0], created);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_inserts_get_unique_ids() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(SqliteStorage::new(dir.path().join("blogs.db")));
    storage.initialize().await?;

    let mut handles = Vec::new();
    for i in 0..16 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            let post = NewPost::new(format!("post {}", i), "body", "Ali")?;
            storage.insert_post(post).await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let post = handle.await.expect("insert task panicked")?;
        assert!(post.id > 3);
        assert!(ids.insert(post.id), "duplicate id {}", post.id);
    }

    assert_eq!(storage.list_posts().await?.len(), 3 + 16);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_initialize_seeds_once() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blogs.db");

    let first = SqliteStorage::new(&path);
    let second = SqliteStorage::new(&path);
    let (a, b) = tokio::join!(first.initialize(), second.initialize());
    a?;
    b?;

    assert_eq!(first.list_posts().await?.len(), SEED_POSTS.len());
    Ok(())
}

#[tokio::test]
async fn test_empty_table_after_manual_creation_is_seeded() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blogs.db");

    // Table exists but has no rows
    {
        let conn = rusqlite::Connection::open(&path)?;
        conn.execute_batch(
            "CREATE TABLE blogs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                author TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )?;
    }

    let storage = SqliteStorage::new(&path);
    storage.initialize().await?;
    assert_eq!(storage.list_posts().await?.len(), SEED_POSTS.len());
    Ok(())
}
