//! Mock storage for testing
//!
//! This module provides a simple in-memory storage implementation
//! for testing purposes.

use crate::error::{Error, Result};
use crate::storage::engine::StorageEngine;
use crate::storage::post::{seed_posts, timestamp_now, BlogPost, NewPost};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    posts: Vec<BlogPost>,
    last_id: i64,
}

/// In-memory mock storage for testing
#[derive(Clone, Default)]
pub struct MockStorage {
    state: Arc<Mutex<MockState>>,
    failing: bool,
}

impl MockStorage {
    /// Create a new mock storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose every operation fails with a storage error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Get the number of posts stored
    pub fn len(&self) -> usize {
        self.lock().map(|s| s.posts.len()).unwrap_or(0)
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, MockState>> {
        if self.failing {
            return Err(Error::Storage("mock storage unavailable".to_string()));
        }
        self.state
            .lock()
            .map_err(|_| Error::Internal("mock storage lock poisoned".to_string()))
    }
}

fn push(state: &mut MockState, post: NewPost, created_at: String) -> BlogPost {
    state.last_id += 1;
    let stored = post.into_post(state.last_id, created_at);
    state.posts.push(stored.clone());
    stored
}

#[async_trait]
impl StorageEngine for MockStorage {
    async fn initialize(&self) -> Result<()> {
        let mut state = self.lock()?;
        if state.posts.is_empty() {
            let created_at = timestamp_now();
            for post in seed_posts() {
                push(&mut state, post, created_at.clone());
            }
        }
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        let state = self.lock()?;
        Ok(state.posts.iter().rev().cloned().collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>> {
        let state = self.lock()?;
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_post(&self, post: NewPost) -> Result<BlogPost> {
        let mut state = self.lock()?;
        Ok(push(&mut state, post, timestamp_now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_storage_basic_ops() -> Result<()> {
        let storage = MockStorage::new();
        assert!(storage.is_empty());

        let created = storage.insert_post(NewPost::new("t", "c", "a")?).await?;
        assert_eq!(created.id, 1);
        assert_eq!(storage.get_post(1).await?, Some(created));
        assert_eq!(storage.get_post(2).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_storage_seeds_once() -> Result<()> {
        let storage = MockStorage::new();
        storage.initialize().await?;
        storage.initialize().await?;
        assert_eq!(storage.len(), 3);

        let next = storage.insert_post(NewPost::new("t", "c", "a")?).await?;
        assert_eq!(next.id, 4);
        assert_eq!(storage.list_posts().await?[0].id, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let storage = MockStorage::failing();
        assert!(matches!(storage.list_posts().await, Err(Error::Storage(_))));
        assert!(matches!(storage.initialize().await, Err(Error::Storage(_))));
    }
}
