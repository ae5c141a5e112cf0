//! Storage engine trait

use crate::error::Result;
use crate::storage::post::{BlogPost, NewPost};
use async_trait::async_trait;

/// Storage engine trait
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Create the posts table if absent and seed it when empty.
    ///
    /// Safe to call on every start: a populated table is left untouched.
    async fn initialize(&self) -> Result<()>;

    /// All posts, newest (highest id) first
    async fn list_posts(&self) -> Result<Vec<BlogPost>>;

    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>>;

    /// Persist a post, assigning `id` and `created_at`
    async fn insert_post(&self, post: NewPost) -> Result<BlogPost>;
}

/// Main storage interface
pub struct Storage {
    engine: Box<dyn StorageEngine>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish()
    }
}

impl Storage {
    pub fn new(engine: Box<dyn StorageEngine>) -> Self {
        Self { engine }
    }

    pub async fn initialize(&self) -> Result<()> {
        self.engine.initialize().await
    }

    pub async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        self.engine.list_posts().await
    }

    pub async fn get_post(&self, id: i64) -> Result<Option<BlogPost>> {
        self.engine.get_post(id).await
    }

    pub async fn insert_post(&self, post: NewPost) -> Result<BlogPost> {
        self.engine.insert_post(post).await
    }
}
