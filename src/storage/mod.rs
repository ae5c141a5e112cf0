//! Storage layer
//!
//! # Architecture
//!
//! Posts are kept in one relational table:
//!
//! ```text
//! blogs (id INTEGER PRIMARY KEY AUTOINCREMENT, title, content, author, created_at)
//! ```
//!
//! ## Storage Engine
//!
//! The `StorageEngine` trait is the whole storage contract:
//! - `initialize` creates the table if absent and seeds three sample posts
//!   when it is empty
//! - `list_posts` returns every post, newest first
//! - `get_post` looks a post up by id
//! - `insert_post` persists a validated `NewPost`, assigning `id` and
//!   `created_at` on the server side
//!
//! ## Implementation
//!
//! - **SQLite** (`SqliteStorage`) is the production engine, opening a
//!   short-lived connection per operation
//! - **In-memory** (`MockStorage`) backs handler tests

pub mod engine;
pub mod mock;
pub mod post;
pub mod sqlite;

pub use engine::{Storage, StorageEngine};
pub use mock::MockStorage;
pub use post::{BlogPost, NewPost, SEED_POSTS};
pub use sqlite::{SqliteStorage, DEFAULT_DATABASE_PATH};
