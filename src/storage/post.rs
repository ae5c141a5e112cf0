//! Blog post records

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A stored blog post.
///
/// `id` and `created_at` are assigned by the storage engine on insert and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: String,
}

/// A validated creation payload.
///
/// Only constructible through [`NewPost::new`], so every value that reaches a
/// storage engine has non-empty `title`, `content` and `author`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    author: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Self> {
        let post = Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
        };

        for (field, value) in [
            ("title", &post.title),
            ("content", &post.content),
            ("author", &post.author),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidArgument(format!("{} must not be empty", field)));
            }
        }

        Ok(post)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Attach the storage-assigned identity.
    pub fn into_post(self, id: i64, created_at: String) -> BlogPost {
        BlogPost {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
            created_at,
        }
    }
}

/// Demonstration rows inserted into an empty table: (title, content, author).
pub const SEED_POSTS: [(&str, &str, &str); 3] = [
    (
        "FastAPI bilan RESTful API qurish",
        "FastAPI - bu zamonaviy va tez Python web framework. Unda type hints va async/await qo'llab-quvvatlanadi.",
        "Sevara",
    ),
    (
        "Python dasturlashni o'rganish",
        "Python - bu eng oson o'rganish uchun mos bo'lgan dasturlash tili. Uni har xil sohalarda ishlatish mumkin.",
        "Ali",
    ),
    (
        "Veb sayt qurish asoslar",
        "Frontend va backend qo'llab-quvvatlovchi naqshni tushunish veb sayt qurish uchun muhim.",
        "Nodira",
    ),
];

/// The seed rows as validated payloads, in insertion order.
pub fn seed_posts() -> Vec<NewPost> {
    SEED_POSTS
        .iter()
        .map(|(title, content, author)| NewPost {
            title: (*title).to_string(),
            content: (*content).to_string(),
            author: (*author).to_string(),
        })
        .collect()
}

/// Current server time as an ISO-8601 (RFC 3339) UTC string.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_accepts_populated_fields() {
        let post = NewPost::new("Title", "Body", "Ali").unwrap();
        assert_eq!(post.title(), "Title");
        assert_eq!(post.content(), "Body");
        assert_eq!(post.author(), "Ali");
    }

    #[test]
    fn test_new_post_rejects_empty_fields() {
        for (title, content, author) in [("", "c", "a"), ("t", "", "a"), ("t", "c", "")] {
            let err = NewPost::new(title, content, author).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "got {:?}", err);
        }
    }

    #[test]
    fn test_new_post_keeps_whitespace_verbatim() {
        let post = NewPost::new(" ", "\n", "\t").unwrap();
        assert_eq!(post.title(), " ");
        assert_eq!(post.content(), "\n");
        assert_eq!(post.author(), "\t");
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let ts = timestamp_now();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok(), "bad timestamp {}", ts);
    }

    #[test]
    fn test_seed_authors() {
        let authors: Vec<_> = seed_posts().iter().map(|p| p.author().to_string()).collect();
        assert_eq!(authors, vec!["Sevara", "Ali", "Nodira"]);
    }
}
