//! Blog records and how they become searchable rows.
//!
//! The blog keeps users and posts; the index page searches posts joined
//! with their author, so every row carries the author's `username` next to
//! the post's `title` and `body`.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::document::{Document, FieldValue};
use crate::error::{FuzzpostError, Result};

/// A blog author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author_id: u64,
    pub title: String,
    pub body: String,
    /// Creation time as stored, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

/// Users and posts held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogStore {
    users: Vec<User>,
    posts: Vec<Post>,
    #[serde(skip)]
    user_index: AHashMap<u64, usize>,
    #[serde(skip)]
    usernames: AHashSet<String>,
    #[serde(skip)]
    post_index: AHashMap<u64, usize>,
}

impl BlogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{"users": [...], "posts": [...]}` from a JSON file.
    ///
    /// Records go through the same checks as [`BlogStore::add_user`] and
    /// [`BlogStore::add_post`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let raw: BlogStore = serde_json::from_str(&content)?;

        let mut store = BlogStore::new();
        for user in raw.users {
            store.add_user(user)?;
        }
        for post in raw.posts {
            store.add_post(post)?;
        }

        log::info!(
            "Loaded {} users and {} posts from {}",
            store.users.len(),
            store.posts.len(),
            path.as_ref().display()
        );
        Ok(store)
    }

    /// Add a user. Ids and usernames are unique.
    pub fn add_user(&mut self, user: User) -> Result<()> {
        if self.user_index.contains_key(&user.id) {
            return Err(FuzzpostError::InvalidOperation(format!(
                "user id {} already exists",
                user.id
            )));
        }
        if self.usernames.contains(&user.username) {
            return Err(FuzzpostError::InvalidOperation(format!(
                "username '{}' is already taken",
                user.username
            )));
        }

        self.user_index.insert(user.id, self.users.len());
        self.usernames.insert(user.username.clone());
        self.users.push(user);
        Ok(())
    }

    /// Add a post. Its author must already exist.
    ///
    /// Author ids must fit an integer field value, since rows expose them
    /// as `author_id`.
    pub fn add_post(&mut self, post: Post) -> Result<()> {
        if i64::try_from(post.author_id).is_err() {
            return Err(FuzzpostError::InvalidOperation(format!(
                "author id {} of post {} is out of range",
                post.author_id, post.id
            )));
        }
        if !self.user_index.contains_key(&post.author_id) {
            return Err(FuzzpostError::not_found(format!(
                "author {} of post {}",
                post.author_id, post.id
            )));
        }
        if self.post_index.contains_key(&post.id) {
            return Err(FuzzpostError::InvalidOperation(format!(
                "post id {} already exists",
                post.id
            )));
        }

        self.post_index.insert(post.id, self.posts.len());
        self.posts.push(post);
        Ok(())
    }

    /// Look up a user by id.
    pub fn user(&self, id: u64) -> Option<&User> {
        self.user_index.get(&id).map(|&i| &self.users[i])
    }

    /// Look up a post by id.
    pub fn post(&self, id: u64) -> Option<&Post> {
        self.post_index.get(&id).map(|&i| &self.posts[i])
    }

    /// All users, in insertion order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All posts, in insertion order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// One row per post, joined with its author.
    ///
    /// Fields: `username`, `title`, `body`, `author_id` and `created` when known.
    pub fn rows(&self) -> Vec<Document> {
        self.posts
            .iter()
            .filter_map(|post| {
                let author = self.user(post.author_id)?;
                let author_id = i64::try_from(post.author_id).ok()?;
                let mut doc = Document::builder()
                    .id(post.id)
                    .add_text("username", author.username.as_str())
                    .add_text("title", post.title.as_str())
                    .add_text("body", post.body.as_str())
                    .add_integer("author_id", author_id)
                    .build();
                if let Some(created) = &post.created {
                    doc.add_field("created", FieldValue::Text(created.clone()));
                }
                Some(doc)
            })
            .collect()
    }
}

/// Read one JSON object per line into documents.
///
/// A numeric `"id"` key becomes the document id; otherwise the 1-based line
/// number is used. Blank lines are ignored. Lines that are not JSON objects
/// are logged and skipped, as are values with no scalar representation.
pub fn load_documents_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut documents = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let object = match serde_json::from_str::<serde_json::Value>(&line) {
            Ok(serde_json::Value::Object(object)) => object,
            Ok(other) => {
                log::warn!("Skipping line {}: expected an object, got {other}", line_num + 1);
                continue;
            }
            Err(e) => {
                log::warn!("Skipping line {}: {e}", line_num + 1);
                continue;
            }
        };

        let id = object
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(line_num as u64 + 1);
        let mut doc = Document::new(id);

        for (name, value) in &object {
            if name == "id" {
                continue;
            }
            match FieldValue::from_json(value) {
                Some(field_value) => doc.add_field(name.as_str(), field_value),
                None => log::debug!("Line {}: field '{name}' is not a scalar", line_num + 1),
            }
        }

        documents.push(doc);
    }

    log::info!(
        "Loaded {} documents from {}",
        documents.len(),
        path.as_ref().display()
    );
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn store() -> BlogStore {
        let mut store = BlogStore::new();
        store
            .add_user(User {
                id: 1,
                username: "alice".to_string(),
            })
            .unwrap();
        store
            .add_post(Post {
                id: 10,
                author_id: 1,
                title: "Hello from Alice".to_string(),
                body: "Alice writes about testing.".to_string(),
                created: Some("2024-01-01 10:00:00".to_string()),
            })
            .unwrap();
        store
    }

    #[test]
    fn test_rows_join_author() {
        let rows = store().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), 10);
        assert_eq!(rows[0].get_text("username"), Some("alice"));
        assert_eq!(rows[0].get_text("title"), Some("Hello from Alice"));
        assert_eq!(rows[0].get_field("author_id"), Some(&FieldValue::Integer(1)));
        assert_eq!(rows[0].get_text("created"), Some("2024-01-01 10:00:00"));
    }

    #[test]
    fn test_constraints() {
        let mut store = store();

        let err = store
            .add_post(Post {
                id: 11,
                author_id: 99,
                title: "orphan".to_string(),
                body: String::new(),
                created: None,
            })
            .unwrap_err();
        assert!(err.to_string().contains("Not found"));

        let err = store
            .add_user(User {
                id: 2,
                username: "alice".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, FuzzpostError::InvalidOperation(_)));

        let err = store
            .add_user(User {
                id: 1,
                username: "carol".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, FuzzpostError::InvalidOperation(_)));

        let err = store
            .add_post(Post {
                id: 10,
                author_id: 1,
                title: "again".to_string(),
                body: String::new(),
                created: None,
            })
            .unwrap_err();
        assert!(err.to_string().contains("post id 10 already exists"));

        assert_eq!(store.user(1).map(|u| u.username.as_str()), Some("alice"));
        assert_eq!(store.post(10).map(|p| p.author_id), Some(1));
        assert!(store.post(11).is_none());
    }

    #[test]
    fn test_author_id_must_fit_integer_field() {
        let mut store = store();
        let big = i64::MAX as u64 + 1;
        store
            .add_user(User {
                id: big,
                username: "mallory".to_string(),
            })
            .unwrap();

        let err = store
            .add_post(Post {
                id: 12,
                author_id: big,
                title: "wraps".to_string(),
                body: String::new(),
                created: None,
            })
            .unwrap_err();
        assert!(matches!(err, FuzzpostError::InvalidOperation(_)));
        assert!(store.post(12).is_none());
        assert!(store.rows().iter().all(|row| {
            matches!(row.get_field("author_id"), Some(FieldValue::Integer(id)) if *id >= 0)
        }));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "users": [{{"id": 1, "username": "alice"}}, {{"id": 2, "username": "bob"}}],
                "posts": [{{"id": 1, "author_id": 2, "title": "The Guide", "body": "Bob writes about deployment."}}]
            }}"#
        )
        .unwrap();

        let store = BlogStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.users().len(), 2);
        let rows = store.rows();
        assert_eq!(rows[0].get_text("username"), Some("bob"));
        assert!(!rows[0].has_field("created"));
    }

    #[test]
    fn test_load_documents_jsonl() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": 42, "title": "The Guide", "tags": ["a"]}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file, "[1, 2]").unwrap();
        writeln!(file, r#"{{"title": "Untitled", "views": 3}}"#).unwrap();

        let docs = load_documents_jsonl(file.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id(), 42);
        assert_eq!(docs[0].field_names(), vec!["title"]);
        // No id key: falls back to the line number.
        assert_eq!(docs[1].id(), 5);
        assert_eq!(docs[1].get_field("views"), Some(&FieldValue::Integer(3)));
    }
}
