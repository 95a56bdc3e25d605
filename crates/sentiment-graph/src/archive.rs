use crate::error::ArchiveError;
use crate::post::ClassifiedPost;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One archived, classified post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedPost {
    pub id: String,
    pub author_name: String,
    pub author_username: String,
    pub text: String,
    /// RFC 3339
    pub created_at: String,
    pub sentiment: String,
    pub search_topic: String,
}

impl From<&ClassifiedPost> for ArchivedPost {
    fn from(c: &ClassifiedPost) -> Self {
        Self {
            id: c.post.id.clone(),
            author_name: c.post.author_name().to_string(),
            author_username: c.post.author_handle.clone(),
            text: c.post.text.clone(),
            created_at: c.post.created_at.to_rfc3339(),
            sentiment: c.sentiment.label().to_string(),
            search_topic: c.search_topic.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
struct ArchiveSnapshot {
    posts: Vec<ArchivedPost>,
}

/// Insert-or-ignore store of classified posts keyed by post id, persisted
/// as a bincode snapshot.
pub struct PostArchive {
    path: PathBuf,
    posts: Vec<ArchivedPost>,
    by_id: HashMap<String, usize>,
}

impl PostArchive {
    /// Opens the archive at `path`; a missing file is an empty archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            let data = fs::read(&path)?;
            let snapshot: ArchiveSnapshot = bincode::deserialize(&data)?;
            info!(path = %path.display(), posts = snapshot.posts.len(), "archive loaded");
            snapshot
        } else {
            ArchiveSnapshot::default()
        };

        let by_id = snapshot
            .posts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Ok(Self {
            path,
            posts: snapshot.posts,
            by_id,
        })
    }

    /// Returns false when a post with the same id is already archived; the
    /// stored record is left as it was.
    pub fn insert(&mut self, post: ArchivedPost) -> bool {
        if self.by_id.contains_key(&post.id) {
            debug!(id = %post.id, "post already archived");
            return false;
        }
        self.by_id.insert(post.id.clone(), self.posts.len());
        self.posts.push(post);
        true
    }

    /// Inserts every post, returning how many were new.
    pub fn insert_all<'a>(&mut self, posts: impl IntoIterator<Item = &'a ClassifiedPost>) -> usize {
        posts
            .into_iter()
            .filter(|c| self.insert(ArchivedPost::from(*c)))
            .count()
    }

    pub fn save(&self) -> Result<(), ArchiveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let snapshot = ArchiveSnapshot {
            posts: self.posts.clone(),
        };
        let data = bincode::serialize(&snapshot)?;
        fs::write(&self.path, data)?;
        debug!(path = %self.path.display(), posts = self.posts.len(), "archive saved");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ArchivedPost> {
        self.by_id.get(id).map(|&i| &self.posts[i])
    }

    pub fn by_topic<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a ArchivedPost> + 'a {
        self.posts.iter().filter(move |p| p.search_topic == topic)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::fixtures::post;
    use crate::sentiment::Sentiment;

    fn classified(id: &str, text: &str, topic: &str) -> ClassifiedPost {
        ClassifiedPost {
            post: post(id, text, "alice", &[]),
            sentiment: Sentiment::Positive,
            search_topic: topic.to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PostArchive::open(dir.path().join("none.archive")).unwrap();
        assert!(archive.is_empty());
    }

    #[test]
    fn test_insert_ignores_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = PostArchive::open(dir.path().join("a.archive")).unwrap();

        assert!(archive.insert(ArchivedPost::from(&classified("1", "first", "ai"))));
        assert!(!archive.insert(ArchivedPost::from(&classified("1", "second", "ai"))));
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.get("1").unwrap().text, "first");
        assert_eq!(archive.get("1").unwrap().sentiment, "Positive");
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("posts.archive");

        let mut archive = PostArchive::open(&path).unwrap();
        let batch = vec![classified("1", "a", "ai"), classified("2", "b", "rust")];
        assert_eq!(archive.insert_all(&batch), 2);
        assert_eq!(archive.insert_all(&batch), 0);
        archive.save().unwrap();

        let reopened = PostArchive::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.by_topic("rust").count(), 1);
        assert_eq!(reopened.get("2").unwrap().author_username, "alice");
    }

    #[test]
    fn test_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.archive");
        std::fs::write(&path, [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]).unwrap();
        assert!(matches!(PostArchive::open(&path), Err(ArchiveError::Codec(_))));
    }
}
